//! Deployment context loaded once at process entry.
//!
//! The target account, region, and environment come from process-level
//! variables. Only the environment selector has a default; the account and
//! region are mandatory. The loaded context is immutable for the lifetime
//! of a composition run and is passed explicitly to the composition root.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Environment variable holding the deployment account id.
pub const ENV_VAR_ACCOUNT: &str = "CDK_DEFAULT_ACCOUNT";

/// Environment variable holding the deployment region.
pub const ENV_VAR_REGION: &str = "CDK_DEFAULT_REGION";

/// Environment variable selecting the Zana environment.
pub const ENV_VAR_ENVIRONMENT: &str = "ZANA_ENV";

/// Environment used when `ZANA_ENV` is absent.
///
/// The single place in the system where a configuration default is permitted.
pub const DEFAULT_ENVIRONMENT: &str = "prod";

/// A named deployment environment (e.g. "prod", "test").
///
/// Selects the namespace of configuration parameters for one composition run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment(String);

impl Environment {
    /// Creates an environment from a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Reads the environment from `ZANA_ENV`, falling back to `prod`.
    #[must_use]
    pub fn from_env() -> Self {
        let name = std::env::var(ENV_VAR_ENVIRONMENT)
            .unwrap_or_else(|_| String::from(DEFAULT_ENVIRONMENT));
        debug!("Selected environment: {name}");
        Self(name)
    }

    /// Returns the environment name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Immutable per-run deployment context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployContext {
    /// Deployment account identifier.
    pub account: String,
    /// Deployment region.
    pub region: String,
    /// Target environment.
    pub environment: Environment,
}

impl DeployContext {
    /// Creates a context from explicit values.
    #[must_use]
    pub fn new(
        account: impl Into<String>,
        region: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
            environment,
        }
    }

    /// Loads the context from process-level variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the account or region variable is missing. The
    /// environment selector falls back to [`DEFAULT_ENVIRONMENT`].
    pub fn from_env() -> Result<Self> {
        let account = require_env(ENV_VAR_ACCOUNT)?;
        let region = require_env(ENV_VAR_REGION)?;
        let environment = Environment::from_env();

        Ok(Self {
            account,
            region,
            environment,
        })
    }
}

/// Reads a mandatory environment variable.
fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| {
        ConfigError::MissingEnvVar {
            name: name.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_display() {
        let env = Environment::new("test");
        assert_eq!(env.as_str(), "test");
        assert_eq!(env.to_string(), "test");
    }

    #[test]
    fn test_context_from_explicit_values() {
        let context = DeployContext::new("123456789012", "eu-central-1", Environment::new("test"));
        assert_eq!(context.account, "123456789012");
        assert_eq!(context.region, "eu-central-1");
        assert_eq!(context.environment.as_str(), "test");
    }
}
