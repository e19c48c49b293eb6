//! Environment-scoped parameter resolution.
//!
//! Parameters live in the external store under `/zana/<environment>/<key>`.
//! The resolver builds paths deterministically and checks them against the
//! captured snapshot: a present path resolves to an opaque deferred
//! reference, a missing path aborts composition. Nothing here defaults.

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::store::ParameterSnapshot;

use super::context::Environment;
use super::value::ConfigValue;

/// Parameter namespace prefix shared by all environments.
pub const APP_NAMESPACE: &str = "zana";

/// Logical configuration keys, environment-scoped under `/zana/<env>/`.
pub mod keys {
    /// Comma-separated list of allowed CORS origins.
    pub const CORS_ALLOW_ORIGINS: &str = "cors-allow-origins";
    /// Id of the pre-existing hosted zone.
    pub const HOSTED_ZONE_ID: &str = "hosted-zone-id";
    /// Name of the pre-existing hosted zone.
    pub const HOSTED_ZONE_NAME: &str = "hosted-zone-name";
    /// ARN of the TLS certificate fronting the distribution.
    pub const CERTIFICATE_ARN: &str = "certificate-arn";
    /// Public hostname of the API.
    pub const API_HOST: &str = "api-host";
    /// ARN of the parameters-and-secrets Lambda extension layer.
    pub const LAMBDA_SSM_EXTENSION_ARN: &str = "lambda-ssm-extension-arn";
    /// ARN of the Lambda Insights extension layer.
    pub const LAMBDA_INSIGHTS_EXTENSION_ARN: &str = "lambda-insights-extension-arn";
}

/// Every key a composition run resolves. Used by `validate` and the
/// snapshot sources to report gaps before composition starts.
pub const REQUIRED_KEYS: &[&str] = &[
    keys::CORS_ALLOW_ORIGINS,
    keys::HOSTED_ZONE_ID,
    keys::HOSTED_ZONE_NAME,
    keys::CERTIFICATE_ARN,
    keys::API_HOST,
    keys::LAMBDA_SSM_EXTENSION_ARN,
    keys::LAMBDA_INSIGHTS_EXTENSION_ARN,
];

/// Builds the namespaced store path for a logical key.
#[must_use]
pub fn parameter_path(environment: &Environment, key: &str) -> String {
    format!("/{APP_NAMESPACE}/{environment}/{key}")
}

/// Resolves environment-scoped settings against a store snapshot.
#[derive(Debug)]
pub struct ConfigResolver<'a> {
    /// Target environment.
    environment: &'a Environment,
    /// Point-in-time capture of the external store.
    snapshot: &'a ParameterSnapshot,
}

impl<'a> ConfigResolver<'a> {
    /// Creates a resolver over a snapshot for one environment.
    #[must_use]
    pub const fn new(environment: &'a Environment, snapshot: &'a ParameterSnapshot) -> Self {
        Self {
            environment,
            snapshot,
        }
    }

    /// Returns the environment this resolver is scoped to.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        self.environment
    }

    /// Resolves a logical key into an opaque deferred reference.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingParameter` if the store snapshot cannot
    /// satisfy the namespaced path.
    pub fn resolve(&self, key: &str) -> Result<ConfigValue> {
        let path = self.require(key)?;
        debug!("Resolved {key} -> {path} (deferred)");
        Ok(ConfigValue::deferred(path))
    }

    /// Resolves a logical key into its snapshot value.
    ///
    /// Only for the rare parameter whose individual parts the composition
    /// itself needs (the CORS origin list); everything else stays deferred.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingParameter` if the store snapshot cannot
    /// satisfy the namespaced path.
    pub fn resolve_string(&self, key: &str) -> Result<String> {
        let path = self.require(key)?;
        let value = self
            .snapshot
            .get(&path)
            .ok_or_else(|| ConfigError::missing(&path))?;
        debug!("Resolved {key} -> {path} (literal)");
        Ok(value.to_string())
    }

    /// Checks the snapshot for a key's path and returns the path.
    fn require(&self, key: &str) -> Result<String> {
        let path = parameter_path(self.environment, key);
        if self.snapshot.contains(&path) {
            Ok(path)
        } else {
            Err(ConfigError::missing(&path).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZanaDeployError;

    fn snapshot_for(environment: &Environment, entries: &[(&str, &str)]) -> ParameterSnapshot {
        let mut snapshot = ParameterSnapshot::new();
        for (key, value) in entries {
            snapshot.insert(parameter_path(environment, key), (*value).to_string());
        }
        snapshot
    }

    #[test]
    fn test_parameter_path_is_environment_scoped() {
        let env = Environment::new("test");
        assert_eq!(
            parameter_path(&env, keys::API_HOST),
            "/zana/test/api-host"
        );
    }

    #[test]
    fn test_resolve_returns_deferred_reference() {
        let env = Environment::new("prod");
        let snapshot = snapshot_for(&env, &[(keys::CERTIFICATE_ARN, "arn:aws:acm:...")]);
        let resolver = ConfigResolver::new(&env, &snapshot);

        let value = resolver.resolve(keys::CERTIFICATE_ARN).unwrap();
        assert_eq!(
            value,
            ConfigValue::deferred("/zana/prod/certificate-arn")
        );
    }

    #[test]
    fn test_resolve_missing_path_fails() {
        let env = Environment::new("prod");
        let snapshot = ParameterSnapshot::new();
        let resolver = ConfigResolver::new(&env, &snapshot);

        let err = resolver.resolve(keys::HOSTED_ZONE_ID).unwrap_err();
        match err {
            ZanaDeployError::Config(ConfigError::MissingParameter { path }) => {
                assert_eq!(path, "/zana/prod/hosted-zone-id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_string_returns_snapshot_value() {
        let env = Environment::new("test");
        let snapshot = snapshot_for(
            &env,
            &[(keys::CORS_ALLOW_ORIGINS, "https://a.example,https://b.example")],
        );
        let resolver = ConfigResolver::new(&env, &snapshot);

        let value = resolver.resolve_string(keys::CORS_ALLOW_ORIGINS).unwrap();
        assert_eq!(value, "https://a.example,https://b.example");
    }

    #[test]
    fn test_every_required_key_missing_is_fatal() {
        let env = Environment::new("test");
        let snapshot = ParameterSnapshot::new();
        let resolver = ConfigResolver::new(&env, &snapshot);

        for key in REQUIRED_KEYS {
            assert!(resolver.resolve(key).is_err(), "{key} should be required");
        }
    }
}
