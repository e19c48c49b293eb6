//! AWS SSM Parameter Store source.
//!
//! Captures the `/zana/<environment>/` namespace from SSM. Values are
//! decrypted on read so existence checks also cover `SecureString`
//! parameters backed by the managed key service.

use async_trait::async_trait;
use aws_sdk_ssm::Client;
use tracing::{debug, info};

use crate::config::{Environment, APP_NAMESPACE};
use crate::error::{Result, StoreError, ZanaDeployError};

use super::snapshot::ParameterSnapshot;
use super::source::ParameterSource;

/// SSM-backed parameter source.
#[derive(Debug)]
pub struct SsmParameterSource {
    /// SSM client.
    client: Client,
}

impl SsmParameterSource {
    /// Creates a new SSM parameter source.
    pub async fn new(region: Option<&str>) -> Self {
        let config = if let Some(region_str) = region {
            aws_config::from_env()
                .region(aws_config::Region::new(region_str.to_string()))
                .load()
                .await
        } else {
            aws_config::load_from_env().await
        };

        Self {
            client: Client::new(&config),
        }
    }

    /// Creates a source with an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns the namespace path fetched for an environment.
    #[must_use]
    pub fn namespace(environment: &Environment) -> String {
        format!("/{APP_NAMESPACE}/{environment}/")
    }
}

#[async_trait]
impl ParameterSource for SsmParameterSource {
    async fn fetch(&self, environment: &Environment) -> Result<ParameterSnapshot> {
        let namespace = Self::namespace(environment);
        info!("Capturing SSM parameters under: {namespace}");

        let mut snapshot = ParameterSnapshot::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .get_parameters_by_path()
                .path(&namespace)
                .recursive(false)
                .with_decryption(true)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| {
                    ZanaDeployError::Store(StoreError::ssm(format!(
                        "get_parameters_by_path failed for {namespace}: {e}"
                    )))
                })?;

            for parameter in response.parameters() {
                if let (Some(name), Some(value)) = (parameter.name(), parameter.value()) {
                    snapshot.insert(name, value);
                }
            }

            next_token = response.next_token().map(String::from);
            if next_token.is_none() {
                break;
            }
        }

        debug!(
            "Captured {} parameters for environment '{environment}'",
            snapshot.len()
        );
        Ok(snapshot)
    }

    fn source_type(&self) -> &'static str {
        "ssm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_is_environment_scoped() {
        assert_eq!(
            SsmParameterSource::namespace(&Environment::new("test")),
            "/zana/test/"
        );
    }
}
