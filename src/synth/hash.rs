//! Deterministic hashing of composed graphs for change detection.

use sha2::{Digest, Sha256};

use crate::error::{Result, ZanaDeployError};
use crate::graph::ResourceGraph;

/// Hasher for composed resource graphs.
///
/// The hash covers the declared resources and the context they were composed
/// for, never render timestamps: two runs over an identical snapshot hash
/// identically.
#[derive(Debug, Default)]
pub struct GraphHasher;

impl GraphHasher {
    /// Computes the content hash of a composed graph.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource cannot be serialized.
    pub fn hash(graph: &ResourceGraph) -> Result<String> {
        let mut hasher = Sha256::new();

        hasher.update(graph.context.account.as_bytes());
        hasher.update(graph.context.region.as_bytes());
        hasher.update(graph.context.environment.as_str().as_bytes());

        // Struct field order and BTreeMap key order make the JSON stable.
        let resources = serde_json::to_string(graph).map_err(|e| {
            ZanaDeployError::internal(format!("Failed to serialize graph for hashing: {e}"))
        })?;
        hasher.update(resources.as_bytes());

        Ok(hex::encode(hasher.finalize()))
    }

    /// Computes a short hash (first 8 characters) for display purposes.
    #[must_use]
    pub fn short_hash(hash: &str) -> String {
        hash.chars().take(8).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::CompositionRoot;
    use crate::config::{keys, DeployContext, Environment};
    use crate::store::ParameterSnapshot;

    fn composed_graph(environment: &str, api_host: &str) -> ResourceGraph {
        let env = Environment::new(environment);
        let snapshot = ParameterSnapshot::new()
            .with_key(&env, keys::CORS_ALLOW_ORIGINS, "https://zana.example")
            .with_key(&env, keys::HOSTED_ZONE_ID, "Z123")
            .with_key(&env, keys::HOSTED_ZONE_NAME, "zana.example")
            .with_key(&env, keys::CERTIFICATE_ARN, "arn:acm:cert")
            .with_key(&env, keys::API_HOST, api_host)
            .with_key(&env, keys::LAMBDA_SSM_EXTENSION_ARN, "arn:ssm-ext")
            .with_key(&env, keys::LAMBDA_INSIGHTS_EXTENSION_ARN, "arn:insights-ext");
        let context = DeployContext::new("123456789012", "eu-central-1", env);
        CompositionRoot::new(context, snapshot).compose().unwrap()
    }

    #[test]
    fn test_graph_hash_is_deterministic() {
        let graph = composed_graph("test", "api.zana.example");

        let first = GraphHasher::hash(&graph).unwrap();
        let second = GraphHasher::hash(&graph).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_different_environments_hash_differently() {
        let test = composed_graph("test", "api.zana.example");
        let prod = composed_graph("prod", "api.zana.example");

        assert_ne!(
            GraphHasher::hash(&test).unwrap(),
            GraphHasher::hash(&prod).unwrap()
        );
    }

    #[test]
    fn test_short_hash() {
        let graph = composed_graph("test", "api.zana.example");
        let hash = GraphHasher::hash(&graph).unwrap();
        let short = GraphHasher::short_hash(&hash);

        assert_eq!(short.len(), 8);
        assert!(hash.starts_with(&short));
    }
}
