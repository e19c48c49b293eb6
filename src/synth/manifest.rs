//! Deployable manifest rendered from a composed resource graph.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ZanaDeployError};
use crate::graph::ResourceGraph;

/// Format version of the rendered manifest.
pub const MANIFEST_VERSION: &str = "1";

/// One declared resource in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestResource {
    /// Resource kind.
    pub kind: String,
    /// Logical id, unique within the manifest.
    pub logical_id: String,
    /// Full declared configuration.
    pub properties: serde_json::Value,
}

/// The deployable output of one composition run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    /// Manifest format version.
    pub version: String,
    /// Render timestamp; excluded from the content hash.
    pub created_at: DateTime<Utc>,
    /// Target environment name.
    pub environment: String,
    /// Deployment account identifier.
    pub account: String,
    /// Deployment region.
    pub region: String,
    /// Tags applied to every declared resource.
    pub tags: BTreeMap<String, String>,
    /// Declared resources in dependency order.
    pub resources: Vec<ManifestResource>,
}

impl Manifest {
    /// Renders a manifest from a composed graph.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource cannot be serialized.
    pub fn render(graph: &ResourceGraph) -> Result<Self> {
        let environment = graph.context.environment.as_str().to_string();
        let tags = BTreeMap::from([(String::from("zanaEnv"), environment.clone())]);

        let resources = vec![
            resource("execution-role", &graph.compute.unit.role.logical_id, &graph.compute.unit.role)?,
            resource("compute-unit", &graph.compute.unit.logical_id, &graph.compute.unit)?,
            resource("function-alias", &graph.compute.alias.logical_id, &graph.compute.alias)?,
            resource("log-group", &graph.api.log_group.logical_id, &graph.api.log_group)?,
            resource("rest-api", &graph.api.rest_api.logical_id, &graph.api.rest_api)?,
            resource("api-resource", &graph.api.resource.logical_id, &graph.api.resource)?,
            resource("api-account", &graph.api.account.logical_id, &graph.api.account)?,
            resource("cache-policy", &graph.edge.cache_policy.logical_id, &graph.edge.cache_policy)?,
            resource(
                "cors-response-policy",
                &graph.edge.cors_policy.logical_id,
                &graph.edge.cors_policy,
            )?,
            resource(
                "cache-distribution",
                &graph.edge.distribution.logical_id,
                &graph.edge.distribution,
            )?,
            resource("hosted-zone", &graph.dns.zone.logical_id, &graph.dns.zone)?,
            resource("dns-record", &graph.dns.record.logical_id, &graph.dns.record)?,
        ];
        debug!("Rendered manifest with {} resources", resources.len());

        Ok(Self {
            version: String::from(MANIFEST_VERSION),
            created_at: Utc::now(),
            environment,
            account: graph.context.account.clone(),
            region: graph.context.region.clone(),
            tags,
            resources,
        })
    }

    /// Serializes the manifest to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ZanaDeployError::internal(format!("Failed to serialize manifest: {e}")))
    }
}

/// Serializes one declared resource into a manifest entry.
fn resource<T: Serialize>(kind: &str, logical_id: &str, declaration: &T) -> Result<ManifestResource> {
    let properties = serde_json::to_value(declaration).map_err(|e| {
        ZanaDeployError::internal(format!("Failed to serialize resource {logical_id}: {e}"))
    })?;
    Ok(ManifestResource {
        kind: kind.to_string(),
        logical_id: logical_id.to_string(),
        properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::CompositionRoot;
    use crate::config::{keys, DeployContext, Environment};
    use crate::store::ParameterSnapshot;

    fn composed_graph(environment: &str) -> ResourceGraph {
        let env = Environment::new(environment);
        let snapshot = ParameterSnapshot::new()
            .with_key(&env, keys::CORS_ALLOW_ORIGINS, "https://zana.example")
            .with_key(&env, keys::HOSTED_ZONE_ID, "Z123")
            .with_key(&env, keys::HOSTED_ZONE_NAME, "zana.example")
            .with_key(&env, keys::CERTIFICATE_ARN, "arn:acm:cert")
            .with_key(&env, keys::API_HOST, "api.zana.example")
            .with_key(&env, keys::LAMBDA_SSM_EXTENSION_ARN, "arn:ssm-ext")
            .with_key(&env, keys::LAMBDA_INSIGHTS_EXTENSION_ARN, "arn:insights-ext");
        let context = DeployContext::new("123456789012", "eu-central-1", env);
        CompositionRoot::new(context, snapshot).compose().unwrap()
    }

    #[test]
    fn test_render_covers_every_declared_resource() {
        let graph = composed_graph("test");
        let manifest = Manifest::render(&graph).unwrap();

        assert_eq!(manifest.resources.len(), graph.resource_count());
        let index = graph.resource_index();
        for (entry, (kind, logical_id)) in manifest.resources.iter().zip(index) {
            assert_eq!(entry.kind, kind);
            assert_eq!(entry.logical_id, logical_id);
        }
    }

    #[test]
    fn test_render_tags_environment() {
        let manifest = Manifest::render(&composed_graph("test")).unwrap();

        assert_eq!(manifest.environment, "test");
        assert_eq!(manifest.tags.get("zanaEnv").map(String::as_str), Some("test"));
        assert_eq!(manifest.version, MANIFEST_VERSION);
        assert_eq!(manifest.region, "eu-central-1");
    }

    #[test]
    fn test_manifest_json_is_deployable_shape() {
        let manifest = Manifest::render(&composed_graph("prod")).unwrap();
        let json = manifest.to_json().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["environment"], "prod");
        assert_eq!(parsed["resources"][1]["kind"], "compute-unit");
        assert_eq!(
            parsed["resources"][1]["properties"]["runtime"],
            "provided.al2"
        );
    }
}
