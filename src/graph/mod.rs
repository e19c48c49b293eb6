//! Declarative resource model for the delivery pipeline.
//!
//! Each resource kind is an explicit immutable configuration struct with
//! named fields and a single construction function; invariants are enforced
//! at construction so a declared resource is never half-built. The
//! [`ResourceGraph`] is the fully-wired output of one composition run.

mod api;
mod compute;
mod dns;
mod edge;
mod iam;

pub use api::{
    AccessLogFormat, ApiAccount, ApiMethod, ApiResource, CorsPreflight, EndpointType, HttpMethod,
    LambdaIntegration, LogGroup, LoggingLevel, RestApi, Stage, CORS_DEFAULT_HEADERS, DEPLOY_STAGE,
    INTEGRATION_TIMEOUT_SECS, THROTTLE_BURST_LIMIT, THROTTLE_RATE_LIMIT,
};
pub use compute::{
    AutoscalingPolicy, ComputeUnit, FunctionAlias, RuntimeKind, ScalingMetric,
    FUNCTION_TIMEOUT_SECS, LOG_RETENTION_DAYS, MAX_PROVISIONED_CAPACITY, MIN_PROVISIONED_CAPACITY,
    PARAMETERS_EXTENSION_PORT, UTILIZATION_TARGET,
};
pub use dns::{DnsRecord, HostedZoneRef, RecordType, DNS_RECORD_NAME};
pub use edge::{
    CacheDistribution, CachePolicy, CookieBehavior, CorsResponsePolicy, HeaderBehavior, HttpOrigin,
    OriginProtocolPolicy, QueryStringBehavior, ViewerCertificate, ViewerProtocolPolicy,
    ACCESS_LOG_PREFIX, CACHE_DEFAULT_TTL_SECS, CACHE_MAX_TTL_SECS, CACHE_MIN_TTL_SECS,
};
pub use iam::{Effect, PolicyStatement, ResourcePolicy, ServiceRole};

use serde::Serialize;

use crate::config::DeployContext;

/// Compute-layer output: one unit plus its environment-scoped alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputeOutput {
    /// The deployable function.
    pub unit: ComputeUnit,
    /// Versioned pointer scoped to the target environment.
    pub alias: FunctionAlias,
}

/// API-layer output: entry point, books resource, and account logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiOutput {
    /// Access-log destination for the stage.
    pub log_group: LogGroup,
    /// The REST entry point with its single active stage.
    pub rest_api: RestApi,
    /// The `/books` resource and its methods.
    pub resource: ApiResource,
    /// Account-level CloudWatch delivery role (singleton per account/region).
    pub account: ApiAccount,
}

/// Edge-layer output: distribution plus its policies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeOutput {
    /// Cache-key and TTL policy.
    pub cache_policy: CachePolicy,
    /// CORS response-header policy mirroring the API rule.
    pub cors_policy: CorsResponsePolicy,
    /// The caching distribution fronting the API.
    pub distribution: CacheDistribution,
}

/// Domain-layer output: imported zone and the alias record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnsOutput {
    /// The pre-existing hosted zone, imported by reference.
    pub zone: HostedZoneRef,
    /// Alias record pointing at the distribution.
    pub record: DnsRecord,
}

/// The fully-wired resource graph produced by one composition run.
///
/// Owned exclusively by the composition root for the duration of the run;
/// nothing survives across runs. A graph is either complete and internally
/// consistent or it was never produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceGraph {
    /// The context the graph was composed for.
    pub context: DeployContext,
    /// Compute layer.
    pub compute: ComputeOutput,
    /// API layer.
    pub api: ApiOutput,
    /// Edge caching layer.
    pub edge: EdgeOutput,
    /// Domain binding layer.
    pub dns: DnsOutput,
}

impl ResourceGraph {
    /// Returns (kind, logical id) pairs for every declared resource, in
    /// dependency order.
    #[must_use]
    pub fn resource_index(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("execution-role", self.compute.unit.role.logical_id.as_str()),
            ("compute-unit", self.compute.unit.logical_id.as_str()),
            ("function-alias", self.compute.alias.logical_id.as_str()),
            ("log-group", self.api.log_group.logical_id.as_str()),
            ("rest-api", self.api.rest_api.logical_id.as_str()),
            ("api-resource", self.api.resource.logical_id.as_str()),
            ("api-account", self.api.account.logical_id.as_str()),
            ("cache-policy", self.edge.cache_policy.logical_id.as_str()),
            (
                "cors-response-policy",
                self.edge.cors_policy.logical_id.as_str(),
            ),
            (
                "cache-distribution",
                self.edge.distribution.logical_id.as_str(),
            ),
            ("hosted-zone", self.dns.zone.logical_id.as_str()),
            ("dns-record", self.dns.record.logical_id.as_str()),
        ]
    }

    /// Returns the number of declared resources.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resource_index().len()
    }
}
