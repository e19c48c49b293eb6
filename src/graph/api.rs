//! REST entry point, stage, and method declarations.

use serde::Serialize;

use crate::config::ConfigValue;
use crate::error::{CompositionError, Result};

use super::iam::ServiceRole;

/// Name of the deployed stage.
///
/// A fixed literal, distinct from the logical environment name: the stage is
/// deployed as `prod` even when the environment is, e.g., `test`.
pub const DEPLOY_STAGE: &str = "prod";

/// Steady-state request rate limit per second.
pub const THROTTLE_RATE_LIMIT: u32 = 1000;

/// Burst request limit.
pub const THROTTLE_BURST_LIMIT: u32 = 500;

/// Integration timeout in seconds; strictly less than the function timeout.
pub const INTEGRATION_TIMEOUT_SECS: u64 = 29;

/// Default preflight request headers.
pub const CORS_DEFAULT_HEADERS: &[&str] = &[
    "Content-Type",
    "X-Amz-Date",
    "Authorization",
    "X-Api-Key",
    "X-Amz-Security-Token",
    "X-Amz-User-Agent",
];

/// Entry point placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndpointType {
    /// Regional endpoint.
    #[serde(rename = "REGIONAL")]
    Regional,
}

/// Execution logging level of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoggingLevel {
    /// No execution logging.
    Off,
    /// Errors only.
    Error,
    /// Full request logging.
    Info,
}

/// Access-log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessLogFormat {
    /// JSON object carrying the standard request fields.
    #[serde(rename = "json-standard-fields")]
    JsonStandardFields,
}

/// HTTP methods exposed on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET.
    Get,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
        }
    }
}

/// A dedicated log group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogGroup {
    /// Logical id of the group.
    pub logical_id: String,
    /// Retention in days.
    pub retention_days: u32,
}

/// Runtime deployment configuration of the REST entry point.
///
/// Exactly one active stage per environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    /// Deployed stage name.
    pub name: String,
    /// Whether stage-level caching is enabled.
    pub caching_enabled: bool,
    /// Whether CloudWatch metrics are emitted.
    pub metrics_enabled: bool,
    /// Execution logging level.
    pub logging_level: LoggingLevel,
    /// Logical id of the access-log destination group.
    pub access_log_destination: String,
    /// Access-log line format.
    pub access_log_format: AccessLogFormat,
    /// Steady-state throttle, requests per second.
    pub throttling_rate_limit: u32,
    /// Burst throttle.
    pub throttling_burst_limit: u32,
}

/// Default CORS preflight configuration of the entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsPreflight {
    /// Allowed request headers.
    pub allow_headers: Vec<String>,
    /// Allowed methods.
    pub allow_methods: Vec<HttpMethod>,
    /// Allowed origins, exactly as parsed from configuration.
    pub allow_origins: Vec<String>,
}

/// A proxying integration against the compute unit's alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LambdaIntegration {
    /// Integration target, resolved by the synthesizer.
    pub target: ConfigValue,
    /// HTTP method used towards the target.
    pub integration_http_method: String,
    /// Integration timeout in seconds.
    pub timeout_secs: u64,
    /// Whether the request is proxied verbatim.
    pub proxy: bool,
    /// Whether console test invocations are permitted.
    pub allow_test_invoke: bool,
}

impl LambdaIntegration {
    /// Creates a proxying integration against a function alias.
    ///
    /// # Errors
    ///
    /// Returns an error unless the integration timeout is strictly less than
    /// the function timeout, preserving the safety margin between the two.
    pub fn proxy(
        target: ConfigValue,
        timeout_secs: u64,
        function_timeout_secs: u64,
    ) -> Result<Self> {
        if timeout_secs >= function_timeout_secs {
            return Err(CompositionError::invalid_resource(
                "lambda-integration",
                format!(
                    "integration timeout {timeout_secs}s must be below the function timeout {function_timeout_secs}s"
                ),
            )
            .into());
        }

        Ok(Self {
            target,
            integration_http_method: String::from("POST"),
            timeout_secs,
            proxy: true,
            allow_test_invoke: true,
        })
    }
}

/// A method on an addressable resource, bound to exactly one integration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiMethod {
    /// The HTTP method.
    pub http_method: HttpMethod,
    /// Authorization mode.
    pub authorization: String,
    /// The bound integration target.
    pub integration: LambdaIntegration,
}

/// An addressable path segment under the entry point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResource {
    /// Logical id of the resource.
    pub logical_id: String,
    /// Path segment under the root.
    pub path_part: String,
    /// Methods exposed on the segment.
    pub methods: Vec<ApiMethod>,
}

/// The REST entry point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestApi {
    /// Logical id of the entry point.
    pub logical_id: String,
    /// Endpoint placement.
    pub endpoint_type: EndpointType,
    /// Whether the implicit per-API CloudWatch role is created.
    pub cloud_watch_role: bool,
    /// The single active stage.
    pub stage: Stage,
    /// Default preflight configuration.
    pub cors: CorsPreflight,
}

impl RestApi {
    /// Returns the regional domain of the deployed entry point.
    ///
    /// The id segment is synthesizer-assigned, so the domain is an apply-time
    /// concatenation.
    #[must_use]
    pub fn regional_domain(&self, region: &str) -> ConfigValue {
        ConfigValue::concat([
            ConfigValue::attribute(&self.logical_id, "rest-api-id"),
            ConfigValue::literal(format!(".execute-api.{region}.amazonaws.com")),
        ])
    }
}

/// Account-level log-delivery configuration.
///
/// One per account and region, not per API: the delivery role lets the
/// gateway service push stage access logs to CloudWatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiAccount {
    /// Logical id of the account configuration.
    pub logical_id: String,
    /// The delivery role assumed by the gateway service.
    pub cloud_watch_role: ServiceRole,
}
