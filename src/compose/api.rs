//! API layer: REST entry point routed to the compute alias.

use tracing::{debug, info};

use crate::config::{ConfigResolver, ConfigValue};
use crate::error::Result;
use crate::graph::{
    AccessLogFormat, ApiAccount, ApiMethod, ApiOutput, ApiResource, ComputeOutput, CorsPreflight,
    EndpointType, HttpMethod, LambdaIntegration, LogGroup, LoggingLevel, RestApi, ServiceRole,
    Stage, CORS_DEFAULT_HEADERS, DEPLOY_STAGE, INTEGRATION_TIMEOUT_SECS, LOG_RETENTION_DAYS,
    THROTTLE_BURST_LIMIT, THROTTLE_RATE_LIMIT,
};

/// Declares the REST entry point for the books data handler.
#[derive(Debug)]
pub struct ApiLayer<'a> {
    /// Environment-scoped configuration resolver.
    resolver: &'a ConfigResolver<'a>,
}

impl<'a> ApiLayer<'a> {
    /// Creates the layer over the given resolver.
    #[must_use]
    pub const fn new(resolver: &'a ConfigResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Declares the entry point, books resource, and account log delivery.
    ///
    /// # Errors
    ///
    /// Integration creation against an absent compute alias is a fatal
    /// composition error, as is any invariant violation in the declared
    /// resources.
    pub fn expose(&self, compute: &ComputeOutput, allowed_origins: &[String]) -> Result<ApiOutput> {
        let environment = self.resolver.environment();
        info!("Exposing REST entry point for environment '{environment}'");

        let log_group = LogGroup {
            logical_id: String::from("zana-books-api-log-group"),
            retention_days: LOG_RETENTION_DAYS,
        };

        let rest_api = RestApi {
            logical_id: String::from("zana-books-api"),
            endpoint_type: EndpointType::Regional,
            cloud_watch_role: false,
            stage: Stage {
                name: String::from(DEPLOY_STAGE),
                caching_enabled: false,
                metrics_enabled: true,
                logging_level: LoggingLevel::Info,
                access_log_destination: log_group.logical_id.clone(),
                access_log_format: AccessLogFormat::JsonStandardFields,
                throttling_rate_limit: THROTTLE_RATE_LIMIT,
                throttling_burst_limit: THROTTLE_BURST_LIMIT,
            },
            cors: CorsPreflight {
                allow_headers: CORS_DEFAULT_HEADERS.iter().map(ToString::to_string).collect(),
                allow_methods: vec![HttpMethod::Get],
                allow_origins: allowed_origins.to_vec(),
            },
        };

        let integration = LambdaIntegration::proxy(
            ConfigValue::attribute(&compute.alias.logical_id, "arn"),
            INTEGRATION_TIMEOUT_SECS,
            compute.unit.timeout_secs,
        )?;
        debug!(
            "Proxy integration bound to alias '{}' ({}s timeout)",
            compute.alias.name, integration.timeout_secs
        );

        let resource = ApiResource {
            logical_id: String::from("zana-books-resource"),
            path_part: String::from("books"),
            methods: vec![ApiMethod {
                http_method: HttpMethod::Get,
                authorization: String::from("NONE"),
                integration,
            }],
        };

        let account = Self::build_account();

        info!(
            "REST entry point declared: {} (stage '{}')",
            rest_api.logical_id, rest_api.stage.name
        );
        Ok(ApiOutput {
            log_group,
            rest_api,
            resource,
            account,
        })
    }

    /// Builds the account-level CloudWatch delivery configuration.
    ///
    /// A singleton per account and region, not per API.
    fn build_account() -> ApiAccount {
        ApiAccount {
            logical_id: String::from("zana-api-gateway-account"),
            cloud_watch_role: ServiceRole::new(
                "zana-api-gateway-cloudwatch-role",
                "apigateway.amazonaws.com",
                "Allows API Gateways to push logs into CloudWatch.",
                vec![String::from(
                    "service-role/AmazonAPIGatewayPushToCloudWatchLogs",
                )],
                None,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ComputeProvisioner;
    use crate::config::{keys, Environment};
    use crate::store::ParameterSnapshot;

    fn compute_for(environment: &Environment, snapshot: &ParameterSnapshot) -> ComputeOutput {
        let resolver = ConfigResolver::new(environment, snapshot);
        ComputeProvisioner::new(&resolver).provision().unwrap()
    }

    fn full_snapshot(environment: &Environment) -> ParameterSnapshot {
        ParameterSnapshot::new()
            .with_key(environment, keys::LAMBDA_SSM_EXTENSION_ARN, "arn:ssm-ext")
            .with_key(
                environment,
                keys::LAMBDA_INSIGHTS_EXTENSION_ARN,
                "arn:insights-ext",
            )
    }

    #[test]
    fn test_expose_declares_books_resource_with_single_get() {
        let env = Environment::new("test");
        let snapshot = full_snapshot(&env);
        let compute = compute_for(&env, &snapshot);
        let resolver = ConfigResolver::new(&env, &snapshot);

        let output = ApiLayer::new(&resolver)
            .expose(&compute, &[String::from("https://zana.example")])
            .unwrap();

        assert_eq!(output.resource.path_part, "books");
        assert_eq!(output.resource.methods.len(), 1);
        assert_eq!(output.resource.methods[0].http_method, HttpMethod::Get);
        assert_eq!(output.resource.methods[0].authorization, "NONE");
    }

    #[test]
    fn test_integration_timeout_has_one_second_margin() {
        let env = Environment::new("prod");
        let snapshot = full_snapshot(&env);
        let compute = compute_for(&env, &snapshot);
        let resolver = ConfigResolver::new(&env, &snapshot);

        let output = ApiLayer::new(&resolver).expose(&compute, &[]).unwrap();

        let integration = &output.resource.methods[0].integration;
        assert_eq!(integration.timeout_secs, 29);
        assert_eq!(compute.unit.timeout_secs, 30);
        assert_eq!(compute.unit.timeout_secs - integration.timeout_secs, 1);
    }

    #[test]
    fn test_stage_throttling_and_logging() {
        let env = Environment::new("test");
        let snapshot = full_snapshot(&env);
        let compute = compute_for(&env, &snapshot);
        let resolver = ConfigResolver::new(&env, &snapshot);

        let output = ApiLayer::new(&resolver).expose(&compute, &[]).unwrap();

        let stage = &output.rest_api.stage;
        assert_eq!(stage.name, "prod");
        assert_eq!(stage.throttling_rate_limit, 1000);
        assert_eq!(stage.throttling_burst_limit, 500);
        assert_eq!(stage.logging_level, LoggingLevel::Info);
        assert!(!stage.caching_enabled);
        assert!(stage.metrics_enabled);
        assert_eq!(stage.access_log_destination, output.log_group.logical_id);
    }

    #[test]
    fn test_cors_preserves_origin_list_exactly() {
        let env = Environment::new("test");
        let snapshot = full_snapshot(&env);
        let compute = compute_for(&env, &snapshot);
        let resolver = ConfigResolver::new(&env, &snapshot);

        let origins = vec![
            String::from("https://a.example"),
            String::from("https://b.example"),
            String::new(),
        ];
        let output = ApiLayer::new(&resolver).expose(&compute, &origins).unwrap();

        assert_eq!(output.rest_api.cors.allow_origins, origins);
        assert_eq!(output.rest_api.cors.allow_methods, vec![HttpMethod::Get]);
    }

    #[test]
    fn test_account_role_uses_gateway_principal() {
        let env = Environment::new("prod");
        let snapshot = full_snapshot(&env);
        let compute = compute_for(&env, &snapshot);
        let resolver = ConfigResolver::new(&env, &snapshot);

        let output = ApiLayer::new(&resolver).expose(&compute, &[]).unwrap();

        let role = &output.account.cloud_watch_role;
        assert_eq!(role.service_principal, "apigateway.amazonaws.com");
        assert_eq!(
            role.managed_policies,
            vec!["service-role/AmazonAPIGatewayPushToCloudWatchLogs"]
        );
        assert!(role.custom_policy.is_none());
    }
}
