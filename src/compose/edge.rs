//! Edge caching layer: distribution, cache policy, CORS response policy.

use tracing::{debug, info};

use crate::config::{keys, ConfigResolver};
use crate::error::Result;
use crate::graph::{
    ApiOutput, CacheDistribution, CachePolicy, CorsResponsePolicy, EdgeOutput, HttpMethod,
    HttpOrigin, QueryStringBehavior, ViewerCertificate, ViewerProtocolPolicy, ACCESS_LOG_PREFIX,
    CACHE_DEFAULT_TTL_SECS, CACHE_MAX_TTL_SECS, CACHE_MIN_TTL_SECS, CORS_DEFAULT_HEADERS,
    DEPLOY_STAGE,
};

/// Fronts the REST entry point with a caching distribution.
#[derive(Debug)]
pub struct EdgeCachingLayer<'a> {
    /// Environment-scoped configuration resolver.
    resolver: &'a ConfigResolver<'a>,
}

impl<'a> EdgeCachingLayer<'a> {
    /// Creates the layer over the given resolver.
    #[must_use]
    pub const fn new(resolver: &'a ConfigResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Declares the cache policy, CORS response policy, and distribution.
    ///
    /// # Errors
    ///
    /// Unresolved certificate or host references abort the layer before any
    /// resource is declared.
    pub fn front(
        &self,
        api: &ApiOutput,
        allowed_origins: &[String],
        region: &str,
    ) -> Result<EdgeOutput> {
        let environment = self.resolver.environment();
        info!("Fronting REST entry point with edge cache for environment '{environment}'");

        // Both references are mandatory; resolve before declaring anything.
        let certificate = self.resolver.resolve(keys::CERTIFICATE_ARN)?;
        let api_host = self.resolver.resolve(keys::API_HOST)?;

        let cache_policy = CachePolicy::new(
            "zana-distribution-cache-policy",
            "Caching policy for Zana books API",
            CACHE_DEFAULT_TTL_SECS,
            CACHE_MAX_TTL_SECS,
            CACHE_MIN_TTL_SECS,
            QueryStringBehavior::All,
            true,
            false,
        )?;

        let cors_policy = CorsResponsePolicy {
            logical_id: String::from("zana-distribution-response-header-policy"),
            allow_headers: CORS_DEFAULT_HEADERS.iter().map(ToString::to_string).collect(),
            allow_methods: vec![HttpMethod::Get],
            allow_origins: allowed_origins.to_vec(),
            allow_credentials: false,
            origin_override: true,
        };

        // The stage name is baked into the origin path, never the logical
        // environment name.
        let origin = HttpOrigin::https(
            api.rest_api.regional_domain(region),
            format!("/{DEPLOY_STAGE}"),
        );
        debug!("Origin path set to '{}'", origin.origin_path);

        let distribution = CacheDistribution {
            logical_id: String::from("zana-distribution"),
            domain_names: vec![api_host],
            certificate: ViewerCertificate::sni(certificate),
            origin,
            cache_policy: cache_policy.logical_id.clone(),
            response_headers_policy: cors_policy.logical_id.clone(),
            viewer_protocol_policy: ViewerProtocolPolicy::AllowAll,
            http2_enabled: true,
            ipv6_enabled: true,
            logging_enabled: true,
            log_file_prefix: String::from(ACCESS_LOG_PREFIX),
        };

        info!("Edge distribution declared: {}", distribution.logical_id);
        Ok(EdgeOutput {
            cache_policy,
            cors_policy,
            distribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{ApiLayer, ComputeProvisioner};
    use crate::config::{parameter_path, ConfigValue, Environment};
    use crate::store::ParameterSnapshot;

    fn snapshot(environment: &Environment) -> ParameterSnapshot {
        ParameterSnapshot::new()
            .with_key(environment, keys::LAMBDA_SSM_EXTENSION_ARN, "arn:ssm-ext")
            .with_key(
                environment,
                keys::LAMBDA_INSIGHTS_EXTENSION_ARN,
                "arn:insights-ext",
            )
            .with_key(environment, keys::CERTIFICATE_ARN, "arn:acm:cert")
            .with_key(environment, keys::API_HOST, "api.zana.example")
    }

    fn api_output(resolver: &ConfigResolver<'_>) -> ApiOutput {
        let compute = ComputeProvisioner::new(resolver).provision().unwrap();
        ApiLayer::new(resolver).expose(&compute, &[]).unwrap()
    }

    #[test]
    fn test_front_declares_policies_and_distribution() {
        let env = Environment::new("test");
        let snapshot = snapshot(&env);
        let resolver = ConfigResolver::new(&env, &snapshot);
        let api = api_output(&resolver);

        let output = EdgeCachingLayer::new(&resolver)
            .front(&api, &[String::from("https://zana.example")], "eu-central-1")
            .unwrap();

        assert_eq!(output.cache_policy.default_ttl_secs, 21_600);
        assert_eq!(output.cache_policy.max_ttl_secs, 43_200);
        assert_eq!(output.cache_policy.min_ttl_secs, 0);
        assert!(output.cache_policy.gzip_enabled);
        assert!(!output.cache_policy.brotli_enabled);
        assert_eq!(
            output.distribution.cache_policy,
            output.cache_policy.logical_id
        );
        assert_eq!(
            output.distribution.response_headers_policy,
            output.cors_policy.logical_id
        );
    }

    #[test]
    fn test_origin_path_is_stage_name_not_environment() {
        let env = Environment::new("test");
        let snapshot = snapshot(&env);
        let resolver = ConfigResolver::new(&env, &snapshot);
        let api = api_output(&resolver);

        let output = EdgeCachingLayer::new(&resolver)
            .front(&api, &[], "eu-central-1")
            .unwrap();

        assert_eq!(output.distribution.origin.origin_path, "/prod");
    }

    #[test]
    fn test_distribution_references_are_deferred() {
        let env = Environment::new("prod");
        let snapshot = snapshot(&env);
        let resolver = ConfigResolver::new(&env, &snapshot);
        let api = api_output(&resolver);

        let output = EdgeCachingLayer::new(&resolver)
            .front(&api, &[], "eu-central-1")
            .unwrap();

        assert_eq!(
            output.distribution.domain_names,
            vec![ConfigValue::deferred(parameter_path(&env, keys::API_HOST))]
        );
        assert_eq!(
            output.distribution.certificate.certificate,
            ConfigValue::deferred(parameter_path(&env, keys::CERTIFICATE_ARN))
        );
    }

    #[test]
    fn test_missing_certificate_is_fatal() {
        let env = Environment::new("prod");
        let snapshot = ParameterSnapshot::new()
            .with_key(&env, keys::LAMBDA_SSM_EXTENSION_ARN, "arn:ssm-ext")
            .with_key(&env, keys::LAMBDA_INSIGHTS_EXTENSION_ARN, "arn:insights-ext")
            .with_key(&env, keys::API_HOST, "api.zana.example");
        let resolver = ConfigResolver::new(&env, &snapshot);
        let api = api_output(&resolver);

        assert!(EdgeCachingLayer::new(&resolver)
            .front(&api, &[], "eu-central-1")
            .is_err());
    }

    #[test]
    fn test_viewer_policy_allows_plain_http() {
        let env = Environment::new("prod");
        let snapshot = snapshot(&env);
        let resolver = ConfigResolver::new(&env, &snapshot);
        let api = api_output(&resolver);

        let output = EdgeCachingLayer::new(&resolver)
            .front(&api, &[], "eu-central-1")
            .unwrap();

        assert_eq!(
            output.distribution.viewer_protocol_policy,
            ViewerProtocolPolicy::AllowAll
        );
        assert!(output.distribution.http2_enabled);
        assert!(output.distribution.ipv6_enabled);
        assert!(output.distribution.logging_enabled);
        assert_eq!(
            output.distribution.log_file_prefix,
            "zana-distribution-access-logs/"
        );
    }
}
