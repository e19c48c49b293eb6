//! Caching distribution, cache policy, and CORS response-header policy.
//!
//! The viewer protocol policy is `allow-all`: plaintext HTTP reaches the
//! edge and TLS termination correctness rests on the origin. Preserved as
//! specified; a known relaxed posture.

use serde::Serialize;

use crate::config::ConfigValue;
use crate::error::{CompositionError, Result};

use super::api::HttpMethod;

/// Default cache TTL in seconds (6 hours).
pub const CACHE_DEFAULT_TTL_SECS: u64 = 21_600;

/// Maximum cache TTL in seconds (12 hours).
pub const CACHE_MAX_TTL_SECS: u64 = 43_200;

/// Minimum cache TTL in seconds.
pub const CACHE_MIN_TTL_SECS: u64 = 0;

/// Prefix under which distribution access logs are written.
pub const ACCESS_LOG_PREFIX: &str = "zana-distribution-access-logs/";

/// Query-string participation in the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStringBehavior {
    /// Every query string parameter varies the cache key.
    All,
    /// Query strings are ignored.
    None,
}

/// Cookie participation in the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieBehavior {
    /// Cookies are ignored.
    None,
}

/// Header participation in the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderBehavior {
    /// Headers are ignored.
    None,
}

/// Protocol accepted from viewers at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    /// HTTP and HTTPS both accepted; no forced upgrade.
    AllowAll,
    /// HTTP redirected to HTTPS.
    RedirectToHttps,
}

/// Protocol used towards the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OriginProtocolPolicy {
    /// HTTPS only.
    HttpsOnly,
}

/// Cache-key composition and TTL policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachePolicy {
    /// Logical id of the policy.
    pub logical_id: String,
    /// Operator-facing comment.
    pub comment: String,
    /// Default TTL in seconds.
    pub default_ttl_secs: u64,
    /// Maximum TTL in seconds.
    pub max_ttl_secs: u64,
    /// Minimum TTL in seconds.
    pub min_ttl_secs: u64,
    /// Query-string cache-key behavior.
    pub query_string_behavior: QueryStringBehavior,
    /// Cookie cache-key behavior.
    pub cookie_behavior: CookieBehavior,
    /// Header cache-key behavior.
    pub header_behavior: HeaderBehavior,
    /// Whether gzip-encoded responses are accepted and cached.
    pub gzip_enabled: bool,
    /// Whether brotli-encoded responses are accepted and cached.
    pub brotli_enabled: bool,
}

impl CachePolicy {
    /// Creates a cache policy, enforcing TTL ordering.
    ///
    /// # Errors
    ///
    /// Returns an error unless `min <= default <= max`.
    pub fn new(
        logical_id: impl Into<String>,
        comment: impl Into<String>,
        default_ttl_secs: u64,
        max_ttl_secs: u64,
        min_ttl_secs: u64,
        query_string_behavior: QueryStringBehavior,
        gzip_enabled: bool,
        brotli_enabled: bool,
    ) -> Result<Self> {
        let logical_id = logical_id.into();
        if min_ttl_secs > default_ttl_secs || default_ttl_secs > max_ttl_secs {
            return Err(CompositionError::invalid_resource(
                &logical_id,
                format!(
                    "TTLs must satisfy min <= default <= max, got {min_ttl_secs}/{default_ttl_secs}/{max_ttl_secs}"
                ),
            )
            .into());
        }

        Ok(Self {
            logical_id,
            comment: comment.into(),
            default_ttl_secs,
            max_ttl_secs,
            min_ttl_secs,
            query_string_behavior,
            cookie_behavior: CookieBehavior::None,
            header_behavior: HeaderBehavior::None,
            gzip_enabled,
            brotli_enabled,
        })
    }
}

/// CORS response-header policy applied at the edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsResponsePolicy {
    /// Logical id of the policy.
    pub logical_id: String,
    /// Allowed request headers.
    pub allow_headers: Vec<String>,
    /// Allowed methods.
    pub allow_methods: Vec<HttpMethod>,
    /// Allowed origins, exactly as parsed from configuration.
    pub allow_origins: Vec<String>,
    /// Whether credentials are allowed.
    pub allow_credentials: bool,
    /// Whether the policy overrides origin-set CORS headers.
    pub origin_override: bool,
}

/// Viewer-facing TLS configuration of the distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerCertificate {
    /// Certificate reference, resolved at apply time.
    pub certificate: ConfigValue,
    /// Minimum TLS protocol version.
    pub minimum_protocol_version: String,
    /// SSL support method.
    pub ssl_support_method: String,
}

impl ViewerCertificate {
    /// Creates an SNI certificate binding with the standard minimum protocol.
    #[must_use]
    pub fn sni(certificate: ConfigValue) -> Self {
        Self {
            certificate,
            minimum_protocol_version: String::from("TLSv1.2_2021"),
            ssl_support_method: String::from("sni-only"),
        }
    }
}

/// The single HTTP origin fronted by the distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpOrigin {
    /// Origin domain, resolved at apply time.
    pub domain_name: ConfigValue,
    /// Fixed path prefix applied to every origin request.
    pub origin_path: String,
    /// Protocol towards the origin.
    pub protocol_policy: OriginProtocolPolicy,
    /// Accepted SSL protocols towards the origin.
    pub ssl_protocols: Vec<String>,
}

impl HttpOrigin {
    /// Creates an HTTPS-only origin with TLSv1.2.
    #[must_use]
    pub fn https(domain_name: ConfigValue, origin_path: impl Into<String>) -> Self {
        Self {
            domain_name,
            origin_path: origin_path.into(),
            protocol_policy: OriginProtocolPolicy::HttpsOnly,
            ssl_protocols: vec![String::from("TLSv1.2")],
        }
    }
}

/// The caching distribution fronting the REST entry point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheDistribution {
    /// Logical id of the distribution.
    pub logical_id: String,
    /// Public domain names served by the distribution.
    pub domain_names: Vec<ConfigValue>,
    /// Viewer-facing TLS configuration.
    pub certificate: ViewerCertificate,
    /// The fronted origin.
    pub origin: HttpOrigin,
    /// Logical id of the applied cache policy.
    pub cache_policy: String,
    /// Logical id of the applied CORS response policy.
    pub response_headers_policy: String,
    /// Viewer protocol policy.
    pub viewer_protocol_policy: ViewerProtocolPolicy,
    /// Whether HTTP/2 is enabled.
    pub http2_enabled: bool,
    /// Whether IPv6 is enabled.
    pub ipv6_enabled: bool,
    /// Whether access logging is enabled.
    pub logging_enabled: bool,
    /// Access-log prefix.
    pub log_file_prefix: String,
}

impl CacheDistribution {
    /// Returns the distribution's edge domain as an apply-time reference.
    #[must_use]
    pub fn edge_domain(&self) -> ConfigValue {
        ConfigValue::attribute(&self.logical_id, "domain-name")
    }
}
