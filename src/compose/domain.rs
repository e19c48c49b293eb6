//! Domain binding layer: alias record under a pre-existing hosted zone.

use tracing::info;

use crate::config::{keys, ConfigResolver};
use crate::error::Result;
use crate::graph::{CacheDistribution, DnsOutput, DnsRecord, HostedZoneRef, RecordType, DNS_RECORD_NAME};

/// Binds the distribution to the public DNS name.
#[derive(Debug)]
pub struct DomainBindingLayer<'a> {
    /// Environment-scoped configuration resolver.
    resolver: &'a ConfigResolver<'a>,
}

impl<'a> DomainBindingLayer<'a> {
    /// Creates the layer over the given resolver.
    #[must_use]
    pub const fn new(resolver: &'a ConfigResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Imports the hosted zone and declares the alias record.
    ///
    /// The zone itself is never created here; it is an external reference
    /// looked up by id and name.
    ///
    /// # Errors
    ///
    /// Unresolved zone references abort the layer before any declaration.
    pub fn bind(&self, distribution: &CacheDistribution) -> Result<DnsOutput> {
        let environment = self.resolver.environment();
        info!("Binding public domain for environment '{environment}'");

        let zone_id = self.resolver.resolve(keys::HOSTED_ZONE_ID)?;
        let zone_name = self.resolver.resolve(keys::HOSTED_ZONE_NAME)?;

        let zone = HostedZoneRef {
            logical_id: String::from("zana-hosted-zone"),
            zone_id,
            zone_name,
        };

        let record = DnsRecord {
            logical_id: String::from("zana-api-domain-record"),
            record_name: String::from(DNS_RECORD_NAME),
            record_type: RecordType::A,
            zone: zone.logical_id.clone(),
            target: distribution.edge_domain(),
        };

        info!(
            "Alias record '{}' declared under zone '{}'",
            record.record_name, zone.logical_id
        );
        Ok(DnsOutput { zone, record })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{ApiLayer, ComputeProvisioner, EdgeCachingLayer};
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
            .with_key(environment, keys::HOSTED_ZONE_ID, "Z123")
            .with_key(environment, keys::HOSTED_ZONE_NAME, "zana.example")
    }

    fn distribution(resolver: &ConfigResolver<'_>) -> CacheDistribution {
        let compute = ComputeProvisioner::new(resolver).provision().unwrap();
        let api = ApiLayer::new(resolver).expose(&compute, &[]).unwrap();
        EdgeCachingLayer::new(resolver)
            .front(&api, &[], "eu-central-1")
            .unwrap()
            .distribution
    }

    #[test]
    fn test_bind_declares_alias_record() {
        let env = Environment::new("test");
        let snapshot = snapshot(&env);
        let resolver = ConfigResolver::new(&env, &snapshot);
        let distribution = distribution(&resolver);

        let output = DomainBindingLayer::new(&resolver)
            .bind(&distribution)
            .unwrap();

        assert_eq!(output.record.record_name, "api");
        assert_eq!(output.record.record_type, RecordType::A);
        assert_eq!(output.record.zone, output.zone.logical_id);
        assert_eq!(
            output.record.target,
            ConfigValue::attribute("zana-distribution", "domain-name")
        );
    }

    #[test]
    fn test_zone_is_imported_by_deferred_reference() {
        let env = Environment::new("prod");
        let snapshot = snapshot(&env);
        let resolver = ConfigResolver::new(&env, &snapshot);
        let distribution = distribution(&resolver);

        let output = DomainBindingLayer::new(&resolver)
            .bind(&distribution)
            .unwrap();

        assert_eq!(
            output.zone.zone_id,
            ConfigValue::deferred(parameter_path(&env, keys::HOSTED_ZONE_ID))
        );
        assert_eq!(
            output.zone.zone_name,
            ConfigValue::deferred(parameter_path(&env, keys::HOSTED_ZONE_NAME))
        );
    }

    #[test]
    fn test_missing_zone_reference_is_fatal() {
        let env = Environment::new("prod");
        let full = snapshot(&env);
        let resolver = ConfigResolver::new(&env, &full);
        let distribution = distribution(&resolver);

        let partial: ParameterSnapshot = full
            .iter()
            .filter(|(path, _)| !path.ends_with(keys::HOSTED_ZONE_ID))
            .map(|(path, value)| (path.to_string(), value.to_string()))
            .collect();
        let resolver = ConfigResolver::new(&env, &partial);

        assert!(DomainBindingLayer::new(&resolver)
            .bind(&distribution)
            .is_err());
    }
}
