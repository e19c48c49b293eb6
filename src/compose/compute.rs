//! Compute provisioning: function, execution identity, alias, autoscaling.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::{keys, ConfigResolver};
use crate::error::Result;
use crate::graph::{
    AutoscalingPolicy, ComputeOutput, ComputeUnit, FunctionAlias, PolicyStatement, ResourcePolicy,
    RuntimeKind, ServiceRole, FUNCTION_TIMEOUT_SECS, LOG_RETENTION_DAYS, MAX_PROVISIONED_CAPACITY,
    PARAMETERS_EXTENSION_PORT, UTILIZATION_TARGET,
};

use crate::config::ConfigValue;

/// Default locator of the prebuilt compute artifact.
const ARTIFACT_PATH: &str = "../../services/zana_lambda/target/lambda/zana_lambda/bootstrap.zip";

/// Declares the compute unit and its environment-scoped alias.
#[derive(Debug)]
pub struct ComputeProvisioner<'a> {
    /// Environment-scoped configuration resolver.
    resolver: &'a ConfigResolver<'a>,
    /// Artifact locator override.
    artifact: String,
}

impl<'a> ComputeProvisioner<'a> {
    /// Creates a provisioner over the given resolver.
    #[must_use]
    pub fn new(resolver: &'a ConfigResolver<'a>) -> Self {
        Self {
            resolver,
            artifact: String::from(ARTIFACT_PATH),
        }
    }

    /// Overrides the packaged-artifact locator.
    #[must_use]
    pub fn with_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact = artifact.into();
        self
    }

    /// Declares the compute unit, execution role, alias, and autoscaling.
    ///
    /// # Errors
    ///
    /// Any unresolved extension reference aborts provisioning; autoscaling
    /// and logging are never silently skipped.
    pub fn provision(&self) -> Result<ComputeOutput> {
        let environment = self.resolver.environment();
        info!("Provisioning compute unit for environment '{environment}'");

        // Both extension references are mandatory; resolve before declaring
        // anything so a gap aborts the run with nothing built.
        let ssm_extension = self.resolver.resolve(keys::LAMBDA_SSM_EXTENSION_ARN)?;
        let insights_extension = self.resolver.resolve(keys::LAMBDA_INSIGHTS_EXTENSION_ARN)?;

        let role = Self::build_role()?;
        debug!("Execution role declared: {}", role.logical_id);

        let unit = ComputeUnit {
            logical_id: String::from("zana-books-data-handler"),
            runtime: RuntimeKind::ProvidedAl2,
            handler: String::from("main"),
            artifact: self.artifact.clone(),
            description: String::from("Function that returns book data and ratings."),
            environment: Self::build_environment(environment.as_str()),
            role,
            layers: vec![ssm_extension],
            insights_version: insights_extension,
            timeout_secs: FUNCTION_TIMEOUT_SECS,
            log_retention_days: LOG_RETENTION_DAYS,
        };

        let alias = FunctionAlias {
            logical_id: String::from("zana-books-data-alias"),
            name: environment.as_str().to_string(),
            function: ConfigValue::attribute(&unit.logical_id, "version"),
            autoscaling: AutoscalingPolicy::target_tracking(
                MAX_PROVISIONED_CAPACITY,
                UTILIZATION_TARGET,
            )?,
        };

        info!(
            "Compute unit declared: {} (alias '{}')",
            unit.logical_id, alias.name
        );
        Ok(ComputeOutput { unit, alias })
    }

    /// Builds the execution role with its least-privilege custom policy.
    fn build_role() -> Result<ServiceRole> {
        let custom_policy = ResourcePolicy::new(
            "zana-lambda-ssm-read-only-access",
            "Provides read only access to zana related entries on AWS Parameter Store",
            vec![
                PolicyStatement::allow(
                    ["ssm:GetParameter"],
                    ["arn:aws:ssm:*:*:parameter/zana/*"],
                )?,
                PolicyStatement::allow(["kms:Decrypt"], ["*"])?,
            ],
        );

        Ok(ServiceRole::new(
            "zana-books-lambda-role",
            "lambda.amazonaws.com",
            "Allows lambda functions to retrieve parameters from AWS SSM. \
             Intended to be by Zana book handler lambdas.",
            vec![
                String::from("service-role/AWSLambdaBasicExecutionRole"),
                String::from("CloudWatchLambdaInsightsExecutionRolePolicy"),
            ],
            Some(custom_policy),
        ))
    }

    /// Builds the unit's environment variables.
    fn build_environment(environment: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            (String::from("RUST_BACKTRACE"), String::from("1")),
            (String::from("ZANA_ENV"), environment.to_string()),
            (
                String::from("PARAMETERS_SECRETS_EXTENSION_HTTP_PORT"),
                PARAMETERS_EXTENSION_PORT.to_string(),
            ),
        ])
    }
}
