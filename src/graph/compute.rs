//! Compute unit, alias, and autoscaling declarations.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ConfigValue;
use crate::error::{CompositionError, Result};

use super::iam::ServiceRole;

/// Fixed invocation timeout of the compute unit, in seconds.
pub const FUNCTION_TIMEOUT_SECS: u64 = 30;

/// Log retention in days (two years).
pub const LOG_RETENTION_DAYS: u32 = 731;

/// Fixed port of the local parameter-access side-channel.
pub const PARAMETERS_EXTENSION_PORT: u16 = 2773;

/// Lower capacity bound of the provisioned-concurrency target.
pub const MIN_PROVISIONED_CAPACITY: u32 = 1;

/// Upper capacity bound of the provisioned-concurrency target.
pub const MAX_PROVISIONED_CAPACITY: u32 = 20;

/// Target fraction of provisioned concurrency in use.
pub const UTILIZATION_TARGET: f64 = 0.5;

/// Runtime kind of the compute unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuntimeKind {
    /// Custom runtime on Amazon Linux 2.
    #[serde(rename = "provided.al2")]
    ProvidedAl2,
}

/// Target-tracking metric for alias autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalingMetric {
    /// Fraction of pre-warmed execution capacity actively in use.
    #[serde(rename = "provisioned-concurrency-utilization")]
    ProvisionedConcurrencyUtilization,
}

/// Utilization-based autoscaling bounds and target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoscalingPolicy {
    /// Minimum capacity, always 1.
    pub min_capacity: u32,
    /// Configurable capacity ceiling.
    pub max_capacity: u32,
    /// The tracked metric.
    pub metric: ScalingMetric,
    /// Target metric value, in (0, 1].
    pub target_value: f64,
}

impl AutoscalingPolicy {
    /// Creates a target-tracking policy on provisioned-concurrency
    /// utilization.
    ///
    /// # Errors
    ///
    /// Returns an error unless the target value is in (0, 1].
    pub fn target_tracking(max_capacity: u32, target_value: f64) -> Result<Self> {
        if !(target_value > 0.0 && target_value <= 1.0) {
            return Err(CompositionError::invalid_resource(
                "autoscaling-policy",
                format!("utilization target must be in (0, 1], got {target_value}"),
            )
            .into());
        }

        Ok(Self {
            min_capacity: MIN_PROVISIONED_CAPACITY,
            max_capacity,
            metric: ScalingMetric::ProvisionedConcurrencyUtilization,
            target_value,
        })
    }
}

/// The deployable serverless function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputeUnit {
    /// Logical id of the function.
    pub logical_id: String,
    /// Runtime kind.
    pub runtime: RuntimeKind,
    /// Entry point within the packaged artifact.
    pub handler: String,
    /// Locator of the prebuilt deployable artifact, consumed as an opaque blob.
    pub artifact: String,
    /// Operator-facing description.
    pub description: String,
    /// Environment variables; insertion order irrelevant.
    pub environment: BTreeMap<String, String>,
    /// Execution identity.
    pub role: ServiceRole,
    /// Attached extension layers, resolved at apply time.
    pub layers: Vec<ConfigValue>,
    /// Insights extension reference, resolved at apply time.
    pub insights_version: ConfigValue,
    /// Invocation timeout in seconds.
    pub timeout_secs: u64,
    /// Log retention in days.
    pub log_retention_days: u32,
}

/// A named, versioned pointer to the unit's current deployed version,
/// scoped to one environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionAlias {
    /// Logical id of the alias.
    pub logical_id: String,
    /// Alias name, equal to the environment name.
    pub name: String,
    /// The function the alias points at.
    pub function: ConfigValue,
    /// Autoscaling of the alias's provisioned concurrency.
    pub autoscaling: AutoscalingPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_tracking_bounds() {
        let policy = AutoscalingPolicy::target_tracking(MAX_PROVISIONED_CAPACITY, 0.5).unwrap();
        assert_eq!(policy.min_capacity, 1);
        assert_eq!(policy.max_capacity, 20);
        assert!((policy.target_value - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_target_outside_unit_interval_is_rejected() {
        assert!(AutoscalingPolicy::target_tracking(20, 0.0).is_err());
        assert!(AutoscalingPolicy::target_tracking(20, 1.5).is_err());
        assert!(AutoscalingPolicy::target_tracking(20, -0.1).is_err());
        assert!(AutoscalingPolicy::target_tracking(20, 1.0).is_ok());
    }
}
