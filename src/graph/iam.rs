//! Identity and permission declarations.
//!
//! Grants are least-privilege by construction: statements reject wildcard
//! actions outright, and a wildcard resource is accepted only for key
//! decryption, never for parameter reads.

use serde::Serialize;

use crate::error::{CompositionError, Result};

/// Action permitted to carry a wildcard resource.
const DECRYPT_ACTION: &str = "kms:Decrypt";

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Grant the listed actions.
    Allow,
    /// Deny the listed actions.
    Deny,
}

/// A single permission statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyStatement {
    /// Statement effect.
    pub effect: Effect,
    /// Granted actions.
    pub actions: Vec<String>,
    /// Resources the actions apply to.
    pub resources: Vec<String>,
}

impl PolicyStatement {
    /// Creates an allow statement, enforcing the wildcard rules.
    ///
    /// # Errors
    ///
    /// Returns an error if any action contains a wildcard, or if a wildcard
    /// resource is combined with anything other than key decryption.
    pub fn allow(
        actions: impl IntoIterator<Item = impl Into<String>>,
        resources: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let actions: Vec<String> = actions.into_iter().map(Into::into).collect();
        let resources: Vec<String> = resources.into_iter().map(Into::into).collect();

        for action in &actions {
            if action.contains('*') {
                return Err(CompositionError::invalid_resource(
                    "policy-statement",
                    format!("wildcard action is never granted: {action}"),
                )
                .into());
            }
        }

        if resources.iter().any(|r| r == "*")
            && actions.iter().any(|a| a != DECRYPT_ACTION)
        {
            return Err(CompositionError::invalid_resource(
                "policy-statement",
                "wildcard resource is accepted only for kms:Decrypt",
            )
            .into());
        }

        Ok(Self {
            effect: Effect::Allow,
            actions,
            resources,
        })
    }
}

/// A custom least-privilege policy owned by one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourcePolicy {
    /// Logical id of the policy.
    pub logical_id: String,
    /// Operator-facing description.
    pub description: String,
    /// The policy statements.
    pub statements: Vec<PolicyStatement>,
}

impl ResourcePolicy {
    /// Creates a custom policy from validated statements.
    #[must_use]
    pub fn new(
        logical_id: impl Into<String>,
        description: impl Into<String>,
        statements: Vec<PolicyStatement>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            description: description.into(),
            statements,
        }
    }
}

/// An identity assumed by a service principal.
///
/// Carries attached managed permission bundles plus at most one custom
/// least-privilege policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRole {
    /// Logical id of the role.
    pub logical_id: String,
    /// Service allowed to assume the role.
    pub service_principal: String,
    /// Operator-facing description.
    pub description: String,
    /// Names of attached managed permission bundles.
    pub managed_policies: Vec<String>,
    /// Optional custom policy.
    pub custom_policy: Option<ResourcePolicy>,
}

impl ServiceRole {
    /// Creates a service role.
    #[must_use]
    pub fn new(
        logical_id: impl Into<String>,
        service_principal: impl Into<String>,
        description: impl Into<String>,
        managed_policies: Vec<String>,
        custom_policy: Option<ResourcePolicy>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            service_principal: service_principal.into(),
            description: description.into(),
            managed_policies,
            custom_policy,
        }
    }
}
