//! Opaque configuration values threaded through the composition.
//!
//! Store-backed parameters are materialized by the provisioning engine at
//! apply time, not at composition time. [`ConfigValue`] models every such
//! value as a reference the composition threads without inspecting: a
//! literal is the exception, not the rule, and composition-time code must
//! not branch on what a deferred reference will eventually resolve to.

use serde::{Deserialize, Serialize};

/// A configuration value that may only materialize at apply time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ConfigValue {
    /// A value known at composition time.
    Literal {
        /// The literal value.
        value: String,
    },
    /// A store-backed parameter materialized by the provisioning engine.
    Deferred {
        /// The namespaced parameter path.
        path: String,
    },
    /// An output of another declared resource, assigned by the synthesizer.
    Attribute {
        /// Logical id of the producing resource.
        resource: String,
        /// Attribute name on that resource.
        attribute: String,
    },
    /// A concatenation of values, joined at apply time.
    Concat {
        /// The parts, in order.
        parts: Vec<ConfigValue>,
    },
}

impl ConfigValue {
    /// Creates a literal value.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
        }
    }

    /// Creates a deferred store-backed reference.
    #[must_use]
    pub fn deferred(path: impl Into<String>) -> Self {
        Self::Deferred { path: path.into() }
    }

    /// Creates a cross-resource attribute reference.
    #[must_use]
    pub fn attribute(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Attribute {
            resource: resource.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates a concatenation of parts.
    #[must_use]
    pub fn concat(parts: impl IntoIterator<Item = Self>) -> Self {
        Self::Concat {
            parts: parts.into_iter().collect(),
        }
    }

    /// Returns true if the value is not known until apply time.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        !matches!(self, Self::Literal { .. })
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal { value } => write!(f, "{value}"),
            Self::Deferred { path } => write!(f, "${{ssm:{path}}}"),
            Self::Attribute {
                resource,
                attribute,
            } => write!(f, "${{{resource}.{attribute}}}"),
            Self::Concat { parts } => {
                for part in parts {
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Literal { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_display() {
        let value = ConfigValue::literal("prod");
        assert_eq!(value.to_string(), "prod");
        assert!(!value.is_deferred());
    }

    #[test]
    fn test_deferred_display() {
        let value = ConfigValue::deferred("/zana/prod/api-host");
        assert_eq!(value.to_string(), "${ssm:/zana/prod/api-host}");
        assert!(value.is_deferred());
    }

    #[test]
    fn test_concat_display() {
        let value = ConfigValue::concat([
            ConfigValue::attribute("zana-books-api", "rest-api-id"),
            ConfigValue::literal(".execute-api.eu-central-1.amazonaws.com"),
        ]);
        assert_eq!(
            value.to_string(),
            "${zana-books-api.rest-api-id}.execute-api.eu-central-1.amazonaws.com"
        );
        assert!(value.is_deferred());
    }
}
