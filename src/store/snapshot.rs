//! Point-in-time capture of the external parameter store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{parameter_path, Environment, REQUIRED_KEYS};

/// An immutable capture of parameter paths and their current values.
///
/// Composition treats the values as opaque; the snapshot mainly answers
/// whether a path can be satisfied at all. Two runs over an identical
/// snapshot produce structurally identical graphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSnapshot {
    /// Path -> value, sorted for deterministic iteration.
    parameters: BTreeMap<String, String>,
}

impl ParameterSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parameters: BTreeMap::new(),
        }
    }

    /// Inserts a parameter by full path.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(path.into(), value.into());
    }

    /// Builder-style insert of an environment-scoped key.
    #[must_use]
    pub fn with_key(
        mut self,
        environment: &Environment,
        key: &str,
        value: impl Into<String>,
    ) -> Self {
        self.insert(parameter_path(environment, key), value);
        self
    }

    /// Returns true if the snapshot can satisfy a path.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.parameters.contains_key(path)
    }

    /// Returns the captured value for a path, if present.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.parameters.get(path).map(String::as_str)
    }

    /// Returns the number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Returns the required paths this snapshot cannot satisfy for an
    /// environment, in declaration order.
    #[must_use]
    pub fn missing_paths(&self, environment: &Environment) -> Vec<String> {
        REQUIRED_KEYS
            .iter()
            .map(|key| parameter_path(environment, key))
            .filter(|path| !self.contains(path))
            .collect()
    }

    /// Iterates over captured (path, value) pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameters
            .iter()
            .map(|(path, value)| (path.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for ParameterSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;

    #[test]
    fn test_with_key_builds_namespaced_path() {
        let env = Environment::new("test");
        let snapshot = ParameterSnapshot::new().with_key(&env, keys::API_HOST, "api.zana.example");

        assert!(snapshot.contains("/zana/test/api-host"));
        assert_eq!(snapshot.get("/zana/test/api-host"), Some("api.zana.example"));
    }

    #[test]
    fn test_missing_paths_reports_gaps_in_order() {
        let env = Environment::new("prod");
        let snapshot = ParameterSnapshot::new()
            .with_key(&env, keys::CORS_ALLOW_ORIGINS, "https://zana.example")
            .with_key(&env, keys::API_HOST, "api.zana.example");

        let missing = snapshot.missing_paths(&env);
        assert_eq!(
            missing,
            vec![
                "/zana/prod/hosted-zone-id",
                "/zana/prod/hosted-zone-name",
                "/zana/prod/certificate-arn",
                "/zana/prod/lambda-ssm-extension-arn",
                "/zana/prod/lambda-insights-extension-arn",
            ]
        );
    }

    #[test]
    fn test_full_snapshot_has_no_missing_paths() {
        let env = Environment::new("test");
        let mut snapshot = ParameterSnapshot::new();
        for key in crate::config::REQUIRED_KEYS {
            snapshot.insert(parameter_path(&env, key), "value");
        }

        assert!(snapshot.missing_paths(&env).is_empty());
        assert_eq!(snapshot.len(), 7);
    }
}
