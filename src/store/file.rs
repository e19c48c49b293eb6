//! YAML-file parameter source.
//!
//! A local stand-in for the external store, used for offline synthesis and
//! tests. The file maps environment names to key/value sections:
//!
//! ```yaml
//! test:
//!   cors-allow-origins: "https://a.example,https://b.example"
//!   api-host: api.test.zana.example
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::config::{parameter_path, Environment};
use crate::error::{Result, StoreError, ZanaDeployError};

use super::snapshot::ParameterSnapshot;
use super::source::ParameterSource;

/// File-backed parameter source.
#[derive(Debug)]
pub struct FileParameterSource {
    /// Path to the YAML parameter file.
    path: PathBuf,
}

impl FileParameterSource {
    /// Creates a source reading from the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ParameterSource for FileParameterSource {
    async fn fetch(&self, environment: &Environment) -> Result<ParameterSnapshot> {
        info!("Loading parameters from: {}", self.path.display());

        if !self.path.exists() {
            return Err(ZanaDeployError::Store(StoreError::FileNotFound {
                path: self.path.clone(),
            }));
        }

        let content = fs::read_to_string(&self.path).await?;

        let sections: BTreeMap<String, BTreeMap<String, String>> =
            serde_yaml::from_str(&content).map_err(|e| {
                ZanaDeployError::Store(StoreError::parse(format!("YAML parse error: {e}")))
            })?;

        let mut snapshot = ParameterSnapshot::new();
        if let Some(section) = sections.get(environment.as_str()) {
            for (key, value) in section {
                snapshot.insert(parameter_path(environment, key), value);
            }
        } else {
            debug!("No section for environment '{environment}' in parameter file");
        }

        debug!(
            "Captured {} parameters for environment '{environment}'",
            snapshot.len()
        );
        Ok(snapshot)
    }

    fn source_type(&self) -> &'static str {
        "file"
    }
}
