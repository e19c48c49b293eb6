//! Parameter source trait definition.
//!
//! This module defines the common interface for snapshot fetch backends.

use async_trait::async_trait;

use crate::config::Environment;
use crate::error::Result;

use super::snapshot::ParameterSnapshot;

/// Trait for parameter snapshot backends.
#[async_trait]
pub trait ParameterSource: Send + Sync {
    /// Captures the store's current parameters for one environment.
    ///
    /// The capture is an existence-and-value snapshot; it does not imply the
    /// values are final, only that the paths can be satisfied.
    async fn fetch(&self, environment: &Environment) -> Result<ParameterSnapshot>;

    /// Gets the backend type name.
    fn source_type(&self) -> &'static str;
}

#[async_trait]
impl ParameterSource for Box<dyn ParameterSource> {
    async fn fetch(&self, environment: &Environment) -> Result<ParameterSnapshot> {
        (**self).fetch(environment).await
    }

    fn source_type(&self) -> &'static str {
        (**self).source_type()
    }
}
