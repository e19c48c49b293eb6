//! Composition layers and the composition root.
//!
//! Data flows strictly one direction: Configuration → Compute → Api → Edge →
//! Domain. Each layer consumes identifiers produced by the previous one, and
//! the root drives them in a fixed, testable phase order.

mod api;
mod compute;
mod domain;
mod edge;
mod root;

pub use api::ApiLayer;
pub use compute::ComputeProvisioner;
pub use domain::DomainBindingLayer;
pub use edge::EdgeCachingLayer;
pub use root::{split_origins, CompositionRoot, Phase, PhaseMachine};
