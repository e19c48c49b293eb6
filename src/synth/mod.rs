//! Manifest synthesis and graph hashing.
//!
//! A composed [`crate::graph::ResourceGraph`] is an in-memory value; this
//! module turns it into a deployable JSON manifest and a deterministic
//! content hash for change detection between runs.

mod hash;
mod manifest;

pub use hash::GraphHasher;
pub use manifest::{Manifest, ManifestResource, MANIFEST_VERSION};
