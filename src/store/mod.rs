//! Parameter store snapshots and fetch backends.
//!
//! The external key-value parameter service is captured once per run into an
//! immutable [`ParameterSnapshot`]; composition then runs synchronously over
//! the snapshot. Fetching is the only asynchronous work in the system.

mod file;
mod snapshot;
mod source;
mod ssm;

pub use file::FileParameterSource;
pub use snapshot::ParameterSnapshot;
pub use source::ParameterSource;
pub use ssm::SsmParameterSource;
