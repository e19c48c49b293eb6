//! Error types for the Zana deployment composer.
//!
//! This module provides the error hierarchy for all operations in the
//! composition lifecycle: context and parameter resolution, snapshot
//! loading, resource composition, and manifest synthesis.

use thiserror::Error;

/// The main error type for the Zana deployment composer.
#[derive(Debug, Error)]
pub enum ZanaDeployError {
    /// Configuration-resolution errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Parameter store errors.
    #[error("Parameter store error: {0}")]
    Store(#[from] StoreError),

    /// Composition errors.
    #[error("Composition error: {0}")]
    Composition(#[from] CompositionError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-resolution errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required parameter path has no value in the store snapshot.
    ///
    /// Fatal: a missing configuration value aborts the whole composition.
    /// The only permitted default is the environment selector itself.
    #[error("Missing configuration parameter: {path}")]
    MissingParameter {
        /// The namespaced parameter path that could not be satisfied.
        path: String,
    },

    /// A required process-level environment variable is missing.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the missing variable.
        name: String,
    },

    /// A configuration value is present but unusable.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// The logical configuration key.
        key: String,
        /// Description of the problem.
        message: String,
    },
}

/// Parameter store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The parameter file was not found.
    #[error("Parameter file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: std::path::PathBuf,
    },

    /// The parameter file could not be parsed.
    #[error("Failed to parse parameter file: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// SSM backend error.
    #[error("SSM parameter store error: {message}")]
    SsmError {
        /// Description of the SSM error.
        message: String,
    },
}

/// Composition errors.
#[derive(Debug, Error)]
pub enum CompositionError {
    /// A composition layer was invoked before its declared dependency exists.
    ///
    /// This is a programming-contract violation, not a runtime condition to
    /// recover from: the fixed dependency order makes it unreachable unless
    /// the root is driven incorrectly.
    #[error("Invalid composition order: cannot enter {attempted} from {current}")]
    OutOfOrder {
        /// The phase the root is currently in.
        current: String,
        /// The phase that was attempted.
        attempted: String,
    },

    /// An imported external resource cannot be resolved.
    ///
    /// Surfaced to the operator; never retried by this layer.
    #[error("External {kind} reference cannot be resolved: {reference}")]
    ExternalReference {
        /// Kind of external resource (hosted zone, certificate, extension).
        kind: String,
        /// The unresolvable reference.
        reference: String,
    },

    /// A declared resource violates one of its invariants.
    #[error("Invalid resource declaration for {resource}: {message}")]
    InvalidResource {
        /// Logical id of the offending resource.
        resource: String,
        /// Description of the violated invariant.
        message: String,
    },
}

/// Result type alias for composer operations.
pub type Result<T> = std::result::Result<T, ZanaDeployError>;

impl ZanaDeployError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ConfigError {
    /// Creates a missing-parameter error for a namespaced path.
    #[must_use]
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingParameter { path: path.into() }
    }

    /// Creates an invalid-value error for a logical key.
    #[must_use]
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl StoreError {
    /// Creates an SSM error with the given message.
    #[must_use]
    pub fn ssm(message: impl Into<String>) -> Self {
        Self::SsmError {
            message: message.into(),
        }
    }

    /// Creates a parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }
}

impl CompositionError {
    /// Creates an invalid-resource error.
    #[must_use]
    pub fn invalid_resource(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResource {
            resource: resource.into(),
            message: message.into(),
        }
    }
}
