//! Deployment configuration: context loading and parameter resolution.
//!
//! Configuration flows one way: the process entry point loads an immutable
//! [`DeployContext`] once, a [`ParameterSnapshot`](crate::store::ParameterSnapshot)
//! is captured from the external store, and the [`ConfigResolver`] turns
//! logical keys into opaque [`ConfigValue`] references for the composition
//! layers. Inner components never read the process environment themselves.

mod context;
mod resolver;
mod value;

pub use context::{DeployContext, Environment, DEFAULT_ENVIRONMENT, ENV_VAR_ACCOUNT, ENV_VAR_ENVIRONMENT, ENV_VAR_REGION};
pub use resolver::{keys, parameter_path, ConfigResolver, APP_NAMESPACE, REQUIRED_KEYS};
pub use value::ConfigValue;
