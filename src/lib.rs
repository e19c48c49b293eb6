// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Zana Deploy
//!
//! A declarative composer for the Zana books API delivery pipeline.
//!
//! ## Overview
//!
//! Zana Deploy turns a small set of environment-scoped parameters into a
//! complete, internally consistent resource graph for one serverless web API:
//!
//! - A custom-runtime function with provisioned-concurrency autoscaling
//! - A regional REST entry point with throttling, logging, and CORS
//! - An edge caching distribution fronting the deployed stage
//! - A DNS alias binding the public hostname to the distribution
//!
//! ## Architecture
//!
//! Composition is **all-or-nothing**: configuration is captured once into an
//! immutable snapshot, then a fixed sequence of layers declares resources,
//! each consuming identifiers produced by the previous one. The first
//! unresolvable parameter aborts the run with nothing built.
//!
//! ## Modules
//!
//! - [`config`]: Deployment context and parameter resolution
//! - [`store`]: Parameter snapshots and fetch backends (file, SSM)
//! - [`graph`]: Declarative resource model
//! - [`compose`]: Composition layers and the composition root
//! - [`synth`]: Manifest rendering and graph hashing
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! test:
//!   cors-allow-origins: "https://test.zana.example"
//!   hosted-zone-id: Z0123456789
//!   hosted-zone-name: zana.example
//!   certificate-arn: arn:aws:acm:us-east-1:123456789012:certificate/abc
//!   api-host: api.zana.example
//!   lambda-ssm-extension-arn: arn:aws:lambda:eu-central-1:015030872274:layer:AWS-Parameters-and-Secrets-Lambda-Extension:4
//!   lambda-insights-extension-arn: arn:aws:lambda:eu-central-1:580247275435:layer:LambdaInsightsExtension:21
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod graph;
pub mod store;
pub mod synth;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use compose::{CompositionRoot, Phase, PhaseMachine};
pub use config::{ConfigResolver, ConfigValue, DeployContext, Environment};
pub use error::{Result, ZanaDeployError};
pub use graph::ResourceGraph;
pub use store::{FileParameterSource, ParameterSnapshot, ParameterSource, SsmParameterSource};
pub use synth::{GraphHasher, Manifest};
