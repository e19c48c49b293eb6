//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Zana Deploy - declarative delivery-pipeline composer for the books API.
#[derive(Parser, Debug)]
#[command(name = "zana-deploy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a local parameter file (uses the AWS parameter store when absent).
    #[arg(short, long, global = true, env = "ZANA_PARAMS_FILE")]
    pub params_file: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose the resource graph and render the deployable manifest.
    Synth {
        /// Write the manifest to this path instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Check that the parameter store can satisfy a full composition run.
    Validate,

    /// Compose the resource graph and display its resources.
    Graph,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}
