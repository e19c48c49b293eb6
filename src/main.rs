//! Zana Deploy CLI entrypoint.
//!
//! This is the main entrypoint for the zana-deploy command-line tool.

use std::process::ExitCode;

use zana_deploy::cli::{Cli, Commands, OutputFormatter};
use zana_deploy::compose::CompositionRoot;
use zana_deploy::config::DeployContext;
use zana_deploy::error::Result;
use zana_deploy::store::{FileParameterSource, ParameterSource, SsmParameterSource};
use zana_deploy::synth::{GraphHasher, Manifest};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    // Load .env before reading the deployment context
    if dotenvy::dotenv().is_ok() {
        debug!("Loaded .env file");
    }

    let formatter = OutputFormatter::new(cli.output);
    let context = DeployContext::from_env()?;

    let source: Box<dyn ParameterSource> = match &cli.params_file {
        Some(path) => Box::new(FileParameterSource::new(path)),
        None => Box::new(SsmParameterSource::new(Some(&context.region)).await),
    };
    debug!("Using '{}' parameter source", source.source_type());

    let snapshot = source.fetch(&context.environment).await?;

    match cli.command {
        Commands::Synth { out } => cmd_synth(context, snapshot, out, &formatter),
        Commands::Validate => cmd_validate(&context, &snapshot, &formatter),
        Commands::Graph => cmd_graph(context, snapshot, &formatter),
    }
}

/// Compose and render the deployable manifest.
fn cmd_synth(
    context: DeployContext,
    snapshot: zana_deploy::store::ParameterSnapshot,
    out: Option<std::path::PathBuf>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let graph = CompositionRoot::new(context, snapshot).compose()?;
    let hash = GraphHasher::hash(&graph)?;
    let manifest = Manifest::render(&graph)?;
    let json = manifest.to_json()?;

    match out {
        Some(path) => {
            std::fs::write(&path, &json)?;
            info!("Manifest written to: {}", path.display());
            eprintln!("{}", formatter.format_synth(&manifest, &hash)?);
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}

/// Check the parameter store against the full required key set.
fn cmd_validate(
    context: &DeployContext,
    snapshot: &zana_deploy::store::ParameterSnapshot,
    formatter: &OutputFormatter,
) -> Result<()> {
    let missing = snapshot.missing_paths(&context.environment);
    eprintln!(
        "{}",
        formatter.format_validation(context.environment.as_str(), &missing)?
    );

    if missing.is_empty() {
        Ok(())
    } else {
        Err(zana_deploy::error::ConfigError::missing(missing[0].clone()).into())
    }
}

/// Compose and display the resource graph.
fn cmd_graph(
    context: DeployContext,
    snapshot: zana_deploy::store::ParameterSnapshot,
    formatter: &OutputFormatter,
) -> Result<()> {
    let graph = CompositionRoot::new(context, snapshot).compose()?;
    let hash = GraphHasher::hash(&graph)?;
    eprintln!("{}", formatter.format_graph(&graph, &hash)?);
    Ok(())
}
