//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying composition
//! results to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::error::{Result, ZanaDeployError};
use crate::graph::ResourceGraph;
use crate::synth::{GraphHasher, Manifest};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Resource row for table display.
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Logical ID")]
    logical_id: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a composed resource graph for display.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_graph(&self, graph: &ResourceGraph, hash: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_pretty_json(graph),
            OutputFormat::Text => Ok(Self::format_graph_text(graph, hash)),
        }
    }

    /// Formats a graph as text.
    fn format_graph_text(graph: &ResourceGraph, hash: &str) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\nResource graph for '{}' in {} ({})\n",
            graph.context.environment, graph.context.region, graph.context.account
        );
        let _ = write!(output, "Graph hash: {}\n\n", GraphHasher::short_hash(hash));

        let rows: Vec<ResourceRow> = graph
            .resource_index()
            .into_iter()
            .enumerate()
            .map(|(i, (kind, logical_id))| ResourceRow {
                index: i + 1,
                kind: kind.to_string(),
                logical_id: logical_id.to_string(),
            })
            .collect();

        let table = Table::new(rows).to_string();
        output.push_str(&table);
        output.push('\n');

        let _ = write!(
            output,
            "\n{} resources declared\n",
            graph.resource_count().to_string().green()
        );

        output
    }

    /// Formats a validation result for display.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_validation(&self, environment: &str, missing: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_pretty_json(&serde_json::json!({
                "environment": environment,
                "valid": missing.is_empty(),
                "missing": missing,
            })),
            OutputFormat::Text => Ok(Self::format_validation_text(environment, missing)),
        }
    }

    /// Formats a validation result as text.
    fn format_validation_text(environment: &str, missing: &[String]) -> String {
        let mut output = String::new();

        if missing.is_empty() {
            let _ = write!(
                output,
                "{} Parameter store satisfies environment '{environment}'.\n",
                "OK".green()
            );
        } else {
            let _ = write!(
                output,
                "{} {} parameter(s) missing for environment '{environment}':\n",
                "FAIL".red(),
                missing.len()
            );
            for path in missing {
                let _ = writeln!(output, "  - {path}");
            }
        }

        output
    }

    /// Formats a synthesis summary for display.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_synth(&self, manifest: &Manifest, hash: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_pretty_json(&serde_json::json!({
                "environment": manifest.environment,
                "resources": manifest.resources.len(),
                "hash": hash,
            })),
            OutputFormat::Text => Ok(format!(
                "Synthesized {} resources for '{}' (hash {})\n",
                manifest.resources.len().to_string().green(),
                manifest.environment,
                GraphHasher::short_hash(hash)
            )),
        }
    }
}

/// Serializes a value to pretty-printed JSON output.
fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ZanaDeployError::internal(format!("Failed to serialize output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::CompositionRoot;
    use crate::config::{keys, DeployContext, Environment};
    use crate::store::ParameterSnapshot;

    fn composed_graph() -> ResourceGraph {
        let env = Environment::new("test");
        let snapshot = ParameterSnapshot::new()
            .with_key(&env, keys::CORS_ALLOW_ORIGINS, "https://zana.example")
            .with_key(&env, keys::HOSTED_ZONE_ID, "Z123")
            .with_key(&env, keys::HOSTED_ZONE_NAME, "zana.example")
            .with_key(&env, keys::CERTIFICATE_ARN, "arn:acm:cert")
            .with_key(&env, keys::API_HOST, "api.zana.example")
            .with_key(&env, keys::LAMBDA_SSM_EXTENSION_ARN, "arn:ssm-ext")
            .with_key(&env, keys::LAMBDA_INSIGHTS_EXTENSION_ARN, "arn:insights-ext");
        let context = DeployContext::new("123456789012", "eu-central-1", env);
        CompositionRoot::new(context, snapshot).compose().unwrap()
    }

    #[test]
    fn test_text_graph_lists_every_resource() {
        let graph = composed_graph();
        let hash = GraphHasher::hash(&graph).unwrap();
        let formatter = OutputFormatter::new(OutputFormat::Text);

        let output = formatter.format_graph(&graph, &hash).unwrap();
        for (_, logical_id) in graph.resource_index() {
            assert!(output.contains(logical_id), "missing {logical_id}");
        }
    }

    #[test]
    fn test_json_graph_is_valid_json() {
        let graph = composed_graph();
        let hash = GraphHasher::hash(&graph).unwrap();
        let formatter = OutputFormatter::new(OutputFormat::Json);

        let output = formatter.format_graph(&graph, &hash).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["context"]["environment"], "test");
    }

    #[test]
    fn test_json_validation_reports_gaps() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let missing = vec![String::from("/zana/test/api-host")];

        let output = formatter.format_validation("test", &missing).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["valid"], false);
        assert_eq!(parsed["missing"][0], "/zana/test/api-host");
    }

    #[test]
    fn test_text_validation_passes_on_empty_gaps() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let output = formatter.format_validation("prod", &[]).unwrap();
        assert!(output.contains("satisfies"));
    }

    #[test]
    fn test_synth_summary_carries_short_hash() {
        let graph = composed_graph();
        let hash = GraphHasher::hash(&graph).unwrap();
        let manifest = Manifest::render(&graph).unwrap();
        let formatter = OutputFormatter::new(OutputFormat::Json);

        let output = formatter.format_synth(&manifest, &hash).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["resources"], 12);
        assert_eq!(parsed["hash"], hash.as_str());
    }
}
