//! pathkey CLI - demonstration driver for the pathkey library
//!
//! Reads graphs and values as JSON and prints results as JSON, so it can be
//! wrapped by scripts in other languages.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pathkey::{collect_paths, dedup, CanonicalKey, Value};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "pathkey")]
#[command(about = "Enumerate graph paths and deduplicate nested values")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// List every path from a start node to the terminal nodes it reaches
    Paths {
        /// JSON file mapping each node to an array of successors
        graph: PathBuf,
        /// Node to start from
        #[arg(short, long)]
        start: String,
        /// Drop duplicate paths
        #[arg(long)]
        dedup: bool,
    },

    /// Deduplicate a JSON array of values (reads stdin without a file)
    Dedup {
        /// JSON file holding an array
        file: Option<PathBuf>,
    },

    /// Show the canonical form and fingerprint of a JSON value
    Key {
        /// JSON file holding one value (reads stdin without a file)
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Paths {
            graph,
            start,
            dedup: drop_duplicates,
        } => {
            let adjacency = load_graph(&graph)?;
            let paths = collect_paths(&start, &adjacency);
            debug!(nodes = adjacency.len(), paths = paths.len(), "Walked graph");

            let items: Vec<serde_json::Value> = if drop_duplicates {
                let values = paths
                    .iter()
                    .map(|path| Value::list(path.iter().map(String::as_str)));
                dedup(values)?.iter().map(Value::to_json).collect()
            } else {
                paths.iter().map(|path| serde_json::json!(path)).collect()
            };

            output(
                &cli.format,
                &serde_json::json!({
                    "start": start,
                    "count": items.len(),
                    "paths": items
                }),
            )?;
        }

        Commands::Dedup { file } => {
            let input = read_json(file.as_deref())?;
            let serde_json::Value::Array(items) = input else {
                bail!("Expected a JSON array of values");
            };
            let total = items.len();

            let unique = dedup(items.into_iter().map(Value::from))?;
            let values: Vec<_> = unique.iter().map(Value::to_json).collect();
            let repr: Vec<_> = unique.iter().map(Value::to_string).collect();

            output(
                &cli.format,
                &serde_json::json!({
                    "input": total,
                    "count": values.len(),
                    "values": values,
                    "repr": repr
                }),
            )?;
        }

        Commands::Key { file } => {
            let input = read_json(file.as_deref())?;
            let key = CanonicalKey::new(input)?;

            output(
                &cli.format,
                &serde_json::json!({
                    "fingerprint": key.fingerprint().to_hex(),
                    "canonical": key.canonical().to_string(),
                    "value": key.restore().to_string()
                }),
            )?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pathkey=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load `{"node": ["successor", ...]}`; numeric node names are accepted
fn load_graph(path: &Path) -> anyhow::Result<HashMap<String, Vec<String>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph {}", path.display()))?;
    let raw: HashMap<String, Vec<serde_json::Value>> =
        serde_json::from_str(&content).context("Graph must be an object of arrays")?;

    raw.into_iter()
        .map(|(node, successors)| {
            let successors = successors
                .into_iter()
                .map(|s| match s {
                    serde_json::Value::String(name) => Ok(name),
                    serde_json::Value::Number(n) => Ok(n.to_string()),
                    other => bail!("Invalid successor of {}: {}", node, other),
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok((node, successors))
        })
        .collect()
}

fn read_json(file: Option<&Path>) -> anyhow::Result<serde_json::Value> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&content)?)
}

fn output(format: &OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Text => serde_json::to_string_pretty(value)?,
    };
    println!("{}", rendered);
    Ok(())
}
