mod batch;
mod config;
mod ledger;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use ledger_election::CallMessage;
use ledger_modules_api::default_context::DefaultContext;
use ledger_modules_api::TracingEventSink;
use serde_json::json;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::{from_toml_path, LedgerConfig};
use crate::ledger::Ledger;

#[derive(Parser)]
#[command(author, version, about)]
enum Cli {
    /// Applies the configured batch of calls and prints the outcome of each of them,
    /// followed by the state of every election.
    Run {
        /// Location of the ledger config file.
        config: PathBuf,
    },
    /// Prints the JSON schema of the election call message.
    Schema,
}

fn main() -> Result<(), anyhow::Error> {
    // Logs go to stderr, stdout is reserved for the results.
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_err| eprintln!("Unable to set global default subscriber"))
        .expect("Cannot fail to set subscriber");

    match Cli::parse() {
        Cli::Run { config } => run(&config),
        Cli::Schema => print_schema(),
    }
}

fn run(config_path: &Path) -> anyhow::Result<()> {
    let config: LedgerConfig = from_toml_path(config_path)
        .with_context(|| format!("Failed to read config {}", config_path.display()))?;
    let batch_path = config.batch_path(config_path);
    let calls = batch::from_json_path(&batch_path)
        .with_context(|| format!("Failed to read batch {}", batch_path.display()))?;
    info!(calls = calls.len(), batch = %batch_path.display(), "Loaded batch");

    let mut ledger = Ledger::new(&config.genesis, TracingEventSink)?;
    let mut now = config.genesis.timestamp;
    let mut stdout = std::io::stdout().lock();

    for (index, call) in calls.into_iter().enumerate() {
        now = now.max(call.timestamp);
        let outcome = ledger.apply(call)?;

        let mut record = serde_json::to_value(&outcome)?;
        if !config.runner.print_events {
            if let Some(fields) = record.as_object_mut() {
                fields.remove("events");
            }
        }
        record["call"] = json!(index);
        writeln!(stdout, "{record}")?;
    }

    for summary in ledger.summary(now) {
        writeln!(stdout, "{}", serde_json::to_string(&summary)?)?;
    }
    Ok(())
}

fn print_schema() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(CallMessage<DefaultContext>);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
