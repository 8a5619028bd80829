//! CLI entry point: write log records into Neo4j.

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use neolog_core::{LogRecord, Severity, TransportOptions};
use neolog_transport::{Neo4jTransport, PersistenceError, Transport};

#[derive(Parser)]
#[command(name = "neolog")]
#[command(about = "Write log records into Neo4j")]
struct Cli {
    /// Severity of the records (defaults to the transport's min_level).
    #[arg(short, long)]
    level: Option<String>,

    /// Message to write. Without it, each stdin line becomes one record.
    #[arg(short, long)]
    message: Option<String>,

    /// Metadata as a JSON object, attached to every record.
    #[arg(long)]
    meta: Option<String>,

    /// Override the node label from config.
    #[arg(long)]
    label: Option<String>,

    /// Config file prefix (default: neolog).
    #[arg(short, long, default_value = "neolog")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let metadata = cli.meta.as_deref().map(parse_meta).transpose()?;

    let mut options = TransportOptions::load(&cli.config)?;
    if cli.label.is_some() {
        options.node_label = cli.label.clone();
    }
    let transport = Neo4jTransport::connect(options)?;

    if !admitted(transport.level(), cli.level.as_deref()) {
        tracing::info!(
            level = cli.level.as_deref().unwrap_or_default(),
            min_level = %transport.level(),
            "Level below min_level, nothing written"
        );
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<Result<(), PersistenceError>>();
    let mut submitted = 0usize;

    let mut submit = |message: String| {
        let record = LogRecord {
            level: cli.level.clone(),
            message: Some(message),
            metadata: metadata.clone(),
        };
        let tx = tx.clone();
        transport.submit(
            record,
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
        );
        submitted += 1;
    };

    match &cli.message {
        Some(message) => submit(message.clone()),
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if !line.trim().is_empty() {
                    submit(line);
                }
            }
        }
    }
    drop(tx);

    let mut failed = 0usize;
    while let Some(result) = rx.recv().await {
        if let Err(e) = result {
            tracing::error!(error = %e, "Log write failed");
            failed += 1;
        }
    }

    tracing::info!(submitted, failed, label = %transport.config().node_label(), "Done");
    if failed > 0 {
        anyhow::bail!("{failed} of {submitted} records were not written");
    }
    Ok(())
}

/// Records without an explicit level take `min_level`, so they always pass.
fn admitted(min_level: &str, level: Option<&str>) -> bool {
    level.map_or(true, |level| Severity::admits(min_level, level))
}

fn parse_meta(raw: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(raw).context("--meta is not valid JSON")?;
    if !value.is_object() {
        anyhow::bail!("--meta must be a JSON object, got: {raw}");
    }
    Ok(value)
}
