//! Procflow - Main Entry Point

use clap::Parser;
use procflow::cli::{cmd_run, cmd_scan, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "procflow=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            uid,
            capacity,
            consumers,
            no_producer,
            drain_timeout_ms,
        } => {
            cmd_run(uid, capacity, consumers, no_producer, drain_timeout_ms)?;
        }
        Commands::Scan { uid, json } => {
            cmd_scan(uid, json)?;
        }
    }

    Ok(())
}
