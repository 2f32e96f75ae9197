//! Procflow CLI Module
//!
//! Command-line interface for running the pipeline and inspecting the
//! work-item scanner.

use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::*;

use crate::pipeline::{Pipeline, PipelineConfig};
use crate::source::{ProcessScanner, WorkItem};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}

fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}

fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn kv(key: &str, val: &str) {
    println!("  {:<16} {}", muted(key), val.white());
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "procflow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bounded producer/consumer pipeline over host processes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline over processes owned by a UID
    Run {
        /// Owner UID used to select processes
        #[arg(short, long)]
        uid: u32,
        /// Queue capacity
        #[arg(short, long, default_value_t = 10)]
        capacity: usize,
        /// Number of consumer workers
        #[arg(short = 'n', long, default_value_t = 4)]
        consumers: usize,
        /// Start consumers only, without a producer
        #[arg(long)]
        no_producer: bool,
        /// Maximum time to wait for the queue to drain, in milliseconds
        #[arg(long, default_value_t = 10_000)]
        drain_timeout_ms: u64,
    },
    /// List the work items the scanner would produce, without running
    Scan {
        /// Owner UID used to select processes
        #[arg(short, long)]
        uid: u32,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Run the full pipeline and print the final report
pub fn cmd_run(
    uid: u32,
    capacity: usize,
    consumers: usize,
    no_producer: bool,
    drain_timeout_ms: u64,
) -> anyhow::Result<()> {
    let config = PipelineConfig {
        capacity,
        producer_enabled: !no_producer,
        consumers,
    };

    let handle = Pipeline::start(config, ProcessScanner::new(uid))?;
    let drained = if no_producer {
        true
    } else {
        handle.wait_until_idle(Duration::from_millis(drain_timeout_ms))
    };
    if !drained {
        tracing::warn!(
            timeout_ms = drain_timeout_ms,
            depth = handle.queue_depth(),
            "queue did not drain before the timeout; report will show residual items"
        );
    }
    let report = handle.stop();

    section("Report");
    if !drained {
        println!("  {}", muted("timed out waiting for the queue to drain"));
    }
    kv("Produced", &report.produced_count.to_string());
    kv("Consumed", &report.consumed_count.to_string());
    kv("Residual", &report.residual_items.to_string());
    kv("Total elapsed", &report.total_elapsed_hms());
    println!();
    println!("  {} pipeline reported", ok("✓"));
    println!();

    Ok(())
}

/// Print the scanner's snapshot for a UID
pub fn cmd_scan(uid: u32, json: bool) -> anyhow::Result<()> {
    let items: Vec<WorkItem> = ProcessScanner::snapshot(uid);

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    section(&format!("Processes owned by UID {uid}"));
    if items.is_empty() {
        println!("  {}", muted("no matching processes"));
    }
    for item in &items {
        println!(
            "  {:<10} {}",
            item.id,
            muted(&format!("started {} ns since epoch", item.start_timestamp_ns))
        );
    }
    println!();
    println!("  {} {} item(s)", ok("✓"), items.len());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
