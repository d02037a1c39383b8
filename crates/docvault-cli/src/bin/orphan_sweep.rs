use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;
use clap::Parser;

use docvault_cli::{init_tracing, report_error};
use docvault_core::VaultConfig;
use docvault_db::{setup_database, DocumentRepository};
use docvault_services::{OrphanSweeper, SweepMode, SweepReport};
use docvault_storage::{Disk, LocalDisk};

#[derive(Parser, Debug)]
#[command(name = "orphan_sweep")]
#[command(about = "Find files on disk that no document record points at")]
struct Args {
    /// Delete the orphans instead of only reporting them
    #[arg(long)]
    apply: bool,

    /// Skip files younger than this many seconds
    #[arg(long, default_value_t = 3600)]
    min_age_secs: u32,

    /// Output format: json or table (default: table)
    #[arg(long, default_value = "table")]
    format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = VaultConfig::from_env()?;
    let pool = setup_database(&config).await?;
    let disk: Arc<dyn Disk> = Arc::new(LocalDisk::new(&config.storage_root).await?);

    let mode = if args.apply {
        SweepMode::Apply
    } else {
        SweepMode::DryRun
    };
    let sweeper = OrphanSweeper::new(
        DocumentRepository::new(pool),
        disk,
        Duration::seconds(args.min_age_secs as i64),
        mode,
    );

    let report = match sweeper.run().await {
        Ok(report) => report,
        Err(e) => {
            report_error(&e);
            return Err(e.into());
        }
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report, mode),
    }

    Ok(())
}

fn print_report(report: &SweepReport, mode: SweepMode) {
    println!("\n=== Orphan Sweep ===\n");

    println!("Scanned:        {}", report.scanned);
    println!("Skipped recent: {}", report.skipped_recent);
    println!("Orphans found:  {}", report.orphans.len());
    if mode == SweepMode::Apply {
        println!("Removed:        {}", report.removed);
    }

    if !report.orphans.is_empty() {
        println!("\n--- Orphaned Files ---");
        for key in &report.orphans {
            println!("{}", key);
        }
        if mode == SweepMode::DryRun {
            println!("\nDry run only; pass --apply to delete these files.");
        }
    }

    println!();
}
