use anyhow::Result;
use clap::Parser;

use docvault_cli::{format_size, init_tracing};
use docvault_core::{OwnerKind, VaultConfig};
use docvault_db::{setup_database, KindStats, StatsRepository};

#[derive(Parser, Debug)]
#[command(name = "vault_stats")]
#[command(about = "Get per-owner-kind statistics for the document vault")]
struct Args {
    /// Optional owner kind to filter by (e.g. property, client)
    #[arg(long, value_name = "KIND")]
    kind: Option<String>,

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
    let stats_repo = StatsRepository::new(pool);

    let stats = match args.kind {
        Some(ref raw) => {
            let kind = parse_kind(raw)?;
            vec![stats_repo.collect_for_kind(kind).await?]
        }
        None => stats_repo.collect().await?,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => print_stats_table(&stats),
    }

    Ok(())
}

fn parse_kind(raw: &str) -> Result<OwnerKind> {
    OwnerKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == raw)
        .ok_or_else(|| {
            let known: Vec<&str> = OwnerKind::ALL.iter().map(|kind| kind.as_str()).collect();
            anyhow::anyhow!(
                "Unknown owner kind '{}' (expected one of: {})",
                raw,
                known.join(", ")
            )
        })
}

fn print_stats_table(stats: &[KindStats]) {
    println!("\n=== Document Vault Statistics ===\n");

    if stats.is_empty() {
        println!("No documents or folders stored yet.");
        println!();
        return;
    }

    println!(
        "{:<16} {:>10} {:>10} {:>12}",
        "Kind", "Documents", "Folders", "Size"
    );
    for entry in stats {
        println!(
            "{:<16} {:>10} {:>10} {:>12}",
            entry.kind.as_str(),
            entry.documents,
            entry.folders,
            format_size(entry.total_bytes)
        );
    }

    let total_documents: i64 = stats.iter().map(|s| s.documents).sum();
    let total_bytes: i64 = stats.iter().map(|s| s.total_bytes).sum();
    println!(
        "\nTotal: {} documents, {}",
        total_documents,
        format_size(total_bytes)
    );
    println!();
}
