mod api_types;
mod categories;
mod config;
mod dates;
mod fallback;
mod fetch;
mod geo;
mod heuristics;
mod models;
mod pipeline;
mod synthesize;

use anyhow::Result;
use clap::Parser;
use config::PipelineConfig;
use fetch::GdeltClient;
use pipeline::{collect_events, SortOrder};
use tracing::info;

/// riskfeed - live global event batch generator for the risk map
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Write the JSON batch to this file instead of stdout
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,

    /// Re-run the collection every N seconds (single run when absent)
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Batch ordering
    #[arg(long, value_enum, default_value = "recency")]
    order: SortOrder,

    /// Accepted events per category
    #[arg(long, default_value_t = 15)]
    max_per_category: usize,

    /// Minimum batch size before curated fallback entries are appended
    #[arg(long, default_value_t = 5)]
    min_viable: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting riskfeed");

    let args = Args::parse();
    let cfg = PipelineConfig {
        max_events_per_category: args.max_per_category,
        min_viable_events: args.min_viable,
        ..PipelineConfig::default()
    };
    let client = GdeltClient::new(&cfg)?;

    loop {
        let start = std::time::Instant::now();
        let events = collect_events(&client, &cfg, args.order).await;
        let json = serde_json::to_string_pretty(&events)?;

        match &args.output {
            Some(path) => std::fs::write(path, &json)?,
            None => println!("{json}"),
        }

        info!(
            "Batch emitted - events={}, duration={:.2}s",
            events.len(),
            start.elapsed().as_secs_f32()
        );

        match args.interval_secs {
            Some(secs) => tokio::time::sleep(std::time::Duration::from_secs(secs)).await,
            None => break,
        }
    }

    Ok(())
}
