mod output;
mod pipeline;

use std::path::PathBuf;

use activecalls_core::AppConfig;
use activecalls_feed::{fetch_incident_rows, FeedClient};
use activecalls_geocode::{NominatimClient, RateLimiter};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::pipeline::Pipeline;

#[derive(Debug, Parser)]
#[command(name = "activecalls")]
#[command(about = "Scrape Richmond active calls and geocode their locations")]
struct Cli {
    /// Path of the JSON snapshot (overrides ACTIVECALLS_OUTPUT_PATH).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Active-calls page to scrape (overrides ACTIVECALLS_SOURCE_URL).
    #[arg(long)]
    source_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = activecalls_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(source_url) = cli.source_url {
        config.source_url = source_url;
    }

    run(&config).await
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    tracing::info!(url = %config.source_url, "scraping active calls");
    let feed = FeedClient::new(&config.source_url, config.feed_timeout_secs)?;
    let rows = fetch_incident_rows(&feed)
        .await
        .context("failed to scrape active calls table")?;

    let geocoder = NominatimClient::new(
        &config.geocoder_url,
        &config.geocoder_user_agent,
        config.geocode_timeout_secs,
    )?;
    let limiter = RateLimiter::from_millis(config.geocode_delay_ms);
    let mut pipeline = Pipeline::new(&geocoder, limiter, &config.city_context);
    let incidents = pipeline.run(rows).await;

    let stdout = std::io::stdout();
    output::emit_snapshot(&incidents, &mut stdout.lock(), &config.output_path)?;
    Ok(())
}
