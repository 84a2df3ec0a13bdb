//! # Headline Impact
//!
//! Scrapes headline/link pairs from arbitrary news listing pages and scores
//! the tone of each headline.
//!
//! ## Features
//!
//! - Tiered headline heuristics (`<article>` elements, article-like classes,
//!   `data-testid` markers, then a bare-link fallback)
//! - Sweeps up to three consecutive `?page=N` pages per request, capped at
//!   30 headlines
//! - Lexicon-based polarity scoring mapped to Positive / Negative / Neutral
//!   with a confidence between 50 and 100
//! - One-shot CLI output or an HTTP `POST /analyze` endpoint
//!
//! ## Usage
//!
//! ```sh
//! headline_impact analyze --url https://example.com/news
//! headline_impact serve --bind 127.0.0.1:5000
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: Download `url?page=N` for each page in the window
//! 2. **Extraction**: Locate headlines and resolve their links
//! 3. **Aggregation**: Concatenate pages until 30 headlines are collected
//! 4. **Classification**: Score each headline and attach a label

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod models;
mod pipeline;
mod scrapers;
mod sentiment;
mod server;
mod utils;

use cli::{Cli, Command};
use config::ScrapeConfig;
use pipeline::Analyzer;
use scrapers::fetcher::HttpFetcher;
use sentiment::LexiconScorer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // --- Configuration ---
    let base_config = match &args.config {
        Some(path) => ScrapeConfig::load(path).await.map_err(|e| {
            error!(%path, error = %e, "Failed to load configuration");
            e
        })?,
        None => ScrapeConfig::default(),
    };
    let config = args.scrape.apply(base_config);
    config.validate()?;
    info!(
        target_count = config.target_count,
        page_window = config.page_window,
        timeout_secs = config.timeout_secs,
        dedup_across_pages = config.dedup_across_pages,
        "Configuration ready"
    );

    let fetcher = HttpFetcher::new(&config)?;
    let analyzer = Analyzer::new(fetcher, LexiconScorer::new(), &config);

    match args.command {
        Command::Analyze { url, page } => {
            let response = analyzer.run(&url, page).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            info!(
                success = response.success,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Execution complete"
            );
        }
        Command::Serve { bind } => {
            server::serve(&bind, Arc::new(analyzer)).await?;
        }
    }

    Ok(())
}
