//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Scraper options can also be provided through environment variables.

use crate::config::ScrapeConfig;
use clap::{Args, Parser, Subcommand};

/// Command-line arguments for headline_impact.
///
/// # Examples
///
/// ```sh
/// # One-shot analysis printed as JSON
/// headline_impact analyze --url https://example.com/news --page 2
///
/// # HTTP service exposing POST /analyze
/// headline_impact serve --bind 0.0.0.0:5000
///
/// # Tunables from a YAML file
/// headline_impact -c scrape.yaml analyze --url https://example.com/news
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML scraper configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(flatten)]
    pub scrape: ScrapeArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape and score one listing URL, printing the JSON response
    Analyze {
        /// Listing page URL
        #[arg(short, long)]
        url: String,

        /// First page of the sweep
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },

    /// Serve POST /analyze over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "HEADLINE_BIND", default_value = "127.0.0.1:5000")]
        bind: String,
    },
}

/// Overrides for [`ScrapeConfig`]; unset options keep the file or default value.
#[derive(Args, Debug, Default)]
pub struct ScrapeArgs {
    /// User-Agent header sent with page requests
    #[arg(long, env = "HEADLINE_USER_AGENT", global = true)]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "HEADLINE_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Drop headlines already seen on earlier pages of the same sweep
    #[arg(long, global = true)]
    pub dedup_across_pages: bool,
}

impl ScrapeArgs {
    /// Layer these overrides on top of `config`.
    pub fn apply(&self, mut config: ScrapeConfig) -> ScrapeConfig {
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if self.dedup_across_pages {
            config.dedup_across_pages = true;
        }
        config
    }
}
