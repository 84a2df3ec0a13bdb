//! Scraper configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! YAML file, and CLI flags / environment variables (see [`crate::cli`]).
//!
//! ```yaml
//! target_count: 30
//! page_window: 3
//! min_headline_len: 20
//! timeout_secs: 30
//! dedup_across_pages: false
//! ```

use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};

/// Browser User-Agent sent with every page request. Some listing pages
/// refuse or degrade requests without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Tunables for fetching, extraction and aggregation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Aggregation stops once this many articles are collected, and the
    /// result list is truncated to it.
    pub target_count: usize,
    /// Number of consecutive pages fetched per request.
    pub page_window: u32,
    /// Headlines must be strictly longer than this many characters.
    pub min_headline_len: usize,
    pub user_agent: String,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
    /// Share the seen-headlines set across all pages of one run instead of
    /// resetting it per page.
    pub dedup_across_pages: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            target_count: 30,
            page_window: 3,
            min_headline_len: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            dedup_across_pages: false,
        }
    }
}

impl ScrapeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse a configuration from YAML text. Missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self, Box<dyn Error>> {
        let config: ScrapeConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file on disk.
    #[instrument(level = "info", skip_all, fields(%path))]
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let text = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!(?config, "Loaded configuration file");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.target_count == 0 {
            return Err("target_count must be at least 1".into());
        }
        if self.page_window == 0 {
            return Err("page_window must be at least 1".into());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.target_count, 30);
        assert_eq!(config.page_window, 3);
        assert_eq!(config.min_headline_len, 20);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.dedup_across_pages);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ScrapeConfig::from_yaml("page_window: 5\ndedup_across_pages: true\n").unwrap();
        assert_eq!(config.page_window, 5);
        assert!(config.dedup_across_pages);
        assert_eq!(config.target_count, 30);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(ScrapeConfig::from_yaml("page_window: 0").is_err());
        assert!(ScrapeConfig::from_yaml("target_count: 0").is_err());
    }

    #[test]
    fn test_bad_yaml_rejected() {
        assert!(ScrapeConfig::from_yaml("page_window: [not, a, number]").is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        assert!(ScrapeConfig::load("/nonexistent/headline_impact.yaml").await.is_err());
    }
}
