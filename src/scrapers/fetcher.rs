//! Page retrieval for listing pages.
//!
//! [`FetchPage`] is the seam between the scraper and the network. The
//! production implementation is [`HttpFetcher`]; tests plug in in-memory
//! page sets.

use crate::config::ScrapeConfig;
use crate::utils::truncate_for_log;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why a page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed reading body of {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Client(String),
}

/// Retrieves the raw HTML of a page.
///
/// Implementations must fail on non-2xx responses so the caller can treat
/// the page as failed rather than parsing an error page for headlines.
pub trait FetchPage {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`FetchPage`] over a shared `reqwest` client.
///
/// The client carries a browser User-Agent and a request timeout, so a hung
/// listing page cannot block a request forever.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| FetchError::Client(format!("bad user agent: {e}")))?;
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| {
                if source.is_builder() {
                    FetchError::InvalidUrl {
                        url: url.to_string(),
                        reason: source.to_string(),
                    }
                } else {
                    FetchError::Transport {
                        url: url.to_string(),
                        source,
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Listing page returned non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(
            %url,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            preview = %truncate_for_log(&body, 120),
            "Fetched listing page"
        );
        Ok(body)
    }
}
