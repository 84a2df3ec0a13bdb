//! Multi-page aggregation over one listing URL.
//!
//! A request sweeps a fixed window of consecutive pages (`page`,
//! `page + 1`, ...), fetching strictly one after another and stopping as soon
//! as enough articles are collected. A page that fails to load contributes
//! nothing and the sweep moves on.

use crate::config::ScrapeConfig;
use crate::models::Article;
use crate::scrapers::extractor::{Extraction, Extractor, Strategy};
use crate::scrapers::fetcher::FetchPage;
use scraper::Html;
use std::collections::HashSet;
use tracing::{error, info, instrument, warn};
use url::Url;

/// Build the URL of page `page` of `source` by appending a `page` query
/// parameter.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(paginated_url("https://site.com/news", 2), "https://site.com/news?page=2");
/// assert_eq!(paginated_url("https://site.com/news?s=world", 2), "https://site.com/news?s=world&page=2");
/// ```
pub fn paginated_url(source: &str, page: i64) -> String {
    if source.contains('?') {
        format!("{source}&page={page}")
    } else {
        format!("{source}?page={page}")
    }
}

/// What happened to one page of the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page loaded; `count` articles were kept (possibly zero).
    Extracted { strategy: Strategy, count: usize },
    /// The page could not be fetched.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub page: i64,
    pub url: String,
    pub outcome: PageOutcome,
}

/// Per-run accumulation: articles in arrival order plus the headlines
/// already emitted. Lives for exactly one [`Aggregator::aggregate`] call.
#[derive(Debug, Default)]
pub struct AggregationState {
    pub articles: Vec<Article>,
    pub seen: HashSet<String>,
}

/// Result of one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// At most `target_count` articles.
    pub articles: Vec<Article>,
    /// More articles were collected than returned.
    pub has_more: bool,
    /// One entry per page actually requested.
    pub pages: Vec<PageReport>,
}

/// Drives the [`Extractor`] across consecutive pages of a source.
#[derive(Debug, Clone)]
pub struct Aggregator<F> {
    fetcher: F,
    extractor: Extractor,
    target_count: usize,
    page_window: u32,
    dedup_across_pages: bool,
}

impl<F: FetchPage> Aggregator<F> {
    pub fn new(fetcher: F, config: &ScrapeConfig) -> Self {
        Self {
            fetcher,
            extractor: Extractor::new(config.min_headline_len),
            target_count: config.target_count,
            page_window: config.page_window,
            dedup_across_pages: config.dedup_across_pages,
        }
    }

    /// Sweep pages `start_page ..` of `source`, resolving links against `base`.
    ///
    /// Unless `dedup_across_pages` is set, the seen-headlines set is reset for
    /// every page, so a headline repeated on a later page is kept again.
    #[instrument(level = "info", skip(self, base), fields(window = self.page_window))]
    pub async fn aggregate(&self, source: &str, base: &Url, start_page: i64) -> Aggregation {
        let mut state = AggregationState::default();
        let mut pages = Vec::new();

        for offset in 0..self.page_window {
            let Some(page) = start_page.checked_add(i64::from(offset)) else {
                warn!(start_page, offset, "Page number overflow; ending sweep");
                break;
            };
            let url = paginated_url(source, page);

            if !self.dedup_across_pages {
                state.seen.clear();
            }

            let outcome = match self.fetcher.fetch(&url).await {
                Ok(html) => {
                    let extraction = self.scrape(&html, base, &mut state.seen);
                    let count = extraction.articles.len();
                    info!(
                        page,
                        %url,
                        count,
                        candidates = extraction.candidates,
                        strategy = ?extraction.strategy,
                        "Scraped page"
                    );
                    state.articles.extend(extraction.articles);
                    PageOutcome::Extracted {
                        strategy: extraction.strategy,
                        count,
                    }
                }
                Err(e) => {
                    error!(page, %url, error = %e, "Failed to fetch page; counting it as empty");
                    PageOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            pages.push(PageReport { page, url, outcome });

            if state.articles.len() >= self.target_count {
                info!(page, collected = state.articles.len(), "Target count reached");
                break;
            }
        }

        let has_more = state.articles.len() > self.target_count;
        let mut articles = state.articles;
        articles.truncate(self.target_count);
        info!(count = articles.len(), has_more, pages = pages.len(), "Aggregation complete");

        Aggregation {
            articles,
            has_more,
            pages,
        }
    }

    /// Parse and extract synchronously so the non-`Send` document never
    /// lives across an await point.
    fn scrape(&self, html: &str, base: &Url, seen: &mut HashSet<String>) -> Extraction {
        let document = Html::parse_document(html);
        self.extractor.extract(&document, base, seen)
    }
}
