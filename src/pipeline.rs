//! Request orchestration: aggregate headlines, then classify each one.
//!
//! [`Analyzer::run`] is the single "analyze a source" operation behind both
//! the CLI and the HTTP route. It never fails from the caller's point of
//! view; input problems come back as a `success: false` response.

use crate::config::ScrapeConfig;
use crate::models::{AnalysisResult, AnalyzeRequest, AnalyzeResponse};
use crate::scrapers::fetcher::FetchPage;
use crate::scrapers::pagination::{Aggregator, PageOutcome};
use crate::sentiment::{Classifier, PolarityScorer};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("missing required field: url")]
    MissingUrl,

    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Composes the [`Aggregator`] and the [`Classifier`] for one source.
#[derive(Debug)]
pub struct Analyzer<F, S> {
    aggregator: Aggregator<F>,
    classifier: Classifier<S>,
}

impl<F, S> Analyzer<F, S>
where
    F: FetchPage,
    S: PolarityScorer,
{
    pub fn new(fetcher: F, scorer: S, config: &ScrapeConfig) -> Self {
        Self {
            aggregator: Aggregator::new(fetcher, config),
            classifier: Classifier::new(scorer),
        }
    }

    /// Analyze `url` starting at `page`.
    #[instrument(level = "info", skip(self))]
    pub async fn run(&self, url: &str, page: i64) -> AnalyzeResponse {
        match self.try_run(url, page).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Rejected analyze request");
                AnalyzeResponse::failure(e.to_string())
            }
        }
    }

    /// Validate an inbound request body and run it. A missing `page`
    /// defaults to 1.
    pub async fn handle(&self, request: AnalyzeRequest) -> AnalyzeResponse {
        let page = request.page.unwrap_or(1);
        match request.url {
            Some(url) => self.run(&url, page).await,
            None => AnalyzeResponse::failure(PipelineError::MissingUrl.to_string()),
        }
    }

    async fn try_run(&self, url: &str, page: i64) -> Result<AnalyzeResponse, PipelineError> {
        let source = url.trim();
        if source.is_empty() {
            return Err(PipelineError::MissingUrl);
        }
        let base = Url::parse(source).map_err(|e| PipelineError::InvalidUrl {
            url: source.to_string(),
            reason: e.to_string(),
        })?;

        let t0 = Instant::now();
        let aggregation = self.aggregator.aggregate(source, &base, page).await;
        let mut failed_pages = 0;
        for report in &aggregation.pages {
            if let PageOutcome::Failed { reason } = &report.outcome {
                debug!(page = report.page, url = %report.url, %reason, "Page contributed nothing");
                failed_pages += 1;
            }
        }

        let results = aggregation
            .articles
            .into_iter()
            .map(|article| {
                let sentiment = self.classifier.classify(&article.headline);
                AnalysisResult::from_parts(article, sentiment)
            })
            .collect::<Vec<_>>();

        info!(
            count = results.len(),
            has_more = aggregation.has_more,
            failed_pages,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Analysis complete"
        );
        Ok(AnalyzeResponse::success(results, aggregation.has_more))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Impact;
    use crate::scrapers::pagination::tests::{listing, FakePages};
    use crate::sentiment::{LexiconScorer, SentimentError, FAILURE_EXPLANATION};

    struct Broken;

    impl PolarityScorer for Broken {
        fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
            Err(SentimentError::OutOfRange(2.5))
        }
    }

    fn analyzer(fetcher: FakePages) -> Analyzer<FakePages, LexiconScorer> {
        Analyzer::new(fetcher, LexiconScorer::new(), &ScrapeConfig::default())
    }

    #[tokio::test]
    async fn test_end_to_end_order_and_labels() {
        let fetcher = FakePages::default().with_page(
            "https://site.com/list?page=1",
            listing(&[
                "Stocks rally to a record high on strong growth",
                "Markets crash as recession fears deepen",
                "Council publishes its quarterly meeting minutes",
            ]),
        );

        let response = analyzer(fetcher).run("https://site.com/list", 1).await;
        assert!(response.success);
        assert_eq!(response.has_more, Some(false));

        let results = response.results.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].impact, Impact::Positive);
        assert_eq!(results[1].impact, Impact::Negative);
        assert_eq!(results[2].impact, Impact::Neutral);
        assert_eq!(results[2].confidence, 50.0);
        assert_eq!(results[0].link, "https://site.com/story/0");
        assert_eq!(results[1].headline, "Markets crash as recession fears deepen");
    }

    #[tokio::test]
    async fn test_all_pages_failing_is_still_success() {
        let response = analyzer(FakePages::default()).run("https://site.com/list", 1).await;
        assert!(response.success);
        assert_eq!(response.results, Some(vec![]));
        assert_eq!(response.has_more, Some(false));
    }

    #[tokio::test]
    async fn test_start_page_is_honored() {
        let fetcher = FakePages::default();
        let analyzer = analyzer(fetcher);
        analyzer.run("https://site.com/list", 7).await;
        assert_eq!(
            analyzer.aggregator_requests(),
            vec![
                "https://site.com/list?page=7",
                "https://site.com/list?page=8",
                "https://site.com/list?page=9"
            ]
        );
    }

    #[tokio::test]
    async fn test_scorer_failure_degrades_per_headline() {
        let fetcher = FakePages::default().with_page(
            "https://site.com/list?page=1",
            listing(&["Stocks rally to a record high on strong growth"]),
        );
        let analyzer = Analyzer::new(fetcher, Broken, &ScrapeConfig::default());

        let response = analyzer.run("https://site.com/list", 1).await;
        let results = response.results.unwrap();
        assert_eq!(results[0].impact, Impact::Neutral);
        assert_eq!(results[0].confidence, 50.0);
        assert_eq!(results[0].explanation, FAILURE_EXPLANATION);
    }

    #[tokio::test]
    async fn test_missing_url_is_failure_response() {
        let analyzer = analyzer(FakePages::default());

        let response = analyzer.handle(AnalyzeRequest::default()).await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("missing required field: url"));

        let blank = analyzer.run("   ", 1).await;
        assert!(!blank.success);
    }

    #[tokio::test]
    async fn test_invalid_url_is_failure_response() {
        let analyzer = analyzer(FakePages::default());
        let response = analyzer.run("not a url", 1).await;
        assert!(!response.success);
        assert!(response.error.unwrap().starts_with("invalid url `not a url`"));
        assert!(analyzer.aggregator_requests().is_empty());
    }

    #[tokio::test]
    async fn test_handle_defaults_page_to_one() {
        let fetcher = FakePages::default().with_page(
            "https://site.com/list?page=1",
            listing(&["Headline number one here"]),
        );
        let analyzer = analyzer(fetcher);

        let response = analyzer
            .handle(AnalyzeRequest {
                url: Some("https://site.com/list".to_string()),
                page: None,
            })
            .await;
        assert_eq!(response.results.map(|r| r.len()), Some(1));
    }

    impl Analyzer<FakePages, LexiconScorer> {
        fn aggregator_requests(&self) -> Vec<String> {
            self.aggregator.fetcher().requested()
        }
    }
}
