//! Data models for scraped headlines and their sentiment analysis.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: A headline/link pair pulled out of a listing page
//! - [`Impact`] and [`SentimentResult`]: The classifier's verdict for one headline
//! - [`AnalysisResult`]: The flattened join of the two, returned to callers
//! - [`AnalyzeRequest`] / [`AnalyzeResponse`]: The inbound service contract
//!
//! The response types serialize with camelCase keys (`hasMore`) to match the
//! JSON shape the web front end expects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A headline discovered on a listing page.
///
/// Created by the extractor, consumed once by the classifier. The `link` is
/// always resolved against the page it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Trimmed headline text, inner whitespace as found on the page.
    pub headline: String,
    /// Absolute URL the headline points to.
    pub link: String,
}

/// Tone of a headline as decided by the sign of its polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Impact::Positive => "Positive",
            Impact::Negative => "Negative",
            Impact::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// Classifier output for a single headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub impact: Impact,
    /// Confidence in `[0, 100]`.
    pub confidence: f64,
    pub explanation: String,
}

/// One row of the analysis returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub headline: String,
    pub link: String,
    pub impact: Impact,
    pub confidence: f64,
    pub explanation: String,
}

impl AnalysisResult {
    pub fn from_parts(article: Article, sentiment: SentimentResult) -> Self {
        Self {
            headline: article.headline,
            link: article.link,
            impact: sentiment.impact,
            confidence: sentiment.confidence,
            explanation: sentiment.explanation,
        }
    }
}

/// Body of an "analyze a source" request.
///
/// `url` is optional at the type level so a missing field surfaces as a
/// structured failure response instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalyzeRequest {
    pub url: Option<String>,
    pub page: Option<i64>,
}

/// Response to an "analyze a source" request.
///
/// Serializes as `{success, results, hasMore}` on success and
/// `{success: false, error}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<AnalysisResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    pub fn success(results: Vec<AnalysisResult>, has_more: bool) -> Self {
        Self {
            success: true,
            results: Some(results),
            has_more: Some(has_more),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            results: None,
            has_more: None,
            error: Some(error.into()),
        }
    }
}
