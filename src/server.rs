//! HTTP front end for the analyzer.
//!
//! | Route | Method | Body |
//! |-------|--------|------|
//! | `/analyze` | `POST` | `{"url": "...", "page": 1}` |
//! | `/health` | `GET` | none |
//!
//! `/analyze` always answers `200` with an [`AnalyzeResponse`]; malformed
//! bodies become `{"success": false, "error": ...}` like any other failure.

use crate::models::{AnalyzeRequest, AnalyzeResponse};
use crate::pipeline::Analyzer;
use crate::scrapers::fetcher::FetchPage;
use crate::sentiment::PolarityScorer;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::error::Error;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Build the router around a shared analyzer.
pub fn router<F, S>(analyzer: Arc<Analyzer<F, S>>) -> Router
where
    F: FetchPage + Send + Sync + 'static,
    S: PolarityScorer + Send + Sync + 'static,
{
    Router::new()
        .route("/analyze", post(analyze::<F, S>))
        .route("/health", get(health))
        .with_state(analyzer)
}

/// Bind `addr` and serve until the process is stopped.
#[instrument(level = "info", skip(analyzer))]
pub async fn serve<F, S>(addr: &str, analyzer: Arc<Analyzer<F, S>>) -> Result<(), Box<dyn Error>>
where
    F: FetchPage + Send + Sync + 'static,
    S: PolarityScorer + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, router(analyzer)).await?;
    Ok(())
}

async fn analyze<F, S>(
    State(analyzer): State<Arc<Analyzer<F, S>>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Json<AnalyzeResponse>
where
    F: FetchPage + Send + Sync + 'static,
    S: PolarityScorer + Send + Sync + 'static,
{
    let response = match payload {
        Ok(Json(request)) => analyzer.handle(request).await,
        Err(rejection) => {
            warn!(error = %rejection, "Bad analyze request body");
            AnalyzeResponse::failure(rejection.body_text())
        }
    };
    Json(response)
}

async fn health() -> &'static str {
    "ok"
}
