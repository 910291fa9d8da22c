//! HTTP API layer
//!
//! A small axum router in front of the engine: crawl, search, reset, and
//! health endpoints under `/api`, with everything else falling through to
//! the static single-page app. CORS is wide open; this is a prototype meant
//! to sit behind nothing.

mod contracts;

pub use contracts::{CrawlInput, CrawlResponse, SearchInput, SearchResponse};

use crate::crawler::{CrawlRequest, Orchestrator};
use crate::store::{reset_stores, PageStore, TermIndex};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Everything the handlers need, shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub pages: Arc<PageStore>,
    pub terms: Arc<TermIndex>,
}

/// Builds the full application router.
///
/// Paths not matched by an API route are served from `static_dir`, with
/// `index.html` as the fallback so client-side routes resolve.
pub fn build_app(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let spa = ServeDir::new(static_dir)
        .fallback(ServeFile::new(format!("{}/index.html", static_dir)));

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/crawl", post(crawl_handler))
        .route("/api/search", post(search_handler))
        .route("/api/reset", delete(reset_handler))
        .with_state(state)
        .fallback_service(spa)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// Runs a crawl and reports its summary.
///
/// Synchronous from the client's point of view: the response is sent only
/// after the run has fully terminated.
async fn crawl_handler(
    State(state): State<AppState>,
    Json(input): Json<CrawlInput>,
) -> Json<CrawlResponse> {
    tracing::debug!("Crawl request received for {}", input.url);
    let start = Instant::now();

    let seed = CrawlRequest::new(input.url, input.previous, input.depth);
    let summary = state
        .orchestrator
        .run(seed, &state.pages, &state.terms)
        .await;

    Json(CrawlResponse {
        duration_seconds: start.elapsed().as_secs_f64(),
        pages_crawled: summary.pages_crawled,
        terms_indexed: summary.distinct_terms,
        crawl_errors: summary.errors.iter().map(|e| e.to_string()).collect(),
    })
}

async fn search_handler(
    State(state): State<AppState>,
    Json(input): Json<SearchInput>,
) -> Json<SearchResponse> {
    tracing::debug!("Search request received for {:?}", input.term);
    let start = Instant::now();

    // An unindexed term and a term with no matches look the same over the
    // wire: an empty result list.
    let results = state.terms.lookup(&input.term).unwrap_or_default();

    Json(SearchResponse {
        duration_seconds: start.elapsed().as_secs_f64(),
        results,
    })
}

/// Clears both stores. Yanks the rug out from under any in-flight crawl,
/// whose remaining writes land in the fresh stores.
async fn reset_handler(State(state): State<AppState>) -> StatusCode {
    tracing::debug!("Reset request received");
    reset_stores(&state.pages, &state.terms);
    StatusCode::OK
}
