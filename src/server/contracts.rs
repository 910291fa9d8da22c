//! JSON contracts for the REST API
//!
//! Request and response bodies for every route live here so the handler
//! code stays free of serde shapes.

use crate::store::SearchResult;
use serde::{Deserialize, Serialize};

/// Body of a crawl request: the seed URL plus optional provenance.
#[derive(Debug, Deserialize)]
pub struct CrawlInput {
    pub url: String,

    /// URL of the page that discovered the seed, if any.
    #[serde(default)]
    pub previous: String,

    /// Depth the seed starts at, usually zero.
    #[serde(default)]
    pub depth: u32,
}

/// What a finished crawl reports back over the wire.
#[derive(Debug, Serialize)]
pub struct CrawlResponse {
    pub duration_seconds: f64,
    pub pages_crawled: usize,
    pub terms_indexed: usize,
    pub crawl_errors: Vec<String>,
}

/// Body of a search request.
#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub term: String,
}

/// Ranked hits for one search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub duration_seconds: f64,
    pub results: Vec<SearchResult>,
}
