//! Crawl engine
//!
//! This module contains the crawling half of the engine:
//! - HTML parsing into title, link, and word projections
//! - Single-page fetching with naive same-site link resolution
//! - Per-run result accumulation
//! - Concurrent crawl orchestration with depth bounding and dedup

mod fetcher;
mod orchestrator;
mod parser;
mod result;

pub use fetcher::{build_http_client, fetch_page, CrawlRequest, FetchedPage};
pub use orchestrator::{run_crawl, Orchestrator};
pub use parser::{parse_page, ParsedPage};
pub use result::{CrawlResult, CrawlSummary};
