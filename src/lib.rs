//! Tidepool: an in-memory web crawl and term search engine
//!
//! This crate crawls a link graph from a seed URL, extracts page text, and
//! builds an inverted index supporting term lookup ranked by occurrence
//! count. Everything lives in memory; state survives across crawls within a
//! process and is gone on restart.

pub mod config;
pub mod crawler;
pub mod server;
pub mod store;

use thiserror::Error;

/// Main error type for engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors from the page store and term index
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Page key is not valid base64: {0}")]
    KeyEncoding(#[from] base64::DecodeError),

    #[error("Page key does not decode to UTF-8: {0}")]
    KeyUtf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, CrawlRequest, CrawlSummary, Orchestrator};
pub use store::{reset_stores, Page, PageKey, PageStore, SearchResult, TermIndex};
