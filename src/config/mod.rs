//! Configuration module
//!
//! Handles loading, parsing, and validating TOML configuration files. Every
//! setting has a default, so the engine runs without a config file at all.
//!
//! # Example
//!
//! ```no_run
//! use tidepool::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawls will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, ServerConfig};
