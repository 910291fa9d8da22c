//! Tidepool main entry point
//!
//! Command-line interface that builds the shared stores, the crawl
//! orchestrator, and the HTTP API server.

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tidepool::config::{load_config, Config};
use tidepool::crawler::Orchestrator;
use tidepool::server::{build_app, AppState};
use tidepool::store::{PageStore, TermIndex};
use tracing_subscriber::EnvFilter;

/// Tidepool: an in-memory web crawl and term search engine
///
/// Tidepool crawls a link graph from a seed URL, indexes the page text it
/// finds, and serves ranked term search over the result, all from memory.
#[derive(Parser, Debug)]
#[command(name = "tidepool")]
#[command(version)]
#[command(about = "An in-memory web crawl and term search engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    let bind_addr = cli.bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {:?}", bind_addr))?;

    // One store pair for the life of the process; crawls accumulate into it.
    let pages = Arc::new(PageStore::new());
    let terms = Arc::new(TermIndex::new());
    let orchestrator =
        Arc::new(Orchestrator::new(&config.crawler).context("failed to build HTTP client")?);

    let app = build_app(
        AppState {
            orchestrator,
            pages,
            terms,
        },
        &config.server.static_dir,
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tidepool=info,warn"),
            1 => EnvFilter::new("tidepool=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
