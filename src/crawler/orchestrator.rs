//! Crawl orchestration
//!
//! This module contains the main crawl loop that coordinates one run:
//! - Seeding and draining the frontier
//! - Depth bounding and URL dedup at admission time
//! - Bounded-concurrency fetch dispatch
//! - Harvesting completed fetches into the shared stores
//! - Detecting termination once every dispatched unit is accounted for
//!
//! The run's bookkeeping (outstanding-work counter, dedup set) lives only in
//! the receive loop below. Fetch tasks never touch it; each task owes the
//! loop exactly one batch of discovered links, sent after its page has been
//! published. Receiving a batch is the only thing that decrements the
//! counter, and admitting a request is the only thing that increments it, so
//! the counter reaches zero exactly when no dispatched work remains.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{build_http_client, fetch_page, CrawlRequest};
use crate::crawler::result::{CrawlResult, CrawlSummary};
use crate::store::{PageStore, TermIndex};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Semaphore;

/// Drives crawl runs against a pair of shared stores.
///
/// The orchestrator owns the HTTP client and the run parameters; the stores
/// are passed into each run so concurrent and sequential runs accumulate
/// into the same index until an explicit reset.
pub struct Orchestrator {
    client: Client,
    max_concurrent_fetches: usize,
    max_depth: u32,
}

impl Orchestrator {
    /// Builds an orchestrator and its shared HTTP client.
    pub fn new(config: &CrawlerConfig) -> crate::Result<Self> {
        let client = build_http_client(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self {
            client,
            max_concurrent_fetches: config.max_concurrent_fetches,
            max_depth: config.max_depth,
        })
    }

    /// Runs one crawl to completion and returns its summary.
    ///
    /// Blocks (asynchronously) until the frontier is exhausted and every
    /// in-flight fetch has been harvested. Fetch failures land in the
    /// summary's error list; they never abort the run.
    pub async fn run(
        &self,
        seed: CrawlRequest,
        pages: &Arc<PageStore>,
        terms: &Arc<TermIndex>,
    ) -> CrawlSummary {
        tracing::info!("Starting crawl of {} (max depth {})", seed.url, self.max_depth);
        let start_time = std::time::Instant::now();

        let result = Arc::new(CrawlResult::new());
        let limiter = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let (batch_tx, mut batch_rx) = mpsc::unbounded_channel::<Vec<CrawlRequest>>();

        // Every admitted request owes the loop exactly one batch, so
        // `outstanding` counts batches not yet received. The seed batch is
        // in flight from the start.
        let mut outstanding: usize = 1;
        let mut accepted: HashSet<String> = HashSet::new();
        let _ = batch_tx.send(vec![seed]);

        while outstanding > 0 {
            let batch = match batch_rx.recv().await {
                Some(batch) => batch,
                // Unreachable while the loop holds a sender, but a closed
                // channel must not spin.
                None => break,
            };
            outstanding -= 1;

            for request in batch {
                if request.depth >= self.max_depth {
                    tracing::trace!("Dropping {} at depth {}", request.url, request.depth);
                    continue;
                }
                if !accepted.insert(request.url.clone()) {
                    continue;
                }
                // Admission is the increment; it happens before the task
                // exists, so the counter can never be observed at zero while
                // this task's batch is unsent.
                outstanding += 1;
                self.spawn_fetch(
                    request,
                    batch_tx.clone(),
                    limiter.clone(),
                    pages.clone(),
                    terms.clone(),
                    result.clone(),
                );
            }
        }

        let summary = result.finish();
        tracing::info!(
            "Crawl completed: {} pages, {} distinct terms, {} errors in {:?}",
            summary.pages_crawled,
            summary.distinct_terms,
            summary.errors.len(),
            start_time.elapsed()
        );
        summary
    }

    /// Dispatches one fetch task.
    ///
    /// The task publishes its page into the stores, folds it into the run
    /// result, and finally hands its discovered links back as a single batch.
    /// The batch send always happens, on success and on failure alike; it is
    /// what releases this task's slot in the outstanding-work count.
    fn spawn_fetch(
        &self,
        request: CrawlRequest,
        batch_tx: UnboundedSender<Vec<CrawlRequest>>,
        limiter: Arc<Semaphore>,
        pages: Arc<PageStore>,
        terms: Arc<TermIndex>,
        result: Arc<CrawlResult>,
    ) {
        let client = self.client.clone();
        tokio::spawn(async move {
            let discovered = match limiter.acquire_owned().await {
                Ok(_permit) => {
                    tracing::debug!("Requesting: {}", request.url);
                    match fetch_page(&client, &request).await {
                        Ok(fetched) => {
                            let page_terms: Vec<String> = fetched.page.terms().cloned().collect();
                            pages.put(fetched.page.clone());
                            terms.index_page(&page_terms, fetched.page);
                            result.record_page(&page_terms);
                            fetched.discovered
                        }
                        Err(error) => {
                            tracing::warn!("Fetch failed: {}", error);
                            result.record_error(error);
                            Vec::new()
                        }
                    }
                }
                // The limiter only closes if the run is being torn down; the
                // batch still has to be delivered so the loop can drain.
                Err(_) => Vec::new(),
            };
            let _ = batch_tx.send(discovered);
        });
    }
}

/// Runs a one-shot crawl with explicit parameters.
///
/// Convenience wrapper for callers that do not hold an [`Orchestrator`];
/// builds one with the default request timeout, runs it, and returns the
/// summary.
pub async fn run_crawl(
    seed: CrawlRequest,
    concurrency: usize,
    max_depth: u32,
    pages: &Arc<PageStore>,
    terms: &Arc<TermIndex>,
) -> crate::Result<CrawlSummary> {
    let config = CrawlerConfig {
        max_depth,
        max_concurrent_fetches: concurrency,
        ..CrawlerConfig::default()
    };
    let orchestrator = Orchestrator::new(&config)?;
    Ok(orchestrator.run(seed, pages, terms).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_orchestrator(max_depth: u32) -> Orchestrator {
        let config = CrawlerConfig {
            max_depth,
            max_concurrent_fetches: 4,
            request_timeout_secs: 5,
        };
        Orchestrator::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_zero_depth_dispatches_nothing() {
        let orchestrator = test_orchestrator(0);
        let pages = Arc::new(PageStore::new());
        let terms = Arc::new(TermIndex::new());

        let summary = orchestrator
            .run(CrawlRequest::seed("http://127.0.0.1:1/"), &pages, &terms)
            .await;

        assert_eq!(summary.pages_crawled, 0);
        assert_eq!(summary.distinct_terms, 0);
        assert!(summary.errors.is_empty());
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn test_scheme_less_seed_is_one_error() {
        let orchestrator = test_orchestrator(3);
        let pages = Arc::new(PageStore::new());
        let terms = Arc::new(TermIndex::new());

        let summary = orchestrator
            .run(CrawlRequest::seed("example.com/"), &pages, &terms)
            .await;

        assert_eq!(summary.pages_crawled, 0);
        assert_eq!(summary.errors.len(), 1);
        assert!(pages.is_empty());
    }
}
