//! Per-run crawl accounting
//!
//! Fetch tasks complete out of order and on many tasks at once, so the run's
//! totals live behind one mutex and are folded in as each task is harvested.
//! The accumulator belongs to a single orchestrator run and is drained into
//! a [`CrawlSummary`] when the run terminates.

use crate::EngineError;
use std::collections::HashSet;
use std::sync::Mutex;

/// Thread-safe accumulator for one crawl run.
pub struct CrawlResult {
    inner: Mutex<ResultInner>,
}

#[derive(Default)]
struct ResultInner {
    pages_crawled: usize,
    terms_seen: HashSet<String>,
    errors: Vec<EngineError>,
}

impl CrawlResult {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ResultInner::default()),
        }
    }

    /// Folds one harvested page into the run totals.
    pub fn record_page(&self, page_terms: &[String]) {
        let mut inner = self.inner.lock().unwrap();
        for term in page_terms {
            if !inner.terms_seen.contains(term) {
                inner.terms_seen.insert(term.clone());
            }
        }
        inner.pages_crawled += 1;
    }

    /// Appends a failed fetch to the run's error list.
    pub fn record_error(&self, error: EngineError) {
        let mut inner = self.inner.lock().unwrap();
        inner.errors.push(error);
    }

    /// Drains the accumulator into the summary a finished run reports.
    pub fn finish(&self) -> CrawlSummary {
        let mut inner = self.inner.lock().unwrap();
        CrawlSummary {
            pages_crawled: inner.pages_crawled,
            distinct_terms: inner.terms_seen.len(),
            errors: std::mem::take(&mut inner.errors),
        }
    }
}

impl Default for CrawlResult {
    fn default() -> Self {
        Self::new()
    }
}

/// What a finished crawl run reports back to its caller.
#[derive(Debug)]
pub struct CrawlSummary {
    pub pages_crawled: usize,

    /// Distinct terms seen across every page of the run.
    pub distinct_terms: usize,

    /// Every fetch failure, in completion order. A populated error list does
    /// not mean the run failed; each error cost the run exactly one page.
    pub errors: Vec<EngineError>,
}
