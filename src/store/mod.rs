//! Shared in-memory stores
//!
//! This module contains the two process-wide structures every crawl feeds:
//! the page store (page key -> page record) and the term index (term -> pages
//! containing it). Both are constructed once at startup and passed by
//! reference into crawl, search, and reset calls; nothing in here is global.
//!
//! Stores are shared across concurrent and sequential crawl runs on purpose:
//! repeated crawls accumulate into the same index until an explicit reset.

mod page;
mod pages;
mod terms;

pub use page::{Page, PageKey};
pub use pages::PageStore;
pub use terms::{SearchResult, TermIndex};

/// Clears both shared stores unconditionally.
///
/// A reset racing an in-flight crawl is allowed; the crawl's remaining writes
/// simply land in the fresh stores (last writer wins).
pub fn reset_stores(pages: &PageStore, terms: &TermIndex) {
    pages.reset();
    terms.reset();
}
