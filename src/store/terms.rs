use crate::store::page::{Page, PageKey};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// One search hit: a page that contains the looked-up term.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub term: String,
    pub url: String,
    pub title: String,
    pub count: u32,
}

/// Inverted index from term to the set of pages containing it.
///
/// Each term maps to page references, not copies: a page indexed under N
/// terms is referenced N times but stored once, in the [`PageStore`].
///
/// [`PageStore`]: crate::store::PageStore
pub struct TermIndex {
    inner: RwLock<HashMap<String, HashMap<PageKey, Arc<Page>>>>,
}

impl TermIndex {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Records that `page` contains each of `terms`.
    ///
    /// The whole batch is applied under one exclusive lock, so a concurrent
    /// reader sees either none or all of this page's postings.
    pub fn index_page(&self, terms: &[String], page: Arc<Page>) {
        let mut index = self.inner.write().unwrap();
        for term in terms {
            index
                .entry(term.clone())
                .or_default()
                .insert(page.key().clone(), page.clone());
        }
    }

    /// Returns every page indexed under `term`, sorted by occurrence count
    /// descending. `None` means the term was never indexed, as opposed to a
    /// term indexed with an empty page set.
    pub fn lookup(&self, term: &str) -> Option<Vec<SearchResult>> {
        let index = self.inner.read().unwrap();
        let pages = index.get(term)?;

        let mut results: Vec<SearchResult> = pages
            .values()
            .map(|page| SearchResult {
                term: term.to_string(),
                url: page.key().decode().unwrap_or_default(),
                title: page.title().to_string(),
                count: page.term_count(term),
            })
            .collect();
        // Stable sort keeps ties in map-iteration order, which is fixed for
        // the life of the entry set.
        results.sort_by(|a, b| b.count.cmp(&a.count));
        Some(results)
    }

    /// Replaces the whole index with an empty one.
    pub fn reset(&self) {
        let mut index = self.inner.write().unwrap();
        *index = HashMap::new();
    }

    /// Number of distinct terms currently indexed.
    pub fn term_count(&self) -> usize {
        self.inner.read().unwrap().len()
    }
}

impl Default for TermIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_words(url: &str, title: &str, words: &[&str]) -> Arc<Page> {
        Arc::new(Page::new(
            url,
            title.to_string(),
            words.iter().map(|w| w.to_string()).collect(),
        ))
    }

    fn index_whole_page(index: &TermIndex, page: &Arc<Page>) {
        let terms: Vec<String> = page.terms().cloned().collect();
        index.index_page(&terms, page.clone());
    }

    #[test]
    fn test_lookup_returns_pages_with_counts() {
        let index = TermIndex::new();
        let page = page_with_words("https://example.com/", "Pets", &["cat", "cat", "cat", "dog"]);
        index_whole_page(&index, &page);

        let cats = index.lookup("cat").unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].count, 3);
        assert_eq!(cats[0].url, "https://example.com/");
        assert_eq!(cats[0].title, "Pets");

        let dogs = index.lookup("dog").unwrap();
        assert_eq!(dogs[0].count, 1);
    }

    #[test]
    fn test_lookup_unindexed_term_is_none() {
        let index = TermIndex::new();
        assert!(index.lookup("ghost").is_none());
    }

    #[test]
    fn test_lookup_sorted_by_count_descending() {
        let index = TermIndex::new();
        let five = page_with_words("https://a.test/", "A", &["cat"; 5]);
        let one = page_with_words("https://b.test/", "B", &["cat"; 1]);
        let nine = page_with_words("https://c.test/", "C", &["cat"; 9]);
        for page in [&five, &one, &nine] {
            index_whole_page(&index, page);
        }

        let results = index.lookup("cat").unwrap();
        let counts: Vec<u32> = results.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![9, 5, 1]);
    }

    #[test]
    fn test_reindexing_a_page_overwrites_its_posting() {
        let index = TermIndex::new();
        let old = page_with_words("https://example.com/", "Old", &["cat"]);
        let new = page_with_words("https://example.com/", "New", &["cat", "cat"]);
        index_whole_page(&index, &old);
        index_whole_page(&index, &new);

        let results = index.lookup("cat").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "New");
        assert_eq!(results[0].count, 2);
    }

    #[test]
    fn test_page_referenced_under_every_term() {
        let index = TermIndex::new();
        let page = page_with_words("https://example.com/", "Pets", &["cat", "dog", "fish"]);
        index_whole_page(&index, &page);

        for term in ["cat", "dog", "fish"] {
            let results = index.lookup(term).unwrap();
            assert_eq!(results.len(), 1, "term {term} should hit the page");
        }
        assert_eq!(index.term_count(), 3);
    }

    #[test]
    fn test_reset_forgets_everything() {
        let index = TermIndex::new();
        let page = page_with_words("https://example.com/", "Pets", &["cat"]);
        index_whole_page(&index, &page);
        index.reset();

        assert!(index.lookup("cat").is_none());
        assert_eq!(index.term_count(), 0);
    }

    #[test]
    fn test_concurrent_indexing_and_lookup() {
        let index = Arc::new(TermIndex::new());
        let mut handles = Vec::new();
        for i in 0..4 {
            let index = index.clone();
            handles.push(std::thread::spawn(move || {
                for j in 0..25 {
                    let url = format!("https://example.com/{}/{}", i, j);
                    let page = page_with_words(&url, "p", &["shared", "word"]);
                    index.index_page(
                        &["shared".to_string(), "word".to_string()],
                        page,
                    );
                }
            }));
        }
        let reader = {
            let index = index.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    if let Some(results) = index.lookup("shared") {
                        // Every visible posting is complete.
                        for result in results {
                            assert_eq!(result.count, 1);
                        }
                    }
                }
            })
        };
        for handle in handles {
            handle.join().unwrap();
        }
        reader.join().unwrap();

        assert_eq!(index.lookup("shared").unwrap().len(), 100);
        assert_eq!(index.lookup("word").unwrap().len(), 100);
    }
}
