use crate::StoreError;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Opaque, reversible identifier for a crawled page.
///
/// The key is the URL-safe base64 encoding of the page's URL, so two distinct
/// URL strings always get distinct keys and the original URL can be recovered
/// for display without storing it twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey(String);

impl PageKey {
    /// Derives the key for a URL string.
    pub fn from_url(url: &str) -> Self {
        Self(URL_SAFE.encode(url.as_bytes()))
    }

    /// Recovers the URL this key was derived from.
    pub fn decode(&self) -> Result<String, StoreError> {
        let bytes = URL_SAFE.decode(&self.0)?;
        Ok(String::from_utf8(bytes)?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One crawled page: its title, reversible key, and per-term occurrence
/// counts.
///
/// A `Page` is fully populated at construction and never mutated afterwards;
/// by the time it reaches the stores every reader sees the same record. The
/// word count always equals the sum of the occurrence counts.
#[derive(Debug)]
pub struct Page {
    title: String,
    key: PageKey,
    word_count: usize,
    created_at: DateTime<Utc>,
    term_counts: HashMap<String, u32>,
}

impl Page {
    /// Builds a page record from the URL it was fetched from, its title, and
    /// the word tokens extracted from its text.
    pub fn new(url: &str, title: String, words: Vec<String>) -> Self {
        let word_count = words.len();
        let mut term_counts: HashMap<String, u32> = HashMap::new();
        for word in words {
            *term_counts.entry(word).or_insert(0) += 1;
        }
        Self {
            title,
            key: PageKey::from_url(url),
            word_count,
            created_at: Utc::now(),
            term_counts,
        }
    }

    pub fn key(&self) -> &PageKey {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Occurrence count for one term on this page.
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// The distinct terms appearing on this page.
    pub fn terms(&self) -> impl Iterator<Item = &String> {
        self.term_counts.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_key_round_trip() {
        let url = "https://example.com/path?q=1&lang=en";
        let key = PageKey::from_url(url);
        assert_eq!(key.decode().unwrap(), url);
    }

    #[test]
    fn test_distinct_urls_get_distinct_keys() {
        let a = PageKey::from_url("https://example.com/a");
        let b = PageKey::from_url("https://example.com/b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_term_counting() {
        let page = Page::new(
            "https://example.com/",
            "Pets".to_string(),
            words(&["cat", "dog", "cat", "cat"]),
        );
        assert_eq!(page.term_count("cat"), 3);
        assert_eq!(page.term_count("dog"), 1);
        assert_eq!(page.term_count("fish"), 0);
    }

    #[test]
    fn test_word_count_is_sum_of_term_counts() {
        let page = Page::new(
            "https://example.com/",
            "Pets".to_string(),
            words(&["cat", "dog", "cat"]),
        );
        let sum: u32 = page.terms().map(|t| page.term_count(t)).sum();
        assert_eq!(page.word_count() as u32, sum);
        assert_eq!(page.word_count(), 3);
    }

    #[test]
    fn test_tokenization_is_case_sensitive() {
        let page = Page::new(
            "https://example.com/",
            "Case".to_string(),
            words(&["Cat", "cat"]),
        );
        assert_eq!(page.term_count("Cat"), 1);
        assert_eq!(page.term_count("cat"), 1);
    }
}
