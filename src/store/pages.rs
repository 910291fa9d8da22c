use crate::store::page::{Page, PageKey};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Concurrent map from page key to page record.
///
/// Search traffic is read-heavy, so the map sits behind a read-write lock:
/// lookups proceed in parallel while inserts and resets take the lock
/// exclusively. A page re-crawled later overwrites its earlier record.
pub struct PageStore {
    inner: RwLock<HashMap<PageKey, Arc<Page>>>,
}

impl PageStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Publishes or overwrites the page at its key.
    pub fn put(&self, page: Arc<Page>) {
        let mut map = self.inner.write().unwrap();
        map.insert(page.key().clone(), page);
    }

    /// Looks up a page by key.
    pub fn get(&self, key: &PageKey) -> Option<Arc<Page>> {
        let map = self.inner.read().unwrap();
        map.get(key).cloned()
    }

    /// Replaces the whole store with an empty one.
    pub fn reset(&self) {
        let mut map = self.inner.write().unwrap();
        *map = HashMap::new();
    }

    /// Number of pages currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}
