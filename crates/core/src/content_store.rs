//! Content store - the one shared, lock-guarded registry of source lists
//!
//! Every worker publishes through [`ContentStore::replace`]; the aggregator
//! reads through [`ContentStore::snapshot`] or the dirty-gated
//! [`ContentStore::merge_if_dirty`]. A single mutex guards all lists and the
//! dirty flag so a reader never sees a half-updated list. The lock is only
//! held for list manipulation, never across I/O.

use log::{debug, warn};
use rgb_marquee_types::{Message, SourceKind, SourceList};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Lock-consistent copy of every source list
pub type Snapshot = HashMap<SourceKind, SourceList>;

struct StoreInner {
    lists: HashMap<SourceKind, SourceList>,
    /// True iff some list changed since the last merge
    dirty: bool,
}

/// Shared registry of named message lists plus the dirty flag
pub struct ContentStore {
    inner: Mutex<StoreInner>,
}

impl ContentStore {
    /// Empty lists for every source. Starts dirty so the first merge runs.
    pub fn new() -> Self {
        let lists = SourceKind::PRIORITY
            .iter()
            .map(|&kind| (kind, SourceList::new()))
            .collect();
        Self {
            inner: Mutex::new(StoreInner { lists, dirty: true }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // Lists are replaced wholesale, so a poisoned guard still holds a
        // consistent state
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Content store mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Discard the source's current list, install `messages`, mark dirty
    pub fn replace(&self, source: SourceKind, messages: SourceList) {
        let count = messages.len();
        let mut inner = self.lock();
        inner.lists.insert(source, messages);
        inner.dirty = true;
        drop(inner);
        debug!("Replaced {} list ({} messages)", source, count);
    }

    /// Copy of every list taken under one lock
    pub fn snapshot(&self) -> Snapshot {
        self.lock().lists.clone()
    }

    /// Copy of one source's list
    pub fn list(&self, source: SourceKind) -> SourceList {
        self.lock().lists.get(&source).cloned().unwrap_or_default()
    }

    pub fn len(&self, source: SourceKind) -> usize {
        self.lock().lists.get(&source).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, source: SourceKind) -> bool {
        self.len(source) == 0
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    /// Run `merge` over the lists and clear the dirty flag, all under one lock.
    ///
    /// Returns `None` without calling `merge` when nothing changed since the
    /// previous merge.
    pub fn merge_if_dirty<F>(&self, merge: F) -> Option<Vec<Message>>
    where
        F: FnOnce(&Snapshot) -> Vec<Message>,
    {
        let mut inner = self.lock();
        if !inner.dirty {
            return None;
        }
        let merged = merge(&inner.lists);
        inner.dirty = false;
        Some(merged)
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb_marquee_types::Rgb;
    use std::sync::Arc;

    fn msgs(texts: &[&str]) -> SourceList {
        texts.iter().map(|t| Message::new(Rgb::WHITE, *t)).collect()
    }

    #[test]
    fn test_new_store_is_empty_and_dirty() {
        let store = ContentStore::new();
        assert!(store.is_dirty());
        for kind in SourceKind::PRIORITY {
            assert!(store.is_empty(kind));
        }
        assert_eq!(store.snapshot().len(), SourceKind::PRIORITY.len());
    }

    #[test]
    fn test_replace_discards_previous_list() {
        let store = ContentStore::new();
        store.replace(SourceKind::Jokes, msgs(&["a", "b", "c"]));
        store.replace(SourceKind::Jokes, msgs(&["d"]));
        assert_eq!(store.list(SourceKind::Jokes), msgs(&["d"]));
    }

    #[test]
    fn test_dirty_flag_cycle() {
        let store = ContentStore::new();
        assert!(store.merge_if_dirty(|_| Vec::new()).is_some());
        assert!(!store.is_dirty());

        // Nothing changed: merge is skipped and the closure never runs
        let skipped = store.merge_if_dirty(|_| panic!("merge ran while clean"));
        assert!(skipped.is_none());
        assert!(!store.is_dirty());

        store.replace(SourceKind::Weather, msgs(&["sunny"]));
        assert!(store.is_dirty());
        // Reads never clear the flag
        let _ = store.snapshot();
        let _ = store.list(SourceKind::Weather);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_concurrent_writers_leave_whole_lists() {
        let store = Arc::new(ContentStore::new());
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for round in 0..200 {
                        let text = format!("{}-{}", n, round);
                        store.replace(SourceKind::News, msgs(&[&text, &text, &text]));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let news = store.list(SourceKind::News);
        assert_eq!(news.len(), 3);
        assert!(news.iter().all(|m| m.text() == news[0].text()));
    }
}
