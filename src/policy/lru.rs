//! # LRU (Least Recently Used) Cache Implementation
//!
//! Evicts the entry that has gone longest without a `get` or `insert`.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                                  │
//!   │                                                                          │
//!   │   index: FxHashMap<K, SlotId>        entries: SlotArena<Entry<K, V>>     │
//!   │   ┌─────────┬────────┐               ┌────────┬───────────────────────┐  │
//!   │   │ "a"     │ id_0   │──────────────►│ id_0   │ key, value, prev/next │  │
//!   │   │ "b"     │ id_1   │──────────────►│ id_1   │ key, value, prev/next │  │
//!   │   └─────────┴────────┘               └────────┴───────────────────────┘  │
//!   │                                                                          │
//!   │   list: IntrusiveList                                                    │
//!   │   head ──► [MRU] ◄──► ... ◄──► [LRU] ◄── tail (evict)                    │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method             | Complexity | Notes                                    |
//! |--------------------|------------|------------------------------------------|
//! | `insert(k, v)`     | O(1)       | Overwrite moves to MRU; new key may evict |
//! | `get(&k)`          | O(1)       | Moves to MRU                             |
//! | `peek(&k)`         | O(1)       | No recency update                        |
//! | `remove(&k)`       | O(1)       |                                          |
//! | `pop_lru()`        | O(1)       | Tail of the list                         |
//! | `snapshot()`       | O(n)       | MRU → LRU order                          |
//! | `recency_rank(&k)` | O(n)       | Walks from the head                      |
//!
//! ## Example Usage
//!
//! ```
//! use cacheflex::policy::lru::LruCache;
//! use cacheflex::traits::{CoreCache, LruCacheTrait};
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");          // "a" is now most recent
//! cache.insert("c", 3);     // evicts "b"
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.peek_lru(), Some((&"a", &1)));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; [`AdaptiveCache`](crate::adaptive::AdaptiveCache) wraps it
//! in a mutex.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::{Entry, EntryArena, IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache, SnapshotCache};

/// LRU cache over an intrusive list. Capacity is at least 1.
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    entries: EntryArena<K, V>,
    list: IntrusiveList,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache holding up to `capacity` entries.
    ///
    /// A capacity of 0 is raised to 1.
    ///
    /// ```
    /// use cacheflex::policy::lru::LruCache;
    /// use cacheflex::traits::CoreCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(0);
    /// assert_eq!(cache.capacity(), 1);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        LruCache {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: EntryArena::with_capacity(capacity),
            list: IntrusiveList::new(),
            capacity,
        }
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(Entry::value)
    }

    /// Iterates pairs from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list
            .iter(&self.entries)
            .map(|(_, entry)| (entry.key(), entry.value()))
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let id = self.list.pop_back(&mut self.entries)?;
        let entry = self.entries.remove(id)?;
        self.index.remove(entry.key());
        trace!(len = self.index.len(), capacity = self.capacity, "lru evicted tail entry");
        Some(entry.into_pair())
    }

    /// Cross-checks the index, the arena and the recency list.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants(&self.entries)?;

        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "lru holds {} entries over capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        if self.list.len() != self.index.len() || self.entries.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "lru sizes disagree: index {}, list {}, arena {}",
                self.index.len(),
                self.list.len(),
                self.entries.len()
            )));
        }
        for (key, &id) in &self.index {
            match self.entries.get(id) {
                Some(entry) if entry.key() == key => {},
                _ => return Err(InvariantError::new("lru index points at the wrong slot")),
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("lru invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(&mut self.entries, id);
            return Some(self.entries[id].replace_value(value));
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let id = self.entries.insert(Entry::new(key.clone(), value));
        self.list.push_front(&mut self.entries, id);
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.move_to_front(&mut self.entries, id);
        Some(self.entries[id].value())
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
        self.list = IntrusiveList::new();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(&mut self.entries, id);
        self.entries.remove(id).map(|entry| entry.into_pair().1)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        self.evict_lru()
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        let id = self.list.back()?;
        self.entries
            .get(id)
            .map(|entry| (entry.key(), entry.value()))
    }

    fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => {
                self.list.move_to_front(&mut self.entries, id);
                true
            },
            None => false,
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        let target = *self.index.get(key)?;
        self.list
            .iter(&self.entries)
            .position(|(id, _)| id == target)
    }
}

/// Pairs come out head to tail: most recently used first.
impl<K, V> SnapshotCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn snapshot(&self) -> IndexMap<K, V> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
