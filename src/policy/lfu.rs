//! # LFU (Least Frequently Used) Cache Implementation
//!
//! Evicts the entry with the fewest touches; among equally cold entries the
//! least recently touched goes first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                                  │
//!   │                                                                          │
//!   │   index: FxHashMap<K, SlotId> ──► entries: SlotArena<Entry<K, V>>        │
//!   │                                   (freq + prev/next live in the entry)   │
//!   │                                                                          │
//!   │   buckets: FxHashMap<u64, IntrusiveList>                                 │
//!   │                                                                          │
//!   │   min_freq = 1                                                           │
//!   │       │                                                                  │
//!   │       ▼                                                                  │
//!   │   freq=1: head ──► [d] ◄──► [b] ◄── tail   (evict b first)               │
//!   │   freq=3: head ──► [a] ◄── tail                                          │
//!   │   freq=4: head ──► [c] ◄── tail                                          │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Touch Flow (bump)
//!
//! ```text
//!   get(&k) / insert(existing k, v)
//!     1. Unlink the entry from bucket[freq]
//!     2. If bucket[freq] is now empty: drop it, and if freq == min_freq
//!        then min_freq += 1
//!     3. entry.freq += 1
//!     4. Push the entry to the head of bucket[freq + 1]
//! ```
//!
//! Frequencies grow by exactly one per touch. When a bump empties the minimum
//! bucket, the touched entry lands in bucket `min_freq + 1`, which is then the
//! smallest bucket present.
//!
//! ## Eviction Flow
//!
//! ```text
//!   insert(new k, v) at capacity
//!     1. Pop the tail of bucket[min_freq]
//!     2. Drop the bucket if empty (min_freq is left stale)
//!     3. Insert the new entry into bucket[1]; min_freq = 1
//! ```
//!
//! `remove` and `pop_lfu` have no follow-up insert, so they recompute
//! `min_freq` from the bucket keys when they empty the minimum bucket. That
//! scan is O(number of distinct frequencies).
//!
//! ## Operations
//!
//! | Method           | Complexity | Notes                                  |
//! |------------------|------------|----------------------------------------|
//! | `insert(k, v)`   | O(1)       | New key: freq 1; overwrite: bump       |
//! | `get(&k)`        | O(1)       | Bump                                   |
//! | `peek(&k)`       | O(1)       | No bump                                |
//! | `pop_lfu()`      | O(1)*      | *Rescans buckets if min bucket empties |
//! | `remove(&k)`     | O(1)*      | Same                                   |
//! | `frequency(&k)`  | O(1)       |                                        |
//! | `snapshot()`     | O(n)       | Hottest bucket first                   |
//!
//! ## Example Usage
//!
//! ```
//! use cacheflex::policy::lfu::LfuCache;
//! use cacheflex::traits::{CoreCache, LfuCacheTrait};
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.get(&"a");
//! assert_eq!(cache.frequency(&"a"), Some(3));
//!
//! cache.insert("c", 3);   // "b" has the lowest frequency
//! assert!(!cache.contains(&"b"));
//! assert!(cache.contains(&"a"));
//! ```
//!
//! ## Implementation Notes
//!
//! - Entries never move in the arena; a bump only relinks them.
//! - `Frequency Overflow`: theoretical at `u64::MAX` touches of one key.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::{Entry, EntryArena, IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache, SnapshotCache};

/// LFU cache with per-frequency recency buckets. Capacity is at least 1.
pub struct LfuCache<K, V> {
    index: FxHashMap<K, SlotId>,
    entries: EntryArena<K, V>,
    buckets: FxHashMap<u64, IntrusiveList>,
    // 0 only while empty
    min_freq: u64,
    capacity: usize,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LFU cache holding up to `capacity` entries.
    ///
    /// A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        LfuCache {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: EntryArena::with_capacity(capacity),
            buckets: FxHashMap::default(),
            min_freq: 0,
            capacity,
        }
    }

    /// Returns the value for `key` without bumping its frequency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(Entry::value)
    }

    /// Smallest frequency currently stored, `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        (!self.index.is_empty()).then_some(self.min_freq)
    }

    fn bump(&mut self, id: SlotId) -> u64 {
        let freq = self.entries[id].freq;
        let emptied = {
            let bucket = self
                .buckets
                .get_mut(&freq)
                .expect("lfu bucket missing");
            bucket.remove(&mut self.entries, id);
            bucket.is_empty()
        };
        if emptied {
            self.buckets.remove(&freq);
            if self.min_freq == freq {
                self.min_freq += 1;
            }
        }

        let new_freq = freq + 1;
        self.entries[id].freq = new_freq;
        self.buckets
            .entry(new_freq)
            .or_default()
            .push_front(&mut self.entries, id);
        new_freq
    }

    /// Pops the tail of the minimum bucket. Leaves `min_freq` stale if that
    /// bucket empties; callers that do not insert next must refresh it.
    fn evict_min_freq(&mut self) -> Option<(K, V)> {
        let freq = self.min_freq;
        let (id, emptied) = {
            let bucket = self.buckets.get_mut(&freq)?;
            let id = bucket.pop_back(&mut self.entries)?;
            (id, bucket.is_empty())
        };
        if emptied {
            self.buckets.remove(&freq);
        }
        let entry = self.entries.remove(id)?;
        self.index.remove(entry.key());
        trace!(freq, len = self.index.len(), capacity = self.capacity, "lfu evicted coldest entry");
        Some(entry.into_pair())
    }

    fn refresh_min_freq(&mut self) {
        if !self.buckets.contains_key(&self.min_freq) {
            self.min_freq = self.buckets.keys().copied().min().unwrap_or(0);
        }
    }

    /// Cross-checks the index, the arena, every bucket and `min_freq`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "lfu holds {} entries over capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        if self.entries.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "lfu index has {} keys but arena has {} entries",
                self.index.len(),
                self.entries.len()
            )));
        }

        let mut linked = 0usize;
        for (&freq, bucket) in &self.buckets {
            if bucket.is_empty() {
                return Err(InvariantError::new(format!("lfu bucket {freq} is empty")));
            }
            bucket.check_invariants(&self.entries)?;
            if let Some((id, _)) = bucket.iter(&self.entries).find(|(_, e)| e.freq() != freq) {
                return Err(InvariantError::new(format!(
                    "slot {} sits in bucket {freq} with a different frequency",
                    id.index()
                )));
            }
            linked += bucket.len();
        }
        if linked != self.index.len() {
            return Err(InvariantError::new(format!(
                "lfu buckets link {linked} entries but index has {}",
                self.index.len()
            )));
        }

        match self.buckets.keys().copied().min() {
            Some(min) if min != self.min_freq => {
                return Err(InvariantError::new(format!(
                    "lfu min_freq is {} but smallest bucket is {min}",
                    self.min_freq
                )));
            },
            _ => {},
        }

        for (key, &id) in &self.index {
            match self.entries.get(id) {
                Some(entry) if entry.key() == key => {},
                _ => return Err(InvariantError::new("lfu index points at the wrong slot")),
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("lfu invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let previous = self.entries[id].replace_value(value);
            self.bump(id);
            return Some(previous);
        }

        if self.index.len() >= self.capacity {
            self.evict_min_freq();
        }

        let id = self.entries.insert(Entry::new(key.clone(), value));
        self.buckets
            .entry(1)
            .or_default()
            .push_front(&mut self.entries, id);
        self.index.insert(key, id);
        self.min_freq = 1;
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.bump(id);
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
        self.buckets.clear();
        self.min_freq = 0;
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let freq = self.entries[id].freq;
        let emptied = match self.buckets.get_mut(&freq) {
            Some(bucket) => {
                bucket.remove(&mut self.entries, id);
                bucket.is_empty()
            },
            None => false,
        };
        if emptied {
            self.buckets.remove(&freq);
            self.refresh_min_freq();
        }
        self.entries.remove(id).map(|entry| entry.into_pair().1)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        let evicted = self.evict_min_freq();
        self.refresh_min_freq();
        evicted
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        let id = self.buckets.get(&self.min_freq)?.back()?;
        self.entries
            .get(id)
            .map(|entry| (entry.key(), entry.value()))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(Entry::freq)
    }
}

/// Pairs come out from the highest frequency bucket down to the lowest, most
/// recent first within a bucket. Do not rely on this order.
impl<K, V> SnapshotCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn snapshot(&self) -> IndexMap<K, V> {
        let mut freqs: Vec<u64> = self.buckets.keys().copied().collect();
        freqs.sort_unstable_by(|a, b| b.cmp(a));

        let mut out = IndexMap::with_capacity(self.index.len());
        for freq in freqs {
            for (_, entry) in self.buckets[&freq].iter(&self.entries) {
                out.insert(entry.key().clone(), entry.value().clone());
            }
        }
        out
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .field("min_freq", &self.min_freq)
            .field("buckets", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_behavior {
        use super::*;

        #[test]
        fn test_new_cache_creation() {
            let cache: LfuCache<i32, i32> = LfuCache::new(10);
            assert_eq!(cache.capacity(), 10);
            assert!(cache.is_empty());
            assert_eq!(cache.min_frequency(), None);

            let clamped: LfuCache<i32, i32> = LfuCache::new(0);
            assert_eq!(clamped.capacity(), 1);
        }

        #[test]
        fn test_insert_starts_at_frequency_one() {
            let mut cache = LfuCache::new(4);
            cache.insert("a", 1);
            assert_eq!(cache.frequency(&"a"), Some(1));
            assert_eq!(cache.min_frequency(), Some(1));
            assert_eq!(cache.frequency(&"missing"), None);
        }

        #[test]
        fn test_get_bumps_frequency() {
            let mut cache = LfuCache::new(4);
            cache.insert("a", 1);
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.frequency(&"a"), Some(3));
            assert_eq!(cache.get(&"zzz"), None);
        }

        #[test]
        fn test_overwrite_replaces_value_and_bumps() {
            let mut cache = LfuCache::new(4);
            cache.insert("a", 1);
            assert_eq!(cache.insert("a", 10), Some(1));
            assert_eq!(cache.peek(&"a"), Some(&10));
            assert_eq!(cache.frequency(&"a"), Some(2));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn test_peek_does_not_bump() {
            let mut cache = LfuCache::new(4);
            cache.insert("a", 1);
            cache.peek(&"a");
            assert_eq!(cache.frequency(&"a"), Some(1));
        }
    }

    mod eviction {
        use super::*;

        #[test]
        fn test_evicts_lowest_frequency() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.get(&"a");
            cache.get(&"a");
            cache.insert("c", 3);

            assert!(!cache.contains(&"b"));
            assert!(cache.contains(&"a"));
            assert!(cache.contains(&"c"));
            assert_eq!(cache.frequency(&"a"), Some(3));
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_tie_break_is_least_recently_touched() {
            let mut cache = LfuCache::new(4);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.insert("c", 3);
            // all at freq 2; "b" touched first, so it is the oldest in bucket 2
            cache.get(&"b");
            cache.get(&"a");
            cache.get(&"c");
            cache.insert("d", 4);
            // "d" is the only freq-1 entry; evicting next targets it
            cache.insert("e", 5);
            assert!(!cache.contains(&"d"));

            cache.get(&"e");
            cache.insert("f", 6);
            // bucket 2 tail is now "b"
            assert!(!cache.contains(&"b"));
            assert!(cache.contains(&"a"));
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_min_freq_advances_when_min_bucket_empties() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            cache.get(&"a");
            assert_eq!(cache.min_frequency(), Some(2));
            cache.get(&"a");
            assert_eq!(cache.min_frequency(), Some(3));
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_min_freq_stays_when_other_entries_share_it() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.get(&"a");
            assert_eq!(cache.min_frequency(), Some(1));
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_new_insert_resets_min_freq() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            for _ in 0..3 {
                cache.get(&"a");
                cache.get(&"b");
            }
            assert_eq!(cache.min_frequency(), Some(4));
            cache.insert("c", 3);
            assert_eq!(cache.min_frequency(), Some(1));
            assert_eq!(cache.len(), 2);
            cache.debug_validate_invariants();
        }
    }

    mod lfu_operations {
        use super::*;

        #[test]
        fn test_pop_and_peek_lfu() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.get(&"a");

            assert_eq!(cache.peek_lfu(), Some((&"b", &2)));
            assert_eq!(cache.pop_lfu(), Some(("b", 2)));
            // min bucket emptied without a follow-up insert
            assert_eq!(cache.min_frequency(), Some(2));
            assert_eq!(cache.pop_lfu(), Some(("a", 1)));
            assert_eq!(cache.pop_lfu(), None);
            assert_eq!(cache.min_frequency(), None);
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_remove_refreshes_min_freq() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            cache.insert("b", 2);
            for _ in 0..4 {
                cache.get(&"b");
            }
            assert_eq!(cache.remove(&"a"), Some(1));
            assert_eq!(cache.min_frequency(), Some(5));
            assert_eq!(cache.remove(&"a"), None);
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_snapshot_lists_hottest_first() {
            let mut cache = LfuCache::new(4);
            cache.insert("cold", 0);
            cache.insert("hot", 1);
            cache.insert("warm", 2);
            cache.get(&"hot");
            cache.get(&"hot");
            cache.get(&"warm");

            let snap = cache.snapshot();
            let keys: Vec<_> = snap.keys().copied().collect();
            assert_eq!(keys, vec!["hot", "warm", "cold"]);
            // snapshot is read-only
            assert_eq!(cache.frequency(&"hot"), Some(3));
        }

        #[test]
        fn test_clear_resets_everything() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            cache.get(&"a");
            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.min_frequency(), None);
            assert_eq!(cache.peek_lfu(), None);
            cache.insert("b", 2);
            assert_eq!(cache.frequency(&"b"), Some(1));
            cache.debug_validate_invariants();
        }
    }

    mod state_consistency {
        use super::*;

        #[test]
        fn test_invariants_hold_through_mixed_ops() {
            let mut cache = LfuCache::new(5);
            for i in 0u32..200 {
                let key = (i * 7) % 11;
                match i % 6 {
                    0 | 1 | 2 => {
                        cache.insert(key, i);
                    },
                    3 => {
                        cache.get(&key);
                    },
                    4 => {
                        cache.remove(&key);
                    },
                    _ => {
                        if i % 4 == 0 {
                            cache.pop_lfu();
                        }
                    },
                }
                cache.debug_validate_invariants();
            }
        }
    }
}
