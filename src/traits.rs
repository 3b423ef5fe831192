//! # Cache Trait Hierarchy
//!
//! Shared contracts for the two eviction policies and the enum that switches
//! between them.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌─────────────────────────────────────────┐
//!                 │            CoreCache<K, V>              │
//!                 │                                         │
//!                 │  insert(&mut, K, V) → Option<V>         │
//!                 │  get(&mut, &K) → Option<&V>             │
//!                 │  contains(&, &K) → bool                 │
//!                 │  len / is_empty / capacity / clear      │
//!                 └──────────────────┬──────────────────────┘
//!                                    │
//!                                    ▼
//!                 ┌─────────────────────────────────────────┐
//!                 │          MutableCache<K, V>             │
//!                 │  remove(&K) → Option<V>                 │
//!                 └──────────────────┬──────────────────────┘
//!                                    │
//!              ┌─────────────────────┴─────────────────────┐
//!              ▼                                           ▼
//!   ┌────────────────────────────┐          ┌────────────────────────────┐
//!   │   LruCacheTrait<K, V>      │          │   LfuCacheTrait<K, V>      │
//!   │  pop_lru / peek_lru        │          │  pop_lfu / peek_lfu        │
//!   │  touch / recency_rank      │          │  frequency                 │
//!   └────────────────────────────┘          └────────────────────────────┘
//!
//!   SnapshotCache<K, V>: snapshot(&) → IndexMap<K, V>   (LRU, LFU, Policy)
//!   ConcurrentCache: Send + Sync marker                  (AdaptiveCache)
//! ```
//!
//! ## Thread Safety
//!
//! - `LruCache`, `LfuCache` and `Policy` are single-threaded and take `&mut self`
//!   for every operation that touches recency or frequency.
//! - [`AdaptiveCache`](crate::adaptive::AdaptiveCache) wraps a `Policy` in one
//!   mutex and implements [`ConcurrentCache`].

use indexmap::IndexMap;

/// Core cache operations that all policies support.
///
/// # Example
///
/// ```
/// use cacheflex::policy::lru::LruCache;
/// use cacheflex::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// A new key may evict an entry first when the cache is full. Overwriting
    /// an existing key never evicts and counts as a touch.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// Updates recency or frequency. Use [`contains`](Self::contains) to test
    /// membership without affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a key, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning results in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Point-in-time copy of every stored pair.
///
/// Each implementor documents its ordering. Snapshots never update recency or
/// frequency.
pub trait SnapshotCache<K, V> {
    fn snapshot(&self) -> IndexMap<K, V>;
}

/// LRU-specific operations.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the least recently used entry without touching it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` counted from the MRU end (0 = most recent). O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// LFU-specific operations.
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least frequently used entry
    /// (least recently touched among ties).
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Peeks at the next LFU victim without touching it.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Access count for `key`; a fresh insert starts at 1.
    fn frequency(&self, key: &K) -> Option<u64>;
}

/// Marker trait for caches that are safe to share between threads.
pub trait ConcurrentCache: Send + Sync {}
