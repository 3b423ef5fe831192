//! Thread-safe cache whose eviction policy and capacity can change at runtime.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                       AdaptiveCache<K, V>                            │
//!   │                                                                      │
//!   │   inner: parking_lot::Mutex<Policy<K, V>>                            │
//!   │                  │                                                   │
//!   │                  ▼                                                   │
//!   │          Policy::Lru(LruCache)  |  Policy::Lfu(LfuCache)             │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   set_policy(kind) / set_capacity(n), all under one lock:
//!
//!     snapshot ──► build empty Policy(kind, n) ──► replay via insert ──► swap
//! ```
//!
//! ## Locking
//!
//! `get` reorders lists and bumps frequencies, so there is no read-only
//! operation: every call, `len` and `snapshot` included, takes the one mutex for
//! its whole duration. Policy switches and resizes hold that same mutex from
//! snapshot to swap, so no caller ever observes a half-built policy.
//!
//! ## Replay
//!
//! Snapshots list the most valuable entries first (MRU first for LRU, hottest
//! bucket first for LFU). Replay inserts them in reverse, least valuable
//! first, through the new policy's ordinary `insert`:
//!
//! - the old most-recent entry is the new most-recent entry;
//! - on a shrink the replay evictions fall on the least valuable entries;
//! - frequencies restart at 1, so after a switch to LFU every entry is equally
//!   cold and the least recent ones are the first victims.
//!
//! ## Example Usage
//!
//! ```
//! use cacheflex::adaptive::AdaptiveCache;
//! use cacheflex::policy::PolicyKind;
//!
//! let cache = AdaptiveCache::new(3, PolicyKind::Lru);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! cache.insert(3, "three");
//! cache.get(&1);
//! cache.insert(4, "four");   // evicts 2
//!
//! let keys: Vec<_> = cache.snapshot().keys().copied().collect();
//! assert_eq!(keys, vec![4, 1, 3]);
//!
//! cache.set_policy(PolicyKind::Lfu);
//! assert_eq!(cache.policy(), PolicyKind::Lfu);
//! assert_eq!(cache.len(), 3);
//! ```

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{ConfigError, InvariantError};
use crate::policy::{Policy, PolicyKind};
use crate::traits::{ConcurrentCache, CoreCache, MutableCache, SnapshotCache};

/// Rejects capacities below one entry.
pub(crate) fn validate_capacity(capacity: isize) -> Result<usize, ConfigError> {
    if capacity <= 0 {
        return Err(ConfigError::InvalidCapacity(capacity));
    }
    Ok(capacity as usize)
}

/// Raises capacities below one entry to one.
pub(crate) fn clamp_capacity(capacity: isize) -> usize {
    validate_capacity(capacity).unwrap_or_else(|_| {
        debug!(requested = capacity, "capacity raised to 1");
        1
    })
}

/// Cache with switchable LRU/LFU eviction, safe to share across threads.
///
/// Values are cloned out of the lock on `get`; wrap large values in `Arc`.
pub struct AdaptiveCache<K, V> {
    inner: Mutex<Policy<K, V>>,
}

impl<K, V> AdaptiveCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache with `capacity` entries using `kind` eviction.
    ///
    /// A non-positive capacity is raised to 1; use [`try_new`](Self::try_new)
    /// to reject it instead.
    pub fn new(capacity: isize, kind: PolicyKind) -> Self {
        Self::from_policy(Policy::new(kind, clamp_capacity(capacity)))
    }

    /// Like [`new`](Self::new) but fails on a non-positive capacity.
    pub fn try_new(capacity: isize, kind: PolicyKind) -> Result<Self, ConfigError> {
        let capacity = validate_capacity(capacity)?;
        Ok(Self::from_policy(Policy::new(kind, capacity)))
    }

    pub(crate) fn from_policy(policy: Policy<K, V>) -> Self {
        AdaptiveCache {
            inner: Mutex::new(policy),
        }
    }

    /// Returns a clone of the value for `key`, marking it as used.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Returns a clone of the value for `key` without marking it as used.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key).cloned()
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Copies every pair out. Ordering follows the active policy: MRU → LRU
    /// for LRU, unspecified for LFU.
    pub fn snapshot(&self) -> IndexMap<K, V> {
        self.inner.lock().snapshot()
    }

    /// The active eviction policy.
    pub fn policy(&self) -> PolicyKind {
        self.inner.lock().kind()
    }

    /// Switches eviction policy, keeping every stored entry.
    ///
    /// No-op when `kind` is already active. Otherwise O(n) in the entry count.
    pub fn set_policy(&self, kind: PolicyKind) {
        let mut policy = self.inner.lock();
        let from = policy.kind();
        if from == kind {
            return;
        }
        let capacity = policy.capacity();
        *policy = rebuild(&policy, kind, capacity);
        debug!(%from, to = %kind, entries = policy.len(), "switched eviction policy");
    }

    /// Changes capacity by rebuilding the active policy.
    ///
    /// Shrinking below the current size evicts through ordinary inserts during
    /// replay. A non-positive `capacity` fails and leaves the cache untouched.
    pub fn set_capacity(&self, capacity: isize) -> Result<(), ConfigError> {
        let new_capacity = validate_capacity(capacity).inspect_err(|err| {
            warn!(requested = capacity, %err, "rejected capacity change");
        })?;

        let mut policy = self.inner.lock();
        let old_capacity = policy.capacity();
        let entries = policy.len();
        let kind = policy.kind();
        *policy = rebuild(&policy, kind, new_capacity);
        debug!(
            old_capacity,
            new_capacity,
            entries,
            retained = policy.len(),
            "resized cache"
        );
        Ok(())
    }

    /// Runs the active policy's internal consistency checks.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

/// Snapshot `current`, then replay it least valuable first into a fresh policy.
fn rebuild<K, V>(current: &Policy<K, V>, kind: PolicyKind, capacity: usize) -> Policy<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    let snapshot = current.snapshot();
    let mut next = Policy::new(kind, capacity);
    next.extend(snapshot.into_iter().rev());
    next
}

impl<K, V> ConcurrentCache for AdaptiveCache<K, V>
where
    K: Send,
    V: Send,
{
}

impl<K, V> fmt::Debug for AdaptiveCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policy = self.inner.lock();
        f.debug_struct("AdaptiveCache")
            .field("policy", &*policy)
            .finish()
    }
}
