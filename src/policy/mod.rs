//! Eviction policies and the enum that dispatches between them.
//!
//! [`Policy`] holds exactly one of [`LruCache`] or [`LfuCache`] and forwards
//! every trait call with a `match`, so code driving a `Policy` never branches
//! on which variant is live. [`PolicyKind`] is the plain tag used to pick or
//! report a variant.
//!
//! ```
//! use cacheflex::policy::{Policy, PolicyKind};
//! use cacheflex::traits::CoreCache;
//!
//! let mut policy: Policy<u64, &str> = Policy::new(PolicyKind::Lfu, 2);
//! policy.insert(1, "one");
//! assert_eq!(policy.kind(), PolicyKind::Lfu);
//! assert_eq!(policy.get(&1), Some(&"one"));
//! ```

pub mod lfu;
pub mod lru;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{ConfigError, InvariantError};
use crate::traits::{CoreCache, MutableCache, SnapshotCache};

pub use lfu::LfuCache;
pub use lru::LruCache;

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyKind {
    /// Least Recently Used eviction.
    #[default]
    Lru,
    /// Least Frequently Used eviction, ties broken by recency.
    Lfu,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Lru => "LRU",
            PolicyKind::Lfu => "LFU",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `"lru"` / `"lfu"`, ignoring ASCII case and surrounding whitespace.
impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("lru") {
            Ok(PolicyKind::Lru)
        } else if name.eq_ignore_ascii_case("lfu") {
            Ok(PolicyKind::Lfu)
        } else {
            Err(ConfigError::UnknownPolicy(name.to_string()))
        }
    }
}

/// The live policy instance.
pub enum Policy<K, V> {
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> Policy<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Builds an empty policy of `kind`. A capacity of 0 is raised to 1.
    pub fn new(kind: PolicyKind, capacity: usize) -> Self {
        match kind {
            PolicyKind::Lru => Policy::Lru(LruCache::new(capacity)),
            PolicyKind::Lfu => Policy::Lfu(LfuCache::new(capacity)),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Lru(_) => PolicyKind::Lru,
            Policy::Lfu(_) => PolicyKind::Lfu,
        }
    }

    /// Returns the value for `key` without touching recency or frequency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match self {
            Policy::Lru(cache) => cache.peek(key),
            Policy::Lfu(cache) => cache.peek(key),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match self {
            Policy::Lru(cache) => cache.check_invariants(),
            Policy::Lfu(cache) => cache.check_invariants(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Policy<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self {
            Policy::Lru(cache) => cache.insert(key, value),
            Policy::Lfu(cache) => cache.insert(key, value),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match self {
            Policy::Lru(cache) => cache.get(key),
            Policy::Lfu(cache) => cache.get(key),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match self {
            Policy::Lru(cache) => cache.contains(key),
            Policy::Lfu(cache) => cache.contains(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            Policy::Lru(cache) => cache.len(),
            Policy::Lfu(cache) => cache.len(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            Policy::Lru(cache) => cache.capacity(),
            Policy::Lfu(cache) => cache.capacity(),
        }
    }

    fn clear(&mut self) {
        match self {
            Policy::Lru(cache) => cache.clear(),
            Policy::Lfu(cache) => cache.clear(),
        }
    }
}

impl<K, V> MutableCache<K, V> for Policy<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        match self {
            Policy::Lru(cache) => cache.remove(key),
            Policy::Lfu(cache) => cache.remove(key),
        }
    }
}

/// Most valuable entries first for both variants; see each policy for detail.
impl<K, V> SnapshotCache<K, V> for Policy<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn snapshot(&self) -> IndexMap<K, V> {
        match self {
            Policy::Lru(cache) => cache.snapshot(),
            Policy::Lfu(cache) => cache.snapshot(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Policy<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        match self {
            Policy::Lru(cache) => cache.extend(iter),
            Policy::Lfu(cache) => cache.extend(iter),
        }
    }
}

impl<K, V> fmt::Debug for Policy<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Lru(cache) => f.debug_tuple("Lru").field(cache).finish(),
            Policy::Lfu(cache) => f.debug_tuple("Lfu").field(cache).finish(),
        }
    }
}
