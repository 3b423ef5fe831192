//! Builder and plain configuration for [`AdaptiveCache`].
//!
//! ## Example
//!
//! ```rust
//! use cacheflex::builder::{CacheBuilder, CacheConfig};
//! use cacheflex::policy::PolicyKind;
//!
//! let cache = CacheBuilder::new(100)
//!     .policy(PolicyKind::Lfu)
//!     .build::<u64, String>();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//!
//! let config = CacheConfig { capacity: 16, policy: "lru".parse().unwrap() };
//! let cache = CacheBuilder::from_config(config).try_build::<u64, u64>().unwrap();
//! assert_eq!(cache.capacity(), 16);
//! ```

use std::hash::Hash;

use crate::adaptive::{AdaptiveCache, clamp_capacity, validate_capacity};
use crate::error::ConfigError;
use crate::policy::{Policy, PolicyKind};

/// Capacity and starting policy for a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum entry count. Values below 1 are clamped by
    /// [`CacheBuilder::build`] and rejected by [`CacheBuilder::try_build`].
    pub capacity: isize,
    pub policy: PolicyKind,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            capacity: 1000,
            policy: PolicyKind::Lru,
        }
    }
}

/// Builder for creating [`AdaptiveCache`] instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Create a new builder with the given capacity and LRU eviction.
    pub fn new(capacity: isize) -> Self {
        Self {
            config: CacheConfig {
                capacity,
                ..CacheConfig::default()
            },
        }
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Set the starting eviction policy.
    pub fn policy(mut self, policy: PolicyKind) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Build a cache, raising a non-positive capacity to 1.
    pub fn build<K, V>(self) -> AdaptiveCache<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let capacity = clamp_capacity(self.config.capacity);
        AdaptiveCache::from_policy(Policy::new(self.config.policy, capacity))
    }

    /// Build a cache, failing with [`ConfigError::InvalidCapacity`] on a
    /// non-positive capacity.
    pub fn try_build<K, V>(self) -> Result<AdaptiveCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let capacity = validate_capacity(self.config.capacity)?;
        Ok(AdaptiveCache::from_policy(Policy::new(
            self.config.policy,
            capacity,
        )))
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::from_config(CacheConfig::default())
    }
}

impl<K, V> Default for AdaptiveCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        CacheBuilder::default().build()
    }
}
