//! Error types for the cacheflex library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache is configured with invalid
//!   parameters (non-positive capacity, unknown policy name).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   bookkeeping (index, arena, list links, frequency buckets) disagrees.
//!
//! A cache miss is not an error: lookups return `Option::None`.
//!
//! ## Example Usage
//!
//! ```
//! use cacheflex::adaptive::AdaptiveCache;
//! use cacheflex::error::ConfigError;
//! use cacheflex::policy::PolicyKind;
//!
//! let cache: AdaptiveCache<u64, String> = AdaptiveCache::new(8, PolicyKind::Lru);
//!
//! // Resizing is strict: zero and negative capacities are rejected.
//! assert_eq!(cache.set_capacity(0), Err(ConfigError::InvalidCapacity(0)));
//! assert_eq!(cache.capacity(), 8);
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`AdaptiveCache::set_capacity`](crate::adaptive::AdaptiveCache::set_capacity),
/// [`AdaptiveCache::try_new`](crate::adaptive::AdaptiveCache::try_new),
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build), and
/// the `FromStr` impl of [`PolicyKind`](crate::policy::PolicyKind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Capacity must be at least one entry.
    #[error("capacity must be greater than zero, got {0}")]
    InvalidCapacity(isize),

    /// The policy name did not match any known eviction policy.
    #[error("unknown eviction policy `{0}` (expected `lru` or `lfu`)")]
    UnknownPolicy(String),
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
