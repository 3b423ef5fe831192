//! cacheflex: a thread-safe cache whose LRU/LFU eviction policy and capacity
//! can be changed while it is in use.
//!
//! Both policies keep their entries in a [`ds::SlotArena`] linked by
//! [`ds::IntrusiveList`]s, so every `get`, `insert` and eviction is O(1).
//! [`AdaptiveCache`] wraps the active [`policy::Policy`] in one mutex and
//! rebuilds it from a snapshot when the policy or capacity changes.
//!
//! ```
//! use cacheflex::prelude::*;
//!
//! let cache = CacheBuilder::new(2).build::<&str, u32>();
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3);
//! assert!(cache.peek(&"b").is_none());
//!
//! cache.set_policy(PolicyKind::Lfu);
//! cache.set_capacity(4).unwrap();
//! assert_eq!(cache.len(), 2);
//! ```

pub mod adaptive;
pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use adaptive::AdaptiveCache;
