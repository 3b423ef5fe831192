pub use crate::adaptive::AdaptiveCache;
pub use crate::builder::{CacheBuilder, CacheConfig};
pub use crate::ds::{Entry, EntryArena, IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::{Policy, PolicyKind};
pub use crate::traits::{
    ConcurrentCache, CoreCache, LfuCacheTrait, LruCacheTrait, MutableCache, SnapshotCache,
};
