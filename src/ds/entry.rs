use crate::ds::slot_arena::SlotId;

/// One stored key/value pair plus the bookkeeping both policies share.
///
/// `prev`/`next` link the entry into exactly one
/// [`IntrusiveList`](crate::ds::IntrusiveList) at a time. `freq` counts
/// touches for LFU; LRU leaves it at 1.
#[derive(Debug)]
pub struct Entry<K, V> {
    // Link fields are touched on every move, keep them first.
    pub(crate) prev: Option<SlotId>,
    pub(crate) next: Option<SlotId>,
    pub(crate) freq: u64,
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an unlinked entry with frequency 1.
    pub fn new(key: K, value: V) -> Self {
        Self {
            prev: None,
            next: None,
            freq: 1,
            key,
            value,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn freq(&self) -> u64 {
        self.freq
    }

    /// Swaps in a new value and returns the old one.
    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
