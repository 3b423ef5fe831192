//! Intrusive doubly linked list over entries stored in a `SlotArena`.
//!
//! The list owns no nodes. Entries live in a caller-owned
//! `SlotArena<Entry<K, V>>` and carry their own `prev`/`next` links as
//! `SlotId`s; the list only records `head`, `tail` and `len`. Several lists can
//! thread through one arena, which is how the LFU policy keeps one list per
//! frequency while entries stay put when they change bucket.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Entry<K, V>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Entry { prev, next, freq, key, value }       │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ id_1   │ { prev: None,       next: Some(id_2), .. }   │
//!   │ id_2   │ { prev: Some(id_1), next: Some(id_3), .. }   │
//!   │ id_3   │ { prev: Some(id_2), next: None,       .. }   │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   IntrusiveList { head: id_1, tail: id_3, len: 3 }
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!           (MRU)                   (evict)
//! ```
//!
//! `None` links terminate the chain at both ends; `head`/`tail` act as the
//! sentinels.
//!
//! ## Operations
//!
//! | Operation        | Time | Notes                                     |
//! |------------------|------|-------------------------------------------|
//! | `push_front`     | O(1) | Entry must be unlinked                    |
//! | `remove`         | O(1) | Entry must be a member of this list       |
//! | `pop_back`       | O(1) | Detaches the tail, `None` when empty      |
//! | `move_to_front`  | O(1) | Detach + attach                           |
//! | `iter`           | O(n) | Head to tail                              |
//!
//! There is no search: callers keep their own key → `SlotId` index.
//! Detaching never frees the slot; the caller decides whether to drop the
//! entry or link it into another list.

use crate::ds::entry::Entry;
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Arena type every list in this crate threads through.
pub type EntryArena<K, V> = SlotArena<Entry<K, V>>;

#[derive(Debug, Default)]
pub struct IntrusiveList {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl IntrusiveList {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recently touched end.
    pub fn front(&self) -> Option<SlotId> {
        self.head
    }

    /// Eviction end.
    pub fn back(&self) -> Option<SlotId> {
        self.tail
    }

    /// Links the unlinked entry `id` in as the new head.
    pub fn push_front<K, V>(&mut self, arena: &mut EntryArena<K, V>, id: SlotId) {
        let old_head = self.head;
        {
            let entry = &mut arena[id];
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(head) => arena[head].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
    }

    /// Unlinks `id`, which must currently be a member of this list.
    pub fn remove<K, V>(&mut self, arena: &mut EntryArena<K, V>, id: SlotId) {
        debug_assert!(self.len > 0, "remove from empty list");
        let (prev, next) = {
            let entry = &arena[id];
            (entry.prev, entry.next)
        };

        match prev {
            Some(prev_id) => arena[prev_id].next = next,
            None => self.head = next,
        }
        match next {
            Some(next_id) => arena[next_id].prev = prev,
            None => self.tail = prev,
        }

        let entry = &mut arena[id];
        entry.prev = None;
        entry.next = None;
        self.len -= 1;
    }

    /// Unlinks the tail and returns its id.
    pub fn pop_back<K, V>(&mut self, arena: &mut EntryArena<K, V>) -> Option<SlotId> {
        let id = self.tail?;
        self.remove(arena, id);
        Some(id)
    }

    /// Moves member `id` to the head.
    pub fn move_to_front<K, V>(&mut self, arena: &mut EntryArena<K, V>, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.remove(arena, id);
        self.push_front(arena, id);
    }

    /// Iterates `(SlotId, &Entry)` from head to tail.
    pub fn iter<'a, K, V>(&self, arena: &'a EntryArena<K, V>) -> Iter<'a, K, V> {
        Iter {
            arena,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Walks the chain and checks link symmetry, termination and `len`.
    pub fn check_invariants<K, V>(&self, arena: &EntryArena<K, V>) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || self.len != 0 {
                return Err(InvariantError::new(
                    "list head/tail disagree about emptiness",
                ));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let entry = arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("list links vacant slot {}", id.index())))?;
            if entry.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has a broken prev link",
                    id.index()
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("list is longer than its len (cycle?)"));
            }
            prev = Some(id);
            current = entry.next;
        }

        if prev != self.tail {
            return Err(InvariantError::new("list chain does not end at tail"));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "list len is {} but {} entries are linked",
                self.len, count
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants<K, V>(&self, arena: &EntryArena<K, V>) {
        if let Err(err) = self.check_invariants(arena) {
            panic!("intrusive list invariant violated: {err}");
        }
    }
}

/// Head-to-tail iterator over a list's entries.
pub struct Iter<'a, K, V> {
    arena: &'a EntryArena<K, V>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (SlotId, &'a Entry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let entry = self.arena.get(id)?;
        self.current = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
