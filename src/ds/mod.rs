pub mod entry;
pub mod intrusive_list;
pub mod slot_arena;

pub use entry::Entry;
pub use intrusive_list::{EntryArena, IntrusiveList};
pub use slot_arena::{SlotArena, SlotId};
