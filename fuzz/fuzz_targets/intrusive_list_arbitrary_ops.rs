#![no_main]

use cacheflex::ds::{Entry, EntryArena, IntrusiveList, SlotId};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Two lists share one arena, mirroring how LFU buckets share entry storage.
// Tests push_front, remove, pop_back, move_to_front and cross-list moves.
fuzz_target!(|data: &[u8]| {
    let mut arena: EntryArena<u32, u32> = EntryArena::new();
    let mut lists = [IntrusiveList::new(), IntrusiveList::new()];
    let mut members: [Vec<SlotId>; 2] = [Vec::new(), Vec::new()];

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 5;
        let which = usize::from(chunk[0] >> 7);
        let value = u32::from(chunk[1]);

        match op {
            0 => {
                let id = arena.insert(Entry::new(value, value));
                lists[which].push_front(&mut arena, id);
                members[which].push(id);
                assert_eq!(lists[which].front(), Some(id));
            }
            1 => {
                if let Some(id) = lists[which].pop_back(&mut arena) {
                    members[which].retain(|m| *m != id);
                    assert!(arena.remove(id).is_some());
                }
            }
            2 => {
                if !members[which].is_empty() {
                    let pos = value as usize % members[which].len();
                    let id = members[which].swap_remove(pos);
                    lists[which].remove(&mut arena, id);
                    assert!(arena.remove(id).is_some());
                }
            }
            3 => {
                if !members[which].is_empty() {
                    let id = members[which][value as usize % members[which].len()];
                    lists[which].move_to_front(&mut arena, id);
                    assert_eq!(lists[which].front(), Some(id));
                }
            }
            _ => {
                if !members[which].is_empty() {
                    let pos = value as usize % members[which].len();
                    let id = members[which].swap_remove(pos);
                    lists[which].remove(&mut arena, id);
                    let other = 1 - which;
                    lists[other].push_front(&mut arena, id);
                    members[other].push(id);
                }
            }
        }

        for (list, ids) in lists.iter().zip(members.iter()) {
            assert_eq!(list.len(), ids.len());
            list.check_invariants(&arena).unwrap();
        }
        assert_eq!(arena.len(), members[0].len() + members[1].len());
    }
});
