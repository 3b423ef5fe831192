#![no_main]

use cacheflex::adaptive::AdaptiveCache;
use cacheflex::policy::PolicyKind;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on AdaptiveCache
//
// Mixes get, peek, insert, remove, clear, policy switches and resizes, and
// checks the active policy's bookkeeping after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let initial = isize::from(data[0] % 16) + 1;
    let cache: AdaptiveCache<u8, u32> = AdaptiveCache::new(initial, PolicyKind::Lru);

    for chunk in data[1..].chunks_exact(2) {
        let op = chunk[0] % 9;
        let key = chunk[1] % 32;

        match op {
            0 | 1 => {
                let had = cache.contains(&key);
                let previous = cache.insert(key, u32::from(chunk[1]));
                assert_eq!(previous.is_some(), had);
                assert!(cache.contains(&key));
            }
            2 | 3 => {
                let peeked = cache.peek(&key);
                assert_eq!(cache.get(&key), peeked);
            }
            4 => {
                let had = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), had);
                assert!(!cache.contains(&key));
            }
            5 => {
                let before = cache.snapshot();
                let target = if cache.policy() == PolicyKind::Lru {
                    PolicyKind::Lfu
                } else {
                    PolicyKind::Lru
                };
                cache.set_policy(target);
                assert_eq!(cache.policy(), target);
                assert_eq!(cache.len(), before.len());
                for (k, v) in &before {
                    assert_eq!(cache.peek(k).as_ref(), Some(v));
                }
            }
            6 => {
                let before = cache.len();
                let new_capacity = isize::from(key % 20) - 2;
                match cache.set_capacity(new_capacity) {
                    Ok(()) => {
                        assert_eq!(cache.capacity(), new_capacity as usize);
                        assert_eq!(cache.len(), before.min(new_capacity as usize));
                    }
                    Err(_) => {
                        assert!(new_capacity <= 0);
                        assert_eq!(cache.len(), before);
                    }
                }
            }
            7 => {
                let _ = cache.snapshot();
            }
            _ => {
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
        }

        assert!(cache.len() <= cache.capacity());
        cache.check_invariants().unwrap();
    }
});
