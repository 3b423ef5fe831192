// ==============================================
// ADAPTIVE CACHE BEHAVIOR TESTS (integration)
// ==============================================
//
// End-to-end eviction scenarios through the public AdaptiveCache API,
// including policy switches and resizes in the middle of a workload.

use cacheflex::prelude::*;

fn keys<K: Clone, V: Clone>(cache: &AdaptiveCache<K, V>) -> Vec<K>
where
    K: Eq + std::hash::Hash,
{
    cache.snapshot().keys().cloned().collect()
}

fn sorted_keys(cache: &AdaptiveCache<i32, &'static str>) -> Vec<i32> {
    let mut out = keys(cache);
    out.sort_unstable();
    out
}

mod lru_eviction {
    use super::*;

    #[test]
    fn evicts_in_insertion_order_without_reads() {
        let cache = AdaptiveCache::new(3, PolicyKind::Lru);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.insert(3, "three");

        cache.insert(4, "four");
        assert!(!cache.contains(&1));
        cache.insert(5, "five");
        assert!(!cache.contains(&2));
        assert_eq!(sorted_keys(&cache), vec![3, 4, 5]);
    }

    #[test]
    fn get_promotes_to_most_recent() {
        let cache = AdaptiveCache::new(3, PolicyKind::Lru);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.insert(3, "three");
        assert_eq!(cache.get(&1), Some("one"));
        cache.insert(4, "four");

        assert!(!cache.contains(&2));
        assert_eq!(keys(&cache), vec![4, 1, 3]);
        assert_eq!(cache.peek(&1), Some("one"));
        assert_eq!(cache.peek(&4), Some("four"));
        assert_eq!(cache.peek(&3), Some("three"));
    }

    #[test]
    fn overwrite_promotes_without_evicting() {
        let cache = AdaptiveCache::new(2, PolicyKind::Lru);
        cache.insert(1, "one");
        cache.insert(2, "two");
        assert_eq!(cache.insert(1, "uno"), Some("one"));
        assert_eq!(cache.len(), 2);

        cache.insert(3, "three");
        assert!(!cache.contains(&2));
        assert_eq!(cache.get(&1), Some("uno"));
    }

    #[test]
    fn capacity_one_keeps_only_latest() {
        let cache = AdaptiveCache::new(1, PolicyKind::Lru);
        cache.insert(1, "one");
        cache.insert(2, "two");
        assert_eq!(keys(&cache), vec![2]);
    }
}

mod lfu_eviction {
    use super::*;

    #[test]
    fn evicts_least_frequent() {
        let cache = AdaptiveCache::new(2, PolicyKind::Lfu);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"a");
        cache.get(&"a");
        cache.insert("c", 3);

        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"a"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn ties_evict_least_recently_touched() {
        let cache = AdaptiveCache::new(2, PolicyKind::Lfu);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        assert!(!cache.contains(&"a"));
    }

    #[test]
    fn ties_above_frequency_one_evict_least_recently_touched() {
        let cache = AdaptiveCache::new(2, PolicyKind::Lfu);
        cache.insert("x", 1);
        cache.insert("y", 2);
        cache.get(&"x");
        cache.get(&"y");

        cache.insert("z", 3);
        assert!(!cache.contains(&"x"));
        assert!(cache.contains(&"y"));
        assert!(cache.contains(&"z"));
    }

    #[test]
    fn new_entry_is_next_victim_after_eviction() {
        let cache = AdaptiveCache::new(2, PolicyKind::Lfu);
        cache.insert(1, "one");
        cache.get(&1);
        cache.insert(2, "two");
        cache.get(&2);
        cache.insert(3, "three");
        cache.insert(4, "four");
        assert!(!cache.contains(&3));
        assert!(cache.contains(&4));
    }
}

mod policy_switch {
    use super::*;

    #[test]
    fn lru_then_lfu_scenario() {
        let cache = AdaptiveCache::new(3, PolicyKind::Lru);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.insert(3, "three");
        cache.get(&1);
        cache.insert(4, "four");
        assert_eq!(sorted_keys(&cache), vec![1, 3, 4]);

        cache.set_policy(PolicyKind::Lfu);
        cache.get(&1);
        cache.get(&1);
        cache.get(&3);
        cache.insert(5, "five");

        assert!(!cache.contains(&4));
        assert_eq!(sorted_keys(&cache), vec![1, 3, 5]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn round_trip_preserves_contents() {
        let cache = AdaptiveCache::new(8, PolicyKind::Lru);
        for (k, v) in [(1, "one"), (2, "two"), (3, "three"), (4, "four")] {
            cache.insert(k, v);
        }
        cache.get(&2);
        let before = cache.snapshot();

        cache.set_policy(PolicyKind::Lfu);
        cache.set_policy(PolicyKind::Lru);

        let after = cache.snapshot();
        assert_eq!(after.len(), before.len());
        for (k, v) in &before {
            assert_eq!(after.get(k), Some(v));
        }
        assert_eq!(keys(&cache), before.keys().copied().collect::<Vec<_>>());
    }

    #[test]
    fn frequencies_reset_on_switch() {
        let cache = AdaptiveCache::new(2, PolicyKind::Lfu);
        cache.insert(1, "one");
        cache.insert(2, "two");
        for _ in 0..5 {
            cache.get(&1);
        }
        // LFU snapshot puts 1 first, so replay makes it the most recent.
        cache.set_policy(PolicyKind::Lru);
        cache.set_policy(PolicyKind::Lfu);
        cache.insert(3, "three");
        assert!(!cache.contains(&2));
        assert!(cache.contains(&1));
    }

    #[test]
    fn switching_empty_cache() {
        let cache: AdaptiveCache<i32, i32> = AdaptiveCache::new(4, PolicyKind::Lru);
        cache.set_policy(PolicyKind::Lfu);
        assert_eq!(cache.policy(), PolicyKind::Lfu);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 4);
    }
}

mod resize {
    use super::*;

    #[test]
    fn shrink_keeps_exactly_n_most_recent() {
        let cache = AdaptiveCache::new(6, PolicyKind::Lru);
        for k in 1..=6 {
            cache.insert(k, "v");
        }
        cache.get(&1);
        cache.set_capacity(3).unwrap();

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.capacity(), 3);
        assert_eq!(keys(&cache), vec![1, 6, 5]);
    }

    #[test]
    fn shrink_lfu_keeps_hottest() {
        let cache = AdaptiveCache::new(4, PolicyKind::Lfu);
        for k in ["a", "b", "c", "d"] {
            cache.insert(k, 0);
        }
        for _ in 0..3 {
            cache.get(&"a");
        }
        for _ in 0..2 {
            cache.get(&"b");
        }
        cache.get(&"c");

        cache.set_capacity(2).unwrap();
        let mut kept = keys(&cache);
        kept.sort_unstable();
        assert_eq!(kept, vec!["a", "b"]);
        assert_eq!(cache.policy(), PolicyKind::Lfu);
    }

    #[test]
    fn grow_keeps_everything_and_admits_more() {
        let cache = AdaptiveCache::new(2, PolicyKind::Lru);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.set_capacity(4).unwrap();
        cache.insert(3, "three");
        cache.insert(4, "four");
        assert_eq!(sorted_keys(&cache), vec![1, 2, 3, 4]);
    }

    #[test]
    fn same_capacity_keeps_everything() {
        let cache = AdaptiveCache::new(3, PolicyKind::Lru);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.set_capacity(3).unwrap();
        assert_eq!(keys(&cache), vec![2, 1]);
    }

    #[test]
    fn invalid_capacity_leaves_state_unchanged() {
        let cache = AdaptiveCache::new(3, PolicyKind::Lfu);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.get(&1);
        let before = cache.snapshot();

        for bad in [0, -1, isize::MIN] {
            assert_eq!(cache.set_capacity(bad), Err(ConfigError::InvalidCapacity(bad)));
        }
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.policy(), PolicyKind::Lfu);
        assert_eq!(cache.snapshot(), before);
    }
}

mod configuration {
    use super::*;

    #[test]
    fn policy_names_parse_from_strings() {
        let kind: PolicyKind = "LFU".parse().unwrap();
        let cache = CacheBuilder::new(4).policy(kind).build::<u8, u8>();
        assert_eq!(cache.policy(), PolicyKind::Lfu);
        assert_eq!(cache.policy().to_string(), "LFU");

        let err = "fifo".parse::<PolicyKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown eviction policy `fifo` (expected `lru` or `lfu`)");
    }

    #[test]
    fn non_positive_capacity_is_clamped_by_default_constructors() {
        let cache: AdaptiveCache<u8, u8> = AdaptiveCache::new(-10, PolicyKind::Lru);
        assert_eq!(cache.capacity(), 1);
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert_eq!(cache.len(), 1);
    }
}
