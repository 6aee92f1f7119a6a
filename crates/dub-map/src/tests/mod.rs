//! Unit tests for the dub-map crate.

// Tests use caller/callee terminology which triggers similar_names lint
#![expect(
    clippy::similar_names,
    reason = "caller/callee are domain terms for tests"
)]

mod hash_tests {
    use rstest::rstest;

    use crate::hash_key;

    #[rstest]
    #[case("", 0)]
    #[case("a", 97)]
    #[case("ab", 97 * 33 + 98)]
    #[case("main", ((109 * 33 + 97) * 33 + 105) * 33 + 110)]
    fn hash_accumulates_times_thirty_three(#[case] key: &str, #[case] expected: usize) {
        assert_eq!(hash_key(key), expected);
    }

    #[test]
    fn hash_wraps_instead_of_overflowing() {
        let long_key = "z".repeat(64);
        let shorter = "z".repeat(63);
        assert_ne!(hash_key(&long_key), hash_key(&shorter));
    }

    #[test]
    fn collision_pair_shares_hash() {
        // 'a' * 33 + 'B' == 'b' * 33 + '!'
        assert_eq!(hash_key("aB"), hash_key("b!"));
    }
}

mod string_map_tests {
    use rstest::rstest;

    use crate::{INITIAL_CAPACITY, StringMap};

    #[test]
    fn new_map_is_empty_at_initial_capacity() {
        let map: StringMap<u32> = StringMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), INITIAL_CAPACITY);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(3, 4)]
    #[case(16, 16)]
    #[case(17, 32)]
    fn requested_capacity_rounds_to_power_of_two(#[case] requested: usize, #[case] actual: usize) {
        let map: StringMap<()> = StringMap::with_capacity(requested);
        assert_eq!(map.capacity(), actual);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn unrepresentable_capacity_panics_before_allocating() {
        let _map: StringMap<()> = StringMap::with_capacity(usize::MAX);
    }

    #[rstest]
    #[case(&["main"])]
    #[case(&["main", "foo", "bar"])]
    #[case(&["aB", "b!", "c", ""])]
    fn inserted_keys_round_trip(#[case] keys: &[&str]) {
        let mut map = StringMap::new();
        for (value, key) in keys.iter().enumerate() {
            assert_eq!(map.insert(key, value), None);
        }

        assert_eq!(map.len(), keys.len());
        for (value, key) in keys.iter().enumerate() {
            assert_eq!(map.get(key), Some(&value));
        }
        assert_eq!(map.get("never-inserted"), None);
    }

    #[test]
    fn lookup_on_empty_map_misses() {
        let map: StringMap<u8> = StringMap::with_capacity(1);
        assert_eq!(map.get("anything"), None);
        assert!(!map.contains_key("anything"));
    }

    #[test]
    fn duplicate_insert_replaces_value_and_keeps_size() {
        let mut map = StringMap::new();
        assert_eq!(map.insert("x", 1), None);
        assert_eq!(map.insert("x", 2), Some(1));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x"), Some(&2));
    }

    #[test]
    fn inserted_key_is_copied() {
        let mut map = StringMap::new();
        {
            let transient = String::from("short-lived");
            map.insert(&transient, 7);
        }
        assert_eq!(map.get("short-lived"), Some(&7));
    }

    #[test]
    fn exceeding_initial_capacity_resizes_exactly_once() {
        let mut map = StringMap::new();
        let keys: Vec<String> = (0..=INITIAL_CAPACITY).map(|n| format!("key-{n}")).collect();

        for (index, key) in keys.iter().enumerate() {
            map.insert(key, index);
            if index + 1 == INITIAL_CAPACITY {
                assert_eq!(map.capacity(), INITIAL_CAPACITY, "full table not grown yet");
            }
        }

        assert_eq!(map.capacity(), INITIAL_CAPACITY * 2);
        assert_eq!(map.len(), INITIAL_CAPACITY + 1);
        for (index, key) in keys.iter().enumerate() {
            assert_eq!(map.get(key), Some(&index), "lost {key} after resize");
        }
    }

    #[test]
    fn table_grows_only_when_completely_full() {
        let mut map = StringMap::with_capacity(4);
        for key in ["a", "b", "c", "d"] {
            map.insert(key, ());
        }
        assert_eq!(map.len(), 4);
        assert_eq!(map.capacity(), 4);

        map.insert("e", ());
        assert_eq!(map.capacity(), 8);
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn replacing_in_a_full_table_still_grows_first() {
        let mut map = StringMap::with_capacity(2);
        map.insert("a", 1);
        map.insert("b", 2);

        assert_eq!(map.insert("a", 3), Some(1));
        assert_eq!(map.capacity(), 4);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
    }

    #[test]
    fn repeated_growth_from_one_slot_keeps_every_key() {
        let mut map = StringMap::with_capacity(1);
        let keys: Vec<String> = (0..300).map(|n| format!("fn_{n}")).collect();
        for (index, key) in keys.iter().enumerate() {
            map.insert(key, index);
        }

        assert_eq!(map.len(), keys.len());
        assert_eq!(map.capacity(), 512);
        for (index, key) in keys.iter().enumerate() {
            assert_eq!(map.get(key), Some(&index));
        }
    }

    #[test]
    fn colliding_keys_probe_to_the_next_slot() {
        let mut map = StringMap::new();
        map.insert("aB", 1);
        map.insert("b!", 2);

        let order: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(order, ["aB", "b!"]);
        assert_eq!(map.get("aB"), Some(&1));
        assert_eq!(map.get("b!"), Some(&2));
    }

    #[test]
    fn probing_wraps_at_the_end_of_the_table() {
        // Both keys hash to the last slot of a four-slot table.
        let mut map = StringMap::with_capacity(4);
        map.insert("aB", 1);
        map.insert("b!", 2);

        let order: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(order, ["b!", "aB"]);
        assert_eq!(map.get("b!"), Some(&2));
    }

    #[test]
    fn lookup_in_a_full_table_terminates() {
        let mut map = StringMap::with_capacity(2);
        map.insert("a", ());
        map.insert("b", ());
        assert_eq!(map.len(), map.capacity());

        assert_eq!(map.get("absent"), None);
    }

    #[test]
    fn get_or_insert_with_creates_once() {
        let mut map: StringMap<Vec<u8>> = StringMap::with_capacity(2);
        map.get_or_insert_with("k", Vec::new).push(1);
        map.get_or_insert_with("k", || vec![9, 9]).push(2);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k"), Some(&vec![1, 2]));
    }

    #[test]
    fn get_or_insert_with_grows_a_full_table_for_new_keys_only() {
        let mut map = StringMap::with_capacity(1);
        *map.get_or_insert_with("a", || 0) += 1;
        *map.get_or_insert_with("a", || 0) += 1;
        assert_eq!(map.capacity(), 1);

        *map.get_or_insert_with("b", || 10) += 1;
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.get("a"), Some(&2));
        assert_eq!(map.get("b"), Some(&11));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut map = StringMap::new();
        map.insert("counter", 1);
        if let Some(value) = map.get_mut("counter") {
            *value += 41;
        }
        assert_eq!(map.get("counter"), Some(&42));
        assert!(map.get_mut("missing").is_none());
    }

    #[test]
    fn iteration_visits_each_entry_once() {
        let mut map = StringMap::with_capacity(2);
        for key in ["one", "two", "three", "four", "five"] {
            map.insert(key, key.len());
        }

        let mut seen: Vec<(String, usize)> = map
            .iter()
            .map(|(key, value)| (key.to_owned(), *value))
            .collect();
        seen.sort();
        assert_eq!(
            seen,
            [
                ("five".to_owned(), 4),
                ("four".to_owned(), 4),
                ("one".to_owned(), 3),
                ("three".to_owned(), 5),
                ("two".to_owned(), 3),
            ]
        );
    }

    #[test]
    fn owning_iteration_yields_keys_and_values() {
        let mut map = StringMap::new();
        map.insert("left", String::from("l"));
        map.insert("right", String::from("r"));

        let mut pairs: Vec<(String, String)> = map.into_iter().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            [
                ("left".to_owned(), "l".to_owned()),
                ("right".to_owned(), "r".to_owned()),
            ]
        );
    }

    #[test]
    fn debug_lists_entries() {
        let mut map = StringMap::with_capacity(1);
        map.insert("only", 1);
        assert_eq!(format!("{map:?}"), r#"{"only": 1}"#);
    }
}

mod call_map_tests {
    use rstest::{fixture, rstest};

    use crate::{CallMap, CallerRecord, INITIAL_CALLEE_CAPACITY};

    fn callee_list(calls: &CallMap, caller: &str) -> Vec<(String, u64)> {
        calls
            .caller(caller)
            .map(|record| {
                record
                    .callees()
                    .iter()
                    .map(|callee| (callee.name().to_owned(), callee.count()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[fixture]
    fn sample() -> CallMap {
        let mut calls = CallMap::new();
        calls.record("main", "foo");
        calls.record("main", "bar");
        calls.record("main", "foo");
        calls.record("foo", "bar");
        calls
    }

    #[rstest]
    fn repeated_pairs_are_counted_in_first_seen_order(sample: CallMap) {
        assert_eq!(
            callee_list(&sample, "main"),
            [("foo".to_owned(), 2), ("bar".to_owned(), 1)]
        );
        assert_eq!(callee_list(&sample, "foo"), [("bar".to_owned(), 1)]);
        assert!(sample.caller("bar").is_none());
    }

    #[rstest]
    fn totals_reflect_distinct_pairs_and_observations(sample: CallMap) {
        assert_eq!(sample.caller_count(), 2);
        assert_eq!(sample.edge_count(), 3);
        assert_eq!(sample.observation_count(), 4);
        assert!(!sample.is_empty());
    }

    #[test]
    fn empty_map_reports_nothing() {
        let calls = CallMap::new();
        assert!(calls.is_empty());
        assert_eq!(calls.edge_count(), 0);
        assert_eq!(calls.callers().count(), 0);
    }

    #[rstest]
    #[case(&[("a", "x"), ("b", "x"), ("a", "x"), ("a", "y"), ("b", "x")], "a", "x", 2)]
    #[case(&[("a", "x"), ("b", "x"), ("a", "x"), ("a", "y"), ("b", "x")], "b", "x", 2)]
    #[case(&[("a", "x"), ("b", "x"), ("a", "x"), ("a", "y"), ("b", "x")], "a", "y", 1)]
    #[case(&[("r", "r"), ("r", "r"), ("r", "r")], "r", "r", 3)]
    fn counts_ignore_interleaving(
        #[case] events: &[(&str, &str)],
        #[case] caller: &str,
        #[case] callee: &str,
        #[case] expected: u64,
    ) {
        let mut calls = CallMap::new();
        for (from, to) in events {
            calls.record(from, to);
        }
        let count = calls.caller(caller).and_then(|record| record.count_of(callee));
        assert_eq!(count, Some(expected));
    }

    #[test]
    fn callee_list_never_holds_duplicates() {
        let mut calls = CallMap::new();
        for parity in ["even", "odd"].into_iter().cycle().take(5) {
            for name in ["alpha", "beta", "gamma"] {
                calls.record("driver", name);
            }
            calls.record("driver", parity);
        }

        let names: Vec<String> = callee_list(&calls, "driver")
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["alpha", "beta", "gamma", "even", "odd"]);
    }

    #[test]
    fn callee_list_doubles_when_full() {
        let mut calls = CallMap::new();
        for n in 0..INITIAL_CALLEE_CAPACITY {
            calls.record("wide", &format!("callee_{n}"));
        }
        let before = calls.caller("wide").map(CallerRecord::capacity);
        assert!(before.is_some_and(|capacity| capacity >= INITIAL_CALLEE_CAPACITY));

        calls.record("wide", "one_more");
        let record = calls.caller("wide");
        assert_eq!(record.map(CallerRecord::len), Some(INITIAL_CALLEE_CAPACITY + 1));
        assert!(record.is_some_and(|r| r.capacity() >= INITIAL_CALLEE_CAPACITY * 2));
    }

    #[test]
    fn many_callers_survive_table_growth() {
        let mut calls = CallMap::new();
        for n in 0..3000 {
            calls.record(&format!("caller_{n}"), "shared");
        }
        assert_eq!(calls.caller_count(), 3000);
        assert_eq!(
            calls.caller("caller_2999").and_then(|r| r.count_of("shared")),
            Some(1)
        );
    }

    #[rstest]
    fn for_each_caller_visits_every_caller(sample: CallMap) {
        let mut visited = Vec::new();
        sample.for_each_caller(|name, record| visited.push((name.to_owned(), record.len())));
        visited.sort();
        assert_eq!(visited, [("foo".to_owned(), 1), ("main".to_owned(), 2)]);
    }

    #[rstest]
    fn merge_adds_counts_and_appends_new_callees(mut sample: CallMap) {
        let mut other = CallMap::new();
        other.record("main", "baz");
        other.record("main", "foo");
        other.record("helper", "foo");

        sample.merge(other);

        assert_eq!(
            callee_list(&sample, "main"),
            [
                ("foo".to_owned(), 3),
                ("bar".to_owned(), 1),
                ("baz".to_owned(), 1),
            ]
        );
        assert_eq!(callee_list(&sample, "helper"), [("foo".to_owned(), 1)]);
        assert_eq!(sample.observation_count(), 7);
    }
}
