//! Property-based tests for the copy-on-write collections.
//!
//! Tests the following properties:
//! - set/get round-trips and same-value no-ops on Vector
//! - delete leaves a hole without shrinking
//! - Set construction dedups in first-occurrence order, idempotently
//! - Map lookup, key order and filter identity

use std::collections::HashSet;

use proptest::prelude::*;
use spark_collections::{Collection, Map, Set, Vector};

// =============================================================================
// Strategies for generating values
// =============================================================================

/// Generate small integers for collection elements
fn arb_small_int() -> impl Strategy<Value = i64> {
    -1000i64..1000i64
}

/// Generate a non-empty list together with a valid index into it
fn arb_list_and_index(max_len: usize) -> impl Strategy<Value = (Vec<i64>, usize)> {
    prop::collection::vec(arb_small_int(), 1..=max_len).prop_flat_map(|list| {
        let len = list.len();
        (Just(list), 0..len)
    })
}

/// Generate distinct string keys for maps
fn arb_keys(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,5}", 0..=max_len)
        .prop_map(|keys| keys.into_iter().collect())
}

// =============================================================================
// Vector
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// s.set(i, v).get(i) == v
    #[test]
    fn set_get_round_trip((list, index) in arb_list_and_index(10), value in arb_small_int()) {
        let s = Vector::from(list.clone());
        let t = s.set(index, value);

        prop_assert_eq!(t.get(index), Some(&value));
        if list[index] == value {
            prop_assert!(t.ptr_eq(&s));
        } else {
            prop_assert!(!t.ptr_eq(&s));
            // Receiver untouched
            prop_assert_eq!(s.to_vec(), list);
        }
    }

    /// Writing the current value back is always the receiver
    #[test]
    fn set_current_value_is_noop((list, index) in arb_list_and_index(10)) {
        let s = Vector::from(list.clone());
        prop_assert!(s.set(index, list[index]).ptr_eq(&s));
    }

    /// delete(i) keeps the length and turns only slot i into a hole
    #[test]
    fn delete_leaves_hole((list, index) in arb_list_and_index(10)) {
        let s = Vector::from(list.clone()).delete(index);

        prop_assert_eq!(s.len(), list.len());
        prop_assert_eq!(s.get(index), None);
        for (i, value) in list.iter().enumerate() {
            if i != index {
                prop_assert_eq!(s.get(i), Some(value));
            }
        }
    }

    /// push grows by one and appends at the end
    #[test]
    fn push_appends(
        list in prop::collection::vec(arb_small_int(), 0..10),
        value in arb_small_int(),
    ) {
        let s = Vector::from(list.clone());
        let t = s.push(value);
        prop_assert_eq!(t.len(), list.len() + 1);
        prop_assert_eq!(t.last(), Some(&value));
        prop_assert_eq!(s.len(), list.len());
    }
}

// =============================================================================
// Set
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// size == number of distinct elements, first-occurrence order
    #[test]
    fn set_dedups_in_first_occurrence_order(list in prop::collection::vec(-5i64..5, 0..20)) {
        let set = Set::from(list.clone());

        let mut seen = HashSet::new();
        let expected: Vec<i64> = list.into_iter().filter(|v| seen.insert(*v)).collect();

        prop_assert_eq!(set.size(), expected.len());
        prop_assert_eq!(set.to_vec(), expected);
    }

    /// Rebuilding a set from its own values renders identically
    #[test]
    fn set_rebuild_is_idempotent(list in prop::collection::vec(-5i64..5, 0..20)) {
        let set = Set::from(list);
        prop_assert_eq!(Set::from(set.to_vec()).to_string(), set.to_string());
    }

    /// add is a no-op for present values and grows by one otherwise
    #[test]
    fn set_add(list in prop::collection::vec(-5i64..5, 0..20), value in -10i64..10) {
        let set = Set::from(list);
        let added = set.add(value);
        if set.has(&value) {
            prop_assert!(added.ptr_eq(&set));
        } else {
            prop_assert_eq!(added.size(), set.size() + 1);
            prop_assert!(added.has(&value));
        }
    }
}

// =============================================================================
// Map
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// get finds every inserted key and keys() keeps insertion order
    #[test]
    fn map_lookup_and_order(keys in arb_keys(8)) {
        let map: Map<String, usize> = keys.iter().cloned().zip(0..).collect();

        prop_assert_eq!(map.keys(), keys.clone());
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(map.get(key.as_str()), Some(&i));
        }
    }

    /// filter that keeps everything returns the receiver
    #[test]
    fn map_filter_all_is_identity(keys in arb_keys(8)) {
        let map: Map<String, usize> = keys.into_iter().zip(0..).collect();
        prop_assert!(map.filter(|_, _| true).ptr_eq(&map));
    }

    /// set always yields a new map holding the value
    #[test]
    fn map_set_copies(keys in arb_keys(8), key in "[a-z]{1,5}", value in arb_small_int()) {
        let map: Map<String, i64> = keys.into_iter().zip(0..).collect();
        let updated = map.set(key.clone(), value);

        prop_assert!(!updated.ptr_eq(&map));
        prop_assert_eq!(updated.get(key.as_str()), Some(&value));
    }
}
