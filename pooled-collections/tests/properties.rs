//! Property tests for the containers and the algorithm engine.

use proptest::prelude::*;

use pooled_collections::{
    Array, CircularList, Duplicates, Natural, Order, PolyArray, SList, Stack, Tree, algo,
};

fn values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-1000i32..1000, 0..64)
}

fn non_descending(xs: &[i32]) -> bool {
    xs.windows(2).all(|w| w[0] <= w[1])
}

// ============================================================================
// Buffers
// ============================================================================

proptest! {
    #[test]
    fn append_respects_capacity(capacity in 1usize..32, xs in values()) {
        let mut arr = Array::with_capacity(capacity);
        prop_assert_eq!(arr.len(), 0);

        let result = arr.append(&xs);
        if xs.len() > capacity {
            prop_assert!(result.is_err());
            prop_assert_eq!(arr.len(), 0);
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(arr.as_slice(), &xs[..]);
        }
    }

    #[test]
    fn sort_orders_and_permutes(xs in values()) {
        let mut arr = Array::with_capacity(xs.len());
        arr.append(&xs).unwrap();
        arr.sort();

        prop_assert!(non_descending(&arr));

        let mut expected = xs.clone();
        expected.sort();
        prop_assert_eq!(arr.as_slice(), &expected[..]);
    }

    #[test]
    fn search_finds_present_and_rejects_absent(xs in values(), needle in -2000i32..2000) {
        let mut sorted = xs.clone();
        algo::sort(&mut sorted);

        for x in &xs {
            let idx = algo::search_all(&sorted, x, &Natural);
            prop_assert_eq!(idx.map(|i| sorted[i]), Some(*x));
        }

        let found = algo::search_all(&sorted, &needle, &Natural);
        prop_assert_eq!(found.is_some(), xs.contains(&needle));
    }

    #[test]
    fn bounded_search_stays_in_range(xs in values(), low in 0usize..70, high in 0usize..70) {
        let mut sorted = xs;
        algo::sort(&mut sorted);
        if let Some(target) = sorted.get(low).copied() {
            if let Some(i) = algo::search(&sorted, &target, low, high, &Natural) {
                prop_assert!(i >= low && i <= high);
                prop_assert_eq!(sorted[i], target);
            }
        }
    }

    #[test]
    fn polyarray_sort_matches_natural_sort(xs in values()) {
        let mut poly = PolyArray::ints(xs.len());
        poly.append(&xs).unwrap();
        poly.sort();
        prop_assert!(non_descending(&poly));

        let printed: Vec<i32> = poly
            .to_string()
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        prop_assert_eq!(printed, poly.as_slice().to_vec());
    }

    #[test]
    fn merge_of_sorted_runs_is_sorted(mut a in values(), mut b in values()) {
        algo::sort(&mut a);
        algo::sort(&mut b);
        let mut dest = vec![0; a.len() + b.len()];
        let written = algo::merge(&mut dest, &a, &b, |x, y| x < y);

        prop_assert_eq!(written, dest.len());
        prop_assert!(non_descending(&dest));
    }
}

// ============================================================================
// Linked containers
// ============================================================================

proptest! {
    #[test]
    fn lifo_containers_reverse_push_order(xs in prop::collection::vec(any::<u16>(), 1..64)) {
        let mut list: SList<u16> = SList::with_capacity(xs.len());
        let mut stack: Stack<u16> = Stack::with_capacity(xs.len());
        prop_assert!(list.is_empty() && stack.is_empty());

        for x in &xs {
            list.push(*x).unwrap();
            stack.push(*x).unwrap();
        }
        prop_assert_eq!(list.len(), xs.len());
        prop_assert_eq!(stack.len(), xs.len());

        for x in xs.iter().rev() {
            prop_assert!(!list.is_empty() && !stack.is_empty());
            prop_assert_eq!(list.pop(), Ok(*x));
            prop_assert_eq!(stack.pop(), Ok(*x));
        }
        prop_assert!(list.is_empty() && stack.is_empty());
        prop_assert!(list.pop().is_err() && stack.pop().is_err());
    }

    #[test]
    fn ring_walks_exactly_len_newest_first(xs in prop::collection::vec(any::<i32>(), 1..64)) {
        let mut ring: CircularList<i32> = CircularList::with_capacity(xs.len());
        for x in &xs {
            ring.add(*x).unwrap();
        }
        prop_assert_eq!(ring.len(), xs.len());

        let mut seen = Vec::new();
        ring.visit(|v| seen.push(*v));
        let expected: Vec<i32> = xs.iter().rev().copied().collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn ring_remove_keeps_the_rest(xs in prop::collection::vec(0i32..8, 1..32), target in 0i32..8) {
        let mut ring: CircularList<i32> = CircularList::with_capacity(xs.len());
        for x in &xs {
            ring.add(*x).unwrap();
        }

        let mut expected: Vec<i32> = xs.iter().rev().copied().collect();
        let removed = ring.remove(&target);
        match expected.iter().position(|v| *v == target) {
            Some(i) => {
                expected.remove(i);
                prop_assert_eq!(removed, Some(target));
            }
            None => prop_assert_eq!(removed, None),
        }
        prop_assert_eq!(ring.len(), expected.len());
        prop_assert_eq!(ring.iter().copied().collect::<Vec<_>>(), expected);
    }
}

// ============================================================================
// Tree
// ============================================================================

proptest! {
    #[test]
    fn count_mode_collapses_repeats(key in any::<i32>(), times in 1usize..20) {
        let mut tree = Tree::with_capacity(4, Duplicates::Count);
        for _ in 0..times {
            tree.insert(key).unwrap();
        }
        prop_assert_eq!(tree.node_count(), 1);
        prop_assert_eq!(tree.len(), times);
        prop_assert_eq!(tree.count_of(&key), times);
    }

    #[test]
    fn allow_mode_in_order_is_sorted(xs in prop::collection::vec(-50i32..50, 0..64)) {
        let mut tree = Tree::with_capacity(64, Duplicates::Allow);
        for x in &xs {
            tree.insert(*x).unwrap();
        }

        let mut in_order = Vec::new();
        tree.traverse(Order::In, |v| in_order.push(*v));

        let mut expected = xs.clone();
        expected.sort();
        prop_assert_eq!(in_order, expected);
        prop_assert_eq!(tree.len(), xs.len());
    }

    #[test]
    fn removals_preserve_order_and_counts(
        xs in prop::collection::vec(-20i32..20, 1..48),
        removals in prop::collection::vec(-20i32..20, 0..48)
    ) {
        let mut tree = Tree::with_capacity(48, Duplicates::Allow);
        let mut model = xs.clone();
        for x in &xs {
            tree.insert(*x).unwrap();
        }

        for r in &removals {
            let removed = tree.remove(r);
            match model.iter().position(|v| v == r) {
                Some(i) => {
                    model.remove(i);
                    prop_assert_eq!(removed, Some(*r));
                }
                None => prop_assert_eq!(removed, None),
            }
        }

        model.sort();
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), model.clone());
        prop_assert_eq!(tree.len(), model.len());
        for r in &removals {
            prop_assert_eq!(tree.count_of(r), model.iter().filter(|v| *v == r).count());
        }
    }

    #[test]
    fn count_mode_removal_drops_all_repeats(
        xs in prop::collection::vec(0i32..10, 1..40),
        target in 0i32..10
    ) {
        let mut tree = Tree::with_capacity(16, Duplicates::Count);
        for x in &xs {
            tree.insert(*x).unwrap();
        }

        let repeats = xs.iter().filter(|v| **v == target).count();
        let before = tree.len();
        let removed = tree.remove(&target);

        prop_assert_eq!(removed.is_some(), repeats > 0);
        prop_assert_eq!(tree.len(), before - repeats);
        prop_assert!(tree.find(&target).is_none());
    }
}
