use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sortsuite::prelude::*;
use std::cell::RefCell;

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    id: u32,
    name: &'static str,
}

/// Reference result: the standard library's stable sort with the same key.
fn expected<R: Clone, K: Ord>(input: &[R], key: impl Fn(&R) -> K, direction: Direction) -> Vec<R> {
    let mut expected = input.to_vec();
    expected.sort_by(|a, b| direction.compare(&key(a), &key(b)));
    expected
}

fn sorted<R: Clone, K: KeyExtractor<R> + ?Sized>(
    algorithm: Algorithm,
    input: &[R],
    key: &K,
    direction: Direction,
) -> Vec<R> {
    match algorithm.sort(input, key, direction, &Controls::none()) {
        SortOutcome::Completed(sorted) => sorted,
        SortOutcome::Cancelled => panic!("{algorithm} cancelled without a signal"),
    }
}

#[test]
fn test_basic_sort_numbers() {
    for algorithm in Algorithm::ALL {
        assert_eq!(
            sorted(algorithm, &[5, 1, 4, 2, 8], &Identity, Direction::Ascending),
            vec![1, 2, 4, 5, 8],
            "{algorithm}"
        );
    }
}

#[test]
fn test_equal_keys_keep_input_order() {
    let input = vec![Entry { id: 1, name: "b" }, Entry { id: 1, name: "a" }];

    for algorithm in Algorithm::ALL {
        for direction in [Direction::Ascending, Direction::Descending] {
            let output = sorted(algorithm, &input, &|e: &Entry| e.id, direction);
            assert_eq!(output, input, "{algorithm} {direction}");
        }
    }
}

#[test]
fn test_stability_with_many_duplicates() {
    let mut rng = StdRng::seed_from_u64(42);

    for _iter in 0..10 {
        let len = rng.random_range(200..600);
        // (key, original position): few distinct keys force many ties.
        let input: Vec<(u8, usize)> = (0..len).map(|i| (rng.random_range(0..4), i)).collect();

        for algorithm in Algorithm::ALL {
            for direction in [Direction::Ascending, Direction::Descending] {
                let output = sorted(algorithm, &input, &|r: &(u8, usize)| r.0, direction);
                let reference = expected(&input, |r| r.0, direction);

                if output != reference {
                    for (i, (a, b)) in output.iter().zip(reference.iter()).enumerate() {
                        if a != b {
                            panic!("{algorithm} {direction}: mismatch at index {i}: got {a:?}, expected {b:?}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_fuzz_random_against_std() {
    let mut rng = rand::rng();

    for _ in 0..200 {
        let count = rng.random_range(0..120);
        let input: Vec<i32> = (0..count).map(|_| rng.random_range(-50..50)).collect();

        for algorithm in Algorithm::ALL {
            for direction in [Direction::Ascending, Direction::Descending] {
                let output = sorted(algorithm, &input, &Identity, direction);
                assert_eq!(output, expected(&input, |x| *x, direction), "{algorithm} {direction}");
                assert!(is_ordered(&output, &Identity, direction));
            }
        }
    }
}

#[test]
fn test_fuzz_string_records() {
    let mut rng = rand::rng();

    let input: Vec<String> = (0..300)
        .map(|_| {
            let len = rng.random_range(0..6);
            (0..len).map(|_| rng.random_range(b'a'..=b'd') as char).collect()
        })
        .collect();

    let by_len = |s: &String| s.len();
    for algorithm in Algorithm::ALL {
        assert_eq!(
            sorted(algorithm, &input, &Identity, Direction::Ascending),
            expected(&input, |s| s.clone(), Direction::Ascending)
        );
        assert_eq!(
            sorted(algorithm, &input, &by_len, Direction::Descending),
            expected(&input, |s| s.len(), Direction::Descending)
        );
    }
}

#[test]
fn test_sorted_input_is_unchanged() {
    let ascending: Vec<u32> = (0..500).collect();
    let descending: Vec<u32> = (0..500).rev().collect();

    for algorithm in Algorithm::ALL {
        assert_eq!(sorted(algorithm, &ascending, &Identity, Direction::Ascending), ascending);
        assert_eq!(sorted(algorithm, &descending, &Identity, Direction::Descending), descending);
    }
}

#[test]
fn test_edge_cases() {
    for algorithm in Algorithm::ALL {
        // Empty
        let empty: Vec<i64> = vec![];
        assert!(sorted(algorithm, &empty, &Identity, Direction::Ascending).is_empty());

        // Single
        assert_eq!(sorted(algorithm, &[42], &Identity, Direction::Descending), vec![42]);

        // All same
        let same = vec![7; 50];
        assert_eq!(sorted(algorithm, &same, &Identity, Direction::Ascending), same);

        // Reversed
        let reversed: Vec<i32> = (0..50).rev().collect();
        let forward: Vec<i32> = (0..50).collect();
        assert_eq!(sorted(algorithm, &reversed, &Identity, Direction::Ascending), forward);
    }
}

#[test]
fn test_progress_is_monotone_and_ends_at_100() {
    let mut rng = StdRng::seed_from_u64(7);
    let input: Vec<u16> = (0..2_000).map(|_| rng.random()).collect();

    for algorithm in Algorithm::ALL {
        let seen = RefCell::new(Vec::new());
        let sink = |p: f64| seen.borrow_mut().push(p);
        let controls = Controls::none().with_progress(&sink);

        let outcome = algorithm.sort(&input, &Identity, Direction::Ascending, &controls);
        assert!(outcome.is_completed());

        let seen = seen.into_inner();
        assert!(seen.len() > 1, "{algorithm} reported no intermediate progress");
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{algorithm} progress went backwards");
        assert!(seen.iter().all(|p| (0.0..=100.0).contains(p)));
        assert_eq!(seen.last(), Some(&100.0));
        assert_eq!(seen.iter().filter(|&&p| p == 100.0).count(), 1);
    }
}

#[test]
fn test_single_element_reports_100_immediately() {
    for algorithm in Algorithm::ALL {
        let seen = RefCell::new(Vec::new());
        let sink = |p: f64| seen.borrow_mut().push(p);
        let controls = Controls::none().with_progress(&sink);

        let outcome = algorithm.sort(&["only"], &Identity, Direction::Ascending, &controls);
        assert_eq!(outcome.into_sorted(), Some(vec!["only"]));
        assert_eq!(seen.into_inner(), vec![100.0]);
    }
}

#[test]
fn test_input_slice_is_untouched() {
    let input = vec![3, 9, 1, 7];
    let snapshot = input.clone();

    for algorithm in Algorithm::ALL {
        let _ = algorithm.sort(&input, &Identity, Direction::Descending, &Controls::none());
    }
    assert_eq!(input, snapshot);
}
