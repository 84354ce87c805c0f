use sortsuite::prelude::*;
use std::cell::Cell;
use std::sync::mpsc;
use std::thread;

fn reversed(count: u32) -> Vec<u32> {
    (0..count).rev().collect()
}

#[test]
fn test_cancel_before_run() {
    let input = reversed(1_000);
    let token = CancelToken::new();
    token.cancel();
    let controls = Controls::none().with_cancel(&token);

    for algorithm in Algorithm::ALL {
        let outcome = algorithm.sort(&input, &Identity, Direction::Ascending, &controls);
        assert_eq!(outcome, SortOutcome::Cancelled, "{algorithm}");
    }
}

#[test]
fn test_cancel_during_run_from_progress_sink() {
    let input = reversed(2_000);

    for algorithm in Algorithm::ALL {
        let token = CancelToken::new();
        let reports = Cell::new(0);
        // Stop as soon as the first intermediate progress value arrives.
        let sink = |_percent: f64| {
            reports.set(reports.get() + 1);
            token.cancel();
        };
        let controls = Controls::none().with_progress(&sink).with_cancel(&token);

        let outcome = algorithm.sort(&input, &Identity, Direction::Ascending, &controls);
        assert!(outcome.is_cancelled(), "{algorithm}");
        assert_eq!(reports.get(), 1, "{algorithm} kept reporting after cancellation");
    }
}

#[test]
fn test_cancel_inside_long_bubble_pass() {
    // A single pass over 50k records crosses many inner-loop checkpoints.
    let input = reversed(50_000);
    let polls = Cell::new(0u32);
    let signal = || {
        polls.set(polls.get() + 1);
        polls.get() > 3
    };
    let controls = Controls::none().with_cancel(&signal);

    let outcome = bubble_sort(&input, &Identity, Direction::Ascending, &controls);
    assert!(outcome.is_cancelled());
    assert_eq!(polls.get(), 4);
}

#[test]
fn test_closure_signal_never_firing_completes() {
    let input = reversed(1_500);
    let never = || false;
    let controls = Controls::none().with_cancel(&never);

    for algorithm in Algorithm::ALL {
        let outcome = algorithm.sort(&input, &Identity, Direction::Ascending, &controls);
        assert_eq!(outcome.into_sorted(), Some((0..1_500).collect::<Vec<u32>>()), "{algorithm}");
    }
}

#[test]
fn test_cancel_from_controller_thread() {
    for algorithm in [Algorithm::Bubble, Algorithm::Insertion] {
        let token = CancelToken::new();
        let (tx, rx) = mpsc::channel();

        let worker_token = token.clone();
        let worker = thread::spawn(move || {
            let input = reversed(20_000);
            let sink = move |percent: f64| {
                let _ = tx.send(percent);
            };
            let controls = Controls::none().with_progress(&sink).with_cancel(&worker_token);
            algorithm.sort(&input, &Identity, Direction::Ascending, &controls)
        });

        // Cancel once the worker is demonstrably under way.
        let first = rx.recv().expect("worker should report progress");
        assert!(first < 100.0);
        token.cancel();

        let outcome = worker.join().expect("worker should join cleanly");
        assert!(outcome.is_cancelled(), "{algorithm}");
        assert!(rx.iter().all(|percent| percent < 100.0), "{algorithm} reported completion");
    }
}

#[test]
fn test_merge_cancelled_from_controller_thread() {
    let token = CancelToken::new();
    let (tx, rx) = mpsc::channel::<()>();

    let worker_token = token.clone();
    let worker = thread::spawn(move || {
        let input = reversed(200_000);
        // Block inside the first progress report until the controller has cancelled.
        let sink = move |_percent: f64| {
            let _ = rx.recv();
        };
        let controls = Controls::none().with_progress(&sink).with_cancel(&worker_token);
        merge_sort(&input, &Identity, Direction::Ascending, &controls)
    });

    token.cancel();
    drop(tx);

    let outcome = worker.join().expect("worker should join cleanly");
    assert!(outcome.is_cancelled());
}
