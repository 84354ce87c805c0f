//! # sortsuite
//!
//! `sortsuite` provides the three textbook comparison sorts (**Bubble**,
//! **Insertion** and **Merge**) as generic, stable sorts over arbitrary records,
//! instrumented for interactive use: each run reports monotone progress and can
//! be cancelled cooperatively from another thread.
//!
//! ## Key Features
//!
//! - **Caller-supplied keys**: The [`KeyExtractor`] trait (satisfied by any
//!   `Fn(&R) -> K` closure) decides how records compare. The sorts never inspect
//!   a record directly.
//! - **Both directions, always stable**: Equal keys keep their input order for
//!   ascending and descending runs alike.
//! - **Copy-on-entry**: The input slice is never touched; a completed run returns
//!   a new `Vec`.
//! - **Progress and cancellation**: [`Controls`] carries an optional
//!   [`ProgressSink`] and an optional [`CancelSignal`] such as [`CancelToken`].
//!   A run ends in exactly one of [`SortOutcome::Completed`] or
//!   [`SortOutcome::Cancelled`].
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! use sortsuite::prelude::*;
//!
//! let outcome = merge_sort(&[5, 1, 4, 2, 8], &Identity, Direction::Ascending, &Controls::none());
//! assert_eq!(outcome.into_sorted(), Some(vec![1, 2, 4, 5, 8]));
//! ```
//!
//! ### Records, progress and cancellation
//!
//! ```rust
//! use sortsuite::prelude::*;
//! use std::cell::Cell;
//!
//! #[derive(Clone)]
//! struct Student {
//!     id: u32,
//!     name: &'static str,
//! }
//!
//! let students = vec![
//!     Student { id: 1, name: "b" },
//!     Student { id: 0, name: "c" },
//!     Student { id: 1, name: "a" },
//! ];
//!
//! let last = Cell::new(0.0);
//! let on_progress = |percent: f64| last.set(percent);
//! let token = CancelToken::new();
//! let controls = Controls::none().with_progress(&on_progress).with_cancel(&token);
//!
//! let sorted = insertion_sort(&students, &|s: &Student| s.id, Direction::Ascending, &controls)
//!     .into_sorted()
//!     .unwrap();
//!
//! let names: Vec<&str> = sorted.iter().map(|s| s.name).collect();
//! assert_eq!(names, vec!["c", "b", "a"]);
//! assert_eq!(last.get(), 100.0);
//! ```
//!
//! ## Performance Characteristics
//!
//! | Algorithm | Best | Average / Worst | Extra space |
//! |-----------|------|-----------------|-------------|
//! | Bubble    | O(n) | O(n²)           | O(1)        |
//! | Insertion | O(n) | O(n²)           | O(1)        |
//! | Merge     | O(n log n) | O(n log n) | O(n)      |
//!
//! All three copy the input once on entry. Cancellation latency is bounded by
//! the checkpoint spacing ([`control::CANCEL_STRIDE`] comparisons at most for
//! the inner loops), not by wall-clock time.

pub mod algo;
pub mod control;
pub mod core;
pub mod dataset;
pub mod error;

pub use crate::algo::{Algorithm, bubble_sort, insertion_sort, merge_sort};
pub use crate::control::{CancelSignal, CancelToken, Controls, ProgressSink};
pub use crate::core::{Direction, Identity, KeyExtractor, SortOutcome, is_ordered};
pub use crate::error::{DatasetError, ParseAlgorithmError};

pub mod prelude {
    pub use crate::algo::{Algorithm, bubble_sort, insertion_sort, merge_sort};
    pub use crate::control::{CancelSignal, CancelToken, Controls, ProgressSink};
    pub use crate::core::{Direction, Identity, KeyExtractor, SortOutcome, is_ordered};
}
