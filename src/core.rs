//! Core traits and types for sortsuite.
//!
//! This module defines:
//! - [`KeyExtractor`]: The trait callers implement (or satisfy with a closure) to
//!   tell the sorts how to order their records.
//! - [`Direction`]: Ascending or descending order.
//! - [`SortOutcome`]: The terminal state of a sort run.
//! - [`is_ordered`]: Verification of a finished sequence.

use std::cmp::Ordering;
use std::fmt;

/// Requested sort order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Returns `true` when `a` must move after `b` for this direction.
    ///
    /// Equal keys are never out of order, which is what keeps the
    /// exchange-based sorts stable.
    #[inline(always)]
    pub fn out_of_order<K: Ord + ?Sized>(self, a: &K, b: &K) -> bool {
        match self {
            Direction::Ascending => a > b,
            Direction::Descending => a < b,
        }
    }

    /// Returns `true` when the left-run head `left` should be emitted before
    /// the right-run head `right` during a merge.
    ///
    /// Ties always go to the left run under either direction.
    #[inline(always)]
    pub fn keeps_left<K: Ord + ?Sized>(self, left: &K, right: &K) -> bool {
        !self.out_of_order(left, right)
    }

    /// Orders two keys according to this direction.
    pub fn compare<K: Ord + ?Sized>(self, a: &K, b: &K) -> Ordering {
        match self {
            Direction::Ascending => a.cmp(b),
            Direction::Descending => b.cmp(a),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => f.write_str("ascending"),
            Direction::Descending => f.write_str("descending"),
        }
    }
}

/// A trait for deriving a totally ordered sort key from a record.
///
/// The sorts never look inside a record; every comparison goes through
/// [`KeyExtractor::key`]. Implementations must be deterministic and free of
/// side effects, otherwise the output order is unspecified.
///
/// Any closure `Fn(&R) -> K` with `K: Ord` is an extractor, so most callers
/// never implement this trait by hand.
///
/// # Examples
///
/// Implementing for a field projection:
///
/// ```
/// use sortsuite::core::KeyExtractor;
///
/// struct Student {
///     id: u32,
///     name: String,
/// }
///
/// struct ById;
///
/// impl KeyExtractor<Student> for ById {
///     type Key = u32;
///
///     fn key(&self, record: &Student) -> u32 {
///         record.id
///     }
/// }
/// ```
pub trait KeyExtractor<R: ?Sized> {
    /// The ordered value records are compared by.
    type Key: Ord;

    /// Returns the key of `record`.
    fn key(&self, record: &R) -> Self::Key;
}

impl<R: ?Sized, K: Ord, F: Fn(&R) -> K> KeyExtractor<R> for F {
    type Key = K;

    #[inline(always)]
    fn key(&self, record: &R) -> K {
        self(record)
    }
}

/// Extractor that uses the record itself as its key (scalar records).
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl<R: Ord + Clone> KeyExtractor<R> for Identity {
    type Key = R;

    #[inline(always)]
    fn key(&self, record: &R) -> R {
        record.clone()
    }
}

/// Terminal state of a sort run.
///
/// A run either completes with a freshly allocated sorted sequence or is
/// cancelled, in which case no output exists at all.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortOutcome<R> {
    Completed(Vec<R>),
    Cancelled,
}

impl<R> SortOutcome<R> {
    pub fn is_completed(&self) -> bool {
        matches!(self, SortOutcome::Completed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SortOutcome::Cancelled)
    }

    /// Returns the sorted sequence, or `None` if the run was cancelled.
    pub fn into_sorted(self) -> Option<Vec<R>> {
        match self {
            SortOutcome::Completed(sorted) => Some(sorted),
            SortOutcome::Cancelled => None,
        }
    }

    /// Borrows the sorted sequence, or `None` if the run was cancelled.
    pub fn sorted(&self) -> Option<&[R]> {
        match self {
            SortOutcome::Completed(sorted) => Some(sorted),
            SortOutcome::Cancelled => None,
        }
    }
}

/// Checks that every adjacent pair in `records` respects `direction`.
///
/// Empty and single-element sequences are trivially ordered.
pub fn is_ordered<R, K>(records: &[R], key: &K, direction: Direction) -> bool
where
    K: KeyExtractor<R> + ?Sized,
{
    records
        .windows(2)
        .all(|pair| !direction.out_of_order(&key.key(&pair[0]), &key.key(&pair[1])))
}
