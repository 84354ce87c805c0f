//! Stable comparison sorts (Bubble, Insertion, Merge) over caller-keyed records.
//!
//! Every sort shares one call shape:
//! - the input slice is copied on entry and never mutated,
//! - records are compared only through a [`KeyExtractor`],
//! - a [`Controls`] bundle supplies an optional progress sink and an optional
//!   cancellation signal polled at fixed checkpoints.
//!
//! A run ends in exactly one of two states, [`SortOutcome::Completed`] or
//! [`SortOutcome::Cancelled`]. Runs are single-shot and cannot be resumed.

use crate::control::{CANCEL_STRIDE, Cancelled, Controls, ProgressMeter};
use crate::core::{Direction, KeyExtractor, SortOutcome};
use crate::error::ParseAlgorithmError;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The sorts offered by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Insertion,
    Merge,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bubble, Algorithm::Insertion, Algorithm::Merge];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
        }
    }

    /// Runs this algorithm. See [`bubble_sort`], [`insertion_sort`] and [`merge_sort`].
    pub fn sort<R, K>(
        self,
        records: &[R],
        key: &K,
        direction: Direction,
        controls: &Controls<'_>,
    ) -> SortOutcome<R>
    where
        R: Clone,
        K: KeyExtractor<R> + ?Sized,
    {
        match self {
            Algorithm::Bubble => bubble_sort(records, key, direction, controls),
            Algorithm::Insertion => insertion_sort(records, key, direction, controls),
            Algorithm::Merge => merge_sort(records, key, direction, controls),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

/// Sorts `records` with Bubble Sort and returns a new sequence.
///
/// Repeated adjacent-pair passes; a pass without swaps ends the run early, so
/// already ordered input costs a single pass.
///
/// * Time: O(n²) worst and average, O(n) best.
/// * Extra space: O(1) beyond the output copy.
/// * Stable.
///
/// Progress is the exact fraction of the n(n-1)/2 comparisons budget spent,
/// reported after each pass. Cancellation is polled before every pass and every
/// [`CANCEL_STRIDE`] comparisons inside a pass.
///
/// # Examples
///
/// ```
/// use sortsuite::prelude::*;
///
/// let outcome = bubble_sort(&[5, 1, 4, 2, 8], &Identity, Direction::Ascending, &Controls::none());
/// assert_eq!(outcome.into_sorted(), Some(vec![1, 2, 4, 5, 8]));
/// ```
pub fn bubble_sort<R, K>(
    records: &[R],
    key: &K,
    direction: Direction,
    controls: &Controls<'_>,
) -> SortOutcome<R>
where
    R: Clone,
    K: KeyExtractor<R> + ?Sized,
{
    run(Algorithm::Bubble, records, direction, controls, |data, meter| {
        bubble(data, key, direction, controls, meter)
    })
}

/// Sorts `records` with Insertion Sort and returns a new sequence.
///
/// Grows a sorted prefix, rotating each new record left past every prefix
/// record it must precede.
///
/// * Time: O(n²) worst and average, O(n) best.
/// * Extra space: O(1) beyond the output copy.
/// * Stable.
///
/// Progress is reported every `max(1, n/100)` insertions as `(i/n)²`, which
/// approximates the growing cost of later insertions rather than counting
/// comparisons. Cancellation is polled before every insertion.
pub fn insertion_sort<R, K>(
    records: &[R],
    key: &K,
    direction: Direction,
    controls: &Controls<'_>,
) -> SortOutcome<R>
where
    R: Clone,
    K: KeyExtractor<R> + ?Sized,
{
    run(Algorithm::Insertion, records, direction, controls, |data, meter| {
        insertion(data, key, direction, controls, meter)
    })
}

/// Sorts `records` with top-down Merge Sort and returns a new sequence.
///
/// * Time: O(n log n) in all cases.
/// * Extra space: one scratch buffer of n/2 records, allocated up front.
/// * Stable: on equal keys the left run always wins, in either direction.
///
/// Progress is the running count of merged records over an n·log₂n estimate of
/// total work. Cancellation is polled before each recursive call, before each
/// merge, and every [`CANCEL_STRIDE`] records inside a merge.
pub fn merge_sort<R, K>(
    records: &[R],
    key: &K,
    direction: Direction,
    controls: &Controls<'_>,
) -> SortOutcome<R>
where
    R: Clone,
    K: KeyExtractor<R> + ?Sized,
{
    run(Algorithm::Merge, records, direction, controls, |data, meter| {
        let len = data.len() as f64;
        let merger = Merger {
            key,
            direction,
            controls,
            total: len * len.log2(),
        };
        let mut scratch = Vec::with_capacity(data.len() / 2);
        merger.sort_run(data, &mut scratch, meter, 0).map(|_| ())
    })
}

/// Copy-on-entry wrapper shared by all algorithms.
///
/// Inputs of length 0 or 1 skip the body entirely: no cancellation poll, one
/// final progress report.
fn run<R: Clone>(
    algorithm: Algorithm,
    records: &[R],
    direction: Direction,
    controls: &Controls<'_>,
    body: impl FnOnce(&mut [R], &mut ProgressMeter<'_>) -> Result<(), Cancelled>,
) -> SortOutcome<R> {
    let mut data = records.to_vec();
    let mut meter = controls.meter();

    if data.len() > 1 {
        debug!(algorithm = algorithm.name(), len = data.len(), %direction, "sort started");
        if body(&mut data, &mut meter).is_err() {
            debug!(algorithm = algorithm.name(), len = data.len(), %direction, "sort cancelled");
            return SortOutcome::Cancelled;
        }
    }

    meter.finish();
    debug!(algorithm = algorithm.name(), len = data.len(), %direction, "sort completed");
    SortOutcome::Completed(data)
}

fn bubble<R, K>(
    data: &mut [R],
    key: &K,
    direction: Direction,
    controls: &Controls<'_>,
    meter: &mut ProgressMeter<'_>,
) -> Result<(), Cancelled>
where
    K: KeyExtractor<R> + ?Sized,
{
    let n = data.len();
    let total = n as f64 * (n as f64 - 1.0) / 2.0;
    let mut compared = 0u64;

    for pass in 0..n {
        controls.checkpoint()?;

        // The last `pass` records are already in their final place.
        let unsorted = n - pass - 1;
        let mut swapped = false;
        for j in 0..unsorted {
            if j % CANCEL_STRIDE == CANCEL_STRIDE - 1 {
                controls.checkpoint()?;
            }
            if direction.out_of_order(&key.key(&data[j]), &key.key(&data[j + 1])) {
                data.swap(j, j + 1);
                swapped = true;
            }
        }

        compared += unsorted as u64;
        meter.report_fraction(compared, total);

        if !swapped {
            break;
        }
    }
    Ok(())
}

fn insertion<R, K>(
    data: &mut [R],
    key: &K,
    direction: Direction,
    controls: &Controls<'_>,
    meter: &mut ProgressMeter<'_>,
) -> Result<(), Cancelled>
where
    K: KeyExtractor<R> + ?Sized,
{
    let n = data.len();
    let stride = (n / 100).max(1);

    for i in 1..n {
        controls.checkpoint()?;

        let current = key.key(&data[i]);
        let mut slot = i;
        while slot > 0 && direction.out_of_order(&key.key(&data[slot - 1]), &current) {
            slot -= 1;
        }
        data[slot..=i].rotate_right(1);

        if i % stride == 0 && meter.is_active() {
            let fraction = (i + 1) as f64 / n as f64;
            meter.report(fraction * fraction * 100.0);
        }
    }
    Ok(())
}

/// Recursion state for [`merge_sort`]. The merged-record count is threaded
/// through the calls as a plain value rather than kept here.
struct Merger<'a, 'c, K: ?Sized> {
    key: &'a K,
    direction: Direction,
    controls: &'a Controls<'c>,
    total: f64,
}

impl<K: ?Sized> Merger<'_, '_, K> {
    /// Sorts `run` in place and returns `merged` plus the records merged doing so.
    fn sort_run<R>(
        &self,
        run: &mut [R],
        scratch: &mut Vec<R>,
        meter: &mut ProgressMeter<'_>,
        merged: u64,
    ) -> Result<u64, Cancelled>
    where
        R: Clone,
        K: KeyExtractor<R>,
    {
        if run.len() <= 1 {
            return Ok(merged);
        }
        let mid = run.len() / 2;

        self.controls.checkpoint()?;
        let merged = self.sort_run(&mut run[..mid], scratch, meter, merged)?;
        self.controls.checkpoint()?;
        let merged = self.sort_run(&mut run[mid..], scratch, meter, merged)?;

        self.merge(run, mid, scratch)?;

        let merged = merged + run.len() as u64;
        meter.report_fraction(merged, self.total);
        Ok(merged)
    }

    /// Merges the sorted halves `run[..mid]` and `run[mid..]`.
    ///
    /// The left half is moved into `scratch`; output is written front to back
    /// into `run`, which never overtakes the unread part of the right half.
    fn merge<R>(&self, run: &mut [R], mid: usize, scratch: &mut Vec<R>) -> Result<(), Cancelled>
    where
        R: Clone,
        K: KeyExtractor<R>,
    {
        self.controls.checkpoint()?;

        scratch.clear();
        scratch.extend_from_slice(&run[..mid]);
        let mut left = scratch.drain(..).peekable();

        let mut out = 0;
        let mut right = mid;
        while right < run.len() && left.peek().is_some() {
            if out % CANCEL_STRIDE == CANCEL_STRIDE - 1 {
                self.controls.checkpoint()?;
            }

            let right_key = self.key.key(&run[right]);
            let taken = left.next_if(|head| self.direction.keeps_left(&self.key.key(head), &right_key));
            match taken {
                Some(head) => run[out] = head,
                None => {
                    run.swap(out, right);
                    right += 1;
                }
            }
            out += 1;
        }

        // Whatever is left of the right half already sits in place.
        for head in left {
            run[out] = head;
            out += 1;
        }
        Ok(())
    }
}
