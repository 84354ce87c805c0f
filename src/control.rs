//! Cancellation and progress plumbing shared by every sort.
//!
//! A sort polls a [`CancelSignal`] at fixed checkpoints and reports a
//! percentage to a [`ProgressSink`]. Both are optional and travel together in
//! [`Controls`].

use cuneiform::cuneiform;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Inner-loop iterations between cancellation polls.
pub const CANCEL_STRIDE: usize = 1000;

/// Highest value reported before a run has actually finished.
pub const PROGRESS_CEILING: f64 = 99.9;

/// Value reported exactly once when a run completes.
pub const PROGRESS_DONE: f64 = 100.0;

// Written by the controlling thread, read by the worker in its hot loop.
#[cuneiform]
struct Flag {
    cancelled: AtomicBool,
}

/// Cooperative cancellation token shared between a sort and its controller.
///
/// Clones share state: cancelling any clone cancels them all. Once set the
/// token stays set; use a fresh token per run.
#[derive(Clone)]
pub struct CancelToken(Arc<Flag>);

impl CancelToken {
    /// Creates a new token in the non-cancelled state.
    pub fn new() -> Self {
        Self(Arc::new(Flag {
            cancelled: AtomicBool::new(false),
        }))
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true when cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Anything a sort can poll to learn it should stop.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

impl CancelSignal for CancelToken {
    #[inline]
    fn is_cancelled(&self) -> bool {
        CancelToken::is_cancelled(self)
    }
}

impl<F: Fn() -> bool> CancelSignal for F {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Receives progress percentages in `[0, 100]`.
///
/// Sinks are called on the thread running the sort. A sink feeding an
/// interactive front end should forward the value (for example over a
/// channel) instead of touching UI state directly.
pub trait ProgressSink {
    fn report(&self, percent: f64);
}

impl<F: Fn(f64)> ProgressSink for F {
    #[inline]
    fn report(&self, percent: f64) {
        self(percent)
    }
}

/// Optional progress sink and cancellation signal for one sort call.
#[derive(Clone, Copy, Default)]
pub struct Controls<'a> {
    progress: Option<&'a dyn ProgressSink>,
    cancel: Option<&'a dyn CancelSignal>,
}

impl<'a> Controls<'a> {
    /// No progress reporting, never cancelled.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    pub fn with_cancel(mut self, signal: &'a dyn CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|signal| signal.is_cancelled())
    }

    pub(crate) fn meter(&self) -> ProgressMeter<'a> {
        ProgressMeter {
            sink: self.progress,
            last: None,
        }
    }
}

impl fmt::Debug for Controls<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controls")
            .field("progress", &self.progress.is_some())
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

/// Marker returned through `?` when a checkpoint observes cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cancelled;

impl Controls<'_> {
    /// Polls the signal, converting a request into an early return.
    #[inline]
    pub(crate) fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Enforces the progress stream contract on top of a raw sink.
///
/// Intermediate values are clamped to `[0, PROGRESS_CEILING]` and only emitted
/// when they exceed the previous one; [`ProgressMeter::finish`] emits exactly
/// [`PROGRESS_DONE`].
pub(crate) struct ProgressMeter<'a> {
    sink: Option<&'a dyn ProgressSink>,
    last: Option<f64>,
}

impl ProgressMeter<'_> {
    pub(crate) fn is_active(&self) -> bool {
        self.sink.is_some()
    }

    pub(crate) fn report(&mut self, percent: f64) {
        let Some(sink) = self.sink else {
            return;
        };
        if percent.is_nan() {
            return;
        }
        let percent = percent.clamp(0.0, PROGRESS_CEILING);
        if self.last.is_none_or(|last| percent > last) {
            self.last = Some(percent);
            sink.report(percent);
        }
    }

    /// Reports `done / total` as a percentage. A zero total reports nothing.
    pub(crate) fn report_fraction(&mut self, done: u64, total: f64) {
        if total > 0.0 {
            self.report(done as f64 * 100.0 / total);
        }
    }

    pub(crate) fn finish(self) {
        if let Some(sink) = self.sink {
            sink.report(PROGRESS_DONE);
        }
    }
}
