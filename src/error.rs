//! Error types.
//!
//! Cancellation is not represented here: a cancelled sort is a normal
//! [`SortOutcome`](crate::core::SortOutcome), not a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading a dataset, before any sort runs.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: `{token}` is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown column `{name}` (available: {available})")]
    UnknownColumn { name: String, available: String },
}

/// An algorithm name that is none of `bubble`, `insertion`, `merge`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown algorithm `{0}` (expected bubble, insertion or merge)")]
pub struct ParseAlgorithmError(pub String);
