//! Consistency checks over a loaded trace.
//!
//! Findings are advisory: they are collected and handed back to the caller,
//! and segmentation proceeds on the data as given.

use crate::parser::schema::{ThreadTrace, TraceDocument};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of anomaly found in a thread's observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    NegativeStart,
    NonMonotonicTimestamp,
    RepeatedState,
}

/// A non-fatal data-quality finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub kind: WarningKind,

    /// Index of the offending thread
    pub thread: usize,

    /// Timestamp of the earlier observation of the offending pair
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<i64>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.at) {
            (WarningKind::NegativeStart, _) => {
                write!(f, "negative start for thread {}", self.thread)
            }
            (WarningKind::NonMonotonicTimestamp, Some(at)) => {
                write!(f, "non-monotonic timestamp for thread {} at {}", self.thread, at)
            }
            (WarningKind::RepeatedState, Some(at)) => {
                write!(f, "repeated state for thread {} at {}", self.thread, at)
            }
            (WarningKind::NonMonotonicTimestamp, None) => {
                write!(f, "non-monotonic timestamp for thread {}", self.thread)
            }
            (WarningKind::RepeatedState, None) => {
                write!(f, "repeated state for thread {}", self.thread)
            }
        }
    }
}

/// Check every thread of a document
///
/// **Public** - never fails, returns warnings in thread order
pub fn validate(document: &TraceDocument) -> Vec<ValidationWarning> {
    let warnings: Vec<ValidationWarning> = document
        .threads
        .iter()
        .enumerate()
        .flat_map(|(index, thread)| validate_thread(index, thread))
        .collect();

    debug!(
        "Validated {} threads: {} warnings",
        document.thread_count(),
        warnings.len()
    );

    warnings
}

/// Check a single thread's start and adjacent observation pairs
pub fn validate_thread(index: usize, thread: &ThreadTrace) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if thread.start < 0 {
        warnings.push(ValidationWarning {
            kind: WarningKind::NegativeStart,
            thread: index,
            at: None,
        });
    }

    for pair in thread.samples.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);

        if cur.at < prev.at {
            warnings.push(ValidationWarning {
                kind: WarningKind::NonMonotonicTimestamp,
                thread: index,
                at: Some(prev.at),
            });
        }

        if cur.state == prev.state {
            warnings.push(ValidationWarning {
                kind: WarningKind::RepeatedState,
                thread: index,
                at: Some(prev.at),
            });
        }
    }

    warnings
}

/// Threads whose last observation is not the `Finished` marker
///
/// The segmenter never renders the last observation's state, so time spent
/// after an unfinished thread's last transition is missing from its work.
/// Threads without samples are not listed.
pub fn unfinished_threads(document: &TraceDocument) -> Vec<usize> {
    document
        .threads
        .iter()
        .enumerate()
        .filter(|(_, thread)| !thread.samples.is_empty() && !thread.is_finished())
        .map(|(index, _)| index)
        .collect()
}
