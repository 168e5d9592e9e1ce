//! Build contiguous state segments from a thread's observations.
//!
//! A segment is a maximal span at one state, ready to be drawn as one piece of
//! a horizontal bar. Segments of a thread are laid end to end from 0:
//!
//! Example: start 2, samples [[2,0],[5,1],[9,0],[12,3]] gives
//! `unregistered 0..2, unlocked 2..5, locked 5..9, unlocked 9..12`.
//!
//! Timestamp arithmetic saturates at the `i64` bounds, so extreme documents
//! still segment deterministically.

use crate::parser::schema::{State, ThreadTrace, TraceDocument};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A contiguous span at one state
///
/// **Public** - consumed by metrics and the bar renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Position where the span begins
    pub left: i64,

    /// Length of the span
    pub duration: i64,

    pub state: State,
}

impl Segment {
    pub fn new(left: i64, duration: i64, state: State) -> Self {
        Self {
            left,
            duration,
            state,
        }
    }

    /// Position one past the end of the span
    pub fn right(&self) -> i64 {
        self.left.saturating_add(self.duration)
    }
}

/// Segment one thread
///
/// **Public** - main entry point for segmentation
///
/// # Algorithm
/// 1. No samples, no segments
/// 2. A positive `start` yields a leading `Unregistered` span from 0
/// 3. Each adjacent pair of observations yields one span at the earlier
///    observation's state, lasting until the later one
/// 4. The last observation only closes the previous span; its own state
///    (normally `Finished`) is never emitted
pub fn segment(thread: &ThreadTrace) -> Vec<Segment> {
    if thread.samples.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(thread.samples.len());
    let mut offset = thread.start;

    if thread.start > 0 {
        segments.push(Segment::new(0, thread.start, State::Unregistered));
    }

    for pair in thread.samples.windows(2) {
        let duration = pair[1].at.saturating_sub(pair[0].at);
        segments.push(Segment::new(offset, duration, pair[0].state));
        offset = offset.saturating_add(duration);
    }

    segments
}

/// Segment every thread of a document, in thread order
///
/// Threads are independent, so they are mapped in parallel.
pub fn segment_all(document: &TraceDocument) -> Vec<Vec<Segment>> {
    let all: Vec<Vec<Segment>> = document.threads.par_iter().map(segment).collect();

    debug!(
        "Segmented {} threads into {} segments",
        all.len(),
        all.iter().map(Vec::len).sum::<usize>()
    );

    all
}
