//! Flattened bar data for chart renderers.
//!
//! A renderer draws one horizontal stacked bar per thread. It receives the
//! segments of every thread concatenated in thread order, as parallel
//! sequences, plus the y-axis label of each thread.

use crate::aggregator::segmenter::{segment_all, Segment};
use crate::parser::schema::TraceDocument;
use serde::Serialize;

/// Parallel bar sequences, one entry per segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BarSeries {
    pub left: Vec<i64>,
    pub duration: Vec<i64>,
    pub color: Vec<&'static str>,

    /// Y position (thread index) of each segment
    pub thread: Vec<usize>,

    /// Y-axis label per thread
    pub labels: Vec<String>,
}

impl BarSeries {
    /// Flatten per-thread segments; `segments[i]` belongs to thread `i`
    pub fn from_segments(segments: &[Vec<Segment>]) -> Self {
        let total: usize = segments.iter().map(Vec::len).sum();
        let mut series = Self {
            left: Vec::with_capacity(total),
            duration: Vec::with_capacity(total),
            color: Vec::with_capacity(total),
            thread: Vec::with_capacity(total),
            labels: Vec::with_capacity(segments.len()),
        };

        for (index, thread_segments) in segments.iter().enumerate() {
            for segment in thread_segments {
                series.left.push(segment.left);
                series.duration.push(segment.duration);
                series.color.push(segment.state.color());
                series.thread.push(index);
            }
            series.labels.push(format!("thread {}", index));
        }

        series
    }

    /// Segment a document and flatten the result
    pub fn from_document(document: &TraceDocument) -> Self {
        Self::from_segments(&segment_all(document))
    }

    /// Number of bar pieces
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}
