//! Productivity metrics computed from thread segments.
//!
//! Work is time spent unlocked. Efficiency compares the total work of all
//! threads with the thread-time available over the makespan. Sums saturate
//! at the `i64` bounds, like the segmenter's timestamp arithmetic.

use super::segmenter::{segment_all, Segment};
use crate::parser::schema::{State, TraceDocument};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-thread totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadStats {
    /// Time spent `Unlocked`
    pub work: i64,

    /// Time spent `Locked`
    pub blocked: i64,

    /// Total length covered by the thread's segments, leading unregistered span included
    pub span: i64,
}

/// Whole-trace totals
///
/// **Public** - returned from global_stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub thread_count: usize,

    /// Sum of every thread's work
    pub total_work: i64,

    /// Last timestamp of thread 0
    pub makespan: i64,

    /// Latest last timestamp over all threads
    pub latest_finish: i64,

    /// `total_work / (makespan * thread_count)`, 0 when the denominator is 0
    pub efficiency: f64,
}

impl GlobalStats {
    /// True when some thread outlived thread 0
    pub fn makespan_diverges(&self) -> bool {
        self.latest_finish != self.makespan
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Threads: {} | Work: {} | Makespan: {} | Efficiency: {:.3}",
            self.thread_count, self.total_work, self.makespan, self.efficiency
        )
    }
}

/// Total `Unlocked` duration of a thread's segments
pub fn thread_work(segments: &[Segment]) -> i64 {
    duration_in(segments, State::Unlocked)
}

/// Work, blocked time and span of a thread's segments
pub fn thread_stats(segments: &[Segment]) -> ThreadStats {
    ThreadStats {
        work: thread_work(segments),
        blocked: duration_in(segments, State::Locked),
        span: saturating_total(segments.iter().map(|s| s.duration)),
    }
}

fn duration_in(segments: &[Segment], state: State) -> i64 {
    saturating_total(
        segments
            .iter()
            .filter(|s| s.state == state)
            .map(|s| s.duration),
    )
}

fn saturating_total(durations: impl Iterator<Item = i64>) -> i64 {
    durations.fold(0, i64::saturating_add)
}

/// Compute global statistics for a document
///
/// **Public** - main entry point for metrics calculation
pub fn global_stats(document: &TraceDocument) -> GlobalStats {
    let segments = segment_all(document);
    global_stats_from_segments(document, &segments)
}

/// Compute global statistics from segments already built by [`segment_all`]
///
/// `segments[i]` must belong to `document.threads[i]`.
pub fn global_stats_from_segments(
    document: &TraceDocument,
    segments: &[Vec<Segment>],
) -> GlobalStats {
    let total_work = segments
        .par_iter()
        .map(|s| thread_work(s))
        .reduce(|| 0, i64::saturating_add);
    let thread_count = document.thread_count();
    let makespan = makespan(document);

    let stats = GlobalStats {
        thread_count,
        total_work,
        makespan,
        latest_finish: latest_finish(document),
        efficiency: efficiency(total_work, makespan, thread_count),
    };

    debug!("Global stats: {}", stats.summary());

    stats
}

/// Last timestamp of thread 0
///
/// Thread 0 starts the others and joins them, so its lifetime is taken as the
/// duration of the whole run. Returns 0 when thread 0 is missing or empty.
pub fn makespan(document: &TraceDocument) -> i64 {
    document
        .threads
        .first()
        .and_then(|thread| thread.last_at())
        .unwrap_or(0)
}

/// Latest last timestamp over all threads, 0 for a document without samples
pub fn latest_finish(document: &TraceDocument) -> i64 {
    document
        .threads
        .iter()
        .filter_map(|thread| thread.last_at())
        .max()
        .unwrap_or(0)
}

/// Ratio of work to available thread-time; not clamped
pub fn efficiency(total_work: i64, makespan: i64, thread_count: usize) -> f64 {
    let available = makespan.saturating_mul(thread_count as i64);
    if available == 0 {
        0.0
    } else {
        total_work as f64 / available as f64
    }
}

/// Work scaled by the producer's sampling period
pub fn sampled_work(total_work: i64, sample_size: Option<u64>) -> i64 {
    let factor = sample_size.map_or(1, |size| i64::try_from(size).unwrap_or(i64::MAX));
    total_work.saturating_mul(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{Observation, ThreadTrace};

    fn thread(start: i64, samples: &[(i64, State)]) -> ThreadTrace {
        ThreadTrace::new(
            start,
            samples.iter().map(|&(at, s)| Observation::new(at, s)).collect(),
        )
    }

    fn document(threads: Vec<ThreadTrace>) -> TraceDocument {
        TraceDocument {
            unit: "cycles".to_string(),
            end: 0,
            sample_size: None,
            threads,
        }
    }

    #[test]
    fn test_thread_work() {
        let segments = vec![
            Segment::new(0, 2, State::Unregistered),
            Segment::new(2, 3, State::Unlocked),
            Segment::new(5, 4, State::Locked),
            Segment::new(9, 3, State::Unlocked),
        ];

        assert_eq!(thread_work(&segments), 6);
        assert_eq!(
            thread_stats(&segments),
            ThreadStats {
                work: 6,
                blocked: 4,
                span: 12
            }
        );
    }

    #[test]
    fn test_reference_scenario() {
        let doc = document(vec![thread(
            2,
            &[
                (2, State::Unlocked),
                (5, State::Locked),
                (9, State::Unlocked),
                (12, State::Finished),
            ],
        )]);

        let stats = global_stats(&doc);
        assert_eq!(stats.total_work, 6);
        assert_eq!(stats.makespan, 12);
        assert_eq!(stats.efficiency, 0.5);
        assert!(!stats.makespan_diverges());
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(efficiency(10, 0, 4), 0.0);
        assert_eq!(efficiency(10, 5, 0), 0.0);

        let stats = global_stats(&document(vec![]));
        assert_eq!(stats.makespan, 0);
        assert_eq!(stats.efficiency, 0.0);
    }

    #[test]
    fn test_makespan_uses_thread_zero() {
        // Thread 1 outlives thread 0, violating the orchestrator convention
        let doc = document(vec![
            thread(0, &[(0, State::Unlocked), (10, State::Finished)]),
            thread(2, &[(2, State::Unlocked), (14, State::Finished)]),
        ]);

        let stats = global_stats(&doc);
        assert_eq!(stats.makespan, 10);
        assert_eq!(stats.latest_finish, 14);
        assert!(stats.makespan_diverges());
        // 22 units of work over 20 units of thread-time
        assert!(stats.efficiency > 1.0);
    }

    #[test]
    fn test_extreme_timestamps_saturate() {
        let doc = document(vec![
            thread(0, &[(i64::MIN, State::Unlocked), (i64::MAX, State::Finished)]),
            thread(0, &[(0, State::Unlocked), (i64::MAX, State::Finished)]),
        ]);

        let stats = global_stats(&doc);
        assert_eq!(stats.total_work, i64::MAX);
        assert_eq!(stats.makespan, i64::MAX);

        let segments = vec![
            Segment::new(0, i64::MAX, State::Locked),
            Segment::new(i64::MAX, i64::MAX, State::Unlocked),
        ];
        assert_eq!(
            thread_stats(&segments),
            ThreadStats {
                work: i64::MAX,
                blocked: i64::MAX,
                span: i64::MAX
            }
        );
    }

    #[test]
    fn test_sampled_work() {
        assert_eq!(sampled_work(6, None), 6);
        assert_eq!(sampled_work(6, Some(100)), 600);
    }
}
