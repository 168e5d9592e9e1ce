//! Segmentation of thread traces and aggregation into metrics.
//!
//! This module transforms loaded traces into:
//! - Contiguous state segments (for bar rendering)
//! - Per-thread work and blocked time
//! - Global makespan and efficiency

pub mod metrics;
pub mod segmenter;

// Re-export main types and functions
pub use metrics::{
    efficiency, global_stats, global_stats_from_segments, latest_finish, makespan, sampled_work,
    thread_stats, thread_work, GlobalStats, ThreadStats,
};
pub use segmenter::{segment, segment_all, Segment};
