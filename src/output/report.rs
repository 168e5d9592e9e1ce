//! Analysis report: everything a summary printer needs in one structure.

use crate::aggregator::metrics::{
    global_stats_from_segments, sampled_work, thread_stats, GlobalStats, ThreadStats,
};
use crate::aggregator::segmenter::{segment_all, Segment};
use crate::parser::schema::{State, TraceDocument};
use crate::utils::config::{REPORT_VERSION, SUMMARY_RULE_WIDTH};
use crate::validator::{unfinished_threads, validate, ValidationWarning};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Where the trace came from (file path), if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub unit: String,
    pub end: i64,

    pub threads: Vec<ThreadReport>,
    pub global: GlobalStats,

    /// `global.total_work` scaled by the trace's sample size
    pub sampled_work: i64,

    pub warnings: Vec<ValidationWarning>,

    /// Threads whose trace stops before a `Finished` marker
    pub unfinished_threads: Vec<usize>,

    /// Timestamp when report was generated
    pub generated_at: String,
}

/// Per-thread section of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadReport {
    pub index: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_id: Option<u64>,

    pub start: i64,
    pub stats: ThreadStats,
    pub segments: Vec<ReportSegment>,
}

/// A segment with its color label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSegment {
    pub left: i64,
    pub duration: i64,
    pub state: State,
    pub color: String,
}

impl From<&Segment> for ReportSegment {
    fn from(segment: &Segment) -> Self {
        Self {
            left: segment.left,
            duration: segment.duration,
            state: segment.state,
            color: segment.state.color().to_string(),
        }
    }
}

/// Run validation, segmentation and aggregation over a document
///
/// **Public** - used by commands to create final output
pub fn build_report(document: &TraceDocument, source: Option<&str>) -> Report {
    let segments = segment_all(document);
    let global = global_stats_from_segments(document, &segments);

    let threads = document
        .threads
        .iter()
        .zip(&segments)
        .enumerate()
        .map(|(index, (thread, thread_segments))| ThreadReport {
            index,
            native_id: thread.native_id,
            start: thread.start,
            stats: thread_stats(thread_segments),
            segments: thread_segments.iter().map(ReportSegment::from).collect(),
        })
        .collect();

    Report {
        version: REPORT_VERSION.to_string(),
        source: source.map(str::to_string),
        unit: document.unit.clone(),
        end: document.end,
        threads,
        global,
        sampled_work: sampled_work(global.total_work, document.sample_size),
        warnings: validate(document),
        unfinished_threads: unfinished_threads(document),
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Plain-text table of per-thread work and global totals
pub fn render_summary(report: &Report) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails
    let _ = write_summary(&mut out, report);
    out
}

fn write_summary(out: &mut String, report: &Report) -> std::fmt::Result {
    let rule = "=".repeat(SUMMARY_RULE_WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(out, "TRACE SUMMARY ({})", report.unit)?;
    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "{:<10} {:>12} {:>12} {:>12}",
        "thread", "work", "blocked", "span"
    )?;
    for thread in &report.threads {
        writeln!(
            out,
            "{:<10} {:>12} {:>12} {:>12}",
            thread.index, thread.stats.work, thread.stats.blocked, thread.stats.span
        )?;
    }
    writeln!(out, "{}", "-".repeat(SUMMARY_RULE_WIDTH))?;
    writeln!(out, "Total Work: {} {}", report.global.total_work, report.unit)?;
    if report.sampled_work != report.global.total_work {
        writeln!(out, "Sampled Work: {} {}", report.sampled_work, report.unit)?;
    }
    writeln!(out, "Duration:   {} {}", report.global.makespan, report.unit)?;
    writeln!(out, "Efficiency: {:.4}", report.global.efficiency)?;
    if report.global.makespan_diverges() {
        writeln!(
            out,
            "Note: a thread finishes at {}, after thread 0",
            report.global.latest_finish
        )?;
    }
    if !report.warnings.is_empty() {
        writeln!(out, "Warnings:   {}", report.warnings.len())?;
    }
    write!(out, "{}", rule)
}
