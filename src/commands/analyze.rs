//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads the trace document
//! 2. Validates, segments and aggregates it
//! 3. Writes the JSON report and prints the summary

use super::models::AnalyzeArgs;
use crate::output::{build_report, render_summary, write_report, Report};
use crate::parser::load_file;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace file missing, malformed or not matching the schema
/// * Report write errors
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<Report> {
    let start_time = Instant::now();

    info!("Step 1/3: Loading trace...");
    let document = load_file(&args.trace)
        .with_context(|| format!("Failed to load trace {}", args.trace.display()))?;

    info!("Step 2/3: Validating and aggregating {} threads...", document.thread_count());
    let source = args.trace.display().to_string();
    let report = build_report(&document, Some(&source));

    for warning in &report.warnings {
        warn!("{}", warning);
    }
    for thread in &report.unfinished_threads {
        warn!(
            "thread {} never reached the finished state; time after its last transition is not counted",
            thread
        );
    }
    if report.global.makespan_diverges() {
        warn!(
            "thread 0 finishes at {} but the latest thread finishes at {}",
            report.global.makespan, report.global.latest_finish
        );
    }
    debug!("{}", report.global.summary());

    match &args.output_json {
        Some(path) => {
            info!("Step 3/3: Writing report...");
            write_report(&report, path).context("Failed to write report JSON")?;
            info!("✓ Report written to: {}", path.display());
        }
        None => info!("Step 3/3: Skipping report file (not requested)"),
    }

    if args.print_summary {
        println!("\n{}", render_summary(&report));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.trace.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if !args.trace.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace.display());
    }

    if let Some(output) = &args.output_json {
        if output == &args.trace {
            anyhow::bail!("Report path must differ from the trace path");
        }
    }

    Ok(())
}
