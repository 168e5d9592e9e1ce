use crate::parser::load_file;
use crate::utils::config::REPORT_VERSION;
use crate::validator::{unfinished_threads, validate};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a trace file and print its validation findings
pub fn validate_trace_file(file_path: &Path) -> Result<()> {
    println!("Validating trace: {}", file_path.display());

    let document = load_file(file_path)
        .with_context(|| format!("Failed to load trace {}", file_path.display()))?;

    println!("✓ Well-formed trace document");
    println!("  Unit: {}", document.unit);
    println!("  End: {}", document.end);
    println!("  Threads: {}", document.thread_count());

    let warnings = validate(&document);
    if warnings.is_empty() {
        println!("✓ No consistency warnings");
    } else {
        println!("⚠ {} warnings:", warnings.len());
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    let unfinished = unfinished_threads(&document);
    if !unfinished.is_empty() {
        println!("⚠ Threads without a finished marker: {:?}", unfinished);
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Lock Trace Report Schema");
    println!("Current Version: {}", REPORT_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  source: string?            - Trace file the report was built from");
        println!("  unit: string               - Time unit of the trace");
        println!("  end: number                - Nominal trace horizon");
        println!("  threads: array             - Per-thread results, by index");
        println!("    index: number            - Thread index (0 = orchestrator)");
        println!("    start: number            - First observable timestamp");
        println!("    stats: object            - work, blocked, span");
        println!("    segments: array          - left, duration, state, color");
        println!("  global: object             - Whole-trace statistics");
        println!("    thread_count: number");
        println!("    total_work: number       - Time spent unlocked, all threads");
        println!("    makespan: number         - Last timestamp of thread 0");
        println!("    latest_finish: number    - Latest last timestamp of any thread");
        println!("    efficiency: number       - total_work / (makespan * thread_count)");
        println!("  sampled_work: number       - total_work times the sample size");
        println!("  warnings: array            - Validation findings");
        println!("  unfinished_threads: array  - Threads without a finished marker");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}
