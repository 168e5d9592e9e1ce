//! Argument structures for CLI commands.

use crate::utils::config::DEFAULT_REPORT_PATH;
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Trace document to analyze
    pub trace: PathBuf,

    /// Output path for the JSON report (None = don't write one)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            trace: PathBuf::from("trace.json"),
            output_json: Some(PathBuf::from(DEFAULT_REPORT_PATH)),
            print_summary: false,
        }
    }
}
