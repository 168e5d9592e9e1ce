//! Outputs handed to external collaborators.
//!
//! This module handles:
//! - Bar series for chart renderers
//! - Analysis reports and their text summary
//! - Writing reports as JSON

pub mod bars;
pub mod json;
pub mod report;

// Re-export main functions
pub use bars::BarSeries;
pub use json::{report_to_string, write_report};
pub use report::{build_report, render_summary, Report, ReportSegment, ThreadReport};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
