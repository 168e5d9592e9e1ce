//! JSON report writer.

use super::report::Report;
use super::validate_path;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::path::Path;

/// Write a report as pretty JSON, creating missing parent directories
///
/// **Public** - used by `analyze`
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, a directory, or an uncreatable parent
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    validate_path(output_path)?;
    ensure_parent(output_path)?;

    let json = report_to_string(report)?;
    std::fs::write(output_path, &json)?;

    info!(
        "Report written to {} ({} bytes, {} threads)",
        output_path.display(),
        json.len(),
        report.threads.len()
    );
    Ok(())
}

/// Serialize a report to a pretty JSON string
pub fn report_to_string(report: &Report) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn ensure_parent(path: &Path) -> Result<(), OutputError> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.exists() {
        return Ok(());
    }

    debug!("Creating report directory {}", parent.display());
    std::fs::create_dir_all(parent)
        .map_err(|e| OutputError::InvalidPath(format!("{}: {}", parent.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::build_report;
    use crate::parser::schema::{Observation, State, ThreadTrace, TraceDocument};
    use tempfile::NamedTempFile;

    fn create_test_report() -> Report {
        let document = TraceDocument {
            unit: "Cycles".to_string(),
            end: 10,
            sample_size: None,
            threads: vec![ThreadTrace::new(
                0,
                vec![
                    Observation::new(0, State::Unlocked),
                    Observation::new(6, State::Locked),
                    Observation::new(10, State::Finished),
                ],
            )],
        };
        build_report(&document, Some("trace.json"))
    }

    #[test]
    fn test_written_file_parses_back() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        let loaded: Report = serde_json::from_str(&written).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.global, report.global);
        assert_eq!(loaded.threads[0].segments, report.threads[0].segments);
    }

    #[test]
    fn test_write_rejects_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = write_report(&create_test_report(), temp_dir.path());
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());

        // A regular file where a parent directory should be
        let blocked = temp_dir.path().join("nested/dirs/report.json/sub/inner.json");
        let result = write_report(&create_test_report(), &blocked);
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }

    #[test]
    fn test_report_to_string() {
        let json = report_to_string(&create_test_report()).unwrap();
        assert!(json.contains("\"total_work\": 6"));
        assert!(json.contains("\"color\": \"blue\""));
    }
}
