//! Trace document loader.
//!
//! Parses raw bytes into a [`TraceDocument`]. Only structural well-formedness
//! is checked here; temporal invariants belong to the validator.

use super::legacy;
use super::schema::TraceDocument;
use crate::utils::config::{LEGACY_END_KEY, LEGACY_MAIN_KEY, LEGACY_THREADS_KEY};
use crate::utils::error::LoadError;
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

/// Detected wire shape of a trace document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraceFormat {
    /// `{ unit, end, threads: [{ start, samples: [[at, state]] }] }`
    Sparse,
    /// Obsolete `{ END, MAIN, THREADS }` bit-string form
    LegacyDense,
}

/// Load a trace document from raw bytes
///
/// **Public** - main entry point for loading
///
/// # Errors
/// * `LoadError::Parse` - input is not well-formed JSON
/// * `LoadError::Schema` - missing or mistyped field, or a state ordinal
///   outside `0..=3`
pub fn load(bytes: &[u8]) -> Result<TraceDocument, LoadError> {
    let raw: serde_json::Value = serde_json::from_slice(bytes).map_err(LoadError::Parse)?;
    load_value(&raw)
}

/// Load a trace document from an already parsed JSON value
pub fn load_value(raw: &serde_json::Value) -> Result<TraceDocument, LoadError> {
    let document = match detect_trace_format(raw)? {
        TraceFormat::Sparse => TraceDocument::deserialize(raw)
            .map_err(|e| LoadError::Schema(e.to_string()))?,
        TraceFormat::LegacyDense => {
            debug!("Trace uses the legacy dense format, converting");
            legacy::convert(raw)?
        }
    };

    debug!(
        "Loaded trace: {} threads, unit {:?}, end {}",
        document.thread_count(),
        document.unit,
        document.end
    );

    Ok(document)
}

/// Read and load a trace file
///
/// # Errors
/// * `LoadError::Io` - file cannot be read
/// * any error from [`load`]
pub fn load_file(path: impl AsRef<Path>) -> Result<TraceDocument, LoadError> {
    let path = path.as_ref();
    info!("Loading trace from: {}", path.display());

    let bytes = std::fs::read(path)?;
    load(&bytes)
}

/// Decide which wire shape a document uses
///
/// **Private** - internal helper for load_value
fn detect_trace_format(raw: &serde_json::Value) -> Result<TraceFormat, LoadError> {
    let Some(obj) = raw.as_object() else {
        return Err(LoadError::Schema(
            "trace document must be a JSON object".to_string(),
        ));
    };

    let is_legacy = [LEGACY_MAIN_KEY, LEGACY_THREADS_KEY, LEGACY_END_KEY]
        .iter()
        .any(|key| obj.contains_key(*key));

    if is_legacy {
        Ok(TraceFormat::LegacyDense)
    } else {
        Ok(TraceFormat::Sparse)
    }
}
