//! Adapter for the obsolete dense bit-string trace format.
//!
//! Old producers wrote one character per cycle instead of sparse transitions:
//!
//! ```text
//! { "END": 12,
//!   "MAIN":    { "STP": 0, "STR": "000011110000" },
//!   "THREADS": [ { "STP": 2, "STR": "0011" }, { "STP": -1, "STR": "" } ] }
//! ```
//!
//! `STR[k]` is the state at time `STP + k` (`'0'` unlocked, `'1'` locked).
//! A slot with `STP == -1` was never used and ends the thread list. When
//! `END` is present, characters at or past it are ignored. Each run of
//! identical characters becomes one observation, and a `Finished` marker is
//! appended one past the last kept character, so the rest of the engine only
//! ever sees the sparse model.

use super::schema::{Observation, State, ThreadTrace, TraceDocument};
use crate::utils::config::{LEGACY_UNIT, LEGACY_UNUSED_SLOT};
use crate::utils::error::LoadError;
use log::debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LegacyDocument {
    #[serde(rename = "END", default)]
    end: Option<i64>,

    #[serde(rename = "MAIN")]
    main: LegacyThread,

    #[serde(rename = "THREADS", default)]
    threads: Vec<LegacyThread>,
}

#[derive(Debug, Deserialize)]
struct LegacyThread {
    #[serde(rename = "STP")]
    start: i64,

    #[serde(rename = "STR", default)]
    bits: String,
}

/// Convert a legacy dense document into the sparse model
///
/// # Errors
/// * `LoadError::Schema` - missing `MAIN`/`STP`, wrong field types, or a
///   character other than `'0'`/`'1'` in a bit string
pub fn convert(raw: &serde_json::Value) -> Result<TraceDocument, LoadError> {
    let legacy = LegacyDocument::deserialize(raw)
        .map_err(|e| LoadError::Schema(format!("legacy trace: {}", e)))?;

    let threads = std::iter::once(&legacy.main)
        .chain(legacy.threads.iter())
        .take_while(|thread| thread.start != LEGACY_UNUSED_SLOT)
        .enumerate()
        .map(|(index, thread)| expand_bits(index, thread, legacy.end))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Converted {} legacy threads to sparse form", threads.len());

    Ok(TraceDocument {
        unit: LEGACY_UNIT.to_string(),
        end: legacy.end.unwrap_or(0),
        sample_size: None,
        threads,
    })
}

/// Collapse one bit string into run-start observations, clipped at `end`
fn expand_bits(
    index: usize,
    thread: &LegacyThread,
    end: Option<i64>,
) -> Result<ThreadTrace, LoadError> {
    let overflow = || LoadError::Schema(format!("legacy thread {}: timestamp overflow", index));

    let mut samples = Vec::new();
    let mut previous: Option<State> = None;
    let mut at = thread.start;

    for (offset, bit) in thread.bits.chars().enumerate() {
        if end.is_some_and(|end| at >= end) {
            break;
        }

        let state = match bit {
            '0' => State::Unlocked,
            '1' => State::Locked,
            other => {
                return Err(LoadError::Schema(format!(
                    "legacy thread {}: invalid bit {:?} at offset {}",
                    index, other, offset
                )))
            }
        };

        if previous != Some(state) {
            samples.push(Observation::new(at, state));
            previous = Some(state);
        }
        at = at.checked_add(1).ok_or_else(overflow)?;
    }

    if !samples.is_empty() {
        samples.push(Observation::new(at, State::Finished));
    }

    Ok(ThreadTrace::new(thread.start, samples))
}
