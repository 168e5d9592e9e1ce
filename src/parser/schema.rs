//! In-memory data model of a lock-state trace document.
//!
//! This module defines the structure the loader produces from a trace file.
//! The wire shape is the sparse `[timestamp, state]` form; see
//! [`super::legacy`] for the obsolete dense form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lock state of a thread at an observation point
///
/// Encoded on the wire by its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum State {
    /// Holds no lock, doing runnable work
    Unlocked,
    /// Blocked waiting on a lock
    Locked,
    /// Synthetic: before the thread's start, never recorded by the producer
    Unregistered,
    /// Terminal marker, only valid as the last observation
    Finished,
}

impl State {
    pub const ALL: [State; 4] = [
        State::Unlocked,
        State::Locked,
        State::Unregistered,
        State::Finished,
    ];

    /// Wire ordinal
    pub fn ordinal(self) -> u8 {
        match self {
            State::Unlocked => 0,
            State::Locked => 1,
            State::Unregistered => 2,
            State::Finished => 3,
        }
    }

    /// Color label used when the state is drawn as a bar segment
    pub fn color(self) -> &'static str {
        match self {
            State::Unlocked => "blue",
            State::Locked => "red",
            State::Unregistered => "black",
            State::Finished => "white",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            State::Unlocked => "unlocked",
            State::Locked => "locked",
            State::Unregistered => "unregistered",
            State::Finished => "finished",
        }
    }
}

impl TryFrom<u8> for State {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        State::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("invalid state ordinal {} (expected 0..=3)", value))
    }
}

impl From<State> for u8 {
    fn from(state: State) -> Self {
        state.ordinal()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single recorded state transition
///
/// Serialized as a two-element array `[at, state]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, State)", into = "(i64, State)")]
pub struct Observation {
    /// Timestamp in the document's unit
    pub at: i64,
    /// State entered at `at`
    pub state: State,
}

impl Observation {
    pub fn new(at: i64, state: State) -> Self {
        Self { at, state }
    }
}

impl From<(i64, State)> for Observation {
    fn from((at, state): (i64, State)) -> Self {
        Self { at, state }
    }
}

impl From<Observation> for (i64, State) {
    fn from(obs: Observation) -> Self {
        (obs.at, obs.state)
    }
}

/// Observations recorded for one thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadTrace {
    /// Identifier assigned by the instrumentation tool
    #[serde(rename = "pin-tid", default, skip_serializing_if = "Option::is_none")]
    pub native_id: Option<u64>,

    /// First timestamp at which the thread is observable
    pub start: i64,

    /// Transitions in recording order
    pub samples: Vec<Observation>,
}

impl ThreadTrace {
    pub fn new(start: i64, samples: Vec<Observation>) -> Self {
        Self {
            native_id: None,
            start,
            samples,
        }
    }

    /// Timestamp of the last observation, if any
    pub fn last_at(&self) -> Option<i64> {
        self.samples.last().map(|obs| obs.at)
    }

    /// True when the last observation is the `Finished` marker
    pub fn is_finished(&self) -> bool {
        matches!(self.samples.last(), Some(obs) if obs.state == State::Finished)
    }
}

/// Root of a loaded trace
///
/// Thread index is identity. Thread 0 is the orchestrating thread: it starts
/// first and finishes last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceDocument {
    /// Label of the time axis (e.g. "Cycles", "ms")
    pub unit: String,

    /// Nominal trace horizon; advisory only
    #[serde(default)]
    pub end: i64,

    /// Sampling period of the producer, when it sampled
    #[serde(rename = "sample-size", default, skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<u64>,

    pub threads: Vec<ThreadTrace>,
}

impl TraceDocument {
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }
}
