//! Trace loading and data model.
//!
//! This module handles:
//! - Parsing raw trace JSON into the in-memory model
//! - Converting the legacy dense bit-string format
//! - Defining the trace data model

pub mod legacy;
pub mod loader;
pub mod schema;

// Re-export main types
pub use loader::{load, load_file, load_value};
pub use schema::{Observation, State, ThreadTrace, TraceDocument};
