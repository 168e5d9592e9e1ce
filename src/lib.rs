//! Lock Trace
//!
//! Segmentation and productivity statistics for per-thread lock-state
//! traces captured by an external instrumentation tool.
//!
//! Pipeline: load a trace document, validate it (warnings only), segment
//! each thread into contiguous colored spans, then aggregate work, makespan
//! and efficiency.
//!
//! ```ignore
//! let document = lock_trace::parser::load(&bytes)?;
//! let warnings = lock_trace::validator::validate(&document);
//! let stats = lock_trace::aggregator::global_stats(&document);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
pub mod validator;
