//! Configuration and constants for the engine and CLI.

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Default path for the JSON report written by `analyze`
pub const DEFAULT_REPORT_PATH: &str = "report.json";

/// Width of the horizontal rules in the text summary
pub const SUMMARY_RULE_WIDTH: usize = 60;

// Keys of the obsolete dense bit-string format. Any of them at the top level
// routes the document through the legacy adapter.
pub const LEGACY_MAIN_KEY: &str = "MAIN";
pub const LEGACY_THREADS_KEY: &str = "THREADS";
pub const LEGACY_END_KEY: &str = "END";

/// Start offset marking a legacy thread slot that was never used
pub const LEGACY_UNUSED_SLOT: i64 = -1;

/// The dense format always counted cycles
pub const LEGACY_UNIT: &str = "cycles";
