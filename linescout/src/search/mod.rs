//! The concurrent search pipeline.
//!
//! [`matcher`] finds pattern offsets within a single line, [`scanner`] turns
//! one file into a sequence of occurrences, and [`engine`] owns the fan-out:
//! one scan task per candidate file, all multiplexed into the single
//! [`OccurrenceStream`] the caller consumes.

pub mod engine;
pub mod matcher;
pub mod scanner;

pub use engine::{search, OccurrenceStream};
pub use matcher::PatternMatcher;
pub use scanner::{FileScanner, ScanStatus};
