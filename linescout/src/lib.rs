//! Concurrent, streaming literal-text search over directory trees.
//!
//! Given a non-empty search string and a root directory, linescout walks the
//! tree once, scans every eligible file on its own worker task, and streams
//! each located match back to the caller as an [`Occurrence`] carrying the
//! file path, 1-based line number, and 1-based column offset. Results arrive
//! as they are found; the caller consumes them lazily through
//! [`search::OccurrenceStream`] without waiting for the full tree to finish.
//!
//! Nothing persists between invocations: every call performs a fresh walk
//! and fresh scans.

pub mod config;
pub mod errors;
pub mod event_log;
pub mod filters;
pub mod metrics;
pub mod results;
pub mod search;
pub mod workspace;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use results::Occurrence;
pub use search::{search, OccurrenceStream};
