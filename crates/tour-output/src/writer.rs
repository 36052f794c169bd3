//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentPositionRow, OutputResult, WatchTimeRow};

/// Trait implemented by output backends (CSV today; the observer is agnostic).
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`TourOutputObserver::take_error`][crate::TourOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of agent position rows.
    fn write_positions(&mut self, rows: &[AgentPositionRow]) -> OutputResult<()>;

    /// Write the final watch-time table.
    fn write_watch_times(&mut self, rows: &[WatchTimeRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
