//! Error types for tour-spatial.

use thiserror::Error;

use tour_core::Cell;

/// Errors from grid queries, path search, and floor-plan loading.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The open set drained before reaching the goal.  Recoverable by
    /// contract: callers re-queue or fall back, they never abort the tick.
    #[error("no path from {from} to {to}")]
    NoPath { from: Cell, to: Cell },

    #[error("invalid floor plan: {0}")]
    Layout(String),

    #[error("floor-plan JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
