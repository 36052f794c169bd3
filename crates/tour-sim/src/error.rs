//! Error types for tour-sim.
//!
//! These cover construction only.  Per-tick agent updates return no
//! `Result`: a failed path search or a rejected move is recoverable inside
//! the controller, so nothing can escape a tick and halt the other agents.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Visitors were requested but no guide exists to assign them to.
    /// Fatal at initialization only — it can never occur mid-simulation.
    #[error("no guide available for visitor assignment")]
    NoGuideAvailable,

    #[error("simulation configuration error: {0}")]
    Config(String),
}

pub type SimResult<T> = Result<T, SimError>;
