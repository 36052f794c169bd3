//! `tour-output` — simulation output writers for the rust_tour framework.
//!
//! Two CSV files are produced in the configured output directory:
//!
//! | File                  | Contents                                       |
//! |-----------------------|------------------------------------------------|
//! | `agent_positions.csv` | One row per agent per snapshot tick            |
//! | `watch_times.csv`     | Final per-visitor, per-exhibit attention ticks |
//!
//! The backend sits behind [`OutputWriter`] and is driven by
//! [`TourOutputObserver`], which implements `tour_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tour_output::{CsvWriter, TourOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TourOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TourOutputObserver;
pub use row::{AgentPositionRow, WatchTimeRow};
pub use writer::OutputWriter;
