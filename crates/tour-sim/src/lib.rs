//! `tour-sim` — tick loop orchestrator for the rust_tour framework.
//!
//! # Tick phases
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Guides    — step each guide's state machine; forward any
//!                 NarrationStarted signal to every visitor's
//!                 on_guide_event (the one push notification).
//!   ② Visitors  — step each visitor against a read-only view of the
//!                 world; commit its new position to the shared roster
//!                 immediately, so later visitors this tick see it.
//!   ③ Exhibits  — every exhibit counts the visitors watching it.
//! ```
//!
//! Every agent steps exactly once per tick, in a stable order (guides,
//! then visitors by id, then exhibits).  Nothing suspends or blocks, and no
//! per-tick update returns an error: path failures and rejected moves are
//! recoverable steering conditions handled inside the controllers.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tour_core::SimConfig;
//! use tour_sim::{NoopObserver, SimBuilder};
//!
//! let plan = FloorPlan::from_json_file(Path::new("museum.json"))?;
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .floor_plan(&plan, Cell::new(2, 2))
//!     .guide(Point::new(4.0, 4.0))
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, WorldView};
pub use sim::Sim;
