//! `tour-core` — foundational types for the `rust_tour` crowd-simulation
//! framework.
//!
//! This crate is a dependency of every other `tour-*` crate.  It intentionally
//! has no `tour-*` dependencies and minimal external ones (only `nalgebra`,
//! `rand`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `GuideId`, `VisitorId`, `ExhibitId`                   |
//! | [`space`]    | `Point`/`Vec2f` aliases, integer `Cell` coordinates   |
//! | [`time`]     | `Tick`                                                |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`config`]   | `SimConfig`                                           |
//! | [`error`]    | `CoreError`                                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod space;
pub mod time;


/// Re-export so downstream crates can name nalgebra types without their own
/// dependency line.
pub use nalgebra as na;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::CoreError;
pub use ids::{ExhibitId, GuideId, VisitorId};
pub use rng::{AgentRng, AgentRngs, SimRng};
pub use space::{Cell, Point, Vec2f};
pub use time::Tick;
