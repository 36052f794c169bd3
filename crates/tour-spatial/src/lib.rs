//! `tour-spatial` — the shared spatial representation for the `rust_tour`
//! framework: blocked-cell grid, grid A*, line-of-sight raycast, and the
//! floor-plan loader.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`grid`]    | `ObstacleGrid` — blocked cells, bounds, occupancy queries |
//! | [`astar`]   | `Path`, `find_path` — 8-connected grid A*                 |
//! | [`raycast`] | `line_blocked` — Bresenham occlusion test                 |
//! | [`layout`]  | `FloorPlan` — cell-code grid → walls + exhibit centroids  |
//! | [`error`]   | `SpatialError`                                            |
//!
//! # Design notes
//!
//! The grid is built once at simulation start (boundary wall, rasterized
//! layout lines, optional random scatter) and is read-only afterwards, so
//! every agent can query it freely during a tick without synchronisation.

pub mod astar;
pub mod error;
pub mod grid;
pub mod layout;
pub mod raycast;

#[cfg(test)]
mod tests;

pub use astar::{Path, find_path};
pub use error::SpatialError;
pub use grid::ObstacleGrid;
pub use layout::FloorPlan;
pub use raycast::line_blocked;
