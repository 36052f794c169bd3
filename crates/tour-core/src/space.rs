//! Continuous positions and integer grid cells.
//!
//! Agents move in continuous 2D coordinates; obstacles live on an integer
//! cell lattice.  `Cell` is the bridge: a continuous [`Point`] rounds to the
//! nearest cell, and a cell converts back to the `Point` at its center.
//! A continuous position within 0.5 of a blocked cell's center on both axes
//! counts as being on that cell.

use std::fmt;

/// Continuous 2D position.
pub type Point = nalgebra::Vector2<f64>;

/// 2-vector (velocities, forces, gaze directions).
pub type Vec2f = nalgebra::Vector2<f64>;

/// The 8-connected neighborhood, in the fixed expansion order used by every
/// grid search in the framework.  A single canonical order keeps path shapes
/// and BFS results reproducible across runs.
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// An integer grid cell coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Snap a continuous position to its nearest cell.
    #[inline]
    pub fn from_point(p: Point) -> Self {
        Self {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
        }
    }

    /// The continuous position at this cell's center.
    #[inline]
    pub fn center(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// The cell displaced by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The 8 surrounding cells, in [`NEIGHBORS_8`] order.
    pub fn neighbors8(self) -> impl Iterator<Item = Cell> {
        NEIGHBORS_8.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Euclidean distance between cell centers (1.0 orthogonal, √2 diagonal
    /// for adjacent cells).
    #[inline]
    pub fn distance(self, other: Cell) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Chebyshev distance — the number of 8-connected steps between cells.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
