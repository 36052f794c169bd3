//! Bresenham occlusion test between two cells.
//!
//! Used by the visitor's guide-visibility check: a blocked cell strictly
//! between observer and target breaks line of sight.  Both endpoints are
//! excluded, so standing directly against a wall does not occlude the agent
//! itself or its target.

use tour_core::Cell;

use crate::ObstacleGrid;

/// `true` if any blocked cell lies strictly between `from` and `to` along the
/// Bresenham line.  Returns `false` for identical or adjacent cells (there
/// is nothing strictly between them).
pub fn line_blocked(grid: &ObstacleGrid, from: Cell, to: Cell) -> bool {
    let (x0, y0) = (from.x, from.y);
    let (x1, y1) = (to.x, to.y);
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x1 > x0 { 1 } else { -1 };
    let sy = if y1 > y0 { 1 } else { -1 };
    let (mut x, mut y) = (x0, y0);

    if dx > dy {
        let mut err = dx as f64 / 2.0;
        while x != x1 {
            if occludes(grid, x, y, from, to) {
                return true;
            }
            err -= dy as f64;
            if err < 0.0 {
                y += sy;
                err += dx as f64;
            }
            x += sx;
        }
    } else {
        let mut err = dy as f64 / 2.0;
        while y != y1 {
            if occludes(grid, x, y, from, to) {
                return true;
            }
            err -= dx as f64;
            if err < 0.0 {
                x += sx;
                err += dy as f64;
            }
            y += sy;
        }
    }
    false
}

#[inline]
fn occludes(grid: &ObstacleGrid, x: i32, y: i32, from: Cell, to: Cell) -> bool {
    let cell = Cell::new(x, y);
    cell != from && cell != to && grid.blocked_cell(cell)
}
