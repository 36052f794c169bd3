//! `ObstacleGrid` — blocked integer cells over a continuous floor.
//!
//! Agents move in continuous coordinates; walls occupy integer cells.  Every
//! placed obstacle is **thickened**: its 8 neighbors are blocked too, so a
//! diagonal pair of walls can never leave a corner-to-corner gap a path
//! search could squeeze through.
//!
//! Continuous occupancy is **soft**: a position counts as "on" a blocked cell
//! only while within 0.5 of that cell's center on *both* axes.  This leaves a
//! narrow sub-cell corridor between diagonal blocked cells, rather than the
//! hard circle test that would seal it.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use tour_core::{Cell, Point};

/// The set of blocked cells plus the continuous floor bounds.
#[derive(Debug, Clone, Default)]
pub struct ObstacleGrid {
    width: f64,
    height: f64,
    blocked: FxHashSet<Cell>,
}

impl ObstacleGrid {
    /// An empty grid over `[0, width) × [0, height)`.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            blocked: FxHashSet::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of blocked cells (thickened).
    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    // ── Mutation (setup phase only) ───────────────────────────────────────

    /// Block `cell` and all 8 of its neighbors.  Idempotent.
    pub fn place_obstacle(&mut self, cell: Cell) {
        self.blocked.insert(cell);
        for n in cell.neighbors8() {
            self.blocked.insert(n);
        }
    }

    /// Block the outer ring of cells, leaving `gap` open if it lies on the
    /// ring.  The gap is the single entrance agents spawn through.
    ///
    /// Ring cells are inserted directly rather than via [`place_obstacle`]:
    /// the ring is contiguous by construction, and thickening would seal the
    /// designated gap from its neighbors.
    ///
    /// [`place_obstacle`]: ObstacleGrid::place_obstacle
    pub fn build_boundary(&mut self, gap: Cell) {
        let w = self.width as i32;
        let h = self.height as i32;
        for x in 0..w {
            for cell in [Cell::new(x, 0), Cell::new(x, h - 1)] {
                if cell != gap {
                    self.blocked.insert(cell);
                }
            }
        }
        for y in 0..h {
            for cell in [Cell::new(0, y), Cell::new(w - 1, y)] {
                if cell != gap {
                    self.blocked.insert(cell);
                }
            }
        }
    }

    /// Rasterize wall segments into blocked cells.
    ///
    /// Each segment is stepped uniformly, one sample per unit of the longer
    /// axis delta, so walls come out as continuous runs of cells rather than
    /// sparse endpoints.
    pub fn apply_lines(&mut self, lines: &[(Cell, Cell)]) {
        for &(start, end) in lines {
            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let steps = dx.abs().max(dy.abs());
            if steps == 0 {
                self.place_obstacle(start);
                continue;
            }
            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                let x = start.x as f64 + dx as f64 * t;
                let y = start.y as f64 + dy as f64 * t;
                self.place_obstacle(Cell::from_point(Point::new(x, y)));
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Exact cell-level occupancy (the integer query form).
    #[inline]
    pub fn blocked_cell(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    /// Soft continuous occupancy: `true` if some blocked cell in the 3×3
    /// patch around the rounded position has both `|Δx| < 0.5` and
    /// `|Δy| < 0.5` from `p`.
    pub fn is_obstacle(&self, p: Point) -> bool {
        let c = Cell::from_point(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let n = c.offset(dx, dy);
                if self.blocked.contains(&n)
                    && (p.x - n.x as f64).abs() < 0.5
                    && (p.y - n.y as f64).abs() < 0.5
                {
                    return true;
                }
            }
        }
        false
    }

    /// `true` if the continuous position lies outside `[0,w) × [0,h)`.
    #[inline]
    pub fn out_of_bounds(&self, p: Point) -> bool {
        p.x < 0.0 || p.x >= self.width || p.y < 0.0 || p.y >= self.height
    }

    /// Integer bounds check used by grid searches.
    #[inline]
    pub fn in_bounds_cell(&self, cell: Cell) -> bool {
        cell.x >= 0
            && (cell.x as f64) < self.width
            && cell.y >= 0
            && (cell.y as f64) < self.height
    }

    /// Breadth-first search for the closest unblocked cell, starting from the
    /// rounded position.  Falls back to the start cell itself when every
    /// reachable cell is blocked, so callers always get a usable target.
    pub fn nearest_open_cell(&self, from: Point) -> Cell {
        let start = Cell::from_point(from);
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);
        while let Some(cell) = queue.pop_front() {
            if !self.blocked_cell(cell) {
                return cell;
            }
            for n in cell.neighbors8() {
                if self.in_bounds_cell(n) && visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        start
    }
}
