//! 8-connected grid A*.
//!
//! Both the guide's route planner and the visitors' fallback follower call
//! [`find_path`] with their own goal tolerance (1.0 and 1.5 respectively —
//! the tolerance decides how precisely the searcher must land on the goal,
//! so it is a parameter, not a constant).
//!
//! # Determinism
//!
//! The open set is a binary heap ordered by f-score with a monotone
//! insertion sequence as the secondary key, so ties always resolve in
//! insertion order and the same query returns the same path on every run.
//! Improved entries for an already-queued cell are simply pushed again; the
//! stale duplicate is discarded when popped (its recorded g-score no longer
//! matches the best known one).  This keeps the queue bounded without an
//! explicit decrease-key.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use tour_core::{Cell, Point};

use crate::{ObstacleGrid, SpatialError};

// ── Path ─────────────────────────────────────────────────────────────────────

/// An ordered sequence of continuous waypoints, start cell through goal cell
/// inclusive.  Consecutive waypoints are 8-connected grid steps.
///
/// A path is owned by the agent that requested it; agents advance a cursor
/// over it and re-plan by requesting a fresh path, never by editing this one.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Point>,
}

impl Path {
    /// All waypoints, oldest to newest.
    #[inline]
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// `true` when the path has no travel in it — the searcher started
    /// already within tolerance of the goal.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.waypoints.len() <= 1
    }

    /// The waypoint at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.waypoints.get(index).copied()
    }

    /// The final waypoint.  Every constructed path has at least one.
    #[inline]
    pub fn last(&self) -> Point {
        *self.waypoints.last().expect("paths are never empty")
    }
}

// ── Open-set entry ───────────────────────────────────────────────────────────

#[derive(Copy, Clone)]
struct OpenEntry {
    f: f64,
    g: f64,
    seq: u64,
    cell: Cell,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // f-score first; the unique insertion sequence breaks ties.
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Search ───────────────────────────────────────────────────────────────────

/// A* from `start` to `goal`, both snapped to their nearest cells.
///
/// Moves are 8-directional with Euclidean edge cost (1.0 orthogonal, √2
/// diagonal) and the Euclidean heuristic, which is admissible and consistent
/// for this metric.  The search succeeds as soon as the popped cell lies
/// strictly within `goal_tolerance` of the snapped goal.
///
/// # Errors
///
/// [`SpatialError::NoPath`] when the open set drains without reaching the
/// goal.  Callers treat this as a recoverable condition: the guide re-queues
/// the destination, visitors fall back to escape steering.
pub fn find_path(
    grid: &ObstacleGrid,
    start: Point,
    goal: Point,
    goal_tolerance: f64,
) -> Result<Path, SpatialError> {
    let start_cell = Cell::from_point(start);
    let goal_cell = Cell::from_point(goal);

    let mut open: BinaryHeap<Reverse<OpenEntry>> = BinaryHeap::new();
    let mut g_score: FxHashMap<Cell, f64> = FxHashMap::default();
    let mut came_from: FxHashMap<Cell, Cell> = FxHashMap::default();
    let mut seq: u64 = 0;

    g_score.insert(start_cell, 0.0);
    open.push(Reverse(OpenEntry {
        f: start_cell.distance(goal_cell),
        g: 0.0,
        seq,
        cell: start_cell,
    }));

    while let Some(Reverse(entry)) = open.pop() {
        let current = entry.cell;

        // Skip stale duplicates left behind by re-pushed improvements.
        let best = g_score.get(&current).copied().unwrap_or(f64::INFINITY);
        if entry.g > best {
            continue;
        }

        if current.distance(goal_cell) < goal_tolerance {
            return Ok(reconstruct(&came_from, current));
        }

        for neighbor in current.neighbors8() {
            if !grid.in_bounds_cell(neighbor) || grid.blocked_cell(neighbor) {
                continue;
            }
            let tentative = best + current.distance(neighbor);
            if tentative < g_score.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                seq += 1;
                open.push(Reverse(OpenEntry {
                    f: tentative + neighbor.distance(goal_cell),
                    g: tentative,
                    seq,
                    cell: neighbor,
                }));
            }
        }
    }

    Err(SpatialError::NoPath {
        from: start_cell,
        to: goal_cell,
    })
}

/// Walk the parent chain back to the start and emit cell centers oldest-first.
fn reconstruct(came_from: &FxHashMap<Cell, Cell>, mut current: Cell) -> Path {
    let mut cells = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        current = prev;
        cells.push(current);
    }
    cells.reverse();
    Path {
        waypoints: cells.into_iter().map(Cell::center).collect(),
    }
}
