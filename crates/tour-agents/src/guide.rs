//! The guide — a finite-state route planner walking a fixed destination list.
//!
//! ```text
//!            ┌────────────┐   path found    ┌────────┐
//!       ┌───▶│  Planning  │────────────────▶│ Moving │
//!       │    └────────────┘                 └────────┘
//!       │       │      │ already at target      │ path exhausted
//!       │       │      ▼                        ▼
//!       │       │   ┌─────────┐  dwell done  ┌─────────┐
//!       │       │   │ Waiting │◀─────────────┘         │
//!       │       │   └─────────┘                        │
//!       │       │        └────────────▶────────────────┘
//!       │       ▼ all destinations done, back at start
//!       │  ┌───────────┐
//!       └──│ Completed │  (terminal)
//!          └───────────┘
//! ```
//!
//! Destinations are consumed exactly once: chosen-nearest targets leave the
//! unvisited list when selected and only return on a failed path search, so
//! the machine always terminates in `Completed` once every destination plus
//! the return leg is done.

use tour_core::{GuideId, Point, Vec2f};
use tour_spatial::{ObstacleGrid, Path, find_path};

use crate::event::Narration;

/// How precisely the guide's path search must land on its target.
pub const GOAL_TOLERANCE: f64 = 1.0;

/// Closer than this to the start counts as "home" during planning.
const START_PROXIMITY: f64 = 0.1;

/// Exact-arrival tolerance for the silent wait at the start position.
const START_EPS: f64 = 1e-9;

/// The guide's behavior state.  Each state owns its fields: the path is only
/// consumed while `Moving`, the wait timer only runs while `Waiting`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GuideState {
    /// Picking the next destination and searching a path to it.
    Planning,
    /// Advancing along the current path at fixed speed.
    Moving,
    /// Dwelling at a destination (narrating, unless at the start position).
    Waiting,
    /// All destinations visited and returned to start.  Terminal.
    Completed,
}

impl GuideState {
    /// Lowercase tag for logs and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            GuideState::Planning => "planning",
            GuideState::Moving => "moving",
            GuideState::Waiting => "waiting",
            GuideState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for GuideState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-agent notifications a guide step can emit.  The tick loop forwards
/// `NarrationStarted` to every agent exposing `on_guide_event` — the one
/// push notification in the system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuideSignal {
    NarrationStarted(Point),
    NarrationEnded(Point),
}

/// The tour guide.
pub struct Guide {
    pub id: GuideId,
    pub pos: Point,
    /// Direction of travel; snaps instantly while moving.
    pub gaze: Vec2f,
    start_pos: Point,
    destinations: Vec<Point>,
    unvisited: Vec<Point>,
    path: Option<Path>,
    cursor: usize,
    state: GuideState,
    wait_ticks: u64,
    dwell_ticks: u64,
    speed: f64,
    narration: Option<Narration>,
}

impl Guide {
    pub fn new(
        id: GuideId,
        start: Point,
        destinations: Vec<Point>,
        speed: f64,
        dwell_ticks: u64,
    ) -> Self {
        Self {
            id,
            pos: start,
            gaze: Vec2f::new(1.0, 0.0),
            start_pos: start,
            unvisited: destinations.clone(),
            destinations,
            path: None,
            cursor: 0,
            state: GuideState::Planning,
            wait_ticks: 0,
            dwell_ticks,
            speed,
            narration: None,
        }
    }

    // ── Read-only surface ─────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> GuideState {
        self.state
    }

    /// Derived from the state enum — visitors cluster while this is true.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.state == GuideState::Waiting
    }

    /// The active explanation, if any.
    pub fn narration(&self) -> Option<&Narration> {
        self.narration.as_ref()
    }

    /// The path currently being walked (for rendering collaborators).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Index of the waypoint currently being approached.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Destinations not yet toured.
    pub fn unvisited(&self) -> &[Point] {
        &self.unvisited
    }

    /// The full destination list the tour was created with.
    pub fn destinations(&self) -> &[Point] {
        &self.destinations
    }

    pub fn start_pos(&self) -> Point {
        self.start_pos
    }

    // ── Per-tick entry point ──────────────────────────────────────────────

    /// Advance the state machine by one tick.
    pub fn step(&mut self, grid: &ObstacleGrid) -> Vec<GuideSignal> {
        match self.state {
            GuideState::Planning => {
                self.plan_next_route(grid);
                Vec::new()
            }
            GuideState::Moving => {
                self.follow_path();
                Vec::new()
            }
            GuideState::Waiting => self.dwell(),
            GuideState::Completed => Vec::new(),
        }
    }

    // ── Planning ──────────────────────────────────────────────────────────

    fn plan_next_route(&mut self, grid: &ObstacleGrid) {
        let target = if self.unvisited.is_empty() {
            if (self.pos - self.start_pos).norm() > START_PROXIMITY {
                self.start_pos
            } else {
                self.state = GuideState::Completed;
                return;
            }
        } else {
            // Nearest unvisited destination; ties go to the earliest entry.
            let mut nearest = 0;
            let mut nearest_dist = (self.pos - self.unvisited[0]).norm();
            for (i, &dest) in self.unvisited.iter().enumerate().skip(1) {
                let dist = (self.pos - dest).norm();
                if dist < nearest_dist {
                    nearest = i;
                    nearest_dist = dist;
                }
            }
            self.unvisited.remove(nearest)
        };

        match find_path(grid, self.pos, target, GOAL_TOLERANCE) {
            Ok(path) if !path.is_trivial() => {
                self.path = Some(path);
                self.cursor = 0;
                self.state = GuideState::Moving;
            }
            // Already at (or next to) the target: dwell immediately.
            Ok(_) => self.state = GuideState::Waiting,
            Err(_) => {
                // Recoverable: requeue the destination and retry next tick.
                if target != self.start_pos {
                    self.unvisited.push(target);
                }
            }
        }
    }

    // ── Moving ────────────────────────────────────────────────────────────

    fn follow_path(&mut self) {
        let Some(path) = &self.path else {
            self.state = GuideState::Waiting;
            return;
        };
        let Some(waypoint) = path.get(self.cursor) else {
            self.state = GuideState::Waiting;
            return;
        };

        let direction = waypoint - self.pos;
        let dist = direction.norm();
        if dist > 0.0 {
            self.gaze = direction / dist;
        }
        if dist > self.speed {
            self.pos += self.gaze * self.speed;
        } else {
            // Close enough to snap onto the waypoint this tick.
            self.pos = waypoint;
            self.cursor += 1;
        }

        if self.cursor >= path.len() {
            self.state = GuideState::Waiting;
        }
    }

    // ── Waiting ───────────────────────────────────────────────────────────

    fn dwell(&mut self) -> Vec<GuideSignal> {
        let mut signals = Vec::new();

        // Arrivals back at the start are silent: the timer runs, nothing is
        // narrated and nobody is notified.
        if (self.pos - self.start_pos).norm() < START_EPS {
            self.wait_ticks += 1;
            if self.wait_ticks >= self.dwell_ticks {
                self.wait_ticks = 0;
                self.state = GuideState::Planning;
            }
            return signals;
        }

        if self.narration.is_none() {
            self.narration = Some(Narration::new(self.pos));
            signals.push(GuideSignal::NarrationStarted(self.pos));
        }
        self.wait_ticks += 1;
        if self.wait_ticks >= self.dwell_ticks {
            self.wait_ticks = 0;
            if let Some(narration) = self.narration.take() {
                signals.push(GuideSignal::NarrationEnded(narration.pos));
            }
            self.state = GuideState::Planning;
        }
        signals
    }
}
