//! Steering primitives — the shared numeric core of visitor motion.
//!
//! All forces are clamped to the body's `max_force` before they are summed;
//! the summed acceleration is applied raw and the velocity is clamped to
//! `max_speed` at integration time.  The two clamps are deliberately
//! independent: a boosted seek (×10 after a follow restart) may exceed the
//! per-primitive limit as a *sum* while each contributing primitive stays
//! bounded.

use tour_core::{Cell, Point, Vec2f};
use tour_spatial::ObstacleGrid;

/// Guard against division blow-ups at near-zero distances.
pub(crate) const EPS: f64 = 1e-6;

/// Other visitors closer than this repel through [`separation`].
pub const SEPARATION_RADIUS: f64 = 1.5;

/// Blocked cells within this distance repel through [`avoid_obstacles`].
pub const OBSTACLE_REPEL_RADIUS: f64 = 3.0;

/// Exhibits within this distance repel through [`avoid_exhibits`].
pub const EXHIBIT_REPEL_RADIUS: f64 = 1.0;

// ── Kinematics ───────────────────────────────────────────────────────────────

/// Point-mass motion state plus the limits steering must respect.
#[derive(Debug, Clone)]
pub struct Kinematics {
    pub pos: Point,
    pub velocity: Vec2f,
    pub max_speed: f64,
    pub max_force: f64,
    pub mass: f64,
}

/// What happened to a candidate move.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// The position advanced and should be re-published to the roster.
    Moved,
    /// The move would leave the floor or land on an obstacle; the agent
    /// hard-stopped (velocity zeroed, position unchanged).
    Rejected,
}

impl Kinematics {
    pub fn new(pos: Point, max_speed: f64, max_force: f64, mass: f64) -> Self {
        Self {
            pos,
            velocity: Vec2f::zeros(),
            max_speed,
            max_force,
            mass,
        }
    }

    /// Clamp a raw steering vector to this body's force limit.
    #[inline]
    pub fn limit_force(&self, steering: Vec2f) -> Vec2f {
        steering.cap_magnitude(self.max_force)
    }

    /// Desired-velocity steering toward `target`: aim at full speed, steer by
    /// the difference from the current velocity, clamped to the force limit.
    pub fn seek(&self, target: Point) -> Vec2f {
        let desired = target - self.pos;
        let norm = desired.norm();
        if norm == 0.0 {
            return Vec2f::zeros();
        }
        let desired = desired / norm * self.max_speed;
        self.limit_force(desired - self.velocity)
    }

    /// `a = F / m`, accumulated into the velocity.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2f) {
        self.velocity += force / self.mass;
    }

    /// Clamp the velocity to `max_speed` and commit the move — unless the
    /// candidate position is out of bounds or on an obstacle, in which case
    /// the move is rejected and the velocity zeroed.  No sliding.
    pub fn integrate(&mut self, grid: &ObstacleGrid) -> MoveOutcome {
        self.velocity = self.velocity.cap_magnitude(self.max_speed);
        let next = self.pos + self.velocity;
        if grid.out_of_bounds(next) || grid.is_obstacle(next) {
            self.velocity = Vec2f::zeros();
            MoveOutcome::Rejected
        } else {
            self.pos = next;
            MoveOutcome::Moved
        }
    }
}

// ── Emergent forces ──────────────────────────────────────────────────────────

/// Averaged unit repulsion from every companion within
/// [`SEPARATION_RADIUS`], clamped to the force limit.
pub fn separation(body: &Kinematics, others: impl Iterator<Item = Point>) -> Vec2f {
    let mut steering = Vec2f::zeros();
    let mut count = 0u32;
    for other in others {
        let diff = body.pos - other;
        let dist = diff.norm();
        if dist > 0.0 && dist < SEPARATION_RADIUS {
            steering += diff / dist;
            count += 1;
        }
    }
    if count > 0 {
        steering /= count as f64;
    }
    body.limit_force(steering)
}

/// Inverse-square repulsion from every blocked cell in the 7×7 neighborhood
/// around the body, clamped and then scaled ×2.5 so walls dominate the other
/// emergent forces at close range.
pub fn avoid_obstacles(body: &Kinematics, grid: &ObstacleGrid) -> Vec2f {
    let mut steering = Vec2f::zeros();
    let center = Cell::from_point(body.pos);
    for dx in -3..=3 {
        for dy in -3..=3 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let cell = center.offset(dx, dy);
            if !grid.in_bounds_cell(cell) || !grid.blocked_cell(cell) {
                continue;
            }
            let diff = body.pos - cell.center();
            let dist = diff.norm();
            if dist > 0.0 && dist < OBSTACLE_REPEL_RADIUS {
                steering += diff / (dist + EPS) * (2.0 / (dist * dist + EPS));
            }
        }
    }
    body.limit_force(steering) * 2.5
}

/// Inverse-square repulsion from every exhibit within
/// [`EXHIBIT_REPEL_RADIUS`], clamped.  Keeps visitors from walking through
/// the display they are looking at.
pub fn avoid_exhibits(body: &Kinematics, exhibits: &[Point]) -> Vec2f {
    let mut steering = Vec2f::zeros();
    for &exhibit in exhibits {
        let diff = body.pos - exhibit;
        let dist = diff.norm();
        if dist > 0.0 && dist < EXHIBIT_REPEL_RADIUS {
            steering += diff / (dist + EPS) * (1.0 / (dist * dist + EPS));
        }
    }
    body.limit_force(steering)
}

// ── Gaze ─────────────────────────────────────────────────────────────────────

/// Blend the gaze 80/20 toward the travel direction — exponential smoothing
/// rather than an instantaneous snap, so the gaze cannot flip between ticks.
/// Below 0.01 speed the gaze holds still.
pub fn smooth_gaze(gaze: &mut Vec2f, velocity: Vec2f) {
    let speed = velocity.norm();
    if speed > 0.01 {
        let blended = *gaze * 0.8 + (velocity / speed) * 0.2;
        let norm = blended.norm();
        *gaze = if norm > EPS { blended / norm } else { blended };
    }
}
