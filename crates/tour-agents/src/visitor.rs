//! The visitor — a hybrid perception / path-following steering controller.
//!
//! Every tick a visitor either:
//!
//! - **clusters** near a non-moving guide (attraction + group cohesion +
//!   jitter), or
//! - **follows** a moving guide: straight pursuit when the guide is in view,
//!   A* waypoint-following when a wall hides it, and an escape vector when
//!   no path exists at all.
//!
//! Obstacle and exhibit avoidance are computed on every branch so collision
//! avoidance is never skipped, whatever the behavior mode.

use tour_core::{AgentRng, GuideId, Point, Vec2f, VisitorId};
use tour_spatial::{ObstacleGrid, Path, find_path};

use crate::event::Listening;
use crate::guide::GuideState;
use crate::steering::{self, EPS, Kinematics};
use crate::perception;

/// How precisely the visitor's fallback path search must land on the guide.
/// Looser than the guide's own tolerance — a visitor only needs to get close
/// enough to reacquire line of sight.
pub const GOAL_TOLERANCE: f64 = 1.5;

/// A waypoint within this radius counts as reached.
pub const ARRIVAL_THRESHOLD: f64 = 1.0;

/// Ticks stuck far from the current waypoint before it is skipped.
const STALL_TICK_LIMIT: u32 = 10;

/// Seek gain while following normally / on the tick after a follow restart.
const SEEK_GAIN: f64 = 5.0;
const SEEK_BOOST_GAIN: f64 = 10.0;

const SEPARATION_GAIN: f64 = 0.3;

/// Obstacle / exhibit avoidance contributes at half weight in the force sum
/// (it is already pre-scaled inside the primitives).
const AVOIDANCE_GAIN: f64 = 0.5;

// Clustering around a stationary guide.
const GUIDE_PULL_RADIUS: f64 = 1.0;
const GUIDE_PULL_GAIN: f64 = 0.8;
const GROUP_REPEL_RADIUS: f64 = 0.7;
const GROUP_REPEL_GAIN: f64 = 0.2;
const GROUP_ATTRACT_RADIUS: f64 = 1.5;
const GROUP_ATTRACT_GAIN: f64 = 0.1;
const JITTER: f64 = 0.1;

// ── Read-only tick context ───────────────────────────────────────────────────

/// Everything a visitor reads about the rest of the world during one tick.
///
/// `guide_state`/`guide_pos` are copied out of the guide registry before the
/// visitor phase, and `roster` is the shared position index each visitor
/// writes back into after integrating — so handing this view out never
/// conflicts with the visitor being stepped.
pub struct Surroundings<'a> {
    pub grid: &'a ObstacleGrid,
    pub guide_state: GuideState,
    pub guide_pos: Point,
    /// Positions of every visitor, indexed by `VisitorId`.  The stepping
    /// visitor skips its own entry.
    pub roster: &'a [Point],
    pub exhibits: &'a [Point],
}

// ── Path-following state ─────────────────────────────────────────────────────

/// The cached fallback path plus its cursor and stall bookkeeping.  Dropped
/// whole whenever the guide departs or the path's destination moves.
struct Following {
    path: Path,
    cursor: usize,
    stall_ticks: u32,
}

// ── Visitor ──────────────────────────────────────────────────────────────────

/// A tour visitor.  Holds a non-owning handle to its guide; the tick loop
/// resolves the handle against the guide registry each tick.
pub struct Visitor {
    pub id: VisitorId,
    pub guide: GuideId,
    pub body: Kinematics,
    pub gaze: Vec2f,
    following: Option<Following>,
    last_guide_state: Option<GuideState>,
    just_started_following: bool,
    listening: Option<Listening>,
}

impl Visitor {
    pub fn new(
        id: VisitorId,
        guide: GuideId,
        pos: Point,
        max_speed: f64,
        max_force: f64,
        mass: f64,
    ) -> Self {
        Self {
            id,
            guide,
            body: Kinematics::new(pos, max_speed, max_force, mass),
            gaze: Vec2f::new(1.0, 0.0),
            following: None,
            last_guide_state: None,
            just_started_following: false,
            listening: None,
        }
    }

    // ── Read-only surface ─────────────────────────────────────────────────

    #[inline]
    pub fn pos(&self) -> Point {
        self.body.pos
    }

    #[inline]
    pub fn velocity(&self) -> Vec2f {
        self.body.velocity
    }

    /// The cached fallback path, if the visitor is waypoint-following.
    pub fn path(&self) -> Option<&Path> {
        self.following.as_ref().map(|f| &f.path)
    }

    /// The waypoint currently being approached, if any.
    pub fn current_waypoint(&self) -> Option<Point> {
        self.following.as_ref().and_then(|f| f.path.get(f.cursor))
    }

    /// The narration this visitor is attending, if any.
    pub fn listening(&self) -> Option<&Listening> {
        self.listening.as_ref()
    }

    // ── Notifications ─────────────────────────────────────────────────────

    /// Push notification from the guide: an explanation began at `pos`.
    pub fn on_guide_event(&mut self, pos: Point) {
        self.listening = Some(Listening::new(pos));
    }

    // ── Per-tick entry point ──────────────────────────────────────────────

    pub fn step(&mut self, ctx: &Surroundings<'_>, rng: &mut AgentRng) {
        // A guide departure invalidates the cached path and briefly boosts
        // pursuit so the group snaps back into motion.
        if let Some(prev) = self.last_guide_state {
            if prev != ctx.guide_state && ctx.guide_state == GuideState::Moving {
                self.following = None;
                self.just_started_following = true;
                self.listening = None;
            }
        }
        self.last_guide_state = Some(ctx.guide_state);

        // Collision avoidance is computed on every branch.
        let obstacle_force = steering::avoid_obstacles(&self.body, ctx.grid);
        let exhibit_force = steering::avoid_exhibits(&self.body, ctx.exhibits);

        if ctx.guide_state != GuideState::Moving {
            self.cluster_near_guide(ctx, rng, obstacle_force, exhibit_force);
            return;
        }

        // Visible guide: pursue its live position.  Hidden guide: follow the
        // A* waypoint chain (or the escape vector when no path exists).
        let target = if perception::guide_visible(ctx.grid, self.body.pos, self.gaze, ctx.guide_pos)
        {
            ctx.guide_pos
        } else {
            self.follow_or_escape(ctx, obstacle_force, exhibit_force)
        };

        let gain = if self.just_started_following {
            self.just_started_following = false;
            SEEK_BOOST_GAIN
        } else {
            SEEK_GAIN
        };
        let seek_force = self.body.seek(target) * gain;
        let separation_force =
            steering::separation(&self.body, self.companions(ctx)) * SEPARATION_GAIN;

        let acceleration = seek_force
            + obstacle_force * AVOIDANCE_GAIN
            + separation_force
            + exhibit_force * AVOIDANCE_GAIN;
        self.body.apply_force(acceleration);
        self.body.integrate(ctx.grid);
        steering::smooth_gaze(&mut self.gaze, self.body.velocity);
    }

    // ── Clustering (guide explaining or done) ─────────────────────────────

    fn cluster_near_guide(
        &mut self,
        ctx: &Surroundings<'_>,
        rng: &mut AgentRng,
        obstacle_force: Vec2f,
        exhibit_force: Vec2f,
    ) {
        let to_guide = ctx.guide_pos - self.body.pos;
        let dist = to_guide.norm();
        let guide_force = if dist > GUIDE_PULL_RADIUS {
            to_guide / (dist + EPS) * GUIDE_PULL_GAIN
        } else {
            Vec2f::zeros()
        };

        // Pairwise cohesion: push off visitors standing too close, drift
        // toward those at conversation distance.
        let mut group_force = Vec2f::zeros();
        let me = self.id.index();
        for (i, &other) in ctx.roster.iter().enumerate() {
            if i == me {
                continue;
            }
            let diff = self.body.pos - other;
            let d = diff.norm();
            if d > 0.0 && d < GROUP_REPEL_RADIUS {
                group_force += diff / (d + EPS) * GROUP_REPEL_GAIN;
            } else if (GROUP_REPEL_RADIUS..GROUP_ATTRACT_RADIUS).contains(&d) {
                group_force -= diff / (d + EPS) * GROUP_ATTRACT_GAIN;
            }
        }

        let noise = Vec2f::new(
            rng.gen_range(-JITTER..JITTER),
            rng.gen_range(-JITTER..JITTER),
        );

        let acceleration = guide_force
            + group_force
            + noise
            + obstacle_force * AVOIDANCE_GAIN
            + exhibit_force * AVOIDANCE_GAIN;
        self.body.apply_force(acceleration);
        self.body.integrate(ctx.grid);
        steering::smooth_gaze(&mut self.gaze, self.body.velocity);
    }

    // ── Fallback path-following ───────────────────────────────────────────

    /// Search a path to the guide every tick; keep the cached path (and its
    /// cursor) while the destination endpoint is unchanged, replace it when
    /// the guide has moved on.  Returns the waypoint to steer at, or the
    /// escape target when no path exists.
    fn follow_or_escape(
        &mut self,
        ctx: &Surroundings<'_>,
        obstacle_force: Vec2f,
        exhibit_force: Vec2f,
    ) -> Point {
        match find_path(ctx.grid, self.body.pos, ctx.guide_pos, GOAL_TOLERANCE) {
            Ok(fresh) => {
                let keep = self
                    .following
                    .as_ref()
                    .is_some_and(|f| (f.path.last() - fresh.last()).norm() <= 1e-8);
                if !keep {
                    self.following = Some(Following {
                        path: fresh,
                        cursor: 0,
                        stall_ticks: 0,
                    });
                }
                self.waypoint_target()
            }
            Err(_) => self.escape_target(ctx, obstacle_force, exhibit_force),
        }
    }

    /// Advance the cursor past reached waypoints, skip a waypoint the
    /// visitor has been stuck away from for too long, and return the one to
    /// steer at.
    fn waypoint_target(&mut self) -> Point {
        let pos = self.body.pos;
        let Some(follow) = &mut self.following else {
            return pos;
        };
        let waypoints = follow.path.waypoints();

        while follow.cursor < waypoints.len() - 1
            && (pos - waypoints[follow.cursor]).norm() < ARRIVAL_THRESHOLD
        {
            follow.cursor += 1;
            follow.stall_ticks = 0;
        }

        if follow.cursor < waypoints.len() - 1
            && (pos - waypoints[follow.cursor]).norm() > ARRIVAL_THRESHOLD * 2.0
        {
            follow.stall_ticks += 1;
            if follow.stall_ticks > STALL_TICK_LIMIT {
                // The waypoint is unreachable (wedged against a corner);
                // skip it and boost pursuit of the next one.
                follow.cursor += 1;
                follow.stall_ticks = 0;
                self.just_started_following = true;
            }
        }

        waypoints[follow.cursor]
    }

    /// No graph path at all: head for the nearest open cell, biased toward
    /// the guide and pushed by doubled avoidance, so the visitor can free
    /// itself from a locally confusing obstacle pocket.
    fn escape_target(
        &self,
        ctx: &Surroundings<'_>,
        obstacle_force: Vec2f,
        exhibit_force: Vec2f,
    ) -> Point {
        let free = ctx.grid.nearest_open_cell(self.body.pos).center();
        let mut to_free = free - self.body.pos;
        let norm = to_free.norm();
        if norm > 1e-3 {
            to_free /= norm;
        }
        let mut to_guide = ctx.guide_pos - self.body.pos;
        let norm = to_guide.norm();
        if norm > 1e-3 {
            to_guide /= norm;
        }
        let avoid = obstacle_force * 2.0 + exhibit_force;
        self.body.pos + to_free * 2.0 + to_guide + avoid
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Positions of every other visitor in the roster.
    fn companions<'a>(&self, ctx: &Surroundings<'a>) -> impl Iterator<Item = Point> + 'a {
        let me = self.id.index();
        ctx.roster
            .iter()
            .enumerate()
            .filter(move |&(i, _)| i != me)
            .map(|(_, &p)| p)
    }
}
