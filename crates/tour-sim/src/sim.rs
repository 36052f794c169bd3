//! The `Sim` struct and its tick loop.

use tour_agents::{Exhibit, Guide, GuideSignal, GuideState, Surroundings, Visitor, WatcherView};
use tour_core::{AgentRngs, Point, SimConfig, Tick};
use tour_spatial::ObstacleGrid;

use crate::{SimObserver, WorldView};

/// The main simulation runner.
///
/// Owns the read-only grid, the typed agent registries (one ordered
/// collection per agent kind, so "all visitors" iteration never needs
/// runtime type inspection), the per-visitor RNGs, and the shared position
/// roster that doubles as the spatial index visitors publish into.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, seed, speeds, …).
    pub config: SimConfig,

    /// The tick about to be processed.
    pub tick: Tick,

    /// Blocked-cell grid; immutable after construction.
    pub grid: ObstacleGrid,

    /// Guide registry, indexed by `GuideId`.
    pub guides: Vec<Guide>,

    /// Visitor registry, indexed by `VisitorId`.
    pub visitors: Vec<Visitor>,

    /// Exhibit registry, indexed by `ExhibitId`.
    pub exhibits: Vec<Exhibit>,

    /// Per-visitor deterministic RNGs, separated for the split-borrow
    /// pattern in the visitor phase.
    pub(crate) rngs: AgentRngs,

    /// Visitor positions indexed by `VisitorId` — the shared spatial index.
    /// Each visitor's entry is re-published right after it integrates, so a
    /// visitor stepping later in the same tick sees the committed move.
    pub(crate) roster: Vec<Point>,

    /// Exhibit positions in registry order, handed to the avoidance force.
    pub(crate) exhibit_positions: Vec<Point>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`, then fire
    /// `on_sim_end`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.tick < self.config.end_tick() {
            self.step_tick(observer);
        }
        observer.on_sim_end(self.tick, self.world_view());
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step_tick(observer);
        }
    }

    /// Read-only view of every registry.
    pub fn world_view(&self) -> WorldView<'_> {
        WorldView {
            guides: &self.guides,
            visitors: &self.visitors,
            exhibits: &self.exhibits,
        }
    }

    /// The shared position roster, indexed by `VisitorId`.
    pub fn roster(&self) -> &[Point] {
        &self.roster
    }

    /// `true` once every guide's tour has reached `Completed`.
    pub fn tour_completed(&self) -> bool {
        self.guides
            .iter()
            .all(|g| g.state() == GuideState::Completed)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step_tick<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.tick;
        observer.on_tick_start(now);

        self.guide_phase(now, observer);
        self.visitor_phase();
        self.exhibit_phase();

        observer.on_tick_end(now);
        if self.config.snapshot_interval_ticks > 0
            && now.0 % self.config.snapshot_interval_ticks == 0
        {
            observer.on_snapshot(now, self.world_view());
        }
        self.tick = now + 1;
    }

    /// Step every guide; broadcast narration starts to every visitor that
    /// exposes `on_guide_event`.
    fn guide_phase<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        for gi in 0..self.guides.len() {
            let signals = self.guides[gi].step(&self.grid);
            for signal in signals {
                match signal {
                    GuideSignal::NarrationStarted(pos) => {
                        observer.on_narration(now, self.guides[gi].id, pos, true);
                        for visitor in &mut self.visitors {
                            visitor.on_guide_event(pos);
                        }
                    }
                    GuideSignal::NarrationEnded(pos) => {
                        observer.on_narration(now, self.guides[gi].id, pos, false);
                    }
                }
            }
        }
    }

    /// Step every visitor against a read-only world view, re-publishing each
    /// new position into the roster as soon as it commits.
    fn visitor_phase(&mut self) {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let grid = &self.grid;
        let guides = &self.guides;
        let visitors = &mut self.visitors;
        let roster = &mut self.roster;
        let exhibits = &self.exhibit_positions;
        let rngs = &mut self.rngs;

        for (i, visitor) in visitors.iter_mut().enumerate() {
            let guide = &guides[visitor.guide.index()];
            let ctx = Surroundings {
                grid,
                guide_state: guide.state(),
                guide_pos: guide.pos,
                roster,
                exhibits,
            };
            visitor.step(&ctx, rngs.get_mut(visitor.id));
            roster[i] = visitor.pos();
        }
    }

    /// Let every exhibit count the visitors watching it this tick.
    fn exhibit_phase(&mut self) {
        let views: Vec<WatcherView> = self
            .visitors
            .iter()
            .map(|v| WatcherView {
                visitor: v.id,
                pos: v.pos(),
                gaze: v.gaze,
            })
            .collect();
        for exhibit in &mut self.exhibits {
            exhibit.observe(&views);
        }
    }
}
