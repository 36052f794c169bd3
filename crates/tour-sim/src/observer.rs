//! Simulation observer trait for progress reporting and data collection.

use tour_agents::{Exhibit, Guide, Visitor};
use tour_core::{GuideId, Point, Tick};

/// Read-only access to every agent registry — the snapshot/query surface.
///
/// Position, kind, gaze direction, and guide state are all readable through
/// this view every tick without mutating anything.
#[derive(Copy, Clone)]
pub struct WorldView<'a> {
    pub guides: &'a [Guide],
    pub visitors: &'a [Visitor],
    pub exhibits: &'a [Exhibit],
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick) {
///         if tick.0 % self.interval == 0 {
///             println!("reached {tick}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent steps.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after every agent has stepped.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called when a guide starts (`began = true`) or finishes narrating at
    /// `pos`.
    fn on_narration(&mut self, _tick: Tick, _guide: GuideId, _pos: Point, _began: bool) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`).
    fn on_snapshot(&mut self, _tick: Tick, _world: WorldView<'_>) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _world: WorldView<'_>) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
