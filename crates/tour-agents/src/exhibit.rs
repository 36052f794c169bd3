//! Exhibits — stationary displays that count visitor attention.

use rustc_hash::FxHashMap;

use tour_core::{ExhibitId, Point, Vec2f, VisitorId};

use crate::perception;

/// What an exhibit needs to know about one visitor for a tick.
#[derive(Debug, Clone, Copy)]
pub struct WatcherView {
    pub visitor: VisitorId,
    pub pos: Point,
    pub gaze: Vec2f,
}

/// A stationary exhibit accumulating per-visitor watch time.
pub struct Exhibit {
    pub id: ExhibitId,
    pub pos: Point,
    watch_ticks: FxHashMap<VisitorId, u64>,
}

impl Exhibit {
    pub fn new(id: ExhibitId, pos: Point) -> Self {
        Self {
            id,
            pos,
            watch_ticks: FxHashMap::default(),
        }
    }

    /// One tick of attention counting.
    ///
    /// Every visitor currently watching (within 2.5 units, exhibit inside
    /// the ±60° gaze cone) accrues exactly one tick.  Counters only ever
    /// grow, and by at most one per tick per visitor.
    pub fn observe(&mut self, watchers: &[WatcherView]) {
        for watcher in watchers {
            if perception::watching_exhibit(watcher.pos, watcher.gaze, self.pos) {
                *self.watch_ticks.entry(watcher.visitor).or_insert(0) += 1;
            }
        }
    }

    /// Accumulated ticks per visitor.
    pub fn watch_ticks(&self) -> &FxHashMap<VisitorId, u64> {
        &self.watch_ticks
    }

    /// Accumulated ticks for one visitor (0 if it never watched).
    pub fn ticks_for(&self, visitor: VisitorId) -> u64 {
        self.watch_ticks.get(&visitor).copied().unwrap_or(0)
    }
}
