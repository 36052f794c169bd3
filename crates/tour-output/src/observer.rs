//! `TourOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tour_agents::{Exhibit, Guide, Visitor};
use tour_core::Tick;
use tour_sim::{SimObserver, WorldView};

use crate::row::{AgentPositionRow, WatchTimeRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that records agent poses each snapshot tick and the
/// final watch-time table to any [`OutputWriter`] backend.
///
/// Writer errors are stored internally because observer hooks have no return
/// value.  After `sim.run()` returns, check for them with
/// [`take_error`][Self::take_error].
pub struct TourOutputObserver<W: OutputWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TourOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

// ── Row builders ──────────────────────────────────────────────────────────────

fn guide_row(tick: Tick, guide: &Guide) -> AgentPositionRow {
    AgentPositionRow {
        tick: tick.0,
        kind: "guide",
        agent_id: guide.id.0 as u32,
        x: guide.pos.x,
        y: guide.pos.y,
        gaze_x: guide.gaze.x,
        gaze_y: guide.gaze.y,
        state: guide.state().as_str(),
    }
}

fn visitor_row(tick: Tick, visitor: &Visitor) -> AgentPositionRow {
    AgentPositionRow {
        tick: tick.0,
        kind: "visitor",
        agent_id: visitor.id.0,
        x: visitor.pos().x,
        y: visitor.pos().y,
        gaze_x: visitor.gaze.x,
        gaze_y: visitor.gaze.y,
        state: "",
    }
}

fn exhibit_row(tick: Tick, exhibit: &Exhibit) -> AgentPositionRow {
    AgentPositionRow {
        tick: tick.0,
        kind: "exhibit",
        agent_id: exhibit.id.0 as u32,
        x: exhibit.pos.x,
        y: exhibit.pos.y,
        gaze_x: 0.0,
        gaze_y: 0.0,
        state: "",
    }
}

impl<W: OutputWriter> SimObserver for TourOutputObserver<W> {
    fn on_snapshot(&mut self, tick: Tick, world: WorldView<'_>) {
        let mut rows = Vec::with_capacity(
            world.guides.len() + world.visitors.len() + world.exhibits.len(),
        );
        rows.extend(world.guides.iter().map(|g| guide_row(tick, g)));
        rows.extend(world.visitors.iter().map(|v| visitor_row(tick, v)));
        rows.extend(world.exhibits.iter().map(|e| exhibit_row(tick, e)));

        let result = self.writer.write_positions(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, world: WorldView<'_>) {
        // Rows are sorted (exhibit, visitor) so the file is deterministic
        // regardless of hash-map iteration order.
        let mut rows: Vec<WatchTimeRow> = world
            .exhibits
            .iter()
            .flat_map(|exhibit| {
                exhibit
                    .watch_ticks()
                    .iter()
                    .map(|(&visitor, &ticks)| WatchTimeRow {
                        visitor_id: visitor.0,
                        exhibit_id: exhibit.id.0 as u32,
                        watch_ticks: ticks,
                    })
            })
            .collect();
        rows.sort_by_key(|r| (r.exhibit_id, r.visitor_id));

        let result = self.writer.write_watch_times(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
