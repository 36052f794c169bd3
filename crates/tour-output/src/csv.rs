//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_positions.csv`
//! - `watch_times.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentPositionRow, OutputResult, WatchTimeRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    positions: Writer<File>,
    watch_times: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut positions = Writer::from_path(dir.join("agent_positions.csv"))?;
        positions.write_record([
            "tick", "kind", "agent_id", "x", "y", "gaze_x", "gaze_y", "state",
        ])?;

        let mut watch_times = Writer::from_path(dir.join("watch_times.csv"))?;
        watch_times.write_record(["visitor_id", "exhibit_id", "watch_ticks"])?;

        Ok(Self {
            positions,
            watch_times,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_positions(&mut self, rows: &[AgentPositionRow]) -> OutputResult<()> {
        for row in rows {
            self.positions.write_record(&[
                row.tick.to_string(),
                row.kind.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.gaze_x.to_string(),
                row.gaze_y.to_string(),
                row.state.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_watch_times(&mut self, rows: &[WatchTimeRow]) -> OutputResult<()> {
        for row in rows {
            self.watch_times.write_record(&[
                row.visitor_id.to_string(),
                row.exhibit_id.to_string(),
                row.watch_ticks.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.watch_times.flush()?;
        Ok(())
    }
}
