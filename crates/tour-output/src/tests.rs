//! Tests for the CSV backend and the output observer.

use std::fs;

use tour_core::{Cell, Point, SimConfig};
use tour_sim::SimBuilder;
use tour_spatial::FloorPlan;

use crate::{AgentPositionRow, CsvWriter, OutputWriter, TourOutputObserver, WatchTimeRow};

fn tiny_sim() -> tour_sim::Sim {
    let plan = FloorPlan::from_codes(&[
        vec![0, 0, 0, 0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0, 2, 0, 0],
        vec![0, 0, 0, 0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0, 0, 0, 0],
    ])
    .unwrap();
    SimBuilder::new(SimConfig {
        total_ticks: 40,
        num_visitors: 2,
        guide_dwell_ticks: 10,
        ..SimConfig::default()
    })
    .floor_plan(&plan, Cell::new(1, 0))
    .guide(Point::new(2.0, 3.0))
    .visitor_start(Point::new(2.0, 3.0))
    .build()
    .unwrap()
}

#[test]
fn csv_writer_emits_headers_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = CsvWriter::new(dir.path()).unwrap();

    writer
        .write_positions(&[AgentPositionRow {
            tick: 3,
            kind: "visitor",
            agent_id: 7,
            x: 1.5,
            y: 2.5,
            gaze_x: 1.0,
            gaze_y: 0.0,
            state: "",
        }])
        .unwrap();
    writer
        .write_watch_times(&[WatchTimeRow {
            visitor_id: 7,
            exhibit_id: 0,
            watch_ticks: 12,
        }])
        .unwrap();
    writer.finish().unwrap();
    // Idempotent.
    writer.finish().unwrap();

    let positions = fs::read_to_string(dir.path().join("agent_positions.csv")).unwrap();
    let mut lines = positions.lines();
    assert_eq!(
        lines.next().unwrap(),
        "tick,kind,agent_id,x,y,gaze_x,gaze_y,state"
    );
    assert_eq!(lines.next().unwrap(), "3,visitor,7,1.5,2.5,1,0,");

    let watch = fs::read_to_string(dir.path().join("watch_times.csv")).unwrap();
    assert_eq!(watch.lines().count(), 2);
    assert!(watch.ends_with("7,0,12\n"));
}

#[test]
fn observer_records_every_agent_every_snapshot_tick() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = tiny_sim();
    let mut observer = TourOutputObserver::new(CsvWriter::new(dir.path()).unwrap());

    sim.run(&mut observer);
    assert!(observer.take_error().is_none());

    let positions = fs::read_to_string(dir.path().join("agent_positions.csv")).unwrap();
    // Header + (1 guide + 2 visitors + 1 exhibit) × 40 ticks.
    assert_eq!(positions.lines().count(), 1 + 4 * 40);
    assert!(positions.contains(",guide,"));
    assert!(positions.contains(",visitor,"));
    assert!(positions.contains(",exhibit,"));

    // The guide column carries a live state tag on every guide row.
    let guide_rows = positions
        .lines()
        .filter(|l| l.contains(",guide,"))
        .collect::<Vec<_>>();
    assert!(guide_rows.iter().all(|l| {
        l.ends_with(",planning")
            || l.ends_with(",moving")
            || l.ends_with(",waiting")
            || l.ends_with(",completed")
    }));
}

#[test]
fn watch_times_are_written_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = tiny_sim();
    let mut observer = TourOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
    sim.run(&mut observer);
    assert!(observer.take_error().is_none());

    let watch = fs::read_to_string(dir.path().join("watch_times.csv")).unwrap();
    let keys: Vec<(u32, u32)> = watch
        .lines()
        .skip(1)
        .map(|l| {
            let mut parts = l.split(',');
            let visitor = parts.next().unwrap().parse().unwrap();
            let exhibit = parts.next().unwrap().parse().unwrap();
            (exhibit, visitor)
        })
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}
