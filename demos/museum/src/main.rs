//! museum — example gallery tour for the rust_tour framework.
//!
//! One guide walks a 24×18 gallery with three exhibit groups, dwelling at
//! each while ten visitors tail it, cluster for every explanation, and rack
//! up watch time.
//! Positions land in `./output/agent_positions.csv`, final attention scores
//! in `./output/watch_times.csv`.
//!
//! Pass a path to load a floor plan JSON (`{"map": [[0,1,2,...], ...]}`)
//! instead of the built-in gallery:
//!
//! ```text
//! cargo run -p museum -- my_floor.json
//! ```

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use tour_core::{Cell, Point, SimConfig, Tick};
use tour_output::{CsvWriter, OutputWriter, TourOutputObserver};
use tour_sim::{SimBuilder, SimObserver, WorldView};
use tour_spatial::FloorPlan;

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "./output";
const PROGRESS_INTERVAL: u64 = 100;

const GUIDE_START: (f64, f64) = (4.0, 4.0);
const VISITOR_START: (f64, f64) = (2.0, 2.0);
/// The single opening in the boundary ring, next to the spawn corner.
const ENTRANCE: (i32, i32) = (2, 0);

// ── Built-in floor plan ───────────────────────────────────────────────────────

// 24 × 18 gallery as a digit grid (0 free, 1 wall, 2 exhibit): a vertical
// wall splits the upper floor, a horizontal wall fences the lower hall, and
// three exhibit groups hang in separate rooms.  The boundary ring is added
// by the sim builder, so the border rows here stay free.
const GALLERY: [&str; 18] = [
    "000000000000000000000000",
    "000000000000000000000000",
    "000000000010000000000000",
    "000000000010000000000000",
    "000000000010000002200000",
    "000000000010000000000000",
    "000000000010000000000000",
    "000000000010000000000000",
    "000002000000000000000000",
    "000000000000000000000000",
    "000000000000000000000000",
    "000000111111111000000000",
    "000000000000000000000000",
    "000000000000000000020000",
    "000000000000000000020000",
    "000000000000000000000000",
    "000000000000000000000000",
    "000000000000000000000000",
];

fn builtin_gallery() -> Result<FloorPlan> {
    let rows: Vec<Vec<u8>> = GALLERY
        .iter()
        .map(|line| line.bytes().map(|b| b - b'0').collect())
        .collect();
    FloorPlan::from_codes(&rows).context("built-in gallery is malformed")
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Wraps the CSV observer with a console heartbeat and narration log.
struct ProgressObserver<W: OutputWriter> {
    inner: TourOutputObserver<W>,
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_end(&mut self, tick: Tick) {
        if tick.0 > 0 && tick.0 % PROGRESS_INTERVAL == 0 {
            println!("  reached {tick}");
        }
    }

    fn on_narration(
        &mut self,
        tick: Tick,
        guide: tour_core::GuideId,
        pos: Point,
        began: bool,
    ) {
        let verb = if began { "starts" } else { "finishes" };
        println!("  {tick}: {guide} {verb} explaining at ({:.1}, {:.1})", pos.x, pos.y);
    }

    fn on_snapshot(&mut self, tick: Tick, world: WorldView<'_>) {
        self.inner.on_snapshot(tick, world);
    }

    fn on_sim_end(&mut self, final_tick: Tick, world: WorldView<'_>) {
        self.inner.on_sim_end(final_tick, world);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== museum — rust_tour gallery walk ===");

    let plan = match std::env::args().nth(1) {
        Some(path) => FloorPlan::from_json_file(Path::new(&path))
            .with_context(|| format!("loading floor plan {path}"))?,
        None => builtin_gallery()?,
    };
    println!(
        "floor plan: {}×{}, {} wall cells, {} exhibits",
        plan.width,
        plan.height,
        plan.walls.len(),
        plan.exhibit_centroids.len()
    );

    let config = SimConfig::default();
    let total_ticks = config.total_ticks;
    let num_visitors = config.num_visitors;

    let mut sim = SimBuilder::new(config)
        .floor_plan(&plan, Cell::new(ENTRANCE.0, ENTRANCE.1))
        .guide(Point::new(GUIDE_START.0, GUIDE_START.1))
        .visitor_start(Point::new(VISITOR_START.0, VISITOR_START.1))
        .build()
        .context("assembling the simulation")?;

    fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR)).context("opening output files")?;
    let mut observer = ProgressObserver {
        inner: TourOutputObserver::new(writer),
    };

    println!("running {total_ticks} ticks with {num_visitors} visitors…");
    let started = Instant::now();
    sim.run(&mut observer);
    let elapsed = started.elapsed();

    if let Some(e) = observer.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // ── Summary ───────────────────────────────────────────────────────────
    println!("done in {elapsed:.2?}");
    println!("guide finished in state: {}", sim.guides[0].state());
    for exhibit in &sim.exhibits {
        let total: u64 = exhibit.watch_ticks().values().sum();
        let watchers = exhibit.watch_ticks().len();
        println!(
            "  {} at ({:.1}, {:.1}): {total} watch-ticks from {watchers} visitors",
            exhibit.id, exhibit.pos.x, exhibit.pos.y
        );
    }
    println!("wrote {OUTPUT_DIR}/agent_positions.csv and {OUTPUT_DIR}/watch_times.csv");
    Ok(())
}
