//! Fluent builder for constructing a [`Sim`].

use tour_agents::{Exhibit, Guide, Visitor};
use tour_core::{
    AgentRngs, Cell, ExhibitId, GuideId, Point, SimConfig, SimRng, Tick, Vec2f, VisitorId,
};
use tour_spatial::{FloorPlan, ObstacleGrid};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — ticks, seed, visitor count, speeds, …
/// - a grid, via [`floor_plan`][Self::floor_plan] or [`grid`][Self::grid]
/// - at least one [`guide`][Self::guide] when `config.num_visitors > 0`
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default())
///     .floor_plan(&plan, Cell::new(2, 2))
///     .guide(Point::new(4.0, 4.0))
///     .visitor_start(Point::new(2.0, 2.0))
///     .build()?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    grid: Option<ObstacleGrid>,
    guide_specs: Vec<(Point, Option<Vec<Point>>)>,
    exhibit_positions: Vec<Point>,
    visitor_start: Option<Point>,
    scatter_count: usize,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            grid: None,
            guide_specs: Vec::new(),
            exhibit_positions: Vec::new(),
            visitor_start: None,
            scatter_count: 0,
        }
    }

    /// Build the grid from a floor plan: boundary ring with `gap` as the
    /// single entrance, then the plan's rasterized walls.  The plan's
    /// exhibit centroids become the exhibit registry and the default guide
    /// destination list.
    pub fn floor_plan(mut self, plan: &FloorPlan, gap: Cell) -> Self {
        let mut grid = ObstacleGrid::new(plan.width as f64, plan.height as f64);
        grid.build_boundary(gap);
        grid.apply_lines(&plan.obstacle_lines());
        self.grid = Some(grid);
        self.exhibit_positions = plan.exhibit_centroids.clone();
        self
    }

    /// Use a pre-built grid instead of a floor plan.
    pub fn grid(mut self, grid: ObstacleGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Replace the exhibit positions (and default guide destinations).
    pub fn exhibits(mut self, positions: Vec<Point>) -> Self {
        self.exhibit_positions = positions;
        self
    }

    /// Add a guide touring every exhibit, starting (and finishing) at
    /// `start`.
    pub fn guide(mut self, start: Point) -> Self {
        self.guide_specs.push((start, None));
        self
    }

    /// Add a guide with an explicit destination list.
    pub fn guide_with_destinations(mut self, start: Point, destinations: Vec<Point>) -> Self {
        self.guide_specs.push((start, Some(destinations)));
        self
    }

    /// Spawn every visitor at `pos` instead of jittered around its guide.
    pub fn visitor_start(mut self, pos: Point) -> Self {
        self.visitor_start = Some(pos);
        self
    }

    /// Scatter `count` random obstacles on free floor before agents spawn.
    /// Input preparation only — the resulting grid is as immutable as any
    /// other.
    pub fn scatter_obstacles(mut self, count: usize) -> Self {
        self.scatter_count = count;
        self
    }

    /// Validate the inputs and assemble a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;
        let config = self.config;

        let mut grid = self
            .grid
            .ok_or_else(|| SimError::Config("a grid or floor plan is required".into()))?;

        let mut rng = SimRng::new(config.seed);

        if self.scatter_count > 0 {
            scatter_obstacles(&mut grid, self.scatter_count, &mut rng);
        }

        // ── Guides ────────────────────────────────────────────────────────
        let guides: Vec<Guide> = self
            .guide_specs
            .into_iter()
            .enumerate()
            .map(|(i, (start, destinations))| {
                let destinations =
                    destinations.unwrap_or_else(|| self.exhibit_positions.clone());
                Guide::new(
                    GuideId(i as u16),
                    start,
                    destinations,
                    config.guide_speed,
                    config.guide_dwell_ticks,
                )
            })
            .collect();

        // ── Visitors ──────────────────────────────────────────────────────
        let count = config.num_visitors;
        if count > 0 && guides.is_empty() {
            return Err(SimError::NoGuideAvailable);
        }
        let guide_ids: Vec<GuideId> = guides.iter().map(|g| g.id).collect();
        let speeds = config.visitor_speeds(count, &mut rng);

        let mut visitors = Vec::with_capacity(count);
        for i in 0..count {
            let Some(&guide_id) = rng.choose(&guide_ids) else {
                return Err(SimError::NoGuideAvailable);
            };
            let pos = match self.visitor_start {
                Some(p) => p,
                None => {
                    guides[guide_id.index()].pos
                        + Vec2f::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5))
                }
            };
            visitors.push(Visitor::new(
                VisitorId(i as u32),
                guide_id,
                pos,
                speeds[i],
                config.visitor_max_force,
                config.visitor_mass,
            ));
        }

        // ── Exhibits ──────────────────────────────────────────────────────
        let exhibits: Vec<Exhibit> = self
            .exhibit_positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Exhibit::new(ExhibitId(i as u16), pos))
            .collect();

        let roster: Vec<Point> = visitors.iter().map(Visitor::pos).collect();
        let rngs = AgentRngs::new(count, config.seed);

        Ok(Sim {
            config,
            tick: Tick::ZERO,
            grid,
            guides,
            visitors,
            exhibits,
            rngs,
            roster,
            exhibit_positions: self.exhibit_positions,
        })
    }
}

/// Rejection-sample `count` obstacles onto free floor.
///
/// Attempts are bounded so a nearly full floor degrades to fewer obstacles
/// instead of spinning forever.
fn scatter_obstacles(grid: &mut ObstacleGrid, count: usize, rng: &mut SimRng) {
    let mut placed = 0;
    let mut attempts = 0;
    let max_attempts = count.saturating_mul(100).max(1_000);
    while placed < count && attempts < max_attempts {
        attempts += 1;
        let pos = Point::new(
            rng.gen_range(0.0..grid.width() - 1.0),
            rng.gen_range(0.0..grid.height() - 1.0),
        );
        if !grid.is_obstacle(pos) {
            grid.place_obstacle(Cell::from_point(pos));
            placed += 1;
        }
    }
}
