//! Integration tests for the tick loop.

use tour_core::{Cell, Point, SimConfig, Tick};
use tour_spatial::FloorPlan;

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver, WorldView};

mod helpers {
    use super::*;

    /// 16 × 12 gallery: a dividing wall with a doorway, two exhibits.
    ///
    /// ```text
    ///   ################
    ///   #....#.........#
    ///   #....#....EE...#
    ///   #....#.........#
    ///   #..............#
    ///   #....E.........#
    ///   ...(etc)
    ///   ################
    /// ```
    pub fn gallery() -> FloorPlan {
        let mut rows = vec![vec![0u8; 16]; 12];
        // Dividing wall x=5, y=1..=3 (kept clear of the boundary ring).
        for y in 1..=3 {
            rows[y][5] = 1;
        }
        // A 2-cell exhibit on the right, a single-cell one lower left.
        rows[2][10] = 2;
        rows[2][11] = 2;
        rows[5][5] = 2;
        FloorPlan::from_codes(&rows).unwrap()
    }

    pub fn small_config(num_visitors: usize) -> SimConfig {
        SimConfig {
            total_ticks: 4_000,
            num_visitors,
            guide_dwell_ticks: 40,
            ..SimConfig::default()
        }
    }

    pub fn gallery_sim(num_visitors: usize) -> Sim {
        SimBuilder::new(small_config(num_visitors))
            .floor_plan(&gallery(), Cell::new(2, 0))
            .guide(Point::new(8.0, 8.0))
            .visitor_start(Point::new(8.0, 8.0))
            .build()
            .unwrap()
    }
}

// ── Builder validation ───────────────────────────────────────────────────────

mod builder {
    use super::*;

    #[test]
    fn missing_grid_is_a_config_error() {
        let result = SimBuilder::new(SimConfig::default()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn visitors_without_a_guide_are_rejected() {
        let result = SimBuilder::new(SimConfig::default())
            .floor_plan(&helpers::gallery(), Cell::new(2, 0))
            .build();
        assert!(matches!(result, Err(SimError::NoGuideAvailable)));
    }

    #[test]
    fn zero_visitors_need_no_guide() {
        let config = SimConfig {
            num_visitors: 0,
            ..SimConfig::default()
        };
        let sim = SimBuilder::new(config)
            .floor_plan(&helpers::gallery(), Cell::new(2, 0))
            .build()
            .unwrap();
        assert!(sim.visitors.is_empty());
        assert!(sim.guides.is_empty());
    }

    #[test]
    fn registries_line_up_with_config() {
        let sim = helpers::gallery_sim(4);
        assert_eq!(sim.visitors.len(), 4);
        assert_eq!(sim.guides.len(), 1);
        assert_eq!(sim.exhibits.len(), 2);
        assert_eq!(sim.roster().len(), 4);
        // Guide destinations default to the exhibit centroids.
        assert_eq!(sim.guides[0].destinations().len(), 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimConfig {
            visitor_base_speeds: vec![],
            ..SimConfig::default()
        };
        let result = SimBuilder::new(config)
            .floor_plan(&helpers::gallery(), Cell::new(2, 0))
            .guide(Point::new(8.0, 8.0))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn scattered_obstacles_block_cells() {
        let config = SimConfig {
            num_visitors: 0,
            ..SimConfig::default()
        };
        let sparse = SimBuilder::new(config.clone())
            .floor_plan(&helpers::gallery(), Cell::new(2, 0))
            .build()
            .unwrap();
        let cluttered = SimBuilder::new(config)
            .floor_plan(&helpers::gallery(), Cell::new(2, 0))
            .scatter_obstacles(6)
            .build()
            .unwrap();
        assert!(cluttered.grid.blocked_count() > sparse.grid.blocked_count());
    }
}

// ── Tick loop ────────────────────────────────────────────────────────────────

mod ticking {
    use super::*;

    #[test]
    fn every_tick_advances_the_clock() {
        let mut sim = helpers::gallery_sim(2);
        sim.run_ticks(25, &mut NoopObserver);
        assert_eq!(sim.tick, Tick(25));
    }

    #[test]
    fn guide_tours_the_gallery_and_completes() {
        let mut sim = helpers::gallery_sim(3);
        for _ in 0..40 {
            sim.run_ticks(100, &mut NoopObserver);
            if sim.tour_completed() {
                break;
            }
        }
        assert!(sim.tour_completed(), "guide never completed its tour");
        assert!(sim.guides[0].unvisited().is_empty());
    }

    #[test]
    fn visitors_stay_on_free_floor_throughout() {
        let mut sim = helpers::gallery_sim(5);
        for _ in 0..20 {
            sim.run_ticks(50, &mut NoopObserver);
            for visitor in &sim.visitors {
                let pos = visitor.pos();
                assert!(!sim.grid.out_of_bounds(pos), "visitor left the floor at {pos}");
                assert!(!sim.grid.is_obstacle(pos), "visitor inside a wall at {pos}");
            }
        }
    }

    #[test]
    fn roster_mirrors_visitor_positions() {
        let mut sim = helpers::gallery_sim(4);
        sim.run_ticks(120, &mut NoopObserver);
        for (i, visitor) in sim.visitors.iter().enumerate() {
            assert_eq!(sim.roster()[i], visitor.pos());
        }
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let mut a = helpers::gallery_sim(5);
        let mut b = helpers::gallery_sim(5);
        a.run_ticks(300, &mut NoopObserver);
        b.run_ticks(300, &mut NoopObserver);
        assert_eq!(a.roster(), b.roster());
        assert_eq!(a.guides[0].pos, b.guides[0].pos);
        assert_eq!(a.guides[0].state(), b.guides[0].state());
    }

    #[test]
    fn different_seeds_spawn_different_crowds() {
        let plan = helpers::gallery();
        let build = |seed: u64| {
            SimBuilder::new(SimConfig {
                seed,
                num_visitors: 6,
                ..SimConfig::default()
            })
            .floor_plan(&plan, Cell::new(2, 0))
            .guide(Point::new(8.0, 8.0))
            .build()
            .unwrap()
        };
        let a = build(1);
        let b = build(2);
        assert_ne!(a.roster(), b.roster());
    }
}

// ── Observers ────────────────────────────────────────────────────────────────

mod observers {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        ticks: u64,
        snapshots: u64,
        narrations_started: Vec<Point>,
        narrations_ended: u64,
        saw_listener: bool,
        ended: bool,
    }

    impl SimObserver for Recorder {
        fn on_tick_end(&mut self, _tick: Tick) {
            self.ticks += 1;
        }

        fn on_narration(&mut self, _tick: Tick, _guide: tour_core::GuideId, pos: Point, began: bool) {
            if began {
                self.narrations_started.push(pos);
            } else {
                self.narrations_ended += 1;
            }
        }

        fn on_snapshot(&mut self, _tick: Tick, world: WorldView<'_>) {
            self.snapshots += 1;
            if world.visitors.iter().any(|v| v.listening().is_some()) {
                self.saw_listener = true;
            }
        }

        fn on_sim_end(&mut self, _final_tick: Tick, _world: WorldView<'_>) {
            self.ended = true;
        }
    }

    #[test]
    fn snapshot_interval_is_honored() {
        let mut sim = helpers::gallery_sim(2);
        sim.config.snapshot_interval_ticks = 5;
        let mut recorder = Recorder::default();
        sim.run_ticks(20, &mut recorder);
        assert_eq!(recorder.ticks, 20);
        // Ticks 0, 5, 10, 15.
        assert_eq!(recorder.snapshots, 4);
    }

    #[test]
    fn narrations_fire_once_per_exhibit_and_reach_visitors() {
        let mut sim = helpers::gallery_sim(3);
        let mut recorder = Recorder::default();
        for _ in 0..40 {
            sim.run_ticks(100, &mut recorder);
            if sim.tour_completed() {
                break;
            }
        }
        assert!(sim.tour_completed());
        assert_eq!(recorder.narrations_started.len(), 2);
        assert_eq!(recorder.narrations_ended, 2);
        assert!(recorder.saw_listener, "no visitor ever attended a narration");
    }

    #[test]
    fn run_fires_sim_end() {
        let mut sim = helpers::gallery_sim(2);
        sim.config.total_ticks = 30;
        let mut recorder = Recorder::default();
        sim.run(&mut recorder);
        assert!(recorder.ended);
        assert_eq!(sim.tick, Tick(30));
    }
}
