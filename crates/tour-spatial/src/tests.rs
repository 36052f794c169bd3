//! Unit tests for tour-spatial.
//!
//! All tests use hand-built grids so they run without any layout file.

mod helpers {
    use crate::ObstacleGrid;

    /// An unwalled grid — bounds only.
    pub fn open_grid(width: f64, height: f64) -> ObstacleGrid {
        ObstacleGrid::new(width, height)
    }
}

// ── ObstacleGrid ─────────────────────────────────────────────────────────────

mod grid {
    use super::helpers::open_grid;
    use tour_core::{Cell, Point};

    #[test]
    fn placing_thickens_to_all_eight_neighbors() {
        let mut grid = open_grid(20.0, 20.0);
        grid.place_obstacle(Cell::new(5, 5));
        for n in Cell::new(5, 5).neighbors8() {
            assert!(grid.blocked_cell(n), "neighbor {n} not blocked");
        }
        assert!(grid.blocked_cell(Cell::new(5, 5)));
    }

    #[test]
    fn placing_is_idempotent() {
        let mut grid = open_grid(20.0, 20.0);
        grid.place_obstacle(Cell::new(5, 5));
        let count = grid.blocked_count();
        grid.place_obstacle(Cell::new(5, 5));
        assert_eq!(grid.blocked_count(), count);
    }

    #[test]
    fn soft_occupancy_uses_half_cell_box() {
        let mut grid = open_grid(20.0, 20.0);
        grid.place_obstacle(Cell::new(5, 5));
        // Thickened patch spans cells 4..=6 on both axes.
        assert!(grid.is_obstacle(Point::new(6.4, 5.0)));
        assert!(!grid.is_obstacle(Point::new(6.6, 5.0)));
        assert!(!grid.is_obstacle(Point::new(7.0, 5.0)));
        assert!(grid.is_obstacle(Point::new(4.6, 4.6)));
    }

    #[test]
    fn integer_occupancy_matches_cell_membership() {
        let mut grid = open_grid(20.0, 20.0);
        grid.place_obstacle(Cell::new(8, 3));
        for x in 0..15 {
            for y in 0..15 {
                let c = Cell::new(x, y);
                assert_eq!(grid.is_obstacle(c.center()), grid.blocked_cell(c));
            }
        }
    }

    #[test]
    fn bounds_are_half_open() {
        let grid = open_grid(10.0, 8.0);
        assert!(!grid.out_of_bounds(Point::new(0.0, 0.0)));
        assert!(!grid.out_of_bounds(Point::new(9.9, 7.9)));
        assert!(grid.out_of_bounds(Point::new(10.0, 4.0)));
        assert!(grid.out_of_bounds(Point::new(-0.1, 4.0)));
        assert!(grid.out_of_bounds(Point::new(4.0, 8.0)));
    }

    #[test]
    fn boundary_walls_every_ring_cell_except_gap() {
        let mut grid = open_grid(10.0, 10.0);
        let gap = Cell::new(0, 2);
        grid.build_boundary(gap);
        for x in 0..10 {
            assert!(grid.blocked_cell(Cell::new(x, 0)));
            assert!(grid.blocked_cell(Cell::new(x, 9)));
        }
        for y in 0..10 {
            assert!(grid.blocked_cell(Cell::new(9, y)));
            if y != 2 {
                assert!(grid.blocked_cell(Cell::new(0, y)));
            }
        }
        assert!(!grid.blocked_cell(gap));
        // Interior stays open.
        assert!(!grid.blocked_cell(Cell::new(4, 4)));
    }

    #[test]
    fn lines_rasterize_contiguously() {
        let mut grid = open_grid(20.0, 20.0);
        grid.apply_lines(&[(Cell::new(2, 2), Cell::new(8, 2))]);
        for x in 2..=8 {
            assert!(grid.blocked_cell(Cell::new(x, 2)));
        }
        grid.apply_lines(&[(Cell::new(10, 10), Cell::new(14, 14))]);
        for i in 10..=14 {
            assert!(grid.blocked_cell(Cell::new(i, i)));
        }
    }

    #[test]
    fn degenerate_line_is_single_obstacle() {
        let mut grid = open_grid(20.0, 20.0);
        grid.apply_lines(&[(Cell::new(3, 3), Cell::new(3, 3))]);
        assert!(grid.blocked_cell(Cell::new(3, 3)));
        assert!(grid.blocked_cell(Cell::new(4, 4))); // thickened
    }

    #[test]
    fn nearest_open_cell_escapes_a_wall_patch() {
        let mut grid = open_grid(20.0, 20.0);
        grid.place_obstacle(Cell::new(5, 5));
        // Standing inside the thickened patch: closest open cell is 2 away.
        let open = grid.nearest_open_cell(Point::new(5.0, 5.0));
        assert!(!grid.blocked_cell(open));
        assert_eq!(Cell::new(5, 5).chebyshev(open), 2);
        // Standing in the open: the cell itself comes back.
        assert_eq!(grid.nearest_open_cell(Point::new(1.0, 1.0)), Cell::new(1, 1));
    }
}

// ── A* ───────────────────────────────────────────────────────────────────────

mod astar {
    use super::helpers::open_grid;
    use crate::{SpatialError, find_path};
    use tour_core::{Cell, Point};

    #[test]
    fn straight_line_path_is_chebyshev_length() {
        let grid = open_grid(12.0, 12.0);
        let path = find_path(&grid, Point::new(2.0, 2.0), Point::new(7.0, 2.0), 1.0).unwrap();
        // Start cell through goal cell inclusive: Chebyshev distance + 1.
        assert_eq!(path.len(), 6);
        assert_eq!(path.waypoints()[0], Point::new(2.0, 2.0));
        assert_eq!(path.last(), Point::new(7.0, 2.0));
    }

    #[test]
    fn diagonal_path_uses_diagonal_steps() {
        let grid = open_grid(12.0, 12.0);
        let path = find_path(&grid, Point::new(2.0, 2.0), Point::new(6.0, 6.0), 1.0).unwrap();
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn consecutive_waypoints_are_eight_connected() {
        let grid = open_grid(12.0, 12.0);
        let path = find_path(&grid, Point::new(1.0, 1.0), Point::new(9.0, 4.0), 1.0).unwrap();
        for pair in path.waypoints().windows(2) {
            let a = Cell::from_point(pair[0]);
            let b = Cell::from_point(pair[1]);
            assert_eq!(a.chebyshev(b), 1);
        }
    }

    #[test]
    fn start_at_goal_is_trivial() {
        let grid = open_grid(12.0, 12.0);
        let path = find_path(&grid, Point::new(4.0, 4.0), Point::new(4.0, 4.0), 1.0).unwrap();
        assert!(path.is_trivial());
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn looser_tolerance_stops_short_of_the_goal() {
        let grid = open_grid(12.0, 12.0);
        let path = find_path(&grid, Point::new(2.0, 2.0), Point::new(7.0, 2.0), 1.5).unwrap();
        let goal = Point::new(7.0, 2.0);
        assert!((path.last() - goal).norm() < 1.5);
        assert!(path.len() <= 6);
    }

    #[test]
    fn detours_around_a_wall() {
        let mut grid = open_grid(12.0, 12.0);
        grid.apply_lines(&[(Cell::new(6, 0), Cell::new(6, 8))]);
        let path = find_path(&grid, Point::new(3.0, 5.0), Point::new(9.0, 5.0), 1.0).unwrap();
        // Longer than the straight 7-waypoint run, and never on a wall.
        assert!(path.len() > 7);
        for &wp in path.waypoints() {
            assert!(!grid.blocked_cell(Cell::from_point(wp)), "waypoint {wp} blocked");
        }
    }

    #[test]
    fn enclosed_goal_reports_no_path() {
        let mut grid = open_grid(20.0, 20.0);
        let goal = Cell::new(10, 10);
        for dx in -2..=2 {
            for dy in -2..=2 {
                if dx.max(dy) == 2 || dx.min(dy) == -2 {
                    grid.place_obstacle(goal.offset(dx, dy));
                }
            }
        }
        let result = find_path(&grid, Point::new(4.0, 10.0), goal.center(), 1.0);
        assert!(matches!(result, Err(SpatialError::NoPath { .. })));
    }

    #[test]
    fn repeated_queries_are_identical() {
        let mut grid = open_grid(16.0, 16.0);
        grid.apply_lines(&[
            (Cell::new(5, 2), Cell::new(5, 9)),
            (Cell::new(9, 6), Cell::new(13, 6)),
        ]);
        let a = find_path(&grid, Point::new(2.0, 3.0), Point::new(13.0, 12.0), 1.0).unwrap();
        let b = find_path(&grid, Point::new(2.0, 3.0), Point::new(13.0, 12.0), 1.0).unwrap();
        assert_eq!(a.waypoints(), b.waypoints());
    }
}

// ── Raycast ──────────────────────────────────────────────────────────────────

mod raycast {
    use super::helpers::open_grid;
    use crate::line_blocked;
    use tour_core::Cell;

    #[test]
    fn clear_line_is_unblocked() {
        let grid = open_grid(12.0, 12.0);
        assert!(!line_blocked(&grid, Cell::new(1, 1), Cell::new(9, 5)));
    }

    #[test]
    fn wall_between_occludes() {
        let mut grid = open_grid(12.0, 12.0);
        grid.apply_lines(&[(Cell::new(5, 0), Cell::new(5, 10))]);
        assert!(line_blocked(&grid, Cell::new(2, 4), Cell::new(9, 4)));
        // Steep line through the same wall.
        assert!(line_blocked(&grid, Cell::new(4, 0), Cell::new(7, 10)));
    }

    #[test]
    fn endpoints_never_occlude() {
        let mut grid = open_grid(12.0, 12.0);
        grid.build_boundary(Cell::new(-1, -1));
        // Looking inward from a wall cell: the wall itself is an endpoint
        // and must not count as occlusion.
        assert!(grid.blocked_cell(Cell::new(0, 5)));
        assert!(!line_blocked(&grid, Cell::new(0, 5), Cell::new(4, 5)));
        // Wall cell to wall cell along the open interior column.
        assert!(!line_blocked(&grid, Cell::new(1, 0), Cell::new(1, 11)));
    }

    #[test]
    fn adjacent_cells_have_nothing_between() {
        let mut grid = open_grid(12.0, 12.0);
        grid.place_obstacle(Cell::new(6, 6));
        assert!(!line_blocked(&grid, Cell::new(6, 6), Cell::new(6, 7)));
        assert!(!line_blocked(&grid, Cell::new(3, 3), Cell::new(3, 3)));
    }
}

// ── Floor plan ───────────────────────────────────────────────────────────────

mod layout {
    use crate::{FloorPlan, SpatialError};
    use tour_core::{Cell, Point};

    fn plan() -> FloorPlan {
        // 6 × 4: a wall column at x=2, one 2-cell exhibit, one 1-cell exhibit.
        FloorPlan::from_codes(&[
            vec![0, 0, 1, 0, 0, 0],
            vec![0, 0, 1, 0, 2, 2],
            vec![0, 0, 1, 0, 0, 0],
            vec![2, 0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn dimensions_and_walls() {
        let plan = plan();
        assert_eq!((plan.width, plan.height), (6, 4));
        assert_eq!(
            plan.walls,
            vec![Cell::new(2, 0), Cell::new(2, 1), Cell::new(2, 2)]
        );
    }

    #[test]
    fn exhibits_group_by_adjacency() {
        let plan = plan();
        assert_eq!(plan.exhibit_groups.len(), 2);
        assert_eq!(plan.exhibit_groups[0].len(), 2);
        assert_eq!(plan.exhibit_groups[1].len(), 1);
        assert_eq!(plan.exhibit_centroids[0], Point::new(4.5, 1.0));
        assert_eq!(plan.exhibit_centroids[1], Point::new(0.0, 3.0));
    }

    #[test]
    fn obstacle_lines_are_degenerate_segments() {
        let plan = plan();
        let lines = plan.obstacle_lines();
        assert_eq!(lines.len(), plan.walls.len());
        assert!(lines.iter().all(|(a, b)| a == b));
    }

    #[test]
    fn json_round_trip() {
        let plan = FloorPlan::from_json_str(r#"{"map": [[0, 1], [2, 0]]}"#).unwrap();
        assert_eq!((plan.width, plan.height), (2, 2));
        assert_eq!(plan.walls, vec![Cell::new(1, 0)]);
        assert_eq!(plan.exhibit_centroids, vec![Point::new(0.0, 1.0)]);
    }

    #[test]
    fn ragged_rows_rejected() {
        let result = FloorPlan::from_codes(&[vec![0, 0], vec![0]]);
        assert!(matches!(result, Err(SpatialError::Layout(_))));
    }

    #[test]
    fn unknown_code_rejected() {
        let result = FloorPlan::from_codes(&[vec![0, 7]]);
        assert!(matches!(result, Err(SpatialError::Layout(_))));
    }

    #[test]
    fn empty_plan_rejected() {
        assert!(matches!(
            FloorPlan::from_codes(&[]),
            Err(SpatialError::Layout(_))
        ));
    }
}
