//! Field-of-view and line-of-sight checks.
//!
//! One cosine primitive serves both consumers; occlusion is opt-in per
//! caller.  The visitor's guide-visibility check rays through the grid, the
//! exhibit's watching check does not — a visitor can admire a display case
//! through the crowd, but cannot follow a guide through a wall.

use tour_core::{Cell, Point, Vec2f};
use tour_spatial::{ObstacleGrid, line_blocked};

/// How far a visitor can see its guide.
pub const GUIDE_VIEW_DISTANCE: f64 = 5.0;

/// How far an exhibit registers attention.
pub const EXHIBIT_VIEW_DISTANCE: f64 = 2.5;

/// cos 60° — both checks use a 120° field of view.
pub const FOV_HALF_COS: f64 = 0.5;

/// Cosine of the angle between `gaze` and the direction from `observer` to
/// `target`.  `None` when either vector is degenerate (observer on top of
/// the target, or a zero gaze).
pub fn fov_cosine(observer: Point, gaze: Vec2f, target: Point) -> Option<f64> {
    let to_target = target - observer;
    let dist = to_target.norm();
    let gaze_norm = gaze.norm();
    if dist == 0.0 || gaze_norm == 0.0 {
        return None;
    }
    Some((gaze / gaze_norm).dot(&(to_target / dist)))
}

/// Can a visitor at `observer` see the guide?  Distance, field of view, and
/// grid occlusion all apply.  A near-zero gaze falls back to looking along
/// +x so a freshly spawned visitor is not blind.
pub fn guide_visible(
    grid: &ObstacleGrid,
    observer: Point,
    gaze: Vec2f,
    guide_pos: Point,
) -> bool {
    if (guide_pos - observer).norm() > GUIDE_VIEW_DISTANCE {
        return false;
    }
    let gaze = if gaze.norm() < 1e-3 {
        Vec2f::new(1.0, 0.0)
    } else {
        gaze
    };
    match fov_cosine(observer, gaze, guide_pos) {
        Some(cos) if cos >= FOV_HALF_COS => {}
        _ => return false,
    }
    !line_blocked(
        grid,
        Cell::from_point(observer),
        Cell::from_point(guide_pos),
    )
}

/// Is a visitor at `observer` watching the exhibit?  Distance and field of
/// view only — no occlusion test.  A degenerate gaze or zero separation
/// never counts as watching.
pub fn watching_exhibit(observer: Point, gaze: Vec2f, exhibit: Point) -> bool {
    if (exhibit - observer).norm() > EXHIBIT_VIEW_DISTANCE {
        return false;
    }
    matches!(fov_cosine(observer, gaze, exhibit), Some(cos) if cos > FOV_HALF_COS)
}
