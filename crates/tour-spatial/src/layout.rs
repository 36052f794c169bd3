//! Floor-plan loader — cell-code grid → walls and exhibit centroids.
//!
//! # Input format
//!
//! A JSON document with a rectangular grid of cell codes:
//!
//! ```json
//! { "map": [[0, 1, 0],
//!           [0, 2, 0]] }
//! ```
//!
//! | Code | Meaning  |
//! |------|----------|
//! | 0    | free     |
//! | 1    | wall     |
//! | 2    | exhibit  |
//!
//! Rows index `y`, columns index `x`.
//!
//! # Exhibit grouping
//!
//! Adjacent exhibit cells (4-connected) form one exhibit: a display case
//! drawn as a 2×3 block is a single piece, not six.  Each component's
//! centroid becomes one exhibit position and one guide destination, in
//! row-major discovery order.
//!
//! The simulation core never sees this format — it consumes the resulting
//! obstacle-line list and centroid list only.

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::Path as FsPath;

use serde::Deserialize;

use tour_core::{Cell, Point};

use crate::SpatialError;

const CODE_FREE: u8 = 0;
const CODE_WALL: u8 = 1;
const CODE_EXHIBIT: u8 = 2;

#[derive(Deserialize)]
struct LayoutFile {
    map: Vec<Vec<u8>>,
}

/// A parsed floor plan: wall cells plus grouped exhibit cells.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    pub width: usize,
    pub height: usize,
    /// Every wall cell, row-major.
    pub walls: Vec<Cell>,
    /// 4-connected exhibit components, in discovery order.
    pub exhibit_groups: Vec<Vec<Cell>>,
    /// One centroid per group — the exhibit positions and guide destinations.
    pub exhibit_centroids: Vec<Point>,
}

impl FloorPlan {
    /// Parse from an in-memory JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SpatialError> {
        let file: LayoutFile = serde_json::from_str(json)?;
        Self::from_codes(&file.map)
    }

    /// Parse from any reader producing the JSON document.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, SpatialError> {
        let file: LayoutFile = serde_json::from_reader(reader)?;
        Self::from_codes(&file.map)
    }

    /// Parse from a JSON file on disk.
    pub fn from_json_file(path: &FsPath) -> Result<Self, SpatialError> {
        Self::from_json_reader(File::open(path)?)
    }

    /// Build a plan from a raw code grid.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Layout`] for an empty grid, ragged rows, or an
    /// unknown cell code.
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, SpatialError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(SpatialError::Layout("floor plan is empty".into()));
        }

        let mut walls = Vec::new();
        let mut exhibit = vec![vec![false; width]; height];
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SpatialError::Layout(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for (x, &code) in row.iter().enumerate() {
                match code {
                    CODE_FREE => {}
                    CODE_WALL => walls.push(Cell::new(x as i32, y as i32)),
                    CODE_EXHIBIT => exhibit[y][x] = true,
                    other => {
                        return Err(SpatialError::Layout(format!(
                            "unknown cell code {other} at ({x}, {y})"
                        )));
                    }
                }
            }
        }

        let exhibit_groups = connected_components(&exhibit, width, height);
        let exhibit_centroids = exhibit_groups
            .iter()
            .map(|group| {
                let n = group.len() as f64;
                let sum = group
                    .iter()
                    .fold(Point::new(0.0, 0.0), |acc, c| acc + c.center());
                sum / n
            })
            .collect();

        Ok(Self {
            width,
            height,
            walls,
            exhibit_groups,
            exhibit_centroids,
        })
    }

    /// Wall cells as degenerate segments, ready for
    /// [`ObstacleGrid::apply_lines`][crate::ObstacleGrid::apply_lines].
    pub fn obstacle_lines(&self) -> Vec<(Cell, Cell)> {
        self.walls.iter().map(|&c| (c, c)).collect()
    }
}

/// Row-major scan grouping 4-connected `true` cells via BFS.
fn connected_components(mask: &[Vec<bool>], width: usize, height: usize) -> Vec<Vec<Cell>> {
    let mut visited = vec![vec![false; width]; height];
    let mut groups = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if !mask[y][x] || visited[y][x] {
                continue;
            }
            let mut group = Vec::new();
            let mut queue = VecDeque::new();
            visited[y][x] = true;
            queue.push_back((x, y));
            while let Some((cx, cy)) = queue.pop_front() {
                group.push(Cell::new(cx as i32, cy as i32));
                for (nx, ny) in [
                    (cx.wrapping_sub(1), cy),
                    (cx + 1, cy),
                    (cx, cy.wrapping_sub(1)),
                    (cx, cy + 1),
                ] {
                    if nx < width && ny < height && mask[ny][nx] && !visited[ny][nx] {
                        visited[ny][nx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
            groups.push(group);
        }
    }
    groups
}
