use std::fmt;
use log::debug;
use rand::prelude::*;
use crate::core::{flood_fill, BoundedGrid, Vec2, MIN_GRID_DIMENSION};

#[derive(Debug, PartialEq)]
pub enum GridError {
    TooSmall { height: usize, width: usize },
    /// The floor-cell minimum cannot be met at these dimensions.
    FloorBudget { required: usize, available: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::TooSmall { height, width } => write!(f, "grid {}x{} is too small", height, width),
            GridError::FloorBudget { required, available } => {
                write!(f, "grid needs {} floor cells but only has {}", required, available)
            }
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Clone, Debug)]
pub struct GridParams {
    pub height: usize,
    pub width: usize,
    pub wall_density: f64,
    pub min_floor_ratio: f64,
    pub min_floor_cells: usize,
    pub shape_attempts: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridMetrics {
    /// Floor cells with exactly one floor neighbour.
    pub dead_ends: usize,
    /// Floor cells that are a straight one-wide corridor.
    pub chokepoints: usize,
}

// Obstacle clusters used while shaping, as offsets from an anchor cell.
const SHAPES: &[&[Vec2]] = &[
    &[Vec2 { i: 0, j: 0 }],
    &[Vec2 { i: 0, j: 0 }, Vec2 { i: 0, j: 1 }],
    &[Vec2 { i: 0, j: 0 }, Vec2 { i: 1, j: 0 }],
    &[Vec2 { i: 0, j: 0 }, Vec2 { i: 0, j: 1 }, Vec2 { i: 1, j: 0 }],
    &[Vec2 { i: 0, j: 0 }, Vec2 { i: 1, j: 0 }, Vec2 { i: 1, j: 1 }],
    &[Vec2 { i: 0, j: 0 }, Vec2 { i: 0, j: 1 }, Vec2 { i: 0, j: 2 }],
    &[Vec2 { i: 0, j: 0 }, Vec2 { i: 0, j: 1 }, Vec2 { i: 1, j: 0 }, Vec2 { i: 1, j: 1 }],
];

/// Builds a wall mask (`true` = wall) whose floor is one connected region of at least the
/// required size.
pub fn synthesize_grid<R: Rng + ?Sized>(params: &GridParams, rng: &mut R) -> Result<BoundedGrid<bool>, GridError> {
    if params.height < MIN_GRID_DIMENSION || params.width < MIN_GRID_DIMENSION {
        return Err(GridError::TooSmall { height: params.height, width: params.width });
    }

    let area = params.height * params.width;
    let min_floor = params.min_floor_cells.max((area as f64 * params.min_floor_ratio).ceil() as usize);
    if min_floor > area {
        return Err(GridError::FloorBudget { required: min_floor, available: area });
    }

    let mut walls = BoundedGrid::new_with_size(params.height, params.width, false);
    let wanted_walls = ((area as f64 * params.wall_density).round() as usize).min(area - min_floor);

    let mut candidates: Vec<Vec2> = walls.size().iter().collect();
    candidates.shuffle(rng);

    let mut floor = area;
    let mut placed = 0;
    for pos in candidates {
        if placed >= wanted_walls {
            break;
        }
        walls[&pos] = true;
        if floor - 1 >= min_floor && is_connected(&walls) {
            floor -= 1;
            placed += 1;
        } else {
            walls[&pos] = false;
        }
    }

    shape_for_interest(&mut walls, min_floor, params.shape_attempts, rng);
    debug!(
        "synthesized {}x{} grid with {} walls, metrics {:?}",
        params.height, params.width, count_walls(&walls), grid_metrics(&walls)
    );
    Ok(walls)
}

/// Places obstacle clusters, keeping one only if it strictly increases the dead-end or
/// chokepoint count over the best seen so far.
fn shape_for_interest<R: Rng + ?Sized>(
    walls: &mut BoundedGrid<bool>,
    min_floor: usize,
    attempts: usize,
    rng: &mut R,
) {
    let mut best = grid_metrics(walls);
    for _ in 0..attempts {
        let floor_cells: Vec<Vec2> = floor_cells(walls);
        let (Some(&anchor), Some(&shape)) = (floor_cells.choose(rng), SHAPES.choose(rng)) else {
            return;
        };
        let cells: Vec<Vec2> = shape.iter().map(|&offset| anchor + offset).collect();
        if cells.iter().any(|pos| walls.get(pos) != Some(&false)) {
            continue;
        }
        if floor_cells.len() - cells.len() < min_floor {
            continue;
        }

        for pos in &cells {
            walls[pos] = true;
        }
        let metrics = grid_metrics(walls);
        let improves = metrics.dead_ends > best.dead_ends || metrics.chokepoints > best.chokepoints;
        if improves && is_connected(walls) {
            best = metrics;
        } else {
            for pos in &cells {
                walls[pos] = false;
            }
        }
    }
}

pub fn floor_cells(walls: &BoundedGrid<bool>) -> Vec<Vec2> {
    walls.iter().filter(|(_, is_wall)| !**is_wall).map(|(pos, _)| pos).collect()
}

fn count_walls(walls: &BoundedGrid<bool>) -> usize {
    walls.iter().filter(|(_, is_wall)| **is_wall).count()
}

/// True if every floor cell can reach every other floor cell. A grid with no floor is not
/// connected.
pub fn is_connected(walls: &BoundedGrid<bool>) -> bool {
    let floor = floor_cells(walls);
    let Some(&start) = floor.first() else {
        return false;
    };
    let reached = flood_fill(walls, start, |pos| !walls[pos]);
    floor.iter().all(|pos| reached[pos].is_some())
}

pub fn floor_neighbor_count(walls: &BoundedGrid<bool>, pos: Vec2) -> usize {
    pos.neighbors().filter(|n| walls.get(n) == Some(&false)).count()
}

pub fn is_dead_end(walls: &BoundedGrid<bool>, pos: Vec2) -> bool {
    walls.get(&pos) == Some(&false) && floor_neighbor_count(walls, pos) == 1
}

pub fn grid_metrics(walls: &BoundedGrid<bool>) -> GridMetrics {
    let is_floor = |pos: Vec2| walls.get(&pos) == Some(&false);
    let mut metrics = GridMetrics::default();
    for pos in floor_cells(walls) {
        match floor_neighbor_count(walls, pos) {
            1 => metrics.dead_ends += 1,
            2 => {
                let vertical = is_floor(pos + Vec2 { i: -1, j: 0 }) && is_floor(pos + Vec2 { i: 1, j: 0 });
                let horizontal = is_floor(pos + Vec2 { i: 0, j: -1 }) && is_floor(pos + Vec2 { i: 0, j: 1 });
                if vertical || horizontal {
                    metrics.chokepoints += 1;
                }
            }
            _ => {}
        }
    }
    metrics
}
