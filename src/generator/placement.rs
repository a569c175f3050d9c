use std::fmt;
use rand::prelude::*;
use crate::core::{flood_fill, BoundedGrid, Direction, Vec2};
use crate::generator::grid_synth::{floor_cells, is_dead_end};

#[derive(Debug, PartialEq)]
pub enum PlacementError {
    NoTargets,
    NoAnchor,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::NoTargets => write!(f, "no floor cell can hold a target"),
            PlacementError::NoAnchor => write!(f, "no floor cell left for the player"),
        }
    }
}

impl std::error::Error for PlacementError {}

#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Sorted target cells.
    pub targets: Vec<Vec2>,
    /// Where the player stands in the solved configuration.
    pub anchor: Vec2,
}

/// A cell can receive a push along some axis if both neighbours on that axis are floor.
pub fn has_push_clearance(walls: &BoundedGrid<bool>, pos: Vec2) -> bool {
    let is_floor = |p: Vec2| walls.get(&p) == Some(&false);
    let vertical = is_floor(pos + Vec2 { i: -1, j: 0 }) && is_floor(pos + Vec2 { i: 1, j: 0 });
    let horizontal = is_floor(pos + Vec2 { i: 0, j: -1 }) && is_floor(pos + Vec2 { i: 0, j: 1 });
    vertical || horizontal
}

// Target sets drawn before settling for an anchor region with no pull.
const TARGET_DRAWS: usize = 12;

/// Chooses `box_count` targets and a player anchor. The box count is reduced if the grid does
/// not have room for that many boxes and a player.
///
/// The anchor lies in the largest floor region left once the targets are filled, so the solved
/// player is not sealed into a pocket. Target sets are redrawn until that region holds a cell
/// from which a box can be pulled off its target.
pub fn place_targets_and_player<R: Rng + ?Sized>(
    walls: &BoundedGrid<bool>,
    box_count: usize,
    rng: &mut R,
) -> Result<Placement, PlacementError> {
    let floor = floor_cells(walls);
    let box_count = box_count.min(floor.len().saturating_sub(1));
    if box_count == 0 {
        return Err(PlacementError::NoTargets);
    }

    // Prefer cells with push clearance, then anything that is not a dead end, then any floor.
    let cleared: Vec<Vec2> = floor.iter().copied().filter(|&p| has_push_clearance(walls, p)).collect();
    let open: Vec<Vec2> = floor.iter().copied().filter(|&p| !is_dead_end(walls, p)).collect();
    let candidates = [cleared, open, floor]
        .into_iter()
        .find(|tier| tier.len() >= box_count)
        .ok_or(PlacementError::NoTargets)?;

    let mut settled = None;
    for _ in 0..TARGET_DRAWS {
        let mut targets: Vec<Vec2> = candidates.choose_multiple(rng, box_count).copied().collect();
        targets.sort_unstable();

        let region = largest_free_region(walls, &targets);
        let pull_spots: Vec<Vec2> = region.iter().copied().filter(|&p| can_pull_from(walls, &targets, p)).collect();
        if let Some(&anchor) = pull_spots.choose(rng) {
            return Ok(Placement { targets, anchor });
        }

        if settled.is_none() {
            let beside_target: Vec<Vec2> = region.iter()
                .copied()
                .filter(|p| p.neighbors().any(|n| targets.contains(&n)))
                .collect();
            settled = beside_target.choose(rng)
                .or_else(|| region.choose(rng))
                .map(|&anchor| Placement { targets, anchor });
        }
    }

    settled.ok_or(PlacementError::NoAnchor)
}

/// Whether a player standing on `pos` in the solved configuration could pull some box off its
/// target: a target on one side and free floor to retreat onto on the other.
pub fn can_pull_from(walls: &BoundedGrid<bool>, targets: &[Vec2], pos: Vec2) -> bool {
    let is_free = |p: Vec2| walls.get(&p) == Some(&false) && !targets.contains(&p);
    Direction::ALL.into_iter().any(|dir| {
        let toward = dir.to_vec();
        targets.contains(&(pos - toward)) && is_free(pos + toward)
    })
}

/// The largest connected set of floor cells that are not targets, in row-major order.
/// Ties go to the region found first.
pub fn largest_free_region(walls: &BoundedGrid<bool>, targets: &[Vec2]) -> Vec<Vec2> {
    let is_free = |p: &Vec2| walls.get(p) == Some(&false) && !targets.contains(p);
    let mut seen = BoundedGrid::new(walls.size(), false);
    let mut largest: Vec<Vec2> = Vec::new();

    for start in walls.size().iter() {
        if seen[&start] || !is_free(&start) {
            continue;
        }
        let region: Vec<Vec2> = flood_fill(walls, start, is_free)
            .iter()
            .filter(|(_, distance)| distance.is_some())
            .map(|(pos, _)| pos)
            .collect();
        for pos in &region {
            seen[pos] = true;
        }
        if region.len() > largest.len() {
            largest = region;
        }
    }
    largest
}
