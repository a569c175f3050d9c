use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};
use crate::core::{DeadlockRules, MAX_BOXES, MAX_GRID_DIMENSION};
use crate::state_graph::SolverConfig;

/// Everything the host can tune about generation. Ranges are inclusive and assumed sane
/// (`start <= end`); [`GeneratorConfig::clamped`] only enforces the engine's hard upper limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: RangeInclusive<usize>,
    pub height: RangeInclusive<usize>,
    pub boxes: RangeInclusive<usize>,
    /// Fraction of cells to turn into walls during synthesis.
    pub wall_density: RangeInclusive<f64>,
    /// Minimum fraction of cells that must stay floor.
    pub min_floor_ratio: f64,
    /// Obstacle clusters tried while shaping the grid for dead ends and chokepoints.
    pub shape_attempts: usize,
    pub attempts: usize,
    pub time_limit_ms: u64,
    pub scramble_steps: RangeInclusive<usize>,
    /// Probability of pulling rather than walking when both are possible.
    pub pull_bias: f64,
    pub min_pulls: usize,
    /// Scrambles whose average box-to-target matching distance is not above this are too easy.
    pub min_average_distance: f64,
    /// Approximate desired minimum push count. Defaults to three pushes per box.
    pub difficulty_hint: Option<usize>,
    /// Minimum ratio of player steps to pushes in the solution.
    pub min_path_ratio: f64,
    pub solver: SolverConfig,
    pub deadlock_rules: DeadlockRules,
    /// How many recent layout signatures are remembered to avoid immediate repeats.
    pub history: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            width: 5..=7,
            height: 5..=7,
            boxes: 2..=3,
            wall_density: 0.15..=0.3,
            min_floor_ratio: 0.5,
            shape_attempts: 24,
            attempts: 40,
            time_limit_ms: 6000,
            scramble_steps: 60..=160,
            pull_bias: 0.75,
            min_pulls: 3,
            min_average_distance: 1.0,
            difficulty_hint: None,
            min_path_ratio: 1.2,
            solver: SolverConfig::default(),
            deadlock_rules: DeadlockRules::default(),
            history: 8,
        }
    }
}

impl GeneratorConfig {
    /// Caps dimensions and box count at what the engine supports and keeps probabilities in
    /// `[0, 1]`. Lower bounds are left alone: an impossible request fails and falls back.
    pub fn clamped(&self) -> GeneratorConfig {
        let clamp_range = |range: &RangeInclusive<usize>, max: usize| {
            let end = (*range.end()).min(max);
            (*range.start()).min(end)..=end
        };
        let boxes = clamp_range(&self.boxes, MAX_BOXES);
        let boxes = (*boxes.start()).max(1)..=(*boxes.end()).max(1);
        GeneratorConfig {
            width: clamp_range(&self.width, MAX_GRID_DIMENSION),
            height: clamp_range(&self.height, MAX_GRID_DIMENSION),
            boxes,
            wall_density: self.wall_density.start().clamp(0.0, 1.0)..=self.wall_density.end().clamp(0.0, 1.0),
            min_floor_ratio: self.min_floor_ratio.clamp(0.0, 1.0),
            pull_bias: self.pull_bias.clamp(0.0, 1.0),
            attempts: self.attempts.max(1),
            solver: SolverConfig {
                rules: self.deadlock_rules,
                ..self.solver.clone()
            },
            ..self.clone()
        }
    }

    pub fn difficulty_band(&self, box_count: usize) -> DifficultyBand {
        DifficultyBand::new(box_count, self.difficulty_hint, self.min_path_ratio)
    }
}

/// Acceptable range of minimum pushes for a puzzle, plus the minimum steps-per-push ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyBand {
    pub min_pushes: usize,
    pub max_pushes: usize,
    pub min_path_ratio: f64,
}

impl DifficultyBand {
    /// `min = max(2 * boxes, hint - 2)`, `max = max(min, hint + 2 * boxes)`, where the hint
    /// defaults to three pushes per box.
    pub fn new(box_count: usize, hint: Option<usize>, min_path_ratio: f64) -> DifficultyBand {
        let hint = hint.unwrap_or(box_count * 3);
        let min_pushes = (box_count * 2).max(hint.saturating_sub(2));
        let max_pushes = min_pushes.max(hint + box_count * 2);
        DifficultyBand { min_pushes, max_pushes, min_path_ratio }
    }

    pub fn accepts(&self, pushes: usize, path_length: usize) -> bool {
        if pushes < self.min_pushes || pushes > self.max_pushes {
            return false;
        }
        path_length as f64 >= pushes as f64 * self.min_path_ratio
    }
}
