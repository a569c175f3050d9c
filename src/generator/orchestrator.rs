use std::fmt;
use std::time::Duration;
use log::{debug, info, warn};
use rand::prelude::*;
use crate::clock::{Clock, Deadline, SystemClock};
use crate::core::SharedGameState;
use crate::generator::config::{DifficultyBand, GeneratorConfig};
use crate::generator::fallback::fallback_puzzle;
use crate::generator::grid_synth::{synthesize_grid, GridError, GridParams};
use crate::generator::placement::{place_targets_and_player, PlacementError};
use crate::generator::puzzle::{Puzzle, RecentLayouts};
use crate::generator::scramble::{scramble, ScrambleError, ScrambleParams};
use crate::state_graph::{solve_until, Solution, SolveError};

/// Why a single generation attempt was thrown away. None of these are fatal.
#[derive(Debug, PartialEq)]
pub enum AttemptError {
    Grid(GridError),
    Placement(PlacementError),
    Scramble(ScrambleError),
    Unsolvable(SolveError),
    DifficultyMismatch { pushes: usize, path_length: usize, band: DifficultyBand },
    RepeatedLayout,
    OutOfTime,
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Grid(err) => write!(f, "grid synthesis failed: {}", err),
            AttemptError::Placement(err) => write!(f, "placement failed: {}", err),
            AttemptError::Scramble(err) => write!(f, "scramble failed: {}", err),
            AttemptError::Unsolvable(err) => write!(f, "not solvable: {}", err),
            AttemptError::DifficultyMismatch { pushes, path_length, band } => write!(
                f,
                "{} pushes in {} steps is outside {}..={} pushes with ratio {}",
                pushes, path_length, band.min_pushes, band.max_pushes, band.min_path_ratio
            ),
            AttemptError::RepeatedLayout => write!(f, "layout was produced recently"),
            AttemptError::OutOfTime => write!(f, "time budget exhausted"),
        }
    }
}

impl std::error::Error for AttemptError {}

#[derive(Debug, PartialEq)]
pub enum GenerateError {
    /// Every attempt failed, or the time budget ran out first. Holds the last attempt's error.
    Exhausted { attempts: usize, last: Option<AttemptError> },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Exhausted { attempts, last: Some(last) } => {
                write!(f, "no puzzle after {} attempts, last failure: {}", attempts, last)
            }
            GenerateError::Exhausted { attempts, last: None } => write!(f, "no puzzle after {} attempts", attempts),
        }
    }
}

impl std::error::Error for GenerateError {}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPuzzle {
    pub puzzle: Puzzle,
    /// The verified solution; absent for the fallback layout.
    pub solution: Option<Solution>,
    pub attempts: usize,
}

/// Drives grid synthesis, placement, scrambling and solving until a puzzle lands in the
/// difficulty band. Remembers recent layouts across calls.
pub struct PuzzleGenerator {
    config: GeneratorConfig,
    recent: RecentLayouts,
}

impl PuzzleGenerator {
    pub fn new(config: &GeneratorConfig) -> PuzzleGenerator {
        let config = config.clamped();
        let recent = RecentLayouts::new(config.history);
        PuzzleGenerator { config, recent }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn recent_layouts(&self) -> &RecentLayouts {
        &self.recent
    }

    /// Always returns a playable puzzle: the hand-authored fallback if the budget runs out.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, clock: &dyn Clock) -> GeneratedPuzzle {
        match self.try_generate(rng, clock) {
            Ok(generated) => generated,
            Err(GenerateError::Exhausted { attempts, last }) => {
                warn!(
                    "falling back to the static layout after {} attempts (last failure: {})",
                    attempts,
                    last.map(|err| err.to_string()).unwrap_or_else(|| "none".to_string())
                );
                GeneratedPuzzle { puzzle: fallback_puzzle(), solution: None, attempts }
            }
        }
    }

    pub fn try_generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        clock: &dyn Clock,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        let deadline = Deadline::after(clock, Duration::from_millis(self.config.time_limit_ms));
        let mut last = None;

        for attempt in 1..=self.config.attempts {
            if deadline.is_expired() {
                debug!("generation deadline reached before attempt {}", attempt);
                return Err(GenerateError::Exhausted { attempts: attempt - 1, last: Some(AttemptError::OutOfTime) });
            }

            match self.attempt(rng, &deadline) {
                Ok((puzzle, solution)) => {
                    info!(
                        "generated {}x{} puzzle with {} boxes on attempt {}: {}",
                        puzzle.height, puzzle.width, puzzle.boxes.len(), attempt, solution.stats.to_human_string()
                    );
                    self.recent.remember(&puzzle.signature);
                    return Ok(GeneratedPuzzle { puzzle, solution: Some(solution), attempts: attempt });
                }
                Err(err) => {
                    debug!("attempt {} discarded: {}", attempt, err);
                    last = Some(err);
                }
            }
        }

        Err(GenerateError::Exhausted { attempts: self.config.attempts, last })
    }

    fn attempt<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        deadline: &Deadline,
    ) -> Result<(Puzzle, Solution), AttemptError> {
        let config = &self.config;
        let height = rng.random_range(config.height.clone());
        let width = rng.random_range(config.width.clone());
        let wanted_boxes = rng.random_range(config.boxes.clone());
        let wall_density = rng.random_range(config.wall_density.clone());

        let walls = synthesize_grid(
            &GridParams {
                height,
                width,
                wall_density,
                min_floor_ratio: config.min_floor_ratio,
                min_floor_cells: wanted_boxes * 2 + 3,
                shape_attempts: config.shape_attempts,
            },
            rng,
        ).map_err(AttemptError::Grid)?;

        let placement = place_targets_and_player(&walls, wanted_boxes, rng).map_err(AttemptError::Placement)?;
        let shared = SharedGameState::new(&walls, &placement.targets);

        let scrambled = scramble(
            &shared,
            placement.anchor,
            &ScrambleParams {
                steps: config.scramble_steps.clone(),
                pull_bias: config.pull_bias,
                min_pulls: config.min_pulls,
                min_average_distance: config.min_average_distance,
                rules: config.deadlock_rules,
            },
            rng,
        ).map_err(AttemptError::Scramble)?;

        let puzzle = Puzzle::new(&shared, &scrambled.state, placement.anchor, false);
        if self.recent.contains(&puzzle.signature) {
            return Err(AttemptError::RepeatedLayout);
        }

        let solver_deadline = deadline.capped(Duration::from_millis(config.solver.time_limit_ms));
        let solution = solve_until(&shared, &scrambled.state, &config.solver, &solver_deadline)
            .map_err(|err| match err {
                SolveError::TimedOut(_) if deadline.is_expired() => AttemptError::OutOfTime,
                err => AttemptError::Unsolvable(err),
            })?;

        let band = config.difficulty_band(shared.total_targets());
        let stats = solution.stats;
        if stats.minimum_pushes == 0 || !band.accepts(stats.minimum_pushes, stats.path_length) {
            return Err(AttemptError::DifficultyMismatch {
                pushes: stats.minimum_pushes,
                path_length: stats.path_length,
                band,
            });
        }

        Ok((puzzle, solution))
    }
}

/// One-shot generation with a fresh layout history and the system clock.
pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Puzzle {
    let clock = SystemClock::new();
    PuzzleGenerator::new(config).generate(rng, &clock).puzzle
}
