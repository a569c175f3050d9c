//! Procedural level generation.
//!
//! A level is built in stages, each of which may reject the attempt:
//!
//! * [`grid_synth`] carves a random connected wall/floor grid and shapes it for dead ends and
//!   chokepoints.
//! * [`placement`] picks target cells and the player's solved position.
//! * [`scramble`] starts from the solved configuration and applies random reverse moves (pulls),
//!   so the result is solvable by construction.
//! * The forward solver in [`crate::state_graph`] proves the scramble solvable and measures its
//!   minimum push count.
//!
//! [`PuzzleGenerator`] runs these in a retry loop bounded by an attempt count and a deadline, and
//! falls back to a hand-authored layout if nothing passes.

pub mod config;
pub mod fallback;
pub mod grid_synth;
pub mod orchestrator;
pub mod placement;
pub mod puzzle;
pub mod scramble;

pub use config::{DifficultyBand, GeneratorConfig};
pub use fallback::fallback_puzzle;
pub use orchestrator::{generate, AttemptError, GenerateError, GeneratedPuzzle, PuzzleGenerator};
pub use puzzle::{layout_signature, Puzzle, RecentLayouts};
