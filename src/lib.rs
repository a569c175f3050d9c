//! Procedural generation and solvability verification for box-pushing puzzles.
//!
//! [`generator::PuzzleGenerator`] is the entry point: it returns a [`generator::Puzzle`] whose
//! initial configuration has been proven solvable by [`state_graph::solve`].

pub mod clock;
pub mod console_interface;
pub mod core;
pub mod generator;
pub mod state_graph;

#[cfg(test)]
mod test;
