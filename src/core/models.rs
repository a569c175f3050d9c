use serde::{Deserialize, Serialize};
use crate::core::GameStateEnvironment;
use crate::core::bounded_grid::BoundedGrid;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    Wall,
    Floor,
    Target,
}

impl Cell {
    pub fn is_walkable(&self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

/// Grid coordinate: `i` is the row, `j` the column. Ordering is row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub i: i8,
    pub j: i8,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A single player action. `Move` walks or pushes, `Pull` is the inverse of a push and is only
/// ever applied by the scrambler.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UserAction {
    Move(Direction),
    Pull(Direction),
}

/// The immutable part of a level: walls, floor and targets.
#[derive(Clone, Debug)]
pub struct SharedGameState {
    pub grid: BoundedGrid<Cell>,
    pub targets: Vec<Vec2>,
}

/// The mutable part of a level. Values are never mutated in place by the rules; every action
/// produces a new state.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct GameState {
    pub environment: GameStateEnvironment,
    pub player: Vec2,
}

#[derive(Debug, PartialEq)]
pub enum GameUpdate {
    NextState(GameState, GameChangeType),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameChangeType {
    PlayerMove,
    PlayerAndBoxMove,
}
