mod model_helpers;
mod models;
mod update;
mod bounded_grid;
mod consts;
mod bounds;
mod game_state_environment;
mod heuristics;

pub use models::{Cell, Direction, UserAction, SharedGameState, GameState, GameUpdate, GameChangeType, Vec2};
pub use consts::*;
pub use bounds::BoundsOriginRoot;
pub use bounded_grid::BoundedGrid;
pub use game_state_environment::GameStateEnvironment;
pub use heuristics::{
    average_matching_distance, environment_matching_cost, find_deadlock, is_deadlocked, is_winnable,
    matching_cost, Deadlock, DeadlockRules, WinnableState,
};
pub use model_helpers::flood_fill;
pub use update::step;
