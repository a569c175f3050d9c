mod graph;
mod models;
mod populate;
mod replay;
mod solve;
mod unique_node;

pub use graph::UpsertResult;
pub use models::{NodeRecord, PushMove, PushTransition, Solution, SolveError, SolveStats, StateGraph, UniqueNode};
pub use populate::get_all_adjacent_nodes;
pub use replay::{replay_solution, ReplayError, ReplayOutcome};
pub use solve::{solve, solve_until, SolverConfig};
