use std::collections::HashSet;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::core::{Deadlock, Direction, GameState, GameStateEnvironment, Vec2};
use crate::state_graph::ReplayError;

/// Search graph over box configurations. Each node is identified by its [`UniqueNode`]; the
/// bimap hands out a stable id per node so parents can be recorded by id.
pub struct StateGraph {
    // map from unique node to node id
    pub nodes: bimap::BiMap<UniqueNode, usize>,
    pub records: Vec<NodeRecord>,
    pub closed: HashSet<usize>,
}

/// Two game states with the same boxes whose players can reach each other are the same node:
/// the player's exact cell inside its reachable region does not change which pushes are possible.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct UniqueNode {
    pub environment: GameStateEnvironment,
    pub minimum_reachable_player_position: Vec2,
}

/// Best known way of reaching a node.
#[derive(Clone, Debug)]
pub struct NodeRecord {
    /// Where the player actually stands after the last push.
    pub player: Vec2,
    pub pushes: usize,
    pub steps: usize,
    pub parent: Option<(usize, PushMove)>,
}

/// One forward push: the box at `from` is pushed to `to` by a player standing on `player_at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PushMove {
    pub from: Vec2,
    pub player_at: Vec2,
    pub to: Vec2,
}

impl PushMove {
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_vec(self.to - self.from)
    }
}

/// A successor of a game state reached by walking `travel` steps and then pushing once.
#[derive(Clone, Debug)]
pub struct PushTransition {
    pub push: PushMove,
    pub state: GameState,
    pub travel: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolveStats {
    pub minimum_pushes: usize,
    /// Player steps including the pushes themselves.
    pub path_length: usize,
    pub states_explored: usize,
    pub generated_transitions: usize,
}

impl SolveStats {
    pub fn to_human_string(&self) -> String {
        format!(
            "{} pushes, {} player steps, {} states explored, {} transitions generated.",
            self.minimum_pushes, self.path_length, self.states_explored, self.generated_transitions
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub moves: Vec<PushMove>,
    pub stats: SolveStats,
}

#[derive(Debug, PartialEq)]
pub enum SolveError {
    /// The starting configuration is already a static deadlock.
    Deadlocked(Deadlock),
    /// Every reachable configuration was explored without solving the level.
    Unsolvable(SolveStats),
    TimedOut(SolveStats),
    StateLimit(SolveStats),
    /// A solution was found but did not survive independent replay.
    ReplayFailed(ReplayError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Deadlocked(deadlock) => write!(f, "start configuration is deadlocked: {:?}", deadlock),
            SolveError::Unsolvable(stats) => write!(f, "no solution after exploring {} states", stats.states_explored),
            SolveError::TimedOut(stats) => write!(f, "solver timed out after exploring {} states", stats.states_explored),
            SolveError::StateLimit(stats) => write!(f, "solver hit its state limit at {} states", stats.states_explored),
            SolveError::ReplayFailed(err) => write!(f, "solution failed replay: {}", err),
        }
    }
}

impl std::error::Error for SolveError {}
