use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::clock::{Clock, Deadline};
use crate::core::{environment_matching_cost, find_deadlock, DeadlockRules, GameState, SharedGameState};
use crate::state_graph::graph::UpsertResult;
use crate::state_graph::models::{NodeRecord, PushMove, Solution, SolveError, SolveStats, StateGraph, UniqueNode};
use crate::state_graph::populate::get_all_adjacent_nodes;
use crate::state_graph::replay::replay_solution;
use crate::state_graph::ReplayError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub time_limit_ms: u64,
    /// Upper bound on expanded states, independent of time.
    pub max_states: usize,
    pub rules: DeadlockRules,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            time_limit_ms: 2000,
            max_states: 250_000,
            rules: DeadlockRules::default(),
        }
    }
}

#[derive(Eq, PartialEq)]
struct OpenEntry {
    priority: usize,
    pushes: usize,
    steps: usize,
    sequence: usize,
    id: usize,
}

// BinaryHeap is a max-heap, so every comparison is reversed except pushes: among equal
// priorities prefer the deeper node, it is closer to a goal.
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
            .then_with(|| self.pushes.cmp(&other.pushes))
            .then_with(|| other.steps.cmp(&self.steps))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first search over box configurations ordered by `pushes + matching cost`.
///
/// The matching cost never overestimates and changes by at most one per push, so the first
/// solved configuration taken from the open set has the minimum number of pushes. The found
/// solution is replayed from `start` before it is returned.
pub fn solve(
    shared: &SharedGameState,
    start: &GameState,
    config: &SolverConfig,
    clock: &dyn Clock,
) -> Result<Solution, SolveError> {
    let deadline = Deadline::after(clock, Duration::from_millis(config.time_limit_ms));
    solve_until(shared, start, config, &deadline)
}

pub fn solve_until(
    shared: &SharedGameState,
    start: &GameState,
    config: &SolverConfig,
    deadline: &Deadline,
) -> Result<Solution, SolveError> {
    assert_eq!(start.environment.box_count(), shared.total_targets(), "box and target counts must match");
    if let Some(deadlock) = find_deadlock(shared, &start.environment, &config.rules) {
        return Err(SolveError::Deadlocked(deadlock));
    }

    let mut graph = StateGraph::new();
    let mut open = BinaryHeap::new();
    let mut stats = SolveStats::default();
    let mut sequence = 0;

    let root = UniqueNode::from_game_state(start, shared);
    let root_record = NodeRecord { player: start.player, pushes: 0, steps: 0, parent: None };
    if let UpsertResult::Inserted(id) = graph.upsert_state(root, root_record) {
        open.push(OpenEntry {
            priority: environment_matching_cost(shared, &start.environment),
            pushes: 0,
            steps: 0,
            sequence,
            id,
        });
    }

    while let Some(entry) = open.pop() {
        if deadline.is_expired() {
            debug!("solver timed out after {} states", stats.states_explored);
            return Err(SolveError::TimedOut(stats));
        }

        let record = graph.record(entry.id).clone();
        if graph.is_closed(entry.id) || record.pushes != entry.pushes || record.steps != entry.steps {
            continue;
        }
        graph.mark_closed(entry.id);
        stats.states_explored += 1;

        let Some(node) = graph.get_state(entry.id) else {
            continue;
        };
        let current = GameState { environment: node.environment.clone(), player: record.player };

        if shared.is_won(&current.environment) {
            stats.minimum_pushes = record.pushes;
            stats.path_length = record.steps;
            let moves = graph.path_to(entry.id);
            return verify(shared, start, moves, stats);
        }

        if stats.states_explored >= config.max_states {
            return Err(SolveError::StateLimit(stats));
        }

        for transition in get_all_adjacent_nodes(&current, shared, &config.rules) {
            stats.generated_transitions += 1;
            let pushes = record.pushes + 1;
            let steps = record.steps + transition.travel + 1;
            let heuristic = environment_matching_cost(shared, &transition.state.environment);
            let next = UniqueNode::from_game_state(&transition.state, shared);
            let next_record = NodeRecord {
                player: transition.state.player,
                pushes,
                steps,
                parent: Some((entry.id, transition.push)),
            };

            match graph.upsert_state(next, next_record) {
                UpsertResult::Inserted(id) | UpsertResult::Improved(id) => {
                    sequence += 1;
                    open.push(OpenEntry { priority: pushes + heuristic, pushes, steps, sequence, id });
                }
                UpsertResult::Unchanged(_) => {}
            }
        }
    }

    Err(SolveError::Unsolvable(stats))
}

fn verify(
    shared: &SharedGameState,
    start: &GameState,
    moves: Vec<PushMove>,
    stats: SolveStats,
) -> Result<Solution, SolveError> {
    let outcome = replay_solution(shared, start, &moves).map_err(SolveError::ReplayFailed)?;
    if moves.len() != stats.minimum_pushes || outcome.steps != stats.path_length {
        return Err(SolveError::ReplayFailed(ReplayError::Rejected {
            index: moves.len(),
            reason: format!(
                "replayed {} pushes in {} steps, search reported {} pushes in {} steps",
                moves.len(), outcome.steps, stats.minimum_pushes, stats.path_length
            ),
        }));
    }
    Ok(Solution { moves, stats })
}
