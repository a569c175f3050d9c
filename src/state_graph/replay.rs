use std::fmt;
use crate::core::{step, GameChangeType, GameState, GameUpdate, SharedGameState, UserAction, Vec2};
use crate::state_graph::PushMove;

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    /// The move does not describe a single orthogonal push.
    MalformedMove { index: usize },
    NoBoxAt { index: usize, position: Vec2 },
    /// The player cannot walk to the push position without moving a box.
    Unreachable { index: usize, position: Vec2 },
    Rejected { index: usize, reason: String },
    NotSolved,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::MalformedMove { index } => write!(f, "move {} is not a single push", index),
            ReplayError::NoBoxAt { index, position } => write!(f, "move {}: no box at {:?}", index, position),
            ReplayError::Unreachable { index, position } => {
                write!(f, "move {}: player cannot reach {:?}", index, position)
            }
            ReplayError::Rejected { index, reason } => write!(f, "move {}: {}", index, reason),
            ReplayError::NotSolved => write!(f, "all moves applied but the level is not solved"),
        }
    }
}

impl std::error::Error for ReplayError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub state: GameState,
    /// Player steps taken, pushes included.
    pub steps: usize,
}

/// Applies `moves` to `start` one player step at a time, walking the shortest box-avoiding path
/// to each push position, and checks that the level ends up solved.
pub fn replay_solution(
    shared: &SharedGameState,
    start: &GameState,
    moves: &[PushMove],
) -> Result<ReplayOutcome, ReplayError> {
    let mut game = start.clone();
    let mut steps = 0;

    for (index, push) in moves.iter().enumerate() {
        let Some(dir) = push.direction() else {
            return Err(ReplayError::MalformedMove { index });
        };
        if push.player_at != push.from - dir.to_vec() {
            return Err(ReplayError::MalformedMove { index });
        }
        if !game.environment.has_box_at(&push.from) {
            return Err(ReplayError::NoBoxAt { index, position: push.from });
        }

        let walk = shared.walk_path(&game, push.player_at)
            .ok_or(ReplayError::Unreachable { index, position: push.player_at })?;
        for walk_dir in walk.into_iter().chain(std::iter::once(dir)) {
            match step(shared, &game, UserAction::Move(walk_dir)) {
                GameUpdate::NextState(next, change) => {
                    let expected = if game.player == push.player_at {
                        GameChangeType::PlayerAndBoxMove
                    } else {
                        GameChangeType::PlayerMove
                    };
                    if change != expected {
                        return Err(ReplayError::Rejected { index, reason: format!("unexpected {:?}", change) });
                    }
                    game = next;
                    steps += 1;
                }
                GameUpdate::Error(reason) => return Err(ReplayError::Rejected { index, reason }),
            }
        }
    }

    if !shared.is_won(&game.environment) {
        return Err(ReplayError::NotSolved);
    }
    Ok(ReplayOutcome { state: game, steps })
}
