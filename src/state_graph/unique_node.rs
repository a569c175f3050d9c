use crate::core::{GameState, SharedGameState};
use crate::state_graph::UniqueNode;

impl UniqueNode {
    pub fn from_game_state(game: &GameState, shared: &SharedGameState) -> Self {
        let min_reachable_position = shared.min_reachable_position(game);
        UniqueNode {
            environment: game.environment.clone(),
            minimum_reachable_player_position: min_reachable_position,
        }
    }
}
