use crate::core::{GameChangeType, GameState, GameUpdate, SharedGameState, UserAction};

pub fn step(shared: &SharedGameState, game: &GameState, action: UserAction) -> GameUpdate {
    match action {
        UserAction::Move(dir) => {
            let dir = dir.to_vec();
            let next = game.player + dir;
            if !shared.is_walkable(next) {
                return GameUpdate::Error("Cannot walk into a wall".to_string());
            }

            if !game.environment.has_box_at(&next) {
                return GameUpdate::NextState(
                    GameState {
                        environment: game.environment.clone(),
                        player: next,
                    },
                    GameChangeType::PlayerMove,
                );
            }

            let beyond = next + dir;
            if !shared.is_walkable(beyond) || game.environment.has_box_at(&beyond) {
                return GameUpdate::Error("Cannot push block".to_string());
            }

            GameUpdate::NextState(
                GameState {
                    environment: game.environment.with_box_moved(&next, &beyond),
                    player: next,
                },
                GameChangeType::PlayerAndBoxMove,
            )
        }
        UserAction::Pull(dir) => {
            let dir = dir.to_vec();
            let retreat = game.player + dir;
            let pulled = game.player - dir;
            if !shared.is_walkable(retreat) || game.environment.has_box_at(&retreat) {
                return GameUpdate::Error("Cannot retreat into a wall or box".to_string());
            }
            if !game.environment.has_box_at(&pulled) {
                return GameUpdate::Error("Nothing to pull".to_string());
            }

            GameUpdate::NextState(
                GameState {
                    environment: game.environment.with_box_moved(&pulled, &game.player),
                    player: retreat,
                },
                GameChangeType::PlayerAndBoxMove,
            )
        }
    }
}
