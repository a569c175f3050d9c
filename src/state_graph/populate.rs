use crate::core::{is_deadlocked, DeadlockRules, Direction, GameState, SharedGameState};
use crate::state_graph::models::{PushMove, PushTransition};

/// Every single push available from `game`, after walking to the push position without moving
/// a box. Pushes that leave the boxes in a detectable deadlock are dropped.
pub fn get_all_adjacent_nodes(
    game: &GameState,
    shared: &SharedGameState,
    rules: &DeadlockRules,
) -> Vec<PushTransition> {
    let distances = shared.player_distances(game);
    let mut transitions = Vec::new();

    for &game_box in game.environment.iter_boxes() {
        for dir in Direction::ALL {
            let offset = dir.to_vec();
            let to = game_box + offset;
            let player_at = game_box - offset;
            if !shared.is_walkable(to) || game.environment.has_box_at(&to) {
                continue;
            }
            let Some(Some(travel)) = distances.get(&player_at).copied() else {
                continue;
            };

            let environment = game.environment.with_box_moved(&game_box, &to);
            if is_deadlocked(shared, &environment, rules) {
                continue;
            }

            transitions.push(PushTransition {
                push: PushMove { from: game_box, player_at, to },
                state: GameState { environment, player: game_box },
                travel: travel as usize,
            });
        }
    }

    transitions
}
