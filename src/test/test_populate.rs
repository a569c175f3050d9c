#[cfg(test)]
mod test {
    use crate::core::*;
    use crate::state_graph::{get_all_adjacent_nodes, NodeRecord, PushMove, StateGraph, UniqueNode, UpsertResult};
    use crate::assert_eq_text;
    use crate::test::test_util::{assert_game_set_matches, GameTestState};

    fn v(i: i8, j: i8) -> Vec2 {
        Vec2 { i, j }
    }

    #[test]
    fn find_reachable_finds_all_reachable(){
        let level = r#"
#@ #
#  #
##$#
# .#
"#;
        let game = GameTestState::new(level);
        let reachable = game.shared.reachable_positions(&game.game_state);

        let expected_symbols = r#"
_**_
_**_
____
____
"#;
        let actual_symbols = game.render_marked(&reachable, '*', '_');
        assert_eq_text!(expected_symbols.trim_start_matches('\n'), actual_symbols.as_str());
    }

    #[test]
    fn walk_path_avoids_boxes(){
        let game = GameTestState::new(r#"
#####
#@$ #
#   #
#  .#
#####
"#);
        let path = game.shared.walk_path(&game.game_state, v(1, 3)).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(game.shared.walk_path(&game.game_state, v(1, 2)), None);
    }

    #[test]
    fn find_adjacent_nodes_skips_deadlocking_pushes(){
        let level = r#"
#####
#   #
#@$.#
#   #
#####
"#;
        let game = GameTestState::new(level);
        let transitions = get_all_adjacent_nodes(&game.game_state, &game.shared, &DeadlockRules::default());

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].push, PushMove { from: v(2, 2), player_at: v(2, 1), to: v(2, 3) });
        assert_eq!(transitions[0].travel, 0);

        let states: Vec<GameState> = transitions.into_iter().map(|t| t.state).collect();
        assert_game_set_matches(&states, &game.shared, vec![r#"
#####
#   #
# @*#
#   #
#####
"#]);
    }

    #[test]
    fn find_adjacent_nodes_finds_all_possible_actions(){
        let level = r#"
#####
#   #
#@$.#
#   #
#####
"#;
        let game = GameTestState::new(level);
        let rules = DeadlockRules { line_rule: false, pair_rule: false };
        let transitions = get_all_adjacent_nodes(&game.game_state, &game.shared, &rules);

        // the player walks around the box for every push but the one to the right
        let mut travels: Vec<usize> = transitions.iter().map(|t| t.travel).collect();
        travels.sort();
        assert_eq!(travels, vec![0, 2, 2, 4]);

        let states: Vec<GameState> = transitions.into_iter().map(|t| t.state).collect();
        let expected_moves = vec![r#"
#####
#   #
# @*#
#   #
#####
"#, r#"
#####
#   #
#$@.#
#   #
#####
"#, r#"
#####
# $ #
# @.#
#   #
#####
"#, r#"
#####
#   #
# @.#
# $ #
#####
"#];
        assert_game_set_matches(&states, &game.shared, expected_moves);
    }

    #[test]
    fn unique_node_ignores_player_position_within_region(){
        let game = GameTestState::new(r#"
#####
#@  #
# $ #
#  .#
#####
"#);
        let moved = GameState { player: v(3, 2), ..game.game_state.clone() };

        let a = UniqueNode::from_game_state(&game.game_state, &game.shared);
        let b = UniqueNode::from_game_state(&moved, &game.shared);
        assert_eq!(a, b);
        assert_eq!(a.minimum_reachable_player_position, v(1, 1));
    }

    #[test]
    fn unique_node_separates_disconnected_regions(){
        let game = GameTestState::new(r#"
#####
#@ ##
##$ #
#  .#
#####
"#);
        let other_side = GameState { player: v(3, 1), ..game.game_state.clone() };

        let a = UniqueNode::from_game_state(&game.game_state, &game.shared);
        let b = UniqueNode::from_game_state(&other_side, &game.shared);
        assert_ne!(a, b);
    }

    fn record(pushes: usize, steps: usize) -> NodeRecord {
        NodeRecord { player: v(0, 0), pushes, steps, parent: None }
    }

    #[test]
    fn upsert_keeps_the_cheaper_record(){
        let game = GameTestState::new("#@$.#");
        let node = UniqueNode::from_game_state(&game.game_state, &game.shared);
        let mut graph = StateGraph::new();

        assert_eq!(graph.upsert_state(node.clone(), record(3, 9)), UpsertResult::Inserted(0));
        assert_eq!(graph.upsert_state(node.clone(), record(3, 10)), UpsertResult::Unchanged(0));
        assert_eq!(graph.upsert_state(node.clone(), record(3, 7)), UpsertResult::Improved(0));
        assert_eq!(graph.upsert_state(node.clone(), record(2, 12)), UpsertResult::Improved(0));
        assert_eq!(graph.record(0).pushes, 2);
        assert_eq!(graph.len(), 1);

        graph.mark_closed(0);
        assert_eq!(graph.upsert_state(node, record(1, 1)), UpsertResult::Unchanged(0));
        assert_eq!(graph.record(0).pushes, 2);
    }

    #[test]
    fn path_to_returns_pushes_in_play_order(){
        let game = GameTestState::new("#@$ .#");
        let mut graph = StateGraph::new();
        let first = PushMove { from: v(0, 2), player_at: v(0, 1), to: v(0, 3) };
        let second = PushMove { from: v(0, 3), player_at: v(0, 2), to: v(0, 4) };

        let root = UniqueNode::from_game_state(&game.game_state, &game.shared);
        graph.upsert_state(root, record(0, 0));
        let middle = UniqueNode { environment: GameStateEnvironment::new(vec![v(0, 3)]), minimum_reachable_player_position: v(0, 1) };
        graph.upsert_state(middle, NodeRecord { player: v(0, 2), pushes: 1, steps: 1, parent: Some((0, first)) });
        let end = UniqueNode { environment: GameStateEnvironment::new(vec![v(0, 4)]), minimum_reachable_player_position: v(0, 1) };
        graph.upsert_state(end, NodeRecord { player: v(0, 3), pushes: 2, steps: 2, parent: Some((1, second)) });

        assert_eq!(graph.path_to(2), vec![first, second]);
        assert_eq!(graph.path_to(0), vec![]);
    }
}
