use std::fmt;
use std::ops::RangeInclusive;
use log::debug;
use rand::prelude::*;
use crate::core::{
    average_matching_distance, flood_fill, is_deadlocked, step, DeadlockRules, GameChangeType, GameState,
    GameStateEnvironment, GameUpdate, SharedGameState, UserAction, Vec2,
};

#[derive(Debug, PartialEq)]
pub enum ScrambleError {
    /// No cell on the map allows a move or a pull.
    Stagnated,
    TooFewPulls { pulls: usize },
    Deadlocked,
    TooManyOnTargets { on_targets: usize },
    TooClose { average_distance: f64 },
}

impl fmt::Display for ScrambleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrambleError::Stagnated => write!(f, "no legal move or pull anywhere"),
            ScrambleError::TooFewPulls { pulls } => write!(f, "only {} pulls succeeded", pulls),
            ScrambleError::Deadlocked => write!(f, "scrambled configuration is deadlocked"),
            ScrambleError::TooManyOnTargets { on_targets } => write!(f, "{} boxes still on targets", on_targets),
            ScrambleError::TooClose { average_distance } => {
                write!(f, "boxes are too close to targets (average distance {:.2})", average_distance)
            }
        }
    }
}

impl std::error::Error for ScrambleError {}

#[derive(Clone, Debug)]
pub struct ScrambleParams {
    pub steps: RangeInclusive<usize>,
    pub pull_bias: f64,
    pub min_pulls: usize,
    pub min_average_distance: f64,
    pub rules: DeadlockRules,
}

#[derive(Clone, Debug)]
pub struct Scrambled {
    /// The puzzle's initial state.
    pub state: GameState,
    pub pulls: usize,
    pub moves: usize,
    pub teleports: usize,
}

/// The configuration every scramble starts from: each box on a target, player on the anchor.
pub fn solved_state(shared: &SharedGameState, anchor: Vec2) -> GameState {
    GameState {
        environment: GameStateEnvironment::new(shared.targets.clone()),
        player: anchor,
    }
}

/// Walks backwards from the solved configuration with random walks and pulls. Every pull is the
/// exact inverse of a push, so the result can be pushed back to the solved configuration.
pub fn scramble<R: Rng + ?Sized>(
    shared: &SharedGameState,
    anchor: Vec2,
    params: &ScrambleParams,
    rng: &mut R,
) -> Result<Scrambled, ScrambleError> {
    let mut game = solved_state(shared, anchor);
    let step_budget = rng.random_range(params.steps.clone());
    let mut result = Scrambled { state: game.clone(), pulls: 0, moves: 0, teleports: 0 };

    for _ in 0..step_budget {
        let pulls = legal_pulls(shared, &game, &params.rules);
        let moves = legal_moves(shared, &game);

        if !pulls.is_empty() {
            if moves.is_empty() || rng.random::<f64>() < params.pull_bias {
                if let Some(next) = prefer_lifting(shared, &game, &pulls).choose(rng) {
                    game = (*next).clone();
                    result.pulls += 1;
                }
            } else if let Some(next) = moves.choose(rng) {
                game = next.clone();
                result.moves += 1;
            }
            continue;
        }

        let spots = reachable_pull_spots(shared, &game, &params.rules);
        if let Some((spot, distance)) = prefer_lifting_spots(shared, &game, &spots, &params.rules).choose(rng) {
            game.player = *spot;
            result.moves += *distance as usize;
            continue;
        }

        let candidates = teleport_candidates(shared, &game);
        let pull_spots: Vec<&GameState> = candidates.iter()
            .filter(|candidate| !legal_pulls(shared, candidate, &params.rules).is_empty())
            .collect();
        if let Some(next) = pull_spots.choose(rng) {
            game = (*next).clone();
            result.teleports += 1;
            continue;
        }

        if moves.is_empty() && candidates.iter().all(|candidate| legal_moves(shared, candidate).is_empty()) {
            return Err(ScrambleError::Stagnated);
        }
        // no pull is legal anywhere, so the boxes cannot move again
        debug!("no pull left anywhere after {} pulls", result.pulls);
        break;
    }

    if result.pulls < params.min_pulls {
        return Err(ScrambleError::TooFewPulls { pulls: result.pulls });
    }
    if is_deadlocked(shared, &game.environment, &params.rules) {
        return Err(ScrambleError::Deadlocked);
    }
    let on_targets = shared.count_boxes_on_goals(&game.environment);
    if on_targets * 2 > game.environment.box_count() {
        return Err(ScrambleError::TooManyOnTargets { on_targets });
    }
    let average_distance = average_matching_distance(shared, &game.environment);
    if average_distance <= params.min_average_distance {
        return Err(ScrambleError::TooClose { average_distance });
    }

    debug!(
        "scrambled with {} pulls, {} moves, {} teleports; average distance {:.2}",
        result.pulls, result.moves, result.teleports, average_distance
    );
    result.state = game;
    Ok(result)
}

/// While more than half the boxes sit on targets, only pulls that take one off are kept,
/// if there are any.
fn prefer_lifting<'a>(shared: &SharedGameState, game: &GameState, pulls: &'a [GameState]) -> Vec<&'a GameState> {
    let on_targets = shared.count_boxes_on_goals(&game.environment);
    let all: Vec<&GameState> = pulls.iter().collect();
    if on_targets * 2 <= game.environment.box_count() {
        return all;
    }
    let lifting: Vec<&GameState> = pulls.iter()
        .filter(|next| shared.count_boxes_on_goals(&next.environment) < on_targets)
        .collect();
    if lifting.is_empty() { all } else { lifting }
}

fn prefer_lifting_spots<'a>(
    shared: &SharedGameState,
    game: &GameState,
    spots: &'a [(Vec2, u16)],
    rules: &DeadlockRules,
) -> Vec<&'a (Vec2, u16)> {
    let on_targets = shared.count_boxes_on_goals(&game.environment);
    let all: Vec<&(Vec2, u16)> = spots.iter().collect();
    if on_targets * 2 <= game.environment.box_count() {
        return all;
    }
    let lifting: Vec<&(Vec2, u16)> = spots.iter()
        .filter(|(spot, _)| {
            let standing = GameState { environment: game.environment.clone(), player: *spot };
            legal_pulls(shared, &standing, rules)
                .iter()
                .any(|next| shared.count_boxes_on_goals(&next.environment) < on_targets)
        })
        .collect();
    if lifting.is_empty() { all } else { lifting }
}

/// Cells the player can walk to without moving a box, other than its own, from which some pull
/// is legal, with their walking distance.
pub fn reachable_pull_spots(shared: &SharedGameState, game: &GameState, rules: &DeadlockRules) -> Vec<(Vec2, u16)> {
    shared.player_distances(game)
        .iter()
        .filter_map(|(pos, distance)| (*distance).map(|d| (pos, d)))
        .filter(|&(pos, _)| pos != game.player)
        .filter(|&(pos, _)| {
            let standing = GameState { environment: game.environment.clone(), player: pos };
            !legal_pulls(shared, &standing, rules).is_empty()
        })
        .collect()
}

/// Pulls from the player's cell that do not leave the boxes deadlocked.
pub fn legal_pulls(shared: &SharedGameState, game: &GameState, rules: &DeadlockRules) -> Vec<GameState> {
    UserAction::all_pulls()
        .into_iter()
        .filter_map(|action| match step(shared, game, action) {
            GameUpdate::NextState(next, _) if !is_deadlocked(shared, &next.environment, rules) => Some(next),
            _ => None,
        })
        .collect()
}

/// Plain steps onto free floor; walking into a box would be a push, which is not a reverse move.
pub fn legal_moves(shared: &SharedGameState, game: &GameState) -> Vec<GameState> {
    UserAction::all_moves()
        .into_iter()
        .filter_map(|action| match step(shared, game, action) {
            GameUpdate::NextState(next, GameChangeType::PlayerMove) => Some(next),
            _ => None,
        })
        .collect()
}

/// Free floor cells other than the player's, found by searching the floor as if no boxes were
/// present.
fn teleport_candidates(shared: &SharedGameState, game: &GameState) -> Vec<GameState> {
    flood_fill(&shared.grid, game.player, |pos| shared.is_walkable(*pos))
        .iter()
        .filter(|(pos, distance)| {
            distance.is_some() && *pos != game.player && !game.environment.has_box_at(pos)
        })
        .map(|(pos, _)| GameState { environment: game.environment.clone(), player: pos })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use crate::console_interface::parse_level;

    fn params() -> ScrambleParams {
        ScrambleParams {
            steps: 80..=120,
            pull_bias: 0.8,
            min_pulls: 2,
            min_average_distance: 0.5,
            rules: DeadlockRules::default(),
        }
    }

    #[test]
    fn pull_moves_box_with_retreating_player() {
        let (game, shared) = parse_level(r#"
######
#    #
# *@ #
#    #
######
"#);
        let pulled = legal_pulls(&shared, &game, &DeadlockRules::default());
        assert_eq!(pulled.len(), 1);
        assert_eq!(pulled[0].player, Vec2 { i: 2, j: 4 });
        assert_eq!(pulled[0].environment.to_vec(), vec![Vec2 { i: 2, j: 3 }]);
    }

    #[test]
    fn pull_into_deadlock_is_not_legal() {
        // pulling the box down pins it against the wall on its left, and column 3 has no target
        let (game, shared) = parse_level(r#"
#######
#.    #
#  $  #
###@ ##
#     #
#######
"#);
        let pulled = legal_pulls(&shared, &game, &DeadlockRules::default());
        assert!(pulled.is_empty());

        let relaxed = DeadlockRules { line_rule: false, ..DeadlockRules::default() };
        assert_eq!(legal_pulls(&shared, &game, &relaxed).len(), 1);
    }

    #[test]
    fn scramble_displaces_boxes_from_targets() {
        let (_, shared) = parse_level(r#"
#######
#     #
# *   #
#   * #
#  @  #
#######
"#);
        let mut successes = 0;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let Ok(scrambled) = scramble(&shared, Vec2 { i: 4, j: 3 }, &params(), &mut rng) else {
                continue;
            };
            successes += 1;
            let state = &scrambled.state;
            assert!(scrambled.pulls >= 2);
            assert!(shared.count_boxes_on_goals(&state.environment) <= 1);
            assert!(!is_deadlocked(&shared, &state.environment, &DeadlockRules::default()));
            assert!(!state.environment.has_box_at(&state.player));
        }
        assert!(successes > 0, "no seed produced an acceptable scramble");
    }

    const POCKET_LEVEL: &str = r#"
#####
#   #
#   #
##*##
## @#
#####
"#;

    #[test]
    fn pull_spots_are_limited_to_the_walkable_region() {
        let (game, shared) = parse_level(POCKET_LEVEL);
        // the pocket under the box offers only plain moves
        assert!(reachable_pull_spots(&shared, &game, &DeadlockRules::default()).is_empty());

        let above = GameState { player: Vec2 { i: 1, j: 1 }, ..game };
        let spots = reachable_pull_spots(&shared, &above, &DeadlockRules::default());
        assert_eq!(spots, vec![(Vec2 { i: 2, j: 2 }, 2)]);
    }

    #[test]
    fn player_walled_into_a_pocket_teleports_to_a_pull() {
        let (_, shared) = parse_level(POCKET_LEVEL);
        let params = ScrambleParams { steps: 2..=2, pull_bias: 1.0, min_pulls: 1, ..params() };

        let scrambled = scramble(&shared, Vec2 { i: 4, j: 3 }, &params, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(scrambled.teleports, 1);
        assert_eq!(scrambled.pulls, 1);
        assert_eq!(scrambled.state.player, Vec2 { i: 1, j: 2 });
        assert_eq!(scrambled.state.environment.to_vec(), vec![Vec2 { i: 2, j: 2 }]);
    }

    #[test]
    fn pulls_lift_boxes_off_targets_first() {
        // two of three boxes are on targets; pulling left only shifts the loose box
        let (game, shared) = parse_level(r#"
#######
#    .#
#  *  #
#  @$ #
#     #
#*    #
#######
"#);
        let pulls = legal_pulls(&shared, &game, &DeadlockRules::default());
        assert_eq!(pulls.len(), 2);

        let preferred = prefer_lifting(&shared, &game, &pulls);
        assert_eq!(preferred.len(), 1);
        assert_eq!(preferred[0].player, Vec2 { i: 4, j: 3 });
        assert_eq!(shared.count_boxes_on_goals(&preferred[0].environment), 1);
    }

    #[test]
    fn scramble_with_boxed_in_player_stagnates() {
        let (_, shared) = parse_level(r#"
#####
##*##
#*@*#
##*##
#####
"#);
        let result = scramble(&shared, Vec2 { i: 2, j: 2 }, &params(), &mut StdRng::seed_from_u64(3));
        assert!(matches!(result, Err(ScrambleError::Stagnated)));
    }
}
