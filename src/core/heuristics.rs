use serde::{Deserialize, Serialize};
use crate::core::{GameStateEnvironment, SharedGameState, Vec2, MAX_BOXES};

/// Which of the over-approximating deadlock rules are applied. Corner detection is exact and
/// always on. The line and pair rules can reject some solvable layouts; they are kept on by
/// default and exposed here so their conservatism can be tuned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadlockRules {
    /// A box against a wall on one axis whose whole line across that axis holds no target.
    pub line_rule: bool,
    /// Two adjacent boxes sharing a wall on the same side, neither on a target.
    pub pair_rule: bool,
}

impl Default for DeadlockRules {
    fn default() -> Self {
        DeadlockRules {
            line_rule: true,
            pair_rule: true,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Deadlock {
    Corner(Vec2),
    Line(Vec2),
    Pair(Vec2, Vec2),
}

#[derive(Eq, PartialEq, Debug)]
pub enum WinnableState {
    WinMaybePossible,
    WinImpossible(Deadlock),
}

const DIRECTIONS_AROUND: [Vec2; 4] =
[
    Vec2 { i: 1, j: 0 },
    Vec2 { i: 0, j: 1 },
    Vec2 { i: -1, j: 0 },
    Vec2 { i: 0, j: -1 },
];

const UP: Vec2 = Vec2 { i: -1, j: 0 };
const DOWN: Vec2 = Vec2 { i: 1, j: 0 };
const LEFT: Vec2 = Vec2 { i: 0, j: -1 };
const RIGHT: Vec2 = Vec2 { i: 0, j: 1 };

pub fn is_winnable(
    shared: &SharedGameState,
    environment: &GameStateEnvironment,
    rules: &DeadlockRules) -> WinnableState {
    match find_deadlock(shared, environment, rules) {
        Some(deadlock) => WinnableState::WinImpossible(deadlock),
        None => WinnableState::WinMaybePossible,
    }
}

pub fn is_deadlocked(
    shared: &SharedGameState,
    environment: &GameStateEnvironment,
    rules: &DeadlockRules) -> bool {
    find_deadlock(shared, environment, rules).is_some()
}

/// Returns the first rule that proves the configuration can never be solved, if any.
pub fn find_deadlock(
    shared: &SharedGameState,
    environment: &GameStateEnvironment,
    rules: &DeadlockRules) -> Option<Deadlock> {
    for &game_box in environment.iter_boxes() {
        assert!(shared.grid.contains(&game_box), "box {:?} outside of the grid", game_box);
        if shared.is_target(game_box) {
            continue;
        }
        if is_box_cornered(shared, game_box) {
            return Some(Deadlock::Corner(game_box));
        }
        if rules.line_rule && is_box_on_dead_line(shared, game_box) {
            return Some(Deadlock::Line(game_box));
        }
    }

    if rules.pair_rule {
        for &game_box in environment.iter_boxes() {
            for neighbor in [game_box + RIGHT, game_box + DOWN] {
                if environment.has_box_at(&neighbor) && is_pair_frozen(shared, game_box, neighbor) {
                    return Some(Deadlock::Pair(game_box, neighbor));
                }
            }
        }
    }

    None
}

fn is_wall(shared: &SharedGameState, pos: Vec2) -> bool {
    !shared.is_walkable(pos)
}

/// If any 2 consecutive directions are blocked, then we are in a corner, and we are trapped
fn is_box_cornered(shared: &SharedGameState, game_box: Vec2) -> bool {
    let blocked_directions = DIRECTIONS_AROUND.map(|dir| is_wall(shared, game_box + dir));

    (0..4).any(|i| blocked_directions[i] && blocked_directions[(i + 1) % 4])
}

/// A wall directly above or below pins the box to its row, a wall to either side pins it to its
/// column. The line it is pinned to must hold a target somewhere. This ignores that the wall may
/// end further along the line, so it over-rejects.
fn is_box_on_dead_line(shared: &SharedGameState, game_box: Vec2) -> bool {
    let pinned_to_row = is_wall(shared, game_box + UP) || is_wall(shared, game_box + DOWN);
    if pinned_to_row && !shared.targets.iter().any(|t| t.i == game_box.i) {
        return true;
    }

    let pinned_to_column = is_wall(shared, game_box + LEFT) || is_wall(shared, game_box + RIGHT);
    pinned_to_column && !shared.targets.iter().any(|t| t.j == game_box.j)
}

/// Two orthogonally adjacent boxes block each other along their shared axis; if both are also
/// against a wall on the same perpendicular side neither can ever move.
fn is_pair_frozen(shared: &SharedGameState, a: Vec2, b: Vec2) -> bool {
    if shared.is_target(a) || shared.is_target(b) {
        return false;
    }
    let sides = if a.i == b.i { [UP, DOWN] } else { [LEFT, RIGHT] };
    sides.iter().any(|&side| is_wall(shared, a + side) && is_wall(shared, b + side))
}

/// Minimum total Manhattan distance over all perfect matchings of boxes to targets.
///
/// Solved with a DP over subsets of targets: `cost[mask]` is the cheapest way to place the first
/// `popcount(mask)` boxes on the targets in `mask`. Runs in `O(n * 2^n)` and is only valid for
/// `n <= MAX_BOXES`.
pub fn matching_cost(boxes: &[Vec2], targets: &[Vec2]) -> usize {
    let n = boxes.len();
    assert_eq!(n, targets.len(), "box and target counts must match");
    assert!(n <= MAX_BOXES, "matching is limited to {} boxes, got {}", MAX_BOXES, n);

    let full = 1usize << n;
    let mut cost = vec![usize::MAX; full];
    cost[0] = 0;
    for mask in 0..full {
        let current = cost[mask];
        if current == usize::MAX {
            continue;
        }
        let next_box = mask.count_ones() as usize;
        if next_box == n {
            continue;
        }
        for (t, target) in targets.iter().enumerate() {
            if mask & (1 << t) != 0 {
                continue;
            }
            let next_mask = mask | (1 << t);
            let candidate = current + boxes[next_box].manhattan(target);
            if candidate < cost[next_mask] {
                cost[next_mask] = candidate;
            }
        }
    }
    cost[full - 1]
}

pub fn environment_matching_cost(shared: &SharedGameState, environment: &GameStateEnvironment) -> usize {
    matching_cost(&environment.to_vec(), &shared.targets)
}

/// Matching cost divided by the number of boxes; 0 for an empty environment.
pub fn average_matching_distance(shared: &SharedGameState, environment: &GameStateEnvironment) -> f64 {
    let count = environment.box_count();
    if count == 0 {
        return 0.0;
    }
    environment_matching_cost(shared, environment) as f64 / count as f64
}
