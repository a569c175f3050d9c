use std::collections::VecDeque;
use serde::{Deserialize, Serialize};
use crate::console_interface::render_game_to_string;
use crate::core::{BoundedGrid, GameState, GameStateEnvironment, SharedGameState, Vec2};

/// A generated (or fallback) level as handed to the host. Plain data so the host can persist it
/// and hand it back verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub height: usize,
    pub width: usize,
    /// Row-major, `true` for wall.
    pub walls: Vec<bool>,
    pub targets: Vec<Vec2>,
    pub player_start: Vec2,
    pub boxes: Vec<Vec2>,
    /// Where the player stands once every box is home.
    pub solved_player: Vec2,
    /// Set for the hand-authored layout; such puzzles should not be remembered as generated.
    pub used_fallback: bool,
    pub signature: String,
}

impl Puzzle {
    pub fn new(shared: &SharedGameState, initial: &GameState, solved_player: Vec2, used_fallback: bool) -> Puzzle {
        Puzzle {
            height: shared.height(),
            width: shared.width(),
            walls: shared.grid.iter().map(|(_, cell)| !cell.is_walkable()).collect(),
            targets: shared.targets.clone(),
            player_start: initial.player,
            boxes: initial.environment.to_vec(),
            solved_player,
            used_fallback,
            signature: layout_signature(shared, initial.player),
        }
    }

    pub fn wall_mask(&self) -> BoundedGrid<bool> {
        let mut walls = BoundedGrid::new_with_size(self.height, self.width, false);
        let positions: Vec<Vec2> = walls.size().iter().collect();
        for (pos, &is_wall) in positions.iter().zip(self.walls.iter()) {
            walls[pos] = is_wall;
        }
        walls
    }

    pub fn shared(&self) -> SharedGameState {
        SharedGameState::new(&self.wall_mask(), &self.targets)
    }

    pub fn initial_state(&self) -> GameState {
        GameState {
            environment: GameStateEnvironment::new(self.boxes.clone()),
            player: self.player_start,
        }
    }

    pub fn solved_state(&self) -> GameState {
        GameState {
            environment: GameStateEnvironment::new(self.targets.clone()),
            player: self.solved_player,
        }
    }

    pub fn to_game(&self) -> (GameState, SharedGameState) {
        (self.initial_state(), self.shared())
    }

    pub fn render(&self) -> String {
        render_game_to_string(&self.shared(), &self.initial_state())
    }

    pub fn render_solved(&self) -> String {
        render_game_to_string(&self.shared(), &self.solved_state())
    }
}

/// Canonical text for a layout: wall rows, sorted targets and the player start. Box positions
/// are left out so two scrambles of the same layout count as a repeat.
pub fn layout_signature(shared: &SharedGameState, player_start: Vec2) -> String {
    let rows: Vec<String> = (0..shared.height())
        .map(|i| {
            (0..shared.width())
                .map(|j| if shared.is_walkable(Vec2 { i: i as i8, j: j as i8 }) { '.' } else { '#' })
                .collect()
        })
        .collect();
    let mut targets = shared.targets.clone();
    targets.sort_unstable();
    let targets: Vec<String> = targets.iter().map(|t| format!("{},{}", t.i, t.j)).collect();
    format!("{}|{}|{},{}", rows.join("/"), targets.join(";"), player_start.i, player_start.j)
}

/// Ring buffer of recently produced layout signatures.
#[derive(Clone, Debug, Default)]
pub struct RecentLayouts {
    capacity: usize,
    signatures: VecDeque<String>,
}

impl RecentLayouts {
    pub fn new(capacity: usize) -> RecentLayouts {
        RecentLayouts { capacity, signatures: VecDeque::with_capacity(capacity) }
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.signatures.iter().any(|s| s == signature)
    }

    pub fn remember(&mut self, signature: &str) {
        if self.capacity == 0 {
            return;
        }
        while self.signatures.len() >= self.capacity {
            self.signatures.pop_front();
        }
        self.signatures.push_back(signature.to_string());
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
