// Text level format.
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.

use std::fmt;
use crate::core::Cell::{Floor, Target, Wall};
use crate::core::{BoundedGrid, GameState, GameStateEnvironment, SharedGameState, Vec2, MAX_BOXES};

#[derive(Debug, PartialEq)]
pub enum LevelParseError {
    Empty,
    TooLarge { height: usize, width: usize },
    MissingPlayer,
    MultiplePlayers,
    TooManyBoxes(usize),
    BoxTargetMismatch { boxes: usize, targets: usize },
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelParseError::Empty => write!(f, "level has no rows"),
            LevelParseError::TooLarge { height, width } => write!(f, "level is too large: {}x{}", height, width),
            LevelParseError::MissingPlayer => write!(f, "level has no player"),
            LevelParseError::MultiplePlayers => write!(f, "level has more than one player"),
            LevelParseError::TooManyBoxes(count) => write!(f, "level has {} boxes, at most {} are supported", count, MAX_BOXES),
            LevelParseError::BoxTargetMismatch { boxes, targets } => {
                write!(f, "level has {} boxes but {} targets", boxes, targets)
            }
        }
    }
}

impl std::error::Error for LevelParseError {}

/// Parses a level known to be well formed, such as a hand-authored layout.
///
/// # Panics
/// If the level text is invalid; use [`try_parse_level`] for untrusted input.
pub fn parse_level(s: &str) -> (GameState, SharedGameState) {
    match try_parse_level(s) {
        Ok(level) => level,
        Err(err) => panic!("invalid level: {}\n{}", err, s),
    }
}

pub fn try_parse_level(s: &str) -> Result<(GameState, SharedGameState), LevelParseError> {
    // Blank lines around the level are dropped; blank rows inside it are open floor.
    let rows: Vec<&str> = s.lines().map(|line| line.trim_end_matches('\r')).collect();
    let Some(first) = rows.iter().position(|line| !line.trim().is_empty()) else {
        return Err(LevelParseError::Empty);
    };
    let last = rows.iter().rposition(|line| !line.trim().is_empty()).unwrap_or(first);
    let lines = &rows[first..=last];
    let height = lines.len();
    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    if height > i8::MAX as usize || width > i8::MAX as usize {
        return Err(LevelParseError::TooLarge { height, width });
    }

    // Rows shorter than the widest one are padded with floor.
    let mut walls = BoundedGrid::new_with_size(height, width, false);
    let mut targets: Vec<Vec2> = Vec::new();
    let mut boxes: Vec<Vec2> = Vec::new();
    let mut player: Option<Vec2> = None;

    for (i, line) in lines.iter().enumerate() {
        for (j, ch) in line.chars().enumerate() {
            let pos = Vec2 { i: i as i8, j: j as i8 };
            match ch {
                '#' => walls[&pos] = true,
                '.' => targets.push(pos),
                '$' => boxes.push(pos),
                '*' => {
                    boxes.push(pos);
                    targets.push(pos);
                }
                '@' | '+' => {
                    if player.replace(pos).is_some() {
                        return Err(LevelParseError::MultiplePlayers);
                    }
                    if ch == '+' {
                        targets.push(pos);
                    }
                }
                _ => {}
            }
        }
    }

    let player = player.ok_or(LevelParseError::MissingPlayer)?;
    if boxes.len() > MAX_BOXES {
        return Err(LevelParseError::TooManyBoxes(boxes.len()));
    }
    if boxes.len() != targets.len() {
        return Err(LevelParseError::BoxTargetMismatch { boxes: boxes.len(), targets: targets.len() });
    }

    Ok((
        GameState {
            environment: GameStateEnvironment::new(boxes),
            player,
        },
        SharedGameState::new(&walls, &targets),
    ))
}

pub fn render_game_to_string(shared: &SharedGameState, game: &GameState) -> String {
    let mut result = String::new();
    for i in 0..shared.height() {
        for j in 0..shared.width() {
            let pos = Vec2 {
                i: i as i8,
                j: j as i8,
            };
            let has_player = pos == game.player;
            let has_box = game.environment.has_box_at(&pos);
            let ch = match shared.grid[&pos] {
                Wall => '#',
                Floor => if has_player { '@' } else if has_box { '$' } else { ' ' },
                Target => if has_player { '+' } else if has_box { '*' } else { '.' },
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}
