use crate::console_interface::parse_level;
use crate::core::Vec2;
use crate::generator::Puzzle;

// Hand-authored, solvable in 5 pushes.
const FALLBACK_LEVEL: &str = r#"
######
#  . #
# $  #
#  $ #
#.@  #
######
"#;

const FALLBACK_SOLVED_PLAYER: Vec2 = Vec2 { i: 4, j: 2 };

pub fn fallback_puzzle() -> Puzzle {
    let (game, shared) = parse_level(FALLBACK_LEVEL);
    Puzzle::new(&shared, &game, FALLBACK_SOLVED_PLAYER, true)
}
