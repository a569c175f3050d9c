use std::hash::{Hash, Hasher};
use crate::core::MAX_BOXES;
use crate::core::models::Vec2;

/// The set of box positions. Boxes are kept sorted so that two environments holding the same
/// boxes in a different order compare and hash equal.
#[derive(Clone, Debug)]
pub struct GameStateEnvironment {
    boxes: [Vec2; MAX_BOXES],
}

const EMPTY_BOX: Vec2 = Vec2 { i: i8::MAX, j: i8::MAX };

impl GameStateEnvironment {
    pub fn new(boxes: Vec<Vec2>) -> GameStateEnvironment {
        assert!(boxes.len() <= MAX_BOXES, "at most {} boxes are supported, got {}", MAX_BOXES, boxes.len());
        let mut boxes_fixed = [EMPTY_BOX; MAX_BOXES];
        for (i, &b) in boxes.iter().enumerate() {
            assert_ne!(b, EMPTY_BOX, "position cannot be empty box special value");
            boxes_fixed[i] = b;
        }
        let mut result = GameStateEnvironment {
            boxes: boxes_fixed,
        };
        result.complete_moves();
        result
    }

    pub fn iter_boxes(&self) -> impl Iterator<Item=&Vec2> {
        self.boxes.iter().take_while(|&&b| b != EMPTY_BOX)
    }

    pub fn box_count(&self) -> usize {
        self.iter_boxes().count()
    }

    pub fn to_vec(&self) -> Vec<Vec2> {
        self.iter_boxes().copied().collect()
    }

    pub fn has_box_at(&self, position: &Vec2) -> bool {
        assert_ne!(position, &EMPTY_BOX, "position cannot be empty box special value");
        self.iter_boxes().any(|b| b == position)
    }

    pub fn index_of_box_at(&self, position: &Vec2) -> Option<usize> {
        assert_ne!(position, &EMPTY_BOX, "position cannot be empty box special value");
        self.iter_boxes().position(|b| b == position)
    }

    /// Returns a copy of this environment with the box at `from` moved to `to`.
    pub fn with_box_moved(&self, from: &Vec2, to: &Vec2) -> GameStateEnvironment {
        let index = self.index_of_box_at(from)
            .unwrap_or_else(|| panic!("no box at {:?} to move", from));
        let mut result = self.clone();
        result.set_box(index, to);
        result.complete_moves();
        result
    }

    fn set_box(&mut self, box_index: usize, position: &Vec2) {
        assert_ne!(position, &EMPTY_BOX, "position cannot be empty box special value");
        self.boxes[box_index] = *position;
    }

    fn complete_moves(&mut self) {
        self.boxes.sort_unstable()
    }
}

impl Hash for GameStateEnvironment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iter_boxes().for_each(|b| {
            b.hash(state)
        });
    }
}

impl Eq for GameStateEnvironment{}
impl PartialEq<Self> for GameStateEnvironment {
    fn eq(&self, other: &Self) -> bool {
        self.iter_boxes().eq(other.iter_boxes())
    }
}
