/// Upper bound on boxes per level. The matching heuristic is a bitmask DP over target subsets,
/// so its cost grows as `n * 2^n`; above this it stops being tractable inside a frame budget.
pub const MAX_BOXES: usize = 8;

pub const MIN_GRID_DIMENSION: usize = 3;
pub const MAX_GRID_DIMENSION: usize = 9;
