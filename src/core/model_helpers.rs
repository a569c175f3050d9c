use std::collections::VecDeque;
use std::ops::{Add, Index, Sub};
use crate::core::bounded_grid::BoundedGrid;
use crate::core::{Cell, Direction, GameState, GameStateEnvironment, SharedGameState, UserAction, Vec2};

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { i: self.i + rhs.i, j: self.j + rhs.j }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { i: self.i - rhs.i, j: self.j - rhs.j }
    }
}

impl Vec2 {
    pub fn manhattan(&self, other: &Vec2) -> usize {
        ((self.i as i32 - other.i as i32).abs() + (self.j as i32 - other.j as i32).abs()) as usize
    }

    pub fn neighbors(&self) -> impl Iterator<Item = Vec2> {
        let here = *self;
        Direction::ALL.into_iter().map(move |dir| here + dir.to_vec())
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn to_vec(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2 { i: -1, j: 0 },
            Direction::Down => Vec2 { i: 1, j: 0 },
            Direction::Left => Vec2 { i: 0, j: -1 },
            Direction::Right => Vec2 { i: 0, j: 1 },
        }
    }

    pub fn from_vec(v: Vec2) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| dir.to_vec() == v)
    }
}

impl UserAction {
    pub fn all_moves() -> Vec<UserAction> {
        Direction::ALL.into_iter().map(UserAction::Move).collect()
    }

    pub fn all_pulls() -> Vec<UserAction> {
        Direction::ALL.into_iter().map(UserAction::Pull).collect()
    }
}

const OUT_OF_BOUNDS: Cell = Cell::Wall;

/// Anything outside the grid reads as wall.
impl Index<Vec2> for SharedGameState {
    type Output = Cell;

    fn index(&self, index: Vec2) -> &Self::Output {
        self.grid.get(&index).unwrap_or(&OUT_OF_BOUNDS)
    }
}

impl SharedGameState {
    /// Builds a level from a wall mask and target list. Targets are stored sorted.
    pub fn new(walls: &BoundedGrid<bool>, targets: &[Vec2]) -> SharedGameState {
        let mut grid = BoundedGrid::new(walls.size(), Cell::Floor);
        for (pos, &is_wall) in walls.iter() {
            if is_wall {
                grid[&pos] = Cell::Wall;
            }
        }
        let mut targets = targets.to_vec();
        targets.sort_unstable();
        targets.dedup();
        for target in &targets {
            assert!(grid[target] == Cell::Floor, "target {:?} must be on a floor cell", target);
            grid[target] = Cell::Target;
        }
        SharedGameState { grid, targets }
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn total_targets(&self) -> usize {
        self.targets.len()
    }

    pub fn is_walkable(&self, pos: Vec2) -> bool {
        self[pos].is_walkable()
    }

    pub fn is_target(&self, pos: Vec2) -> bool {
        self[pos] == Cell::Target
    }

    pub fn floor_cells(&self) -> Vec<Vec2> {
        self.grid.iter().filter(|(_, c)| c.is_walkable()).map(|(pos, _)| pos).collect()
    }

    pub fn count_boxes_on_goals(&self, environment: &GameStateEnvironment) -> usize {
        environment.iter_boxes().filter(|&&b| self.is_target(b)).count()
    }

    pub fn is_won(&self, environment: &GameStateEnvironment) -> bool {
        environment.box_count() == self.total_targets()
            && environment.iter_boxes().all(|&b| self.is_target(b))
    }

    /// Breadth first distances from the player to every cell it can walk to without moving a box.
    pub fn player_distances(&self, game: &GameState) -> BoundedGrid<Option<u16>> {
        flood_fill(&self.grid, game.player, |pos| {
            self.is_walkable(*pos) && !game.environment.has_box_at(pos)
        })
    }

    pub fn reachable_positions(&self, game: &GameState) -> Vec<Vec2> {
        self.player_distances(game)
            .iter()
            .filter(|(_, d)| d.is_some())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// The canonical representative of the player's reachable region: its smallest cell in
    /// row-major order.
    pub fn min_reachable_position(&self, game: &GameState) -> Vec2 {
        self.reachable_positions(game)
            .into_iter()
            .min()
            .unwrap_or(game.player)
    }

    /// Shortest box-avoiding walk from the player to `to`, as a list of directions.
    pub fn walk_path(&self, game: &GameState, to: Vec2) -> Option<Vec<Direction>> {
        let distances = self.player_distances(game);
        let mut remaining = (*distances.get(&to)?)?;
        let mut path = Vec::with_capacity(remaining as usize);
        let mut current = to;
        while remaining > 0 {
            let (dir, previous) = Direction::ALL.into_iter()
                .map(|dir| (dir, current - dir.to_vec()))
                .find(|(_, prev)| distances.get(prev).copied().flatten() == Some(remaining - 1))?;
            path.push(dir);
            current = previous;
            remaining -= 1;
        }
        path.reverse();
        Some(path)
    }
}

/// Breadth first search over the 4-neighbourhood, restricted to cells where `passable` holds.
/// The start cell is always included.
pub fn flood_fill<T, F>(grid: &BoundedGrid<T>, start: Vec2, passable: F) -> BoundedGrid<Option<u16>>
where
    F: Fn(&Vec2) -> bool,
{
    let mut distances = BoundedGrid::new(grid.size(), None);
    if !grid.contains(&start) {
        return distances;
    }
    let mut queue = VecDeque::new();
    distances[&start] = Some(0u16);
    queue.push_back(start);
    while let Some(pos) = queue.pop_front() {
        let next_distance = distances[&pos].map(|d| d + 1);
        for next in pos.neighbors() {
            if !grid.contains(&next) || distances[&next].is_some() || !passable(&next) {
                continue;
            }
            distances[&next] = next_distance;
            queue.push_back(next);
        }
    }
    distances
}
