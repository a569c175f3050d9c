use crate::core::Vec2;
use crate::core::bounds::BoundsOriginRoot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedGrid<T> {
    bounds: BoundsOriginRoot,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    pub fn new_with_size(height: usize, width: usize, default: T) -> Self
    where
        T: Clone,
    {
        let bounds = BoundsOriginRoot::new(height, width);
        BoundedGrid::new(bounds, default)
    }

    pub fn new(bounds: BoundsOriginRoot, default: T) -> Self
    where
        T: Clone,
    {
        let cells = vec![default; bounds.area()];
        BoundedGrid {
            bounds,
            cells,
        }
    }

    pub fn size(&self) -> BoundsOriginRoot {
        self.bounds
    }

    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        self.bounds.contains(pos)
    }

    pub fn get(&self, pos: &Vec2) -> Option<&T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    /// Row-major iteration over every position and its value.
    pub fn iter(&self) -> impl Iterator<Item = (Vec2, &T)> {
        self.bounds.iter().zip(self.cells.iter())
    }

    fn index_of(&self, pos: &Vec2) -> usize {
        assert!(self.bounds.contains(pos), "position {:?} outside of grid bounds {:?}", pos, self.bounds);
        pos.i as usize * self.bounds.width() + pos.j as usize
    }
}

impl<T> std::ops::Index<&Vec2> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &Vec2) -> &Self::Output {
        &self.cells[self.index_of(index)]
    }
}

impl<T> std::ops::IndexMut<&Vec2> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &Vec2) -> &mut Self::Output {
        let index = self.index_of(index);
        &mut self.cells[index]
    }
}
