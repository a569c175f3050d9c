use crate::core::Vec2;

/// A bounding box with one corner fixed at 0,0 and assumed to have positive extent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsOriginRoot {
    pub extent: Vec2,
}

impl BoundsOriginRoot {
    pub fn new(height: usize, width: usize) -> BoundsOriginRoot {
        assert!(height <= i8::MAX as usize && width <= i8::MAX as usize, "bounds too large");
        BoundsOriginRoot {
            extent: Vec2 { i: height as i8, j: width as i8 }
        }
    }

    pub fn height(&self) -> usize {
        self.extent.i as usize
    }

    pub fn width(&self) -> usize {
        self.extent.j as usize
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        pos.i >= 0 && pos.i < self.extent.i && pos.j >= 0 && pos.j < self.extent.j
    }

    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    /// All positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Vec2> {
        let extent = self.extent;
        (0..extent.i).flat_map(move |i| (0..extent.j).map(move |j| Vec2 { i, j }))
    }
}
