//! Axis-aligned rooms

use serde::{Deserialize, Serialize};

/// A rectangular room. `(x1, y1)`-`(x2, y2)` is the wall outline; the
/// carved interior sits one tile inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectRoom {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Interior x range (exclusive end)
    pub fn inner_x(&self) -> std::ops::Range<i32> {
        self.x1 + 1..self.x2
    }

    /// Interior y range (exclusive end)
    pub fn inner_y(&self) -> std::ops::Range<i32> {
        self.y1 + 1..self.y2
    }

    pub fn inner_tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.inner_x().flat_map(move |x| self.inner_y().map(move |y| (x, y)))
    }

    /// True if the outlines touch or overlap
    pub fn intersects(&self, other: &RectRoom) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_interior() {
        let room = RectRoom::new(10, 5, 6, 4);
        assert_eq!(room.center(), (13, 7));
        assert_eq!(room.inner_tiles().count(), 5 * 3);
        assert!(room.inner_tiles().all(|(x, y)| x > 10 && x < 16 && y > 5 && y < 9));
    }

    #[test]
    fn test_intersects() {
        let a = RectRoom::new(0, 0, 5, 5);
        assert!(a.intersects(&RectRoom::new(5, 5, 3, 3)));
        assert!(!a.intersects(&RectRoom::new(6, 0, 3, 3)));
        assert!(a.intersects(&RectRoom::new(1, 1, 2, 2)));
    }
}
