//! Field of view

use super::GameMap;

impl GameMap {
    /// Recompute what is visible from `(ox, oy)` within a circular radius.
    ///
    /// Opaque tiles are visible themselves but hide what lies behind them.
    pub fn update_fov(&mut self, ox: i32, oy: i32, radius: i32) {
        let (w, h) = (self.width.max(0) as usize, self.height.max(0) as usize);
        let mut visible = vec![vec![false; h]; w];

        if self.in_bounds(ox, oy) {
            visible[ox as usize][oy as usize] = true;
        }

        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let (tx, ty) = (ox + dx, oy + dy);
                if self.in_bounds(tx, ty) && self.has_line_of_sight(ox, oy, tx, ty) {
                    visible[tx as usize][ty as usize] = true;
                }
            }
        }

        self.set_visible(visible);
    }

    /// Bresenham line of sight between two tiles
    pub fn has_line_of_sight(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if (x, y) != (x0, y0) {
                if !self.in_bounds(x, y) {
                    return false;
                }
                if !self.is_transparent(x, y) {
                    return x == x1 && y == y1;
                }
            }
            if x == x1 && y == y1 {
                return true;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dungeon::{GameMap, Tile};
    use crate::entity::IdAllocator;

    fn open_room() -> GameMap {
        let mut map = GameMap::new(30, 20, IdAllocator::default());
        for x in 1..29 {
            for y in 1..19 {
                map.set_tile(x, y, Tile::Floor);
            }
        }
        map
    }

    #[test]
    fn test_radius_limits_sight() {
        let mut map = open_room();
        map.update_fov(10, 10, 8);
        assert!(map.is_visible(10, 10));
        assert!(map.is_visible(18, 10));
        assert!(!map.is_visible(19, 10));
        assert!(!map.is_visible(17, 17));
    }

    #[test]
    fn test_walls_block_sight() {
        let mut map = open_room();
        for y in 1..19 {
            map.set_tile(12, y, Tile::Wall);
        }
        map.update_fov(10, 10, 8);
        assert!(map.is_visible(12, 10));
        assert!(!map.is_visible(14, 10));
    }

    #[test]
    fn test_explored_is_monotonic() {
        let mut map = open_room();
        map.update_fov(5, 5, 3);
        assert!(map.is_explored(7, 5));
        map.update_fov(20, 15, 3);
        assert!(!map.is_visible(7, 5));
        assert!(map.is_explored(7, 5));
    }
}
