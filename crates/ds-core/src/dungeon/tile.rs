//! Terrain tiles

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

bitflags! {
    /// Terrain properties the simulation cares about
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TileFlags: u8 {
        const WALKABLE = 0x01;
        const TRANSPARENT = 0x02;
    }
}

/// Terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
    /// Cosmetic floor variant, same rules as `Floor`
    FloorAlt,
    DownStairs,
}

impl Tile {
    pub const fn flags(self) -> TileFlags {
        match self {
            Tile::Wall => TileFlags::empty(),
            Tile::Floor | Tile::FloorAlt | Tile::DownStairs => {
                TileFlags::WALKABLE.union(TileFlags::TRANSPARENT)
            }
        }
    }

    pub const fn is_walkable(self) -> bool {
        self.flags().contains(TileFlags::WALKABLE)
    }

    pub const fn is_transparent(self) -> bool {
        self.flags().contains(TileFlags::TRANSPARENT)
    }

    pub const fn is_plain_floor(self) -> bool {
        matches!(self, Tile::Floor | Tile::FloorAlt)
    }

    pub const fn symbol(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::FloorAlt => ',',
            Tile::DownStairs => '>',
        }
    }
}
