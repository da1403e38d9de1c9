//! Dungeon: terrain, floors, and their generation

mod fov;
mod game_map;
mod generation;
mod rect;
mod tile;
mod world;

pub use game_map::GameMap;
pub use generation::{GeneratedFloor, GenerationParams, generate_dungeon};
pub use rect::RectRoom;
pub use tile::{Tile, TileFlags};
pub use world::GameWorld;
