//! Floor generation
//!
//! Rooms are dropped at random and rejected on overlap, then chained
//! together with L-shaped tunnels. Rooms after the first are populated from
//! the template set; the last room also gets the downstairs and the level
//! chest.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{GameMap, RectRoom, Tile};
use crate::consts::{
    ALT_FLOOR_PERCENT, LEVEL_CHEST_LOCK_PERCENT, LOCKED_CHEST_ITEMS, MAX_CHEST_ID,
    ROOM_CHEST_ITEMS, ROOM_CHEST_PERCENT, UNLOCKED_CHEST_ITEMS,
};
use crate::entity::{Entity, EntityId, IdAllocator};
use crate::error::GenerationError;
use crate::rng::GameRng;
use crate::templates::TemplateSet;

/// Generator knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub map_width: i32,
    pub map_height: i32,
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_monsters_per_room: u32,
    pub max_items_per_room: u32,
    pub max_chests_per_room: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 40,
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            max_monsters_per_room: 1,
            max_items_per_room: 3,
            max_chests_per_room: 1,
        }
    }
}

/// A freshly built floor, not yet holding the player
#[derive(Debug, Clone)]
pub struct GeneratedFloor {
    pub map: GameMap,
    pub rooms: Vec<RectRoom>,
    pub player_start: (i32, i32),
    pub level_chest: Option<EntityId>,
    /// False when a locked level chest got no key because no free floor
    /// tile was left
    pub key_placed: bool,
}

/// Build floor number `floor`.
///
/// `ids` continues the id sequence of the previous floor.
pub fn generate_dungeon(
    params: &GenerationParams,
    floor: i32,
    templates: &TemplateSet,
    ids: IdAllocator,
    rng: &mut GameRng,
) -> Result<GeneratedFloor, GenerationError> {
    templates.check()?;

    let mut map = GameMap::new(params.map_width, params.map_height, ids);
    let mut rooms: Vec<RectRoom> = Vec::new();

    for _ in 0..params.max_rooms {
        let width = rng.range(params.room_min_size, params.room_max_size);
        let height = rng.range(params.room_min_size, params.room_max_size);
        let max_x = params.map_width - width - 1;
        let max_y = params.map_height - height - 1;
        if max_x < 0 || max_y < 0 {
            continue;
        }

        let x = rng.range(0, max_x);
        let y = rng.range(0, max_y);
        let room = RectRoom::new(x, y, width, height);

        if rooms.iter().any(|other| room.intersects(other)) {
            continue;
        }

        carve_room(&mut map, &room);
        if let Some(prev) = rooms.last() {
            tunnel_between(&mut map, prev.center(), room.center(), rng);
        }
        scatter_alt_floor(&mut map, rng);
        rooms.push(room);
    }

    let (Some(first), Some(last)) = (rooms.first().copied(), rooms.last().copied()) else {
        return Err(GenerationError::NoRooms {
            width: params.map_width,
            height: params.map_height,
        });
    };

    let player_start = first.center();
    map.downstairs = last.center();
    map.set_tile(map.downstairs.0, map.downstairs.1, Tile::DownStairs);

    let weights = templates.spawn_weights(floor);
    if !weights.iter().any(|&w| w > 0.0) {
        warn!(floor, "no monster template can spawn on this floor");
    }
    for room in rooms.iter().skip(1) {
        populate_room(&mut map, room, params, templates, &weights, rng);
    }

    let (level_chest, key_placed) = place_level_chest(&mut map, &last, templates, rng);

    debug!(
        floor,
        rooms = rooms.len(),
        entities = map.entities().len(),
        key_placed,
        "generated floor"
    );

    Ok(GeneratedFloor {
        map,
        rooms,
        player_start,
        level_chest,
        key_placed,
    })
}

fn carve_room(map: &mut GameMap, room: &RectRoom) {
    for (x, y) in room.inner_tiles() {
        if map.tile(x, y) == Some(Tile::Wall) {
            map.set_tile(x, y, Tile::Floor);
        }
    }
}

/// L-shaped tunnel; the corner is picked with a coin flip
fn tunnel_between(map: &mut GameMap, start: (i32, i32), end: (i32, i32), rng: &mut GameRng) {
    let corner = if rng.percent(50) {
        (end.0, start.1)
    } else {
        (start.0, end.1)
    };
    for (x, y) in line(start, corner).into_iter().chain(line(corner, end)) {
        if map.tile(x, y) == Some(Tile::Wall) {
            map.set_tile(x, y, Tile::Floor);
        }
    }
}

/// Bresenham points from `a` to `b`, both ends included
fn line(a: (i32, i32), b: (i32, i32)) -> Vec<(i32, i32)> {
    let (mut x, mut y) = a;
    let dx = (b.0 - a.0).abs();
    let dy = -(b.1 - a.1).abs();
    let sx = if a.0 < b.0 { 1 } else { -1 };
    let sy = if a.1 < b.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut points = Vec::new();

    loop {
        points.push((x, y));
        if (x, y) == b {
            return points;
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

/// Cosmetic pass: a few floor tiles become the alternate floor
fn scatter_alt_floor(map: &mut GameMap, rng: &mut GameRng) {
    for x in 0..map.width {
        for y in 0..map.height {
            if map.tile(x, y) == Some(Tile::Floor) && rng.percent(ALT_FLOOR_PERCENT) {
                map.set_tile(x, y, Tile::FloorAlt);
            }
        }
    }
}

fn random_interior(room: &RectRoom, rng: &mut GameRng) -> (i32, i32) {
    (
        rng.range(room.x1 + 1, room.x2 - 1),
        rng.range(room.y1 + 1, room.y2 - 1),
    )
}

fn populate_room(
    map: &mut GameMap,
    room: &RectRoom,
    params: &GenerationParams,
    templates: &TemplateSet,
    weights: &[f64],
    rng: &mut GameRng,
) {
    let monsters = rng.range(0, params.max_monsters_per_room as i32);
    for _ in 0..monsters {
        let (x, y) = random_interior(room, rng);
        if map.any_entity_at(x, y) {
            continue;
        }
        if let Some(idx) = rng.choose_weighted(weights) {
            map.spawn(&templates.monsters[idx].entity, x, y);
        }
    }

    let items = rng.range(0, params.max_items_per_room as i32);
    for _ in 0..items {
        let (x, y) = random_interior(room, rng);
        if map.any_entity_at(x, y) {
            continue;
        }
        if let Some(template) = rng.choose(&templates.items) {
            map.spawn(template, x, y);
        }
    }

    let chests = rng.range(0, params.max_chests_per_room as i32);
    for _ in 0..chests {
        if !rng.percent(ROOM_CHEST_PERCENT) {
            continue;
        }
        let (x, y) = random_interior(room, rng);
        if map.any_entity_at(x, y) || (x, y) == map.downstairs {
            continue;
        }
        let count = rng.range(ROOM_CHEST_ITEMS.0 as i32, ROOM_CHEST_ITEMS.1 as i32);
        let chest = filled_chest(templates, count, &mut map.ids, rng);
        map.accept(chest, x, y);
    }
}

/// A chest instance holding `count` items drawn with replacement
fn filled_chest(
    templates: &TemplateSet,
    count: i32,
    ids: &mut IdAllocator,
    rng: &mut GameRng,
) -> Entity {
    let mut chest = templates.chest.instantiate(ids);
    for _ in 0..count {
        let Some(template) = rng.choose(&templates.items) else {
            break;
        };
        let item = template.instantiate(ids);
        if let Some(c) = chest.as_chest_mut() {
            c.items.push(item);
        }
    }
    chest
}

fn place_level_chest(
    map: &mut GameMap,
    room: &RectRoom,
    templates: &TemplateSet,
    rng: &mut GameRng,
) -> (Option<EntityId>, bool) {
    let (cx, cy) = room.center();
    let spot = std::iter::once((cx + 1, cy))
        .chain(room.inner_tiles())
        .find(|&(x, y)| {
            map.is_walkable(x, y) && !map.any_entity_at(x, y) && (x, y) != map.downstairs
        });
    let Some((x, y)) = spot else {
        warn!("no free tile left for the level chest");
        return (None, true);
    };

    if !rng.percent(LEVEL_CHEST_LOCK_PERCENT) {
        let count = rng.range(UNLOCKED_CHEST_ITEMS.0 as i32, UNLOCKED_CHEST_ITEMS.1 as i32);
        let mut chest = filled_chest(templates, count, &mut map.ids, rng);
        if let Some(c) = chest.as_chest_mut() {
            c.locked = false;
            c.breakable = true;
            c.chest_id = None;
        }
        return (Some(map.accept(chest, x, y)), true);
    }

    let chest_id = rng.range(1, MAX_CHEST_ID as i32) as u32;
    let count = rng.range(LOCKED_CHEST_ITEMS.0 as i32, LOCKED_CHEST_ITEMS.1 as i32);
    let mut chest = filled_chest(templates, count, &mut map.ids, rng);
    if let Some(c) = chest.as_chest_mut() {
        c.locked = true;
        c.breakable = false;
        c.chest_id = Some(chest_id);
    }
    let chest_entity = map.accept(chest, x, y);

    let free = map.free_floor_tiles();
    let Some(&(kx, ky)) = rng.choose(&free) else {
        warn!(chest_id, "locked level chest has no free tile for its key");
        return (Some(chest_entity), false);
    };
    let mut key = templates.key.instantiate(&mut map.ids);
    if let Some(item) = key.as_item_mut() {
        item.key_id = Some(chest_id);
    }
    map.accept(key, kx, ky);
    (Some(chest_entity), true)
}
