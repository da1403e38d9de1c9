//! One floor: terrain, entities, and what the player can see

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::Tile;
use crate::entity::{Entity, EntityId, IdAllocator};
use crate::error::IntegrityError;

/// A floor of the dungeon.
///
/// Grids are indexed `[x][y]`. `explored` only ever gains tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Vec<Tile>>,
    visible: Vec<Vec<bool>>,
    explored: Vec<Vec<bool>>,
    entities: Vec<Entity>,
    pub downstairs: (i32, i32),
    pub ids: IdAllocator,
}

impl GameMap {
    /// Solid rock of the given size
    pub fn new(width: i32, height: i32, ids: IdAllocator) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            width,
            height,
            tiles: vec![vec![Tile::Wall; h]; w],
            visible: vec![vec![false; h]; w],
            explored: vec![vec![false; h]; w],
            entities: Vec::new(),
            downstairs: (0, 0),
            ids,
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.in_bounds(x, y).then(|| self.tiles[x as usize][y as usize])
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            self.tiles[x as usize][y as usize] = tile;
        }
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_some_and(Tile::is_walkable)
    }

    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_some_and(Tile::is_transparent)
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.visible[x as usize][y as usize]
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.explored[x as usize][y as usize]
    }

    /// Replace the visible set and fold it into `explored`
    pub(crate) fn set_visible(&mut self, visible: Vec<Vec<bool>>) {
        for (col, vis_col) in self.explored.iter_mut().zip(&visible) {
            for (seen, &vis) in col.iter_mut().zip(vis_col) {
                *seen |= vis;
            }
        }
        self.visible = visible;
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    /// Living actors
    pub fn actors(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_alive())
    }

    pub fn entities_at(&self, x: i32, y: i32) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.x == x && e.y == y)
    }

    pub fn any_entity_at(&self, x: i32, y: i32) -> bool {
        self.entities_at(x, y).next().is_some()
    }

    /// First item lying on a tile
    pub fn item_at(&self, x: i32, y: i32) -> Option<EntityId> {
        self.entities_at(x, y).find(|e| e.as_item().is_some()).map(|e| e.id)
    }

    pub fn blocking_entity_at(&self, x: i32, y: i32) -> Option<EntityId> {
        self.entities_at(x, y).find(|e| e.blocks_movement).map(|e| e.id)
    }

    /// Living actor standing on a tile
    pub fn actor_at(&self, x: i32, y: i32) -> Option<EntityId> {
        self.entities_at(x, y).find(|e| e.is_alive()).map(|e| e.id)
    }

    /// Deep copy of a template, inserted at a location
    pub fn spawn(&mut self, template: &Entity, x: i32, y: i32) -> EntityId {
        let entity = template.instantiate(&mut self.ids);
        self.accept(entity, x, y)
    }

    /// Take ownership of an entity coming from elsewhere (an inventory, a
    /// chest, another floor) and put it at a location.
    pub fn accept(&mut self, mut entity: Entity, x: i32, y: i32) -> EntityId {
        let id = entity.id;
        if let Some(stale) = self.entities.iter().position(|e| e.id == id) {
            self.entities.remove(stale);
        }
        entity.x = x;
        entity.y = y;
        self.entities.push(entity);
        id
    }

    /// Move an entity already on this map to a new location.
    ///
    /// Removes then reinserts, so the entity is never listed twice.
    pub fn place(&mut self, id: EntityId, x: i32, y: i32) -> bool {
        match self.remove(id) {
            Some(entity) => {
                self.accept(entity, x, y);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Floor tiles with nothing on them
    pub fn free_floor_tiles(&self) -> Vec<(i32, i32)> {
        let mut free = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let floor = self.tiles[x as usize][y as usize].is_plain_floor();
                if floor && !self.any_entity_at(x, y) {
                    free.push((x, y));
                }
            }
        }
        free
    }

    /// Check that a map built outside the generator is safe to index.
    ///
    /// Every grid must be `width` columns of `height` cells, entities and
    /// stairs must lie on the map, and ids must be unique and below the
    /// allocator's next id.
    pub fn validate(&self) -> Result<(), IntegrityError> {
        let grids = [
            ("tile", grid_fits(&self.tiles, self.width, self.height)),
            ("visible", grid_fits(&self.visible, self.width, self.height)),
            ("explored", grid_fits(&self.explored, self.width, self.height)),
        ];
        if let Some(&(grid, _)) = grids.iter().find(|(_, fits)| !fits) {
            return Err(IntegrityError::GridShape {
                grid,
                width: self.width,
                height: self.height,
            });
        }

        let (sx, sy) = self.downstairs;
        if !self.in_bounds(sx, sy) {
            return Err(IntegrityError::StairsOutOfBounds(sx, sy));
        }

        let mut seen = HashSet::new();
        for entity in &self.entities {
            if !self.in_bounds(entity.x, entity.y) {
                return Err(IntegrityError::OutOfBounds {
                    id: entity.id,
                    x: entity.x,
                    y: entity.y,
                });
            }
            for id in entity.ids() {
                if !seen.insert(id) {
                    return Err(IntegrityError::DuplicateId(id));
                }
            }
        }

        let next = self.ids.peek();
        if let Some(highest) = seen.into_iter().max().filter(|&h| h >= next) {
            return Err(IntegrityError::StaleIdAllocator {
                next: next.0,
                highest: highest.0,
            });
        }
        Ok(())
    }

    /// ASCII picture of the explored map with visible entities on top
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = if !self.is_explored(x, y) {
                    ' '
                } else if self.is_visible(x, y) {
                    self.entities_at(x, y)
                        .max_by_key(|e| e.render_order)
                        .map_or(self.tiles[x as usize][y as usize].symbol(), |e| e.glyph)
                } else {
                    self.tiles[x as usize][y as usize].symbol()
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

/// `width` columns of `height` cells each
fn grid_fits<T>(grid: &[Vec<T>], width: i32, height: i32) -> bool {
    usize::try_from(width).is_ok_and(|w| grid.len() == w)
        && usize::try_from(height).is_ok_and(|h| grid.iter().all(|col| col.len() == h))
}
