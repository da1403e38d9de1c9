//! Entity model
//!
//! Every object on a floor is an [`Entity`]: a position, display data, and a
//! kind-specific payload. An entity is owned by exactly one container at a
//! time (a map's entity list, an inventory, or a chest), which Rust's
//! ownership enforces: moving between containers is a move of the value.

mod actor;
mod chest;
mod item;

pub use actor::Actor;
pub use chest::Chest;
pub use item::Item;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ai::Ai;
use crate::components::{Consumable, Equippable};
use crate::consts::{CORPSE_COLOR, CORPSE_GLYPH};
use crate::data::RenderOrder;

/// RGB display color
pub type Rgb = [u8; 3];

/// Unique identifier of an entity within a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out entity ids. Carried from floor to floor so ids never repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// The id the next `allocate` hands out
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }
}

/// Kind-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Actor(Box<Actor>),
    Item(Item),
    Chest(Chest),
}

/// Record of an actor's death, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Death {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

impl Entity {
    fn new(
        name: impl Into<String>,
        glyph: char,
        color: Rgb,
        blocks: bool,
        order: RenderOrder,
        kind: EntityKind,
    ) -> Self {
        Self {
            id: EntityId::default(),
            x: 0,
            y: 0,
            glyph,
            color,
            name: name.into(),
            blocks_movement: blocks,
            render_order: order,
            kind,
        }
    }

    pub fn actor(name: impl Into<String>, glyph: char, color: Rgb, actor: Actor) -> Self {
        Self::new(name, glyph, color, true, RenderOrder::Actor, EntityKind::Actor(Box::new(actor)))
    }

    pub fn item(name: impl Into<String>, glyph: char, color: Rgb, item: Item) -> Self {
        Self::new(name, glyph, color, false, RenderOrder::Item, EntityKind::Item(item))
    }

    pub fn chest(name: impl Into<String>, glyph: char, color: Rgb, chest: Chest) -> Self {
        Self::new(name, glyph, color, true, RenderOrder::Actor, EntityKind::Chest(chest))
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match &self.kind {
            EntityKind::Actor(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.kind {
            EntityKind::Actor(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match &self.kind {
            EntityKind::Item(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut Item> {
        match &mut self.kind {
            EntityKind::Item(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_chest(&self) -> Option<&Chest> {
        match &self.kind {
            EntityKind::Chest(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_chest_mut(&mut self) -> Option<&mut Chest> {
        match &mut self.kind {
            EntityKind::Chest(c) => Some(c),
            _ => None,
        }
    }

    /// True for an actor whose AI is still present
    pub fn is_alive(&self) -> bool {
        self.as_actor().is_some_and(Actor::is_alive)
    }

    /// Carry weight; zero for anything that is not an item
    pub fn weight(&self) -> f64 {
        self.as_item().map_or(0.0, |i| i.weight)
    }

    pub fn consumable(&self) -> Option<&Consumable> {
        self.as_item().and_then(|i| i.consumable.as_ref())
    }

    pub fn equippable(&self) -> Option<&Equippable> {
        self.as_item().and_then(|i| i.equippable.as_ref())
    }

    pub fn pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Euclidean distance to a tile
    pub fn distance(&self, x: i32, y: i32) -> f64 {
        let dx = f64::from(x - self.x);
        let dy = f64::from(y - self.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Deep copy with fresh ids for this entity and everything it holds.
    ///
    /// The source is left untouched, so templates can be instantiated
    /// any number of times.
    pub fn instantiate(&self, ids: &mut IdAllocator) -> Entity {
        let mut copy = self.clone();
        copy.assign_fresh_ids(ids);
        copy
    }

    fn assign_fresh_ids(&mut self, ids: &mut IdAllocator) {
        self.id = ids.allocate();
        match &mut self.kind {
            EntityKind::Actor(actor) => {
                let mut remapped = Vec::new();
                for item in actor.inventory.items_mut() {
                    let old = item.id;
                    item.assign_fresh_ids(ids);
                    remapped.push((old, item.id));
                }
                actor.equipment.remap(&remapped);
            }
            EntityKind::Chest(chest) => {
                for item in &mut chest.items {
                    item.assign_fresh_ids(ids);
                }
            }
            EntityKind::Item(_) => {}
        }
    }

    /// Ids of this entity and of everything it holds, depth first
    pub fn ids(&self) -> Vec<EntityId> {
        let mut out = vec![self.id];
        let held: &[Entity] = match &self.kind {
            EntityKind::Actor(actor) => actor.inventory.items(),
            EntityKind::Chest(chest) => &chest.items,
            EntityKind::Item(_) => &[],
        };
        for entity in held {
            out.extend(entity.ids());
        }
        out
    }

    /// Set hp through the clamp. Returns the death if this write killed
    /// the actor; later writes on the remains never report again.
    pub fn set_hp(&mut self, value: i32) -> Option<Death> {
        let actor = self.as_actor_mut()?;
        actor.fighter.set_hp(value);
        if actor.fighter.hp() == 0 && actor.ai.is_some() {
            Some(self.die())
        } else {
            None
        }
    }

    pub fn take_damage(&mut self, amount: i32) -> Option<Death> {
        let hp = self.as_actor()?.fighter.hp();
        self.set_hp(hp.saturating_sub(amount))
    }

    fn die(&mut self) -> Death {
        let death = Death {
            id: self.id,
            name: self.name.clone(),
        };
        if let Some(actor) = self.as_actor_mut() {
            actor.ai = None;
        }
        self.glyph = CORPSE_GLYPH;
        self.color = CORPSE_COLOR;
        self.blocks_movement = false;
        self.name = format!("remains of {}", death.name);
        self.render_order = RenderOrder::Corpse;
        death
    }

    /// Replace the AI of a living actor, returning the previous one
    pub fn replace_ai(&mut self, ai: Ai) -> Option<Ai> {
        let actor = self.as_actor_mut()?;
        actor.ai.replace(ai)
    }
}
