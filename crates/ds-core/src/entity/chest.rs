use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};
use crate::consts::{SPENT_CHEST_COLOR, SPENT_CHEST_GLYPH};
use crate::data::RenderOrder;
use crate::error::Impossible;

/// A container that releases its items once, when opened or broken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    pub locked: bool,
    pub breakable: bool,
    /// Only meaningful while locked
    pub chest_id: Option<u32>,
    pub items: Vec<Entity>,
    spent: bool,
}

impl Chest {
    pub fn new(breakable: bool) -> Self {
        Self {
            locked: false,
            breakable,
            chest_id: None,
            items: Vec::new(),
            spent: false,
        }
    }

    /// Locked chests cannot be broken; only the matching key opens them.
    pub fn locked(chest_id: u32) -> Self {
        Self {
            locked: true,
            breakable: false,
            chest_id: Some(chest_id),
            items: Vec::new(),
            spent: false,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }

    fn release(&mut self) -> Vec<Entity> {
        self.spent = true;
        self.locked = false;
        self.breakable = false;
        self.chest_id = None;
        std::mem::take(&mut self.items)
    }
}

impl Entity {
    /// Open a chest with the given keys and take its contents.
    ///
    /// A spent chest yields nothing, without error.
    pub fn open_chest(
        &mut self,
        mut keys: impl Iterator<Item = u32>,
    ) -> Result<Vec<Entity>, Impossible> {
        let name = self.name.clone();
        let EntityKind::Chest(chest) = &mut self.kind else {
            return Err(Impossible::new("There is nothing to open."));
        };
        if chest.spent {
            return Ok(Vec::new());
        }
        if chest.locked {
            let id = chest.chest_id;
            if !id.is_some_and(|id| keys.any(|k| k == id)) {
                return Err(Impossible::new(format!("The {name} needs a key.")));
            }
        }
        let items = chest.release();
        self.mark_spent("opened");
        Ok(items)
    }

    /// Smash a breakable chest and take its contents
    pub fn break_chest(&mut self) -> Result<Vec<Entity>, Impossible> {
        let EntityKind::Chest(chest) = &mut self.kind else {
            return Err(Impossible::new("There is nothing to break."));
        };
        if chest.spent {
            return Ok(Vec::new());
        }
        if !chest.breakable {
            return Err(Impossible::new("This container can't be broken."));
        }
        let items = chest.release();
        self.mark_spent("broken");
        Ok(items)
    }

    fn mark_spent(&mut self, how: &str) {
        self.name = format!("{how} {}", self.name.to_lowercase());
        self.glyph = SPENT_CHEST_GLYPH;
        self.color = SPENT_CHEST_COLOR;
        self.blocks_movement = false;
        self.render_order = RenderOrder::Corpse;
    }
}
