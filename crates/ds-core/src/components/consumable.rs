use serde::{Deserialize, Serialize};
use strum::Display;

/// Single-use item behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Consumable {
    /// Restores hp to the user
    Healing { amount: i32 },
    /// Strikes the closest visible actor within range
    Lightning { damage: i32, max_range: i32 },
    /// Burns every actor around a visible target tile
    Fireball { damage: i32, radius: i32 },
    /// Scrambles the AI of the actor on a visible target tile
    Confusion { turns: u32 },
}

/// What a consumable needs from the caller before it can fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Targeting {
    /// Acts on the user
    User,
    /// Picks its own target
    Automatic,
    /// Needs a target tile; affects everything within the radius
    Area,
    /// Needs a target tile holding an actor
    Single,
}

impl Consumable {
    pub const fn targeting(&self) -> Targeting {
        match self {
            Consumable::Healing { .. } => Targeting::User,
            Consumable::Lightning { .. } => Targeting::Automatic,
            Consumable::Fireball { .. } => Targeting::Area,
            Consumable::Confusion { .. } => Targeting::Single,
        }
    }

    pub const fn needs_target(&self) -> bool {
        matches!(self.targeting(), Targeting::Area | Targeting::Single)
    }
}
