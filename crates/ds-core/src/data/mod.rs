//! Value definitions: damage types, equipment slots, armor and weapon classes
//!
//! Pure data with no behavior beyond lookups.

mod damage_type;
mod slot;
mod weapon;

pub use damage_type::DamageType;
pub use slot::{ArmorClass, EquipmentSlot};
pub use weapon::{WeaponCategory, WeaponClass, WeaponProfile};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Draw precedence; also decides which entity a tile "shows".
///
/// Ordered lowest first, so an actor outranks an item outranks remains.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum RenderOrder {
    Corpse,
    #[default]
    Item,
    Actor,
}
