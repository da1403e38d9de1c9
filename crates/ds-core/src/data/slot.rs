use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Body slot an equippable item occupies
///
/// `Hands` is the weapon-bearing slot: power and range bonuses only count
/// from it, defense bonuses count from every other slot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    Hands,
    Torso,
    Arms,
    Gloves,
    Legs,
    Feet,
    Mouth,
    Eyes,
    Head,
    Shoulders,
    Ring,
    Necklace,
    Tabard,
}

impl EquipmentSlot {
    pub const WEAPON: EquipmentSlot = EquipmentSlot::Hands;

    pub const fn is_weapon_slot(self) -> bool {
        matches!(self, EquipmentSlot::Hands)
    }
}

/// Armor weight class
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArmorClass {
    #[default]
    Clothing,
    Light,
    Medium,
    Heavy,
}

impl ArmorClass {
    /// Dexterity penalty for wearing a piece of this class
    pub const fn dexterity_modifier(self) -> i32 {
        match self {
            ArmorClass::Clothing | ArmorClass::Light => 0,
            ArmorClass::Medium => -1,
            ArmorClass::Heavy => -2,
        }
    }
}
