use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::DamageType;

/// How a weapon reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum WeaponCategory {
    Melee,
    Ranged,
    Thrown,
}

/// Weapon model, keyed to a data record rather than a type per model
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WeaponClass {
    Dagger,
    Sword,
    Spear,
    Hammer,
    Axe,
    Bow,
    Pistol,
    Rifle,
    Launcher,
    Throwable,
}

/// Stat record for a weapon class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponProfile {
    pub category: WeaponCategory,
    pub damage_type: DamageType,
    pub power_bonus: i32,
    pub range: i32,
}

impl WeaponClass {
    pub const fn profile(self) -> WeaponProfile {
        use DamageType::*;
        use WeaponCategory::*;

        let (category, damage_type, power_bonus, range) = match self {
            WeaponClass::Dagger => (Melee, Piercing, 2, 1),
            WeaponClass::Sword => (Melee, Slashing, 3, 1),
            WeaponClass::Spear => (Melee, Piercing, 4, 2),
            WeaponClass::Hammer => (Melee, Blunt, 2, 1),
            WeaponClass::Axe => (Melee, Slashing, 3, 1),
            WeaponClass::Bow => (Ranged, Piercing, 3, 5),
            WeaponClass::Pistol => (Ranged, Piercing, 4, 7),
            WeaponClass::Rifle => (Ranged, Piercing, 5, 9),
            WeaponClass::Launcher => (Ranged, Crushing, 6, 6),
            WeaponClass::Throwable => (Thrown, Blunt, 1, 5),
        };
        WeaponProfile {
            category,
            damage_type,
            power_bonus,
            range,
        }
    }
}
