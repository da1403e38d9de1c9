use serde::{Deserialize, Serialize};

use crate::data::{ArmorClass, DamageType, EquipmentSlot, WeaponClass};

/// Bonuses an item grants while worn.
///
/// Weapons and armor are data records built from their class rather than
/// distinct types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equippable {
    pub slot: EquipmentSlot,
    pub power_bonus: i32,
    pub defense_bonus: i32,
    pub dexterity_bonus: i32,
    pub range_bonus: i32,
    pub weapon: Option<WeaponClass>,
    pub armor: Option<ArmorClass>,
    pub damage_type: Option<DamageType>,
}

impl Equippable {
    /// A weapon held in the hands, stats taken from its class profile
    pub fn weapon(class: WeaponClass) -> Self {
        let profile = class.profile();
        Self {
            slot: EquipmentSlot::WEAPON,
            power_bonus: profile.power_bonus,
            defense_bonus: 0,
            dexterity_bonus: 0,
            range_bonus: profile.range,
            weapon: Some(class),
            armor: None,
            damage_type: Some(profile.damage_type),
        }
    }

    /// A worn piece; its class decides the dexterity penalty
    pub fn armor(slot: EquipmentSlot, class: ArmorClass, defense_bonus: i32) -> Self {
        Self {
            slot,
            power_bonus: 0,
            defense_bonus,
            dexterity_bonus: class.dexterity_modifier(),
            range_bonus: 0,
            weapon: None,
            armor: Some(class),
            damage_type: None,
        }
    }

    /// A trinket (ring, necklace...) with only a dexterity bonus
    pub fn trinket(slot: EquipmentSlot, dexterity_bonus: i32) -> Self {
        Self {
            slot,
            power_bonus: 0,
            defense_bonus: 0,
            dexterity_bonus,
            range_bonus: 0,
            weapon: None,
            armor: None,
            damage_type: None,
        }
    }
}
