//! Slot-based bonus aggregation
//!
//! Slots hold item ids, resolved through the owner's inventory on every
//! read, so bonuses always reflect what is currently worn.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Equippable, Inventory};
use crate::data::{EquipmentSlot, WeaponClass};
use crate::entity::EntityId;
use crate::error::ContractViolation;

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipChange {
    Equipped {
        item: EntityId,
        replaced: Option<EntityId>,
    },
    Unequipped(EntityId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    slots: BTreeMap<EquipmentSlot, EntityId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit slot assignments.
    ///
    /// Every item must be carried, equippable, and meant for the slot it is
    /// assigned to.
    pub fn from_slots(
        pairs: impl IntoIterator<Item = (EquipmentSlot, EntityId)>,
        inventory: &Inventory,
    ) -> Result<Self, ContractViolation> {
        let mut equipment = Self::new();
        for (slot, id) in pairs {
            let entity = inventory
                .get(id)
                .ok_or_else(|| ContractViolation::new(format!("item {id} is not carried")))?;
            let equippable = entity.equippable().ok_or_else(|| {
                ContractViolation::new(format!("{} is not equippable", entity.name))
            })?;
            if equippable.slot != slot {
                return Err(ContractViolation::new(format!(
                    "{} belongs in {}, not {}",
                    entity.name, equippable.slot, slot
                )));
            }
            if equipment.slots.insert(slot, id).is_some() {
                return Err(ContractViolation::new(format!("slot {slot} assigned twice")));
            }
        }
        Ok(equipment)
    }

    pub fn item_in(&self, slot: EquipmentSlot) -> Option<EntityId> {
        self.slots.get(&slot).copied()
    }

    pub fn is_equipped(&self, id: EntityId) -> bool {
        self.slots.values().any(|&v| v == id)
    }

    pub fn slots(&self) -> impl Iterator<Item = (EquipmentSlot, EntityId)> + '_ {
        self.slots.iter().map(|(&s, &id)| (s, id))
    }

    /// Equip `item` into `slot`, or take it off if it is already there.
    pub fn toggle(&mut self, item: EntityId, slot: EquipmentSlot) -> EquipChange {
        match self.slots.get(&slot) {
            Some(&current) if current == item => {
                self.slots.remove(&slot);
                EquipChange::Unequipped(item)
            }
            _ => {
                let replaced = self.slots.insert(slot, item);
                EquipChange::Equipped { item, replaced }
            }
        }
    }

    /// Forget an item wherever it is worn
    pub fn unequip(&mut self, item: EntityId) -> Option<EquipmentSlot> {
        let slot = self.slots.iter().find(|&(_, &v)| v == item).map(|(&s, _)| s)?;
        self.slots.remove(&slot);
        Some(slot)
    }

    pub(crate) fn remap(&mut self, pairs: &[(EntityId, EntityId)]) {
        for id in self.slots.values_mut() {
            if let Some(&(_, new)) = pairs.iter().find(|(old, _)| old == id) {
                *id = new;
            }
        }
    }

    fn worn<'a>(
        &'a self,
        inventory: &'a Inventory,
    ) -> impl Iterator<Item = (EquipmentSlot, &'a Equippable)> + 'a {
        self.slots.iter().filter_map(move |(&slot, &id)| {
            inventory.get(id).and_then(|e| e.equippable()).map(|eq| (slot, eq))
        })
    }

    /// Power from the weapon slot
    pub fn power_bonus(&self, inventory: &Inventory) -> i32 {
        self.worn(inventory)
            .filter(|(slot, _)| slot.is_weapon_slot())
            .map(|(_, eq)| eq.power_bonus)
            .sum()
    }

    /// Range from the weapon slot
    pub fn range_bonus(&self, inventory: &Inventory) -> i32 {
        self.worn(inventory)
            .filter(|(slot, _)| slot.is_weapon_slot())
            .map(|(_, eq)| eq.range_bonus)
            .sum()
    }

    /// Defense from every slot except the weapon slot
    pub fn defense_bonus(&self, inventory: &Inventory) -> i32 {
        self.worn(inventory)
            .filter(|(slot, _)| !slot.is_weapon_slot())
            .map(|(_, eq)| eq.defense_bonus)
            .sum()
    }

    /// Dexterity from every slot
    pub fn dexterity_bonus(&self, inventory: &Inventory) -> i32 {
        self.worn(inventory).map(|(_, eq)| eq.dexterity_bonus).sum()
    }

    /// Class of the weapon in hand, if any
    pub fn weapon_class(&self, inventory: &Inventory) -> Option<WeaponClass> {
        self.worn(inventory)
            .find(|(slot, _)| slot.is_weapon_slot())
            .and_then(|(_, eq)| eq.weapon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ArmorClass;
    use crate::entity::{Entity, Item};

    fn carried(inv: &mut Inventory, id: u32, equippable: Option<Equippable>) -> EntityId {
        let mut item = Item::new(1.0);
        item.equippable = equippable;
        let mut e = Entity::item("Gear", '[', [0, 0, 0], item);
        e.id = EntityId(id);
        inv.insert(e).unwrap();
        EntityId(id)
    }

    #[test]
    fn test_bonus_scoping() {
        let mut inv = Inventory::new(10, 50.0);
        let sword = carried(&mut inv, 1, Some(Equippable::weapon(WeaponClass::Sword)));
        let vest = carried(
            &mut inv,
            2,
            Some(Equippable::armor(EquipmentSlot::Torso, ArmorClass::Heavy, 3)),
        );
        let eq = Equipment::from_slots(
            [(EquipmentSlot::Hands, sword), (EquipmentSlot::Torso, vest)],
            &inv,
        )
        .unwrap();

        assert_eq!(eq.power_bonus(&inv), 3);
        assert_eq!(eq.range_bonus(&inv), 1);
        assert_eq!(eq.defense_bonus(&inv), 3);
        assert_eq!(eq.dexterity_bonus(&inv), -2);
        assert_eq!(eq.weapon_class(&inv), Some(WeaponClass::Sword));
    }

    #[test]
    fn test_toggle_replaces_and_removes() {
        let mut eq = Equipment::new();
        let a = EntityId(1);
        let b = EntityId(2);

        assert_eq!(
            eq.toggle(a, EquipmentSlot::Hands),
            EquipChange::Equipped {
                item: a,
                replaced: None
            }
        );
        assert_eq!(
            eq.toggle(b, EquipmentSlot::Hands),
            EquipChange::Equipped {
                item: b,
                replaced: Some(a)
            }
        );
        assert!(!eq.is_equipped(a));
        assert_eq!(eq.toggle(b, EquipmentSlot::Hands), EquipChange::Unequipped(b));
        assert_eq!(eq.item_in(EquipmentSlot::Hands), None);
    }

    #[test]
    fn test_from_slots_rejects_bad_pairs() {
        let mut inv = Inventory::new(10, 50.0);
        let rock = carried(&mut inv, 1, None);
        let dagger = carried(&mut inv, 2, Some(Equippable::weapon(WeaponClass::Dagger)));

        assert!(Equipment::from_slots([(EquipmentSlot::Hands, rock)], &inv).is_err());
        assert!(Equipment::from_slots([(EquipmentSlot::Head, dagger)], &inv).is_err());
        assert!(Equipment::from_slots([(EquipmentSlot::Hands, EntityId(99))], &inv).is_err());
        assert!(Equipment::from_slots([(EquipmentSlot::Hands, dagger)], &inv).is_ok());
    }
}
