use serde::{Deserialize, Serialize};

use crate::ai::Ai;
use crate::components::{EquipChange, Equipment, Fighter, Inventory, SkillKind, SkillList};
use crate::consts::SKILL_XP_AWARD;
use crate::entity::EntityId;
use crate::error::ContractViolation;

/// A living, turn-taking entity.
///
/// `ai == None` means dead; the transition is one-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub ai: Option<Ai>,
    pub fighter: Fighter,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub skills: SkillList,
}

impl Actor {
    pub fn new(fighter: Fighter, inventory: Inventory) -> Self {
        Self {
            ai: Some(Ai::Hostile),
            fighter,
            equipment: Equipment::new(),
            inventory,
            skills: SkillList::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.ai.is_some()
    }

    pub fn power(&self) -> i32 {
        self.fighter.base_power + self.equipment.power_bonus(&self.inventory)
    }

    pub fn defense(&self) -> i32 {
        self.fighter.base_defense + self.equipment.defense_bonus(&self.inventory)
    }

    pub fn dexterity(&self) -> i32 {
        self.fighter.base_dexterity + self.equipment.dexterity_bonus(&self.inventory)
    }

    pub fn range(&self) -> i32 {
        self.fighter.base_range + self.equipment.range_bonus(&self.inventory)
    }

    /// Heal and train First Aid when anything was recovered
    pub fn heal(&mut self, amount: i32) -> i32 {
        let recovered = self.fighter.heal(amount);
        if recovered > 0 {
            self.skills.add_xp(SkillKind::FirstAid, SKILL_XP_AWARD);
        }
        recovered
    }

    /// Award the standard experience grant; returns levels gained
    pub fn train(&mut self, skill: SkillKind) -> u32 {
        self.skills.add_xp(skill, SKILL_XP_AWARD)
    }

    /// Toggle a carried item in or out of its slot
    pub fn toggle_equip(&mut self, item: EntityId) -> Result<EquipChange, ContractViolation> {
        let entity = self
            .inventory
            .get(item)
            .ok_or_else(|| ContractViolation::new(format!("item {item} is not carried")))?;
        let slot = entity
            .equippable()
            .map(|eq| eq.slot)
            .ok_or_else(|| ContractViolation::new(format!("{} is not equippable", entity.name)))?;
        Ok(self.equipment.toggle(item, slot))
    }

    /// Display name of a carried item
    pub fn item_name(&self, item: EntityId) -> Option<&str> {
        self.inventory.get(item).map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Equippable;
    use crate::data::{ArmorClass, EquipmentSlot, WeaponClass};
    use crate::entity::{Entity, Item};

    fn carry(actor: &mut Actor, id: u32, eq: Option<Equippable>) -> EntityId {
        let mut item = Item::new(1.0);
        item.equippable = eq;
        let mut e = Entity::item("Gear", ')', [0, 0, 0], item);
        e.id = EntityId(id);
        actor.inventory.insert(e).unwrap();
        EntityId(id)
    }

    #[test]
    fn test_derived_stats_follow_equipment() {
        let mut actor = Actor::new(Fighter::new(30, 2, 5), Inventory::new(26, 55.0));
        let spear = carry(&mut actor, 1, Some(Equippable::weapon(WeaponClass::Spear)));
        let helmet = carry(
            &mut actor,
            2,
            Some(Equippable::armor(EquipmentSlot::Head, ArmorClass::Medium, 2)),
        );

        assert_eq!(actor.power(), 5);
        actor.toggle_equip(spear).unwrap();
        actor.toggle_equip(helmet).unwrap();
        assert_eq!(actor.power(), 9);
        assert_eq!(actor.range(), 2);
        assert_eq!(actor.defense(), 4);
        assert_eq!(actor.dexterity(), -1);

        actor.toggle_equip(spear).unwrap();
        assert_eq!(actor.power(), 5);
    }

    #[test]
    fn test_toggle_non_equippable_is_contract_violation() {
        let mut actor = Actor::new(Fighter::new(10, 0, 1), Inventory::new(5, 10.0));
        let rock = carry(&mut actor, 1, None);
        assert!(actor.toggle_equip(rock).is_err());
        assert!(actor.toggle_equip(EntityId(77)).is_err());
    }

    #[test]
    fn test_heal_trains_first_aid() {
        let mut actor = Actor::new(Fighter::new(10, 0, 1), Inventory::new(5, 10.0));
        assert_eq!(actor.heal(5), 0);
        assert_eq!(actor.skills.get(SkillKind::FirstAid).unwrap().xp(), 0);

        actor.fighter.set_hp(3);
        assert_eq!(actor.heal(5), 5);
        assert_eq!(actor.skills.get(SkillKind::FirstAid).unwrap().xp(), SKILL_XP_AWARD);
    }
}
