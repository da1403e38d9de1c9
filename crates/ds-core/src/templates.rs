//! Entity templates
//!
//! The generator and new-game setup only ever instantiate copies of these.

use serde::{Deserialize, Serialize};

use crate::components::{Consumable, Equippable, Fighter, Inventory, SpawnCurve};
use crate::data::{ArmorClass, EquipmentSlot, WeaponClass};
use crate::entity::{Actor, Chest, Entity, Item};
use crate::error::GenerationError;

/// A monster and how likely it is to show up by depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub entity: Entity,
    pub spawn_curve: SpawnCurve,
}

/// Everything the generator needs to populate a floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSet {
    pub player: Entity,
    pub monsters: Vec<MonsterTemplate>,
    /// Loot pool for rooms and chests
    pub items: Vec<Entity>,
    /// Key placed alongside a locked level chest
    pub key: Entity,
    pub chest: Entity,
}

impl TemplateSet {
    /// Spawn weights of every monster on a floor
    pub fn spawn_weights(&self, floor: i32) -> Vec<f64> {
        self.monsters.iter().map(|m| m.spawn_curve.weight_at(floor)).collect()
    }

    pub fn check(&self) -> Result<(), GenerationError> {
        if self.monsters.is_empty() {
            return Err(GenerationError::MissingTemplates("monster"));
        }
        if self.items.is_empty() {
            return Err(GenerationError::MissingTemplates("item"));
        }
        Ok(())
    }

    /// The stock DIESEL roster
    pub fn builtin() -> Self {
        Self {
            player: Entity::actor(
                "Player",
                '@',
                [255, 255, 255],
                Actor::new(Fighter::new(30, 2, 5), Inventory::new(26, 55.0)),
            ),
            monsters: vec![
                monster(
                    ("Drifter", 'v', [127, 63, 63]),
                    Fighter::new(10, 0, 3),
                    (26, 55.0),
                    SpawnCurve::new(0.2, 1.0, 1, 2, 8),
                ),
                monster(
                    ("Bandit", 'b', [120, 70, 40]),
                    Fighter::new(5, 4, 1),
                    (26, 55.0),
                    SpawnCurve::new(0.0, 0.8, 1, 4, 10),
                ),
                monster(
                    ("Junkie", 'V', [0, 127, 0]),
                    Fighter::new(16, 1, 3),
                    (26, 55.0),
                    SpawnCurve::new(0.0, 0.9, 2, 6, 12),
                ),
                monster(
                    ("Mangy Dog", 'c', [120, 60, 30]),
                    Fighter::new(1, 0, 5),
                    (1, 30.0),
                    SpawnCurve::new(0.1, 0.7, 1, 3, 9),
                ),
                monster(
                    ("Mad Mechanic", 'm', [120, 60, 120]),
                    Fighter::new(20, -2, 1),
                    (26, 55.0),
                    SpawnCurve::new(0.0, 1.0, 3, 8, 15),
                ),
            ],
            items: vec![
                consumable(
                    ("Bottle of Rotgut", '!', [255, 0, 100]),
                    1.45,
                    Consumable::Healing { amount: 4 },
                ),
                consumable(
                    ("Busted Battery", '}', [200, 200, 0]),
                    0.07,
                    Consumable::Lightning {
                        damage: 15,
                        max_range: 5,
                    },
                ),
                consumable(
                    ("Dazzle Launcher", '=', [207, 63, 255]),
                    1.34,
                    Consumable::Confusion { turns: 10 },
                ),
                consumable(
                    ("Molotov Cocktail", '~', [255, 0, 0]),
                    1.65,
                    Consumable::Fireball {
                        damage: 12,
                        radius: 3,
                    },
                ),
                equippable(
                    ("Shiv", '/', [0, 191, 255]),
                    0.5,
                    Equippable::weapon(WeaponClass::Dagger),
                ),
                equippable(
                    ("Machete", '/', [0, 191, 255]),
                    1.8,
                    Equippable::weapon(WeaponClass::Sword),
                ),
                equippable(
                    ("Pipe Wrench", '/', [139, 69, 19]),
                    2.2,
                    Equippable::weapon(WeaponClass::Hammer),
                ),
                equippable(
                    ("Leather Jacket", '[', [139, 69, 19]),
                    3.0,
                    Equippable::armor(EquipmentSlot::Torso, ArmorClass::Light, 1),
                ),
                equippable(
                    ("Riot Helmet", '[', [90, 90, 90]),
                    1.5,
                    Equippable::armor(EquipmentSlot::Head, ArmorClass::Medium, 2),
                ),
            ],
            key: Entity::item("Key", ';', [100, 100, 100], Item::key(0.01, 0)),
            chest: Entity::chest("Crate", 'C', [150, 150, 50], Chest::new(true)),
        }
    }
}

/// Name, glyph and color of a template
type Look = (&'static str, char, [u8; 3]);

fn monster(
    (name, glyph, color): Look,
    fighter: Fighter,
    (capacity, max_weight): (usize, f64),
    spawn_curve: SpawnCurve,
) -> MonsterTemplate {
    let actor = Actor::new(fighter, Inventory::new(capacity, max_weight));
    MonsterTemplate {
        entity: Entity::actor(name, glyph, color, actor),
        spawn_curve,
    }
}

fn consumable((name, glyph, color): Look, weight: f64, effect: Consumable) -> Entity {
    Entity::item(name, glyph, color, Item::consumable(weight, effect))
}

fn equippable((name, glyph, color): Look, weight: f64, gear: Equippable) -> Entity {
    Entity::item(name, glyph, color, Item::equippable(weight, gear))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_usable() {
        let set = TemplateSet::builtin();
        assert!(set.check().is_ok());
        assert!(set.player.is_alive());
        assert!(set.monsters.iter().all(|m| m.spawn_curve.is_well_formed()));
        assert!(set.spawn_weights(1).iter().any(|&w| w > 0.0));
        assert!(set.key.as_item().is_some_and(|i| i.key_id.is_some()));
    }
}
