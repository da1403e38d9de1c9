//! On-disk template format and its conversion into core templates

use std::collections::HashSet;
use std::str::FromStr;

use ds_core::ai::Ai;
use ds_core::components::{Consumable, Equippable, Fighter, Inventory, SpawnCurve};
use ds_core::data::{ArmorClass, EquipmentSlot, WeaponClass};
use ds_core::entity::{Actor, Chest, Entity, Item, Rgb};
use ds_core::templates::{MonsterTemplate, TemplateSet};
use serde::Deserialize;
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use crate::DataError;

/// Item behavior selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum BehaviorKind {
    Healing,
    Lightning,
    Fireball,
    Confusion,
    Weapon,
    Armor,
    Trinket,
}

#[derive(Debug, Deserialize)]
pub struct TemplateFile {
    pub player: ActorDef,
    pub monsters: Vec<MonsterDef>,
    pub items: Vec<ItemDef>,
    pub key: KeyDef,
    pub chest: ChestDef,
}

#[derive(Debug, Deserialize)]
pub struct Look {
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
}

#[derive(Debug, Deserialize)]
pub struct FighterDef {
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    #[serde(default)]
    pub dexterity: i32,
    #[serde(default)]
    pub range: i32,
}

#[derive(Debug, Deserialize)]
pub struct InventoryDef {
    pub capacity: i64,
    pub max_weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct ActorDef {
    #[serde(flatten)]
    pub look: Look,
    pub fighter: FighterDef,
    pub inventory: InventoryDef,
}

#[derive(Debug, Deserialize)]
pub struct MonsterDef {
    #[serde(flatten)]
    pub actor: ActorDef,
    #[serde(default = "default_ai")]
    pub ai: String,
    pub spawn_curve: SpawnCurve,
}

fn default_ai() -> String {
    "hostile".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ItemDef {
    #[serde(flatten)]
    pub look: Look,
    pub weight: f64,
    pub behavior: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct KeyDef {
    #[serde(flatten)]
    pub look: Look,
    pub weight: f64,
    #[serde(default)]
    pub key_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChestDef {
    #[serde(flatten)]
    pub look: Look,
    #[serde(default = "default_breakable")]
    pub breakable: bool,
}

fn default_breakable() -> bool {
    true
}

impl TemplateFile {
    /// Validate every record and build the core template set
    pub fn into_templates(self) -> Result<TemplateSet, DataError> {
        let mut names = HashSet::new();
        let mut claim = |name: &str| {
            if names.insert(name.to_string()) {
                Ok(())
            } else {
                Err(DataError::DuplicateName(name.to_string()))
            }
        };

        claim(&self.player.look.name)?;
        let player = self.player.into_entity()?;

        let mut monsters = Vec::with_capacity(self.monsters.len());
        for def in self.monsters {
            claim(&def.actor.look.name)?;
            monsters.push(def.into_template()?);
        }

        let mut items = Vec::with_capacity(self.items.len());
        for def in self.items {
            claim(&def.look.name)?;
            items.push(def.into_entity()?);
        }

        claim(&self.key.look.name)?;
        claim(&self.chest.look.name)?;
        let key_weight = non_negative_weight(&self.key.look.name, self.key.weight)?;
        let key = Entity::item(
            self.key.look.name,
            self.key.look.glyph,
            self.key.look.color,
            Item::key(key_weight, self.key.key_id),
        );
        let chest = Entity::chest(
            self.chest.look.name,
            self.chest.look.glyph,
            self.chest.look.color,
            Chest::new(self.chest.breakable),
        );

        let set = TemplateSet {
            player,
            monsters,
            items,
            key,
            chest,
        };
        set.check()?;
        Ok(set)
    }
}

impl ActorDef {
    fn into_entity(self) -> Result<Entity, DataError> {
        let name = self.look.name;
        if self.fighter.hp <= 0 {
            return Err(invalid(&name, "hp", "must be positive"));
        }
        let capacity = usize::try_from(self.inventory.capacity)
            .map_err(|_| invalid(&name, "capacity", "must not be negative"))?;
        let max_weight = non_negative_weight(&name, self.inventory.max_weight)?;

        let fighter = Fighter::new(self.fighter.hp, self.fighter.defense, self.fighter.power)
            .with_dexterity(self.fighter.dexterity)
            .with_range(self.fighter.range);
        let actor = Actor::new(fighter, Inventory::new(capacity, max_weight));
        Ok(Entity::actor(name, self.look.glyph, self.look.color, actor))
    }
}

impl MonsterDef {
    fn into_template(self) -> Result<MonsterTemplate, DataError> {
        let name = self.actor.look.name.clone();
        if self.ai != "hostile" {
            return Err(DataError::UnknownAi { name, ai: self.ai });
        }
        if !self.spawn_curve.is_well_formed() {
            return Err(DataError::BadSpawnCurve(name));
        }
        let mut entity = self.actor.into_entity()?;
        if let Some(actor) = entity.as_actor_mut() {
            actor.ai = Some(Ai::Hostile);
        }
        Ok(MonsterTemplate {
            entity,
            spawn_curve: self.spawn_curve,
        })
    }
}

impl ItemDef {
    fn into_entity(self) -> Result<Entity, DataError> {
        let name = self.look.name;
        let weight = non_negative_weight(&name, self.weight)?;
        let kind = BehaviorKind::from_str(&self.behavior).map_err(|_| DataError::UnknownBehavior {
            item: name.clone(),
            behavior: self.behavior.clone(),
        })?;
        let p = Params {
            item: &name,
            map: &self.params,
        };

        let item = match kind {
            BehaviorKind::Healing => Item::consumable(
                weight,
                Consumable::Healing {
                    amount: p.int("amount")?,
                },
            ),
            BehaviorKind::Lightning => Item::consumable(
                weight,
                Consumable::Lightning {
                    damage: p.int("damage")?,
                    max_range: p.int("max_range")?,
                },
            ),
            BehaviorKind::Fireball => Item::consumable(
                weight,
                Consumable::Fireball {
                    damage: p.int("damage")?,
                    radius: p.int("radius")?,
                },
            ),
            BehaviorKind::Confusion => {
                let turns = u32::try_from(p.int("turns")?)
                    .map_err(|_| invalid(&name, "turns", "must not be negative"))?;
                Item::consumable(weight, Consumable::Confusion { turns })
            }
            BehaviorKind::Weapon => {
                Item::equippable(weight, Equippable::weapon(p.word::<WeaponClass>("class")?))
            }
            BehaviorKind::Armor => {
                let mut eq = Equippable::armor(
                    p.word::<EquipmentSlot>("slot")?,
                    p.word::<ArmorClass>("armor_class")?,
                    p.int("defense")?,
                );
                if let Some(dex) = p.opt_int("dexterity")? {
                    eq.dexterity_bonus = dex;
                }
                Item::equippable(weight, eq)
            }
            BehaviorKind::Trinket => Item::equippable(
                weight,
                Equippable::trinket(p.word::<EquipmentSlot>("slot")?, p.int("dexterity")?),
            ),
        };
        Ok(Entity::item(name, self.look.glyph, self.look.color, item))
    }
}

/// Typed access to an item's free-form parameter map
struct Params<'a> {
    item: &'a str,
    map: &'a Map<String, Value>,
}

impl Params<'_> {
    fn int(&self, field: &'static str) -> Result<i32, DataError> {
        self.opt_int(field)?.ok_or_else(|| DataError::MissingField {
            item: self.item.to_string(),
            field,
        })
    }

    fn opt_int(&self, field: &'static str) -> Result<Option<i32>, DataError> {
        let Some(value) = self.map.get(field) else {
            return Ok(None);
        };
        value
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| invalid(self.item, field, "expected an integer"))
    }

    fn word<T: FromStr>(&self, field: &'static str) -> Result<T, DataError> {
        let value = self.map.get(field).ok_or_else(|| DataError::MissingField {
            item: self.item.to_string(),
            field,
        })?;
        value
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| invalid(self.item, field, &format!("unrecognized value {value}")))
    }
}

fn invalid(item: &str, field: &'static str, reason: &str) -> DataError {
    DataError::InvalidValue {
        item: item.to_string(),
        field,
        reason: reason.to_string(),
    }
}

fn non_negative_weight(item: &str, weight: f64) -> Result<f64, DataError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(invalid(item, "weight", "must be a finite, non-negative number"))
    }
}
