use serde::{Deserialize, Serialize};

use crate::components::{Consumable, Equippable};

/// Payload of a pick-up-able entity.
///
/// In practice an item is either consumable or equippable; a `key_id`
/// unlocks chests carrying the same `chest_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub consumable: Option<Consumable>,
    pub equippable: Option<Equippable>,
    pub weight: f64,
    pub key_id: Option<u32>,
}

impl Item {
    pub fn new(weight: f64) -> Self {
        Self {
            consumable: None,
            equippable: None,
            weight,
            key_id: None,
        }
    }

    pub fn consumable(weight: f64, consumable: Consumable) -> Self {
        Self {
            consumable: Some(consumable),
            ..Self::new(weight)
        }
    }

    pub fn equippable(weight: f64, equippable: Equippable) -> Self {
        Self {
            equippable: Some(equippable),
            ..Self::new(weight)
        }
    }

    pub fn key(weight: f64, key_id: u32) -> Self {
        Self {
            key_id: Some(key_id),
            ..Self::new(weight)
        }
    }
}
