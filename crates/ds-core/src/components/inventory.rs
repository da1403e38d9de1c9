//! Capacity- and weight-bounded item container

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::error::Impossible;

/// An item handed back because it did not fit
#[derive(Debug)]
pub struct Rejected {
    pub reason: Impossible,
    pub item: Box<Entity>,
}

/// Ordered list of carried items.
///
/// Both bounds are checked at insertion; a rejected insert leaves the
/// inventory untouched and hands the item back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub capacity: usize,
    pub max_weight: f64,
    items: Vec<Entity>,
}

impl Inventory {
    pub fn new(capacity: usize, max_weight: f64) -> Self {
        Self {
            capacity,
            max_weight,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Entity] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(Entity::weight).sum()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.items.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Check whether an item of `weight` would fit, count first
    pub fn can_hold(&self, weight: f64) -> Result<(), Impossible> {
        if self.items.len() >= self.capacity {
            return Err(Impossible::new("Your inventory is full."));
        }
        if self.total_weight() + weight > self.max_weight {
            return Err(Impossible::new("You're too weak to carry any more."));
        }
        Ok(())
    }

    pub fn insert(&mut self, item: Entity) -> Result<(), Rejected> {
        if let Err(reason) = self.can_hold(item.weight()) {
            return Err(Rejected {
                reason,
                item: Box::new(item),
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.items.iter().position(|e| e.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Key identifiers of every key carried
    pub fn key_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.items
            .iter()
            .filter_map(|e| e.as_item().and_then(|i| i.key_id))
    }

    pub fn has_key(&self, chest_id: u32) -> bool {
        self.key_ids().any(|k| k == chest_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityId, Item};

    fn thing(id: u32, weight: f64) -> Entity {
        let mut e = Entity::item("Thing", '*', [255, 255, 255], Item::new(weight));
        e.id = EntityId(id);
        e
    }

    #[test]
    fn test_capacity_bound() {
        let mut inv = Inventory::new(2, 100.0);
        inv.insert(thing(1, 1.0)).unwrap();
        inv.insert(thing(2, 1.0)).unwrap();

        let rejected = inv.insert(thing(3, 1.0)).unwrap_err();
        assert_eq!(rejected.item.id, EntityId(3));
        assert_eq!(rejected.reason.message(), "Your inventory is full.");
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_weight_bound() {
        let mut inv = Inventory::new(10, 2.0);
        inv.insert(thing(1, 1.5)).unwrap();
        assert!(inv.insert(thing(2, 0.6)).is_err());
        inv.insert(thing(3, 0.5)).unwrap();
        assert_eq!(inv.len(), 2);
        assert!(inv.total_weight() <= inv.max_weight);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut inv = Inventory::new(5, 10.0);
        for id in 1..=3 {
            inv.insert(thing(id, 0.1)).unwrap();
        }
        assert_eq!(inv.remove(EntityId(2)).map(|e| e.id), Some(EntityId(2)));
        assert!(inv.remove(EntityId(2)).is_none());
        let ids: Vec<_> = inv.items().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_key_lookup() {
        let mut inv = Inventory::new(5, 10.0);
        let mut key = thing(1, 0.01);
        if let Some(item) = key.as_item_mut() {
            item.key_id = Some(4242);
        }
        inv.insert(key).unwrap();
        inv.insert(thing(2, 0.5)).unwrap();

        assert!(inv.has_key(4242));
        assert!(!inv.has_key(7));
        assert_eq!(inv.key_ids().collect::<Vec<_>>(), vec![4242]);
    }
}
