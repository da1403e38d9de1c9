use super::{ActionOutcome, TurnContext, impossible};
use crate::entity::{Actor, Entity, EntityId};
use crate::error::{ActionError, ContractViolation};

/// Pick up the first item lying under the actor
pub(super) fn pickup(ctx: &mut TurnContext, actor: EntityId) -> Result<ActionOutcome, ActionError> {
    let (x, y) = ctx.living_actor(actor)?.pos();
    let Some(item) = ctx.map.item_at(x, y) else {
        return Err(impossible("There is nothing here to pick up."));
    };

    let weight = ctx.map.entity(item).map_or(0.0, Entity::weight);
    pack(ctx, actor)?.inventory.can_hold(weight)?;

    let Some(entity) = ctx.map.remove(item) else {
        return Err(ContractViolation::new(format!("item {item} vanished from the map")).into());
    };
    let name = entity.name.clone();
    if let Err(rejected) = pack_mut(ctx, actor)?.inventory.insert(entity) {
        // can_hold passed, so this only happens on a broken invariant
        ctx.map.accept(*rejected.item, x, y);
        return Err(rejected.reason.into());
    }
    ctx.log.add(format!("You picked up the {name}!"));
    Ok(ActionOutcome::Performed)
}

/// Drop a carried item at the actor's feet, unequipping it first
pub(super) fn drop_item(
    ctx: &mut TurnContext,
    actor: EntityId,
    item: EntityId,
) -> Result<ActionOutcome, ActionError> {
    let (x, y) = ctx.living_actor(actor)?.pos();
    let carrier = pack_mut(ctx, actor)?;
    if !carrier.inventory.contains(item) {
        return Err(ContractViolation::new(format!("item {item} is not carried by {actor}")).into());
    }

    let unequipped = carrier.equipment.unequip(item).is_some();
    let Some(entity) = carrier.inventory.remove(item) else {
        return Err(ContractViolation::new(format!("item {item} is not carried by {actor}")).into());
    };
    let name = entity.name.clone();
    if unequipped {
        ctx.log.add(format!("You remove the {name}."));
    }
    ctx.map.accept(entity, x, y);
    ctx.log.add(format!("You dropped the {name}."));
    Ok(ActionOutcome::Performed)
}

fn pack<'a>(ctx: &'a TurnContext, id: EntityId) -> Result<&'a Actor, ContractViolation> {
    ctx.living_actor(id)?
        .as_actor()
        .ok_or_else(|| ContractViolation::new(format!("entity {id} has no inventory")))
}

fn pack_mut<'a>(
    ctx: &'a mut TurnContext,
    id: EntityId,
) -> Result<&'a mut Actor, ContractViolation> {
    ctx.living_actor_mut(id)?
        .as_actor_mut()
        .ok_or_else(|| ContractViolation::new(format!("entity {id} has no inventory")))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::super::{Action, perform};
    use super::*;
    use crate::components::Equippable;
    use crate::data::{ArmorClass, EquipmentSlot};
    use crate::entity::Item;

    #[test]
    fn test_pickup_moves_item_into_pack() {
        let mut fx = Fixture::new();
        let player = fx.player;
        let bottle = fx.floor_item("Bottle of Rotgut", Item::new(1.45), 2, 2);

        perform(Action::Pickup, player, &mut fx.ctx()).unwrap();
        assert!(!fx.map.contains(bottle));
        assert!(fx.actor(player).inventory.contains(bottle));
        assert_eq!(fx.last_message(), "You picked up the Bottle of Rotgut!");
    }

    #[test]
    fn test_pickup_nothing_here() {
        let mut fx = Fixture::new();
        let player = fx.player;
        let err = perform(Action::Pickup, player, &mut fx.ctx()).unwrap_err();
        assert!(matches!(err, ActionError::Impossible(_)));
    }

    #[test]
    fn test_pickup_too_heavy_leaves_item() {
        let mut fx = Fixture::new();
        let player = fx.player;
        let anvil = fx.floor_item("Anvil", Item::new(80.0), 2, 2);

        let err = perform(Action::Pickup, player, &mut fx.ctx()).unwrap_err();
        assert_eq!(err.to_string(), "You're too weak to carry any more.");
        assert!(fx.map.contains(anvil));
        assert!(fx.actor(player).inventory.is_empty());
    }

    #[test]
    fn test_pickup_full_pack() {
        let mut fx = Fixture::new();
        let player = fx.player;
        for i in 0..26 {
            fx.give(player, &format!("Pebble {i}"), Item::new(0.1));
        }
        fx.floor_item("Shiv", Item::new(0.5), 2, 2);
        let err = perform(Action::Pickup, player, &mut fx.ctx()).unwrap_err();
        assert_eq!(err.to_string(), "Your inventory is full.");
    }

    #[test]
    fn test_drop_equipped_item() {
        let mut fx = Fixture::new();
        let player = fx.player;
        let jacket = fx.give(
            player,
            "Leather Jacket",
            Item::equippable(3.0, Equippable::armor(EquipmentSlot::Torso, ArmorClass::Light, 1)),
        );
        perform(Action::ToggleEquip(jacket), player, &mut fx.ctx()).unwrap();
        assert_eq!(fx.actor(player).defense(), 3);

        perform(Action::Drop(jacket), player, &mut fx.ctx()).unwrap();
        assert_eq!(fx.actor(player).defense(), 2);
        assert!(!fx.actor(player).equipment.is_equipped(jacket));
        assert_eq!(fx.map.entity(jacket).map(Entity::pos), Some((2, 2)));
        assert_eq!(fx.last_message(), "You dropped the Leather Jacket.");
    }

    #[test]
    fn test_drop_uncarried_is_contract_violation() {
        let mut fx = Fixture::new();
        let player = fx.player;
        let loose = fx.floor_item("Shiv", Item::new(0.5), 4, 4);
        let err = perform(Action::Drop(loose), player, &mut fx.ctx()).unwrap_err();
        assert!(matches!(err, ActionError::Contract(_)));
    }
}
