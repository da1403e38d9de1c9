use super::{ActionOutcome, Direction, TurnContext, destination, impossible, melee};
use crate::entity::{Entity, EntityId};
use crate::error::ActionError;

/// Melee whatever is alive at the destination, otherwise move there
pub(super) fn bump(
    ctx: &mut TurnContext,
    actor: EntityId,
    dir: Direction,
) -> Result<ActionOutcome, ActionError> {
    let (dx, dy) = destination(ctx.living_actor(actor)?, dir);
    if ctx.map.actor_at(dx, dy).is_some() {
        melee::attack(ctx, actor, dir)
    } else {
        move_actor(ctx, actor, dir)
    }
}

/// Step one tile, or open/break a container blocking the way
pub(super) fn move_actor(
    ctx: &mut TurnContext,
    actor: EntityId,
    dir: Direction,
) -> Result<ActionOutcome, ActionError> {
    let (x, y) = destination(ctx.living_actor(actor)?, dir);

    if !ctx.map.in_bounds(x, y) {
        return Err(impossible("You can't walk off the edge of the world."));
    }
    if !ctx.map.is_walkable(x, y) {
        return Err(impossible("That way is blocked."));
    }

    if let Some(blocker) = ctx.map.blocking_entity_at(x, y) {
        let is_chest = ctx.map.entity(blocker).and_then(Entity::as_chest).is_some();
        if !is_chest {
            return Err(impossible("That way is blocked."));
        }
        return open_container(ctx, actor, blocker, (x, y));
    }

    if let Some(entity) = ctx.map.entity_mut(actor) {
        entity.x = x;
        entity.y = y;
    }
    Ok(ActionOutcome::Performed)
}

/// Break the container if it can be broken, otherwise try to open it;
/// released items land on the container's tile.
fn open_container(
    ctx: &mut TurnContext,
    actor: EntityId,
    chest: EntityId,
    (x, y): (i32, i32),
) -> Result<ActionOutcome, ActionError> {
    let keys: Vec<u32> = ctx
        .living_actor(actor)?
        .as_actor()
        .map(|a| a.inventory.key_ids().collect())
        .unwrap_or_default();

    let Some(container) = ctx.map.entity_mut(chest) else {
        return Err(impossible("That way is blocked."));
    };
    let breakable = container.as_chest().is_some_and(|c| c.breakable);
    let (items, msg) = if breakable {
        (container.break_chest()?, "You broke the container!")
    } else {
        (container.open_chest(keys.into_iter())?, "You opened the container!")
    };

    for item in items {
        ctx.map.accept(item, x, y);
    }
    ctx.log.add(msg);
    Ok(ActionOutcome::Performed)
}
