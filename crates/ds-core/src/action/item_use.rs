//! Using carried items: consumables fire and are spent, equippables toggle

use super::{ActionOutcome, TurnContext, capitalize, impossible};
use crate::ai::Ai;
use crate::components::{Consumable, EquipChange, SkillKind};
use crate::entity::{Entity, EntityId};
use crate::error::{ActionError, ContractViolation};

pub(super) fn use_item(
    ctx: &mut TurnContext,
    actor: EntityId,
    item: EntityId,
    target: Option<(i32, i32)>,
) -> Result<ActionOutcome, ActionError> {
    let carried = carried(ctx, actor, item)?;
    if let Some(consumable) = carried.consumable().copied() {
        if consumable.needs_target() && target.is_none() {
            return Err(impossible("This item needs a target location."));
        }
        let name = carried.name.clone();
        activate(ctx, actor, &name, consumable, target)?;
        let user = ctx.map.entity_mut(actor);
        let survived = user.as_ref().is_some_and(|e| e.is_alive());
        if let Some(pack) = user.and_then(Entity::as_actor_mut) {
            pack.inventory.remove(item);
        }
        // A user killed by its own blast learns nothing
        if survived {
            ctx.train(actor, SkillKind::Gadgeting);
        }
        return Ok(ActionOutcome::Performed);
    }
    if carried.equippable().is_some() {
        return toggle_equip(ctx, actor, item);
    }
    Err(impossible(format!("The {} can't be used.", carried.name)))
}

pub(super) fn toggle_equip(
    ctx: &mut TurnContext,
    actor: EntityId,
    item: EntityId,
) -> Result<ActionOutcome, ActionError> {
    let name = carried(ctx, actor, item)?.name.clone();
    let user = ctx
        .living_actor_mut(actor)?
        .as_actor_mut()
        .ok_or_else(|| ContractViolation::new(format!("entity {actor} cannot equip")))?;

    match user.toggle_equip(item)? {
        EquipChange::Equipped { replaced, .. } => {
            if let Some(old) = replaced.and_then(|id| user.item_name(id).map(str::to_owned)) {
                ctx.log.add(format!("You remove the {old}."));
            }
            ctx.log.add(format!("You equip the {name}."));
        }
        EquipChange::Unequipped(_) => ctx.log.add(format!("You remove the {name}.")),
    }
    Ok(ActionOutcome::Performed)
}

/// A carried item, or a contract violation
fn carried<'a>(
    ctx: &'a TurnContext,
    actor: EntityId,
    item: EntityId,
) -> Result<&'a Entity, ContractViolation> {
    ctx.living_actor(actor)?
        .as_actor()
        .and_then(|a| a.inventory.get(item))
        .ok_or_else(|| ContractViolation::new(format!("item {item} is not carried by {actor}")))
}

/// Fire a consumable. Every check runs before the first write, so an
/// `Impossible` leaves the world as it was.
fn activate(
    ctx: &mut TurnContext,
    actor: EntityId,
    name: &str,
    consumable: Consumable,
    target: Option<(i32, i32)>,
) -> Result<(), ActionError> {
    match consumable {
        Consumable::Healing { amount } => {
            let recovered = ctx
                .living_actor_mut(actor)?
                .as_actor_mut()
                .map_or(0, |a| a.heal(amount));
            if recovered == 0 {
                return Err(impossible("Your health is already full."));
            }
            ctx.log.add(format!("You consume the {name}, and recover {recovered} HP!"));
        }
        Consumable::Lightning { damage, max_range } => {
            let target = closest_visible_actor(ctx, actor, max_range)
                .ok_or_else(|| impossible("No enemy is close enough to strike."))?;
            let target_name = ctx.map.entity(target).map(|e| e.name.clone()).unwrap_or_default();
            ctx.log.add(format!(
                "A lightning bolt strikes the {target_name} with a loud thunder, for {damage} damage!"
            ));
            ctx.damage(target, damage);
        }
        Consumable::Fireball { damage, radius } => {
            let (x, y) = visible_target(ctx, target)?;
            let victims: Vec<(EntityId, String)> = ctx
                .map
                .actors()
                .filter(|e| e.distance(x, y) <= f64::from(radius))
                .map(|e| (e.id, e.name.clone()))
                .collect();
            if victims.is_empty() {
                return Err(impossible("There are no targets in the radius."));
            }
            for (victim, victim_name) in victims {
                ctx.log.add(format!(
                    "The {victim_name} is engulfed in a fiery explosion, taking {damage} damage!"
                ));
                ctx.damage(victim, damage);
            }
        }
        Consumable::Confusion { turns } => {
            let (x, y) = visible_target(ctx, target)?;
            let victim = ctx
                .map
                .actor_at(x, y)
                .ok_or_else(|| impossible("You must select an enemy to target."))?;
            if victim == actor {
                return Err(impossible("You cannot confuse yourself!"));
            }
            let Some(entity) = ctx.map.entity_mut(victim) else {
                return Err(impossible("You must select an enemy to target."));
            };
            let previous = entity.as_actor().and_then(|a| a.ai.clone()).unwrap_or(Ai::Hostile);
            entity.replace_ai(Ai::Confused {
                previous: Box::new(previous),
                turns_remaining: turns,
            });
            let msg = format!(
                "The eyes of the {} look vacant, as it starts to stumble around!",
                entity.name
            );
            ctx.log.add(capitalize(&msg));
        }
    }
    Ok(())
}

/// Nearest living actor, other than `actor`, on a visible tile strictly
/// closer than `max_range + 1`
fn closest_visible_actor(ctx: &TurnContext, actor: EntityId, max_range: i32) -> Option<EntityId> {
    let user = ctx.map.entity(actor)?;
    let mut best = None;
    let mut closest = f64::from(max_range) + 1.0;
    for other in ctx.map.actors() {
        if other.id == actor || !ctx.map.is_visible(other.x, other.y) {
            continue;
        }
        let distance = user.distance(other.x, other.y);
        if distance < closest {
            closest = distance;
            best = Some(other.id);
        }
    }
    best
}

fn visible_target(
    ctx: &TurnContext,
    target: Option<(i32, i32)>,
) -> Result<(i32, i32), ActionError> {
    let (x, y) = target.ok_or_else(|| impossible("This item needs a target location."))?;
    if !ctx.map.is_visible(x, y) {
        return Err(impossible("You cannot target an area that you cannot see."));
    }
    Ok((x, y))
}
