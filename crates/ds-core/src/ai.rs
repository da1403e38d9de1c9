//! Monster AI
//!
//! An AI picks one [`Action`] per turn and runs it through the same
//! pipeline the player uses.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{Action, ActionOutcome, Direction, TurnContext, perform};
use crate::entity::{Entity, EntityId};
use crate::error::{ActionError, ContractViolation};

/// Behavior strategy of a living actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ai {
    /// Chase and attack the player while in view
    Hostile,
    /// Stumble around at random, then go back to `previous`
    Confused {
        previous: Box<Ai>,
        turns_remaining: u32,
    },
}

/// Run one turn for an AI-driven actor
pub fn take_turn(ctx: &mut TurnContext, id: EntityId) -> Result<ActionOutcome, ActionError> {
    let ai = ctx
        .living_actor(id)?
        .as_actor()
        .and_then(|a| a.ai.clone())
        .ok_or_else(|| ContractViolation::new(format!("entity {id} has no AI")))?;

    match ai {
        Ai::Hostile => {
            let action = hostile_action(ctx, id);
            debug!(actor = %id, ?action, "hostile turn");
            perform(action, id, ctx)
        }
        Ai::Confused {
            previous,
            turns_remaining,
        } => confused_turn(ctx, id, *previous, turns_remaining),
    }
}

/// Attack when adjacent, otherwise close in on the player
fn hostile_action(ctx: &TurnContext, id: EntityId) -> Action {
    let (Some(me), Some(player)) = (ctx.map.entity(id), ctx.map.entity(ctx.player)) else {
        return Action::Wait;
    };
    if !player.is_alive() || !ctx.map.is_visible(me.x, me.y) {
        return Action::Wait;
    }

    let dx = player.x - me.x;
    let dy = player.y - me.y;
    let (sx, sy) = (dx.signum(), dy.signum());
    if dx.abs().max(dy.abs()) <= 1 {
        return Direction::from_delta(sx, sy).map_or(Action::Wait, Action::Melee);
    }

    step_candidates(sx, sy)
        .into_iter()
        .filter_map(|(x, y)| Direction::from_delta(x, y))
        .find(|dir| can_step(ctx, me, *dir))
        .map_or(Action::Wait, Action::Move)
}

/// Direct step first, then the two directions either side of it
fn step_candidates(dx: i32, dy: i32) -> [(i32, i32); 3] {
    if dx == 0 {
        [(dx, dy), (1, dy), (-1, dy)]
    } else if dy == 0 {
        [(dx, dy), (dx, 1), (dx, -1)]
    } else {
        [(dx, dy), (dx, 0), (0, dy)]
    }
}

fn can_step(ctx: &TurnContext, me: &Entity, dir: Direction) -> bool {
    let (dx, dy) = dir.delta();
    let (x, y) = (me.x + dx, me.y + dy);
    ctx.map.is_walkable(x, y) && ctx.map.blocking_entity_at(x, y).is_none()
}

fn confused_turn(
    ctx: &mut TurnContext,
    id: EntityId,
    previous: Ai,
    turns_remaining: u32,
) -> Result<ActionOutcome, ActionError> {
    let Some(entity) = ctx.map.entity_mut(id) else {
        return Err(ContractViolation::new(format!("entity {id} left the map")).into());
    };

    if turns_remaining == 0 {
        entity.replace_ai(previous);
        let msg = format!("The {} is no longer confused.", entity.name);
        ctx.log.add(msg);
        return Ok(ActionOutcome::Performed);
    }

    entity.replace_ai(Ai::Confused {
        previous: Box::new(previous),
        turns_remaining: turns_remaining - 1,
    });
    let dir = ctx.rng.choose(&Direction::ALL).copied().unwrap_or(Direction::North);
    perform(Action::Bump(dir), id, ctx)
}
