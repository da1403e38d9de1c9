//! Action pipeline
//!
//! One action resolves one actor's turn. Any rule violation comes back as
//! [`Impossible`] before state is touched, so a failed action never costs
//! a turn.

mod item_use;
mod melee;
mod movement;
mod pickup;
mod stairs;

pub use melee::{MeleeOutcome, chance_to_hit, resolve_melee};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::components::SkillKind;
use crate::dungeon::GameMap;
use crate::entity::{Death, Entity, EntityId};
use crate::error::{ActionError, ContractViolation, Impossible};
use crate::message::MessageLog;
use crate::rng::GameRng;

/// Compass directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Get the delta (dx, dy) for this direction
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Direction for a unit step, or None for anything else
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (1, -1) => Some(Direction::NorthEast),
            (-1, -1) => Some(Direction::NorthWest),
            (1, 1) => Some(Direction::SouthEast),
            (-1, 1) => Some(Direction::SouthWest),
            _ => None,
        }
    }
}

/// Everything an actor can attempt on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Attack whatever lives there, otherwise move (or open a container)
    Bump(Direction),
    Move(Direction),
    Melee(Direction),
    Pickup,
    /// Activate a consumable or toggle an equippable
    UseItem {
        item: EntityId,
        target: Option<(i32, i32)>,
    },
    ToggleEquip(EntityId),
    Drop(EntityId),
    Wait,
    TakeStairs,
}

/// What a successful action asks of the turn loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Performed,
    /// The actor took the stairs; a new floor must be built
    Descend,
}

/// Mutable view of the world an action runs against
pub struct TurnContext<'a> {
    pub map: &'a mut GameMap,
    pub log: &'a mut MessageLog,
    pub rng: &'a mut GameRng,
    pub player: EntityId,
}

impl TurnContext<'_> {
    pub fn is_player(&self, id: EntityId) -> bool {
        id == self.player
    }

    /// The acting entity, which must be a living actor on this map
    pub(crate) fn living_actor(&self, id: EntityId) -> Result<&Entity, ContractViolation> {
        self.map
            .entity(id)
            .filter(|e| e.is_alive())
            .ok_or_else(|| ContractViolation::new(format!("entity {id} is not a living actor")))
    }

    pub(crate) fn living_actor_mut(
        &mut self,
        id: EntityId,
    ) -> Result<&mut Entity, ContractViolation> {
        self.map
            .entity_mut(id)
            .filter(|e| e.is_alive())
            .ok_or_else(|| ContractViolation::new(format!("entity {id} is not a living actor")))
    }

    pub fn report_death(&mut self, death: Death) {
        if self.is_player(death.id) {
            self.log.add("You died!");
        } else {
            self.log.add(format!("The {} is dead!", death.name));
        }
    }

    pub(crate) fn damage(&mut self, target: EntityId, amount: i32) {
        let death = self.map.entity_mut(target).and_then(|e| e.take_damage(amount));
        if let Some(death) = death {
            self.report_death(death);
        }
    }

    /// Grant the standard skill award; only the player hears about level-ups
    pub(crate) fn train(&mut self, id: EntityId, skill: SkillKind) {
        let gained = self
            .map
            .entity_mut(id)
            .and_then(Entity::as_actor_mut)
            .map_or(0, |a| a.train(skill));
        if gained > 0 && self.is_player(id) {
            for _ in 0..gained {
                self.log.add(format!("Your {skill} skill has leveled up!"));
            }
        }
    }
}

/// Resolve one action for `actor`
pub fn perform(
    action: Action,
    actor: EntityId,
    ctx: &mut TurnContext,
) -> Result<ActionOutcome, ActionError> {
    ctx.living_actor(actor)?;

    match action {
        Action::Bump(dir) => movement::bump(ctx, actor, dir),
        Action::Move(dir) => movement::move_actor(ctx, actor, dir),
        Action::Melee(dir) => melee::attack(ctx, actor, dir),
        Action::Pickup => pickup::pickup(ctx, actor),
        Action::UseItem { item, target } => item_use::use_item(ctx, actor, item, target),
        Action::ToggleEquip(item) => item_use::toggle_equip(ctx, actor, item),
        Action::Drop(item) => pickup::drop_item(ctx, actor, item),
        Action::Wait => Ok(ActionOutcome::Performed),
        Action::TakeStairs => stairs::take_stairs(ctx, actor),
    }
}

pub(crate) fn impossible(msg: impl Into<String>) -> ActionError {
    ActionError::Impossible(Impossible::new(msg))
}

/// Destination of a step from an entity
pub(crate) fn destination(entity: &Entity, dir: Direction) -> (i32, i32) {
    let (dx, dy) = dir.delta();
    (entity.x + dx, entity.y + dy)
}

/// Capitalize the first letter of a name for sentence starts
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
