//! Simple scripted player used by the headless driver
//!
//! Priorities, first match wins: drink when badly hurt, fight whatever is
//! adjacent, grab loot underfoot, descend when on the stairs, otherwise
//! head for the stairs.

use ds_core::GameState;
use ds_core::action::{Action, Direction};
use ds_core::components::Consumable;
use ds_core::entity::Entity;
use ds_core::GameRng;

pub struct Autoplayer {
    rng: GameRng,
    /// Set after a rejected action so the next move is random
    stuck: bool,
}

impl Autoplayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            stuck: false,
        }
    }

    pub fn rejected(&mut self) {
        self.stuck = true;
    }

    pub fn next_action(&mut self, state: &GameState) -> Action {
        let Some(me) = state.player() else {
            return Action::Wait;
        };

        if let Some(action) = drink_if_hurt(me) {
            return action;
        }
        if let Some(dir) = adjacent_enemy(state, me) {
            return Action::Bump(dir);
        }
        if state.map.item_at(me.x, me.y).is_some() && !self.stuck {
            return Action::Pickup;
        }
        if me.pos() == state.map.downstairs {
            return Action::TakeStairs;
        }

        if std::mem::take(&mut self.stuck) {
            let dir = self.rng.choose(&Direction::ALL).copied().unwrap_or(Direction::North);
            return Action::Bump(dir);
        }
        let (sx, sy) = state.map.downstairs;
        Direction::from_delta((sx - me.x).signum(), (sy - me.y).signum())
            .map_or(Action::Wait, Action::Bump)
    }
}

fn drink_if_hurt(me: &Entity) -> Option<Action> {
    let actor = me.as_actor()?;
    if actor.fighter.hp() * 3 > actor.fighter.max_hp {
        return None;
    }
    actor
        .inventory
        .items()
        .iter()
        .find(|e| matches!(e.consumable(), Some(Consumable::Healing { .. })))
        .map(|e| Action::UseItem {
            item: e.id,
            target: None,
        })
}

fn adjacent_enemy(state: &GameState, me: &Entity) -> Option<Direction> {
    state
        .map
        .actors()
        .filter(|e| e.id != me.id)
        .find_map(|e| Direction::from_delta(e.x - me.x, e.y - me.y))
}
