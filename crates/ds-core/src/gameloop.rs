//! Turn loop
//!
//! One tick is one player action attempt. Only a successful action lets
//! the monsters move; field of view is recomputed at the end of every
//! tick that consumed a turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::action::{Action, ActionOutcome, TurnContext, perform};
use crate::ai;
use crate::consts::FOV_RADIUS;
use crate::dungeon::{GameMap, GameWorld, GenerationParams};
use crate::entity::{Entity, EntityId, IdAllocator};
use crate::error::{ActionError, CoreError, GenerationError, IntegrityError};
use crate::message::MessageLog;
use crate::rng::GameRng;
use crate::templates::TemplateSet;

/// Result of a game loop tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameLoopResult {
    /// Turn consumed, game goes on
    Continue,
    /// The action was impossible; no time passed
    Rejected(String),
    /// Player died with message
    PlayerDied(String),
}

/// Everything that makes up a running game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub map: GameMap,
    pub world: GameWorld,
    pub player_id: EntityId,
    pub rng: GameRng,
    pub log: MessageLog,
    pub templates: TemplateSet,
    /// Turns actually consumed
    pub turns: u64,
}

impl GameState {
    /// Fresh game: floor 1 with the player at its start position
    pub fn new_game(
        seed: u64,
        templates: TemplateSet,
        params: GenerationParams,
    ) -> Result<Self, GenerationError> {
        let mut rng = GameRng::new(seed);
        let mut world = GameWorld::new(params);
        let floor = world.generate_floor(&templates, IdAllocator::default(), &mut rng)?;

        let mut map = floor.map;
        let (x, y) = floor.player_start;
        let player_id = map.spawn(&templates.player, x, y);

        let mut state = Self {
            map,
            world,
            player_id,
            rng,
            log: MessageLog::new(),
            templates,
            turns: 0,
        };
        state.update_fov();
        state.message("Hello and welcome, wanderer, to the wasteland of DIESEL!");
        info!(seed, "new game");
        Ok(state)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.map.entity(self.player_id)
    }

    pub fn message(&mut self, msg: impl Into<String>) {
        self.log.add(msg);
    }

    /// Recompute visibility from the player's position
    pub fn update_fov(&mut self) {
        if let Some((x, y)) = self.player().map(Entity::pos) {
            self.map.update_fov(x, y, FOV_RADIUS);
        }
    }

    /// Check a state that came from outside (a save file) before use
    pub fn validate(&self) -> Result<(), IntegrityError> {
        self.map.validate()?;
        if self.player().is_none() {
            return Err(IntegrityError::MissingPlayer(self.player_id));
        }
        Ok(())
    }

    pub fn is_player_dead(&self) -> bool {
        !self.player().is_some_and(Entity::is_alive)
    }

    fn turn_context(&mut self) -> TurnContext<'_> {
        TurnContext {
            map: &mut self.map,
            log: &mut self.log,
            rng: &mut self.rng,
            player: self.player_id,
        }
    }

    /// Build the next floor and move the player onto it.
    ///
    /// The current floor is only replaced once the new one exists.
    fn descend(&mut self) -> Result<(), GenerationError> {
        let floor = self
            .world
            .generate_floor(&self.templates, self.map.ids.clone(), &mut self.rng)?;
        let mut next = floor.map;
        let (x, y) = floor.player_start;
        if let Some(player) = self.map.remove(self.player_id) {
            next.accept(player, x, y);
        }
        self.map = next;
        self.message("You descend the stairs.");
        Ok(())
    }
}

/// Game loop controller
pub struct GameLoop {
    state: GameState,
}

impl GameLoop {
    /// Create a new game loop with the given state
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    /// Get reference to game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Consume the game loop and return the owned game state
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Run one player action and, if it took time, the enemy pass.
    ///
    /// Errors are reserved for broken invariants and floor generation
    /// failures; an impossible action is a normal `Rejected` result.
    pub fn tick(&mut self, action: Action) -> Result<GameLoopResult, CoreError> {
        let player = self.state.player_id;
        let outcome = match perform(action, player, &mut self.state.turn_context()) {
            Ok(outcome) => outcome,
            Err(ActionError::Impossible(why)) => {
                let msg = why.message().to_owned();
                self.state.message(msg.clone());
                return Ok(GameLoopResult::Rejected(msg));
            }
            Err(ActionError::Contract(violation)) => return Err(violation.into()),
        };

        if outcome == ActionOutcome::Descend {
            self.state.descend()?;
        }
        self.state.turns += 1;

        self.handle_enemy_turns();
        self.state.update_fov();

        if self.state.is_player_dead() {
            return Ok(GameLoopResult::PlayerDied("You died!".to_string()));
        }
        Ok(GameLoopResult::Continue)
    }

    /// Every living non-player actor with an AI gets one turn. A failure
    /// only costs that actor its turn.
    fn handle_enemy_turns(&mut self) {
        let player = self.state.player_id;
        let movers: Vec<EntityId> = self
            .state
            .map
            .actors()
            .filter(|e| e.id != player)
            .map(|e| e.id)
            .collect();

        for id in movers {
            // Killed earlier in this pass
            if !self.state.map.entity(id).is_some_and(Entity::is_alive) {
                continue;
            }
            if let Err(err) = ai::take_turn(&mut self.state.turn_context(), id) {
                debug!(actor = %id, %err, "enemy turn absorbed");
            }
            if self.state.is_player_dead() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> GenerationParams {
        GenerationParams {
            map_width: 50,
            map_height: 30,
            ..GenerationParams::default()
        }
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new_game(7, TemplateSet::builtin(), small_params()).unwrap();
        assert_eq!(state.world.current_floor, 1);
        let player = state.player().unwrap();
        assert!(player.is_alive());
        assert!(state.map.is_visible(player.x, player.y));
        assert_eq!(state.log.len(), 1);
        assert_eq!(state.validate(), Ok(()));
    }

    #[test]
    fn test_rejected_action_costs_nothing() {
        let state = GameState::new_game(7, TemplateSet::builtin(), small_params()).unwrap();
        let mut game = GameLoop::new(state);
        let before = game.state().map.clone();

        let result = game.tick(Action::TakeStairs).unwrap();
        if game.state().player().map(Entity::pos) != Some(game.state().map.downstairs) {
            assert!(matches!(result, GameLoopResult::Rejected(_)));
            assert_eq!(game.state().turns, 0);
            assert_eq!(game.state().map, before);
        }
    }

    #[test]
    fn test_wait_consumes_a_turn() {
        let state = GameState::new_game(11, TemplateSet::builtin(), small_params()).unwrap();
        let mut game = GameLoop::new(state);
        let result = game.tick(Action::Wait).unwrap();
        assert!(!matches!(result, GameLoopResult::Rejected(_)));
        assert_eq!(game.state().turns, 1);
    }

    #[test]
    fn test_descend_moves_player_to_new_floor() {
        let mut state = GameState::new_game(3, TemplateSet::builtin(), small_params()).unwrap();
        let (sx, sy) = state.map.downstairs;
        let player = state.player_id;
        state.map.place(player, sx, sy);

        let mut game = GameLoop::new(state);
        game.tick(Action::TakeStairs).unwrap();
        let state = game.state();
        assert_eq!(state.world.current_floor, 2);
        assert_eq!(state.map.entities().iter().filter(|e| e.id == player).count(), 1);
        assert!(state.log.iter().any(|m| m.text == "You descend the stairs."));
    }

    #[test]
    fn test_contract_violation_surfaces() {
        let state = GameState::new_game(7, TemplateSet::builtin(), small_params()).unwrap();
        let mut game = GameLoop::new(state);
        let result = game.tick(Action::Drop(EntityId(999_999)));
        assert!(matches!(result, Err(CoreError::Contract(_))));
    }
}
