//! End-to-end runs of the turn loop on generated floors

use ds_core::action::{Action, Direction};
use ds_core::dungeon::GenerationParams;
use ds_core::entity::{Entity, EntityId};
use ds_core::templates::TemplateSet;
use ds_core::{GameLoop, GameLoopResult, GameState};

fn new_loop(seed: u64) -> GameLoop {
    let params = GenerationParams {
        map_width: 60,
        map_height: 30,
        ..GenerationParams::default()
    };
    GameLoop::new(GameState::new_game(seed, TemplateSet::builtin(), params).unwrap())
}

/// Scripted walk that cycles through every direction
fn script(len: usize) -> Vec<Action> {
    (0..len).map(|i| Action::Bump(Direction::ALL[i % 8])).collect()
}

fn run(game: &mut GameLoop, actions: &[Action]) -> Vec<GameLoopResult> {
    let mut results = Vec::new();
    for action in actions {
        let result = game.tick(*action).unwrap();
        let done = matches!(result, GameLoopResult::PlayerDied(_));
        results.push(result);
        if done {
            break;
        }
    }
    results
}

#[test]
fn test_every_entity_has_one_owner() {
    let mut game = new_loop(2024);
    run(&mut game, &script(120));

    let state = game.state();
    let mut seen: Vec<EntityId> = state.map.entities().iter().flat_map(Entity::ids).collect();
    let total = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), total, "an entity is held by two containers");
    assert_eq!(state.validate(), Ok(()));
}

#[test]
fn test_same_seed_same_game() {
    let actions = script(80);
    let mut a = new_loop(99);
    let mut b = new_loop(99);
    assert_eq!(run(&mut a, &actions), run(&mut b, &actions));
    assert_eq!(a.state().map, b.state().map);
    assert_eq!(a.state().log, b.state().log);
}

#[test]
fn test_rejected_actions_do_not_advance_turns() {
    let mut game = new_loop(5);
    let results = run(&mut game, &script(60));
    let consumed = results
        .iter()
        .filter(|r| !matches!(r, GameLoopResult::Rejected(_)))
        .count();
    assert_eq!(game.state().turns, consumed as u64);
}

#[test]
fn test_living_actors_keep_blocking_and_dead_ones_do_not() {
    let mut game = new_loop(31);
    run(&mut game, &script(150));
    for entity in game.state().map.entities() {
        if let Some(actor) = entity.as_actor() {
            if actor.is_alive() {
                assert!(entity.blocks_movement);
            } else {
                assert!(!entity.blocks_movement);
                assert!(entity.name.starts_with("remains of "));
            }
        }
    }
}

#[test]
fn test_descend_twice() {
    let mut game = new_loop(8);
    for expected in 2..=3 {
        let state = game.state_mut();
        let (x, y) = state.map.downstairs;
        let player = state.player_id;
        state.map.place(player, x, y);

        assert_eq!(game.tick(Action::TakeStairs).unwrap(), GameLoopResult::Continue);
        assert_eq!(game.state().world.current_floor, expected);
        assert_eq!(game.state().validate(), Ok(()));
    }
}
