//! ds-core: simulation core for the DIESEL roguelike
//!
//! Dungeon generation, the entity/component model and the action
//! pipeline. No I/O happens here; loading templates and saving games live
//! in sibling crates.

pub mod action;
pub mod ai;
pub mod components;
pub mod data;
pub mod dungeon;
pub mod entity;
pub mod error;
pub mod message;
pub mod templates;

mod consts;
mod gameloop;
mod rng;

pub use consts::*;
pub use error::{
    ActionError, ContractViolation, CoreError, GenerationError, Impossible, IntegrityError,
};
pub use gameloop::{GameLoop, GameLoopResult, GameState};
pub use rng::GameRng;
