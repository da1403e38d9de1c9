//! Error taxonomy for the simulation core

use thiserror::Error;

use crate::entity::EntityId;

/// A rule violation raised by an action the player asked for.
///
/// Aborts the action with no state change; the turn is not consumed and
/// the message goes to the player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Impossible(pub String);

impl Impossible {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Programming-level misuse of the core API.
///
/// Means an invariant was already broken upstream; never shown as a
/// player message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("contract violation: {0}")]
pub struct ContractViolation(pub String);

impl ContractViolation {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Failure of a single action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Impossible(#[from] Impossible),

    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

/// Failure to build a floor. The previous floor stays in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no room could be placed on a {width}x{height} map")]
    NoRooms { width: i32, height: i32 },

    #[error("template set has no {0} templates")]
    MissingTemplates(&'static str),
}

/// A restored game whose pieces do not fit together
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("{grid} grid is not {width}x{height}")]
    GridShape {
        grid: &'static str,
        width: i32,
        height: i32,
    },

    #[error("entity {0} appears more than once")]
    DuplicateId(EntityId),

    #[error("entity {id} stands outside the map at ({x}, {y})")]
    OutOfBounds { id: EntityId, x: i32, y: i32 },

    #[error("downstairs at ({0}, {1}) is outside the map")]
    StairsOutOfBounds(i32, i32),

    #[error("next id {next} is not above the highest id in use {highest}")]
    StaleIdAllocator { next: u32, highest: u32 },

    #[error("player {0} is not on the map")]
    MissingPlayer(EntityId),
}

/// Errors escaping the turn loop
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Contract(#[from] ContractViolation),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
