use ds_core::GenerationError;
use thiserror::Error;

/// Why a template file was rejected. Loading is all or nothing.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{item}: unknown behavior '{behavior}'")]
    UnknownBehavior { item: String, behavior: String },

    #[error("{name}: unknown ai '{ai}'")]
    UnknownAi { name: String, ai: String },

    #[error("{item}: missing parameter '{field}'")]
    MissingField { item: String, field: &'static str },

    #[error("{item}: invalid value for '{field}': {reason}")]
    InvalidValue {
        item: String,
        field: &'static str,
        reason: String,
    },

    #[error("duplicate template name '{0}'")]
    DuplicateName(String),

    #[error("{0}: spawn curve floors out of order or probabilities outside [0, 1]")]
    BadSpawnCurve(String),

    #[error(transparent)]
    Incomplete(#[from] GenerationError),
}
