//! ds-save: Save/restore system for DIESEL
//!
//! A save is a gzip stream holding one JSON document: a versioned header
//! followed by the full game state.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use ds_core::GameState;

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Save file corrupted: {0}")]
    Corrupted(String),

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// Save file header for versioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    pub player_name: String,
    /// Turns consumed at save time
    pub turns: u64,
    /// Dungeon floor at save time
    pub floor: i32,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "DSRS";

    pub fn new(state: &GameState) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            player_name: state.player().map(|p| p.name.clone()).unwrap_or_default(),
            turns: state.turns,
            floor: state.world.current_floor,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SaveFileRef<'a> {
    header: SaveHeader,
    state: &'a GameState,
}

/// Envelope read back before the state itself is decoded
#[derive(Deserialize)]
struct SaveEnvelope {
    header: SaveHeader,
    state: serde_json::Value,
}

/// Encode a game into save bytes
pub fn to_bytes(state: &GameState) -> Result<Vec<u8>, SaveError> {
    let file = SaveFileRef {
        header: SaveHeader::new(state),
        state,
    };
    let json = serde_json::to_vec(&file)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}

/// Decode save bytes, checking the header before the state
pub fn from_bytes(bytes: &[u8]) -> Result<GameState, SaveError> {
    let envelope = decode_envelope(bytes)?;
    envelope.header.validate()?;

    let state: GameState = serde_json::from_value(envelope.state)?;
    state
        .validate()
        .map_err(|e| SaveError::Corrupted(e.to_string()))?;
    Ok(state)
}

fn decode_envelope(bytes: &[u8]) -> Result<SaveEnvelope, SaveError> {
    let mut json = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut json)
        .map_err(|e| SaveError::Corrupted(e.to_string()))?;
    Ok(serde_json::from_slice(&json)?)
}

/// Save game state to a file
pub fn save_game(state: &GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let bytes = to_bytes(state)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    info!(path = %path.display(), turns = state.turns, "game saved");
    Ok(())
}

/// Load game state from a file
pub fn load_game(path: impl AsRef<Path>) -> Result<GameState, SaveError> {
    let path = path.as_ref();
    let bytes = read_save(path)?;
    let state = from_bytes(&bytes)?;
    info!(path = %path.display(), turns = state.turns, "game loaded");
    Ok(state)
}

/// Replace `state` with a saved game. On any error `state` is untouched.
pub fn load_into(state: &mut GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    *state = load_game(path)?;
    Ok(())
}

/// Load only the header from a save file (for a save browser)
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let envelope = decode_envelope(&read_save(path.as_ref())?)?;
    envelope.header.validate()?;
    Ok(envelope.header)
}

fn read_save(path: &Path) -> Result<Vec<u8>, SaveError> {
    let mut file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Get the default save path for a player name
pub fn default_save_path(player_name: &str) -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("diesel");
    path.push("saves");
    std::fs::create_dir_all(&path).ok();
    path.push(format!("{player_name}.sav"));
    path
}
