//! ds-data: entity templates from JSON
//!
//! A template file lists the player, the monster roster with spawn curves,
//! the loot pool, the key and the chest. Items pick their behavior with a
//! string selector plus a parameter map:
//!
//! ```json
//! { "name": "Busted Battery", "glyph": "}", "color": [200, 200, 0],
//!   "weight": 0.07, "behavior": "lightning",
//!   "params": { "damage": 15, "max_range": 5 } }
//! ```

mod error;
mod schema;

pub use error::DataError;
pub use schema::{BehaviorKind, TemplateFile};

use std::path::Path;

use ds_core::templates::TemplateSet;
use tracing::info;

/// Template set shipped with the game
pub const DEFAULT_TEMPLATES: &str = include_str!("../data/default.json");

/// Load and validate a template file
pub fn load_templates<P: AsRef<Path>>(path: P) -> Result<TemplateSet, DataError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let set = from_json_str(&content)?;
    info!(
        path = %path.display(),
        monsters = set.monsters.len(),
        items = set.items.len(),
        "loaded templates"
    );
    Ok(set)
}

/// Parse and validate templates from a JSON string
pub fn from_json_str(json: &str) -> Result<TemplateSet, DataError> {
    let file: TemplateFile = serde_json::from_str(json)?;
    file.into_templates()
}

/// The shipped template set
pub fn default_templates() -> Result<TemplateSet, DataError> {
    from_json_str(DEFAULT_TEMPLATES)
}
