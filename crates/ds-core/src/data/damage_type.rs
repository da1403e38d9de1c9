use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// What kind of wound a weapon inflicts
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DamageType {
    Piercing,
    Slashing,
    #[default]
    Blunt,
    Crushing,
}
