//! Health and base combat stats

use serde::{Deserialize, Serialize};

/// Combat component of an actor.
///
/// `hp` is private so every write goes through the clamp. Equipment bonuses
/// are not stored here; derived stats live on [`crate::entity::Actor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub max_hp: i32,
    hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
    pub base_dexterity: i32,
    pub base_range: i32,
}

impl Fighter {
    /// Full-health fighter with no dexterity or range
    pub fn new(max_hp: i32, base_defense: i32, base_power: i32) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            max_hp,
            hp: max_hp,
            base_defense,
            base_power,
            base_dexterity: 0,
            base_range: 0,
        }
    }

    pub fn with_dexterity(mut self, dexterity: i32) -> Self {
        self.base_dexterity = dexterity;
        self
    }

    pub fn with_range(mut self, range: i32) -> Self {
        self.base_range = range;
        self
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Set hp, clamped to `0..=max_hp`
    pub fn set_hp(&mut self, value: i32) {
        self.hp = value.clamp(0, self.max_hp);
    }

    /// Restore up to `amount` hp and return how much was actually recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.hp >= self.max_hp || amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.set_hp(before.saturating_add(amount));
        self.hp - before
    }

    pub fn is_full(&self) -> bool {
        self.hp >= self.max_hp
    }
}
