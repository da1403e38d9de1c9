//! Skill progression
//!
//! Every actor owns its own [`SkillList`]; templates are deep-copied on
//! spawn so no two actors ever share skill state.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::consts::{SKILL_LEVEL_UP_BASE, SKILL_LEVEL_UP_FACTOR};
use crate::data::WeaponClass;

/// Closed set of trainable skills
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum SkillKind {
    Knifology,
    Swordsman,
    Thrusting,
    #[strum(serialize = "Smack Logic")]
    SmackLogic,
    Slicing,
    Archery,
    #[strum(serialize = "Pistol Mastering")]
    PistolMastering,
    Assaulting,
    Sending,
    Throwing,
    /// Trained by activating consumables
    Gadgeting,
    /// Trained by the player landing melee damage
    #[strum(serialize = "Martial Arts")]
    MartialArts,
    /// Trained by recovering hp
    #[strum(serialize = "First Aid")]
    FirstAid,
    /// Trained by taking melee damage
    #[strum(serialize = "Pain Mastering")]
    PainMastering,
}

impl SkillKind {
    /// Skill trained by dealing damage with a weapon class
    pub const fn for_weapon(class: WeaponClass) -> SkillKind {
        match class {
            WeaponClass::Dagger => SkillKind::Knifology,
            WeaponClass::Sword => SkillKind::Swordsman,
            WeaponClass::Spear => SkillKind::Thrusting,
            WeaponClass::Hammer => SkillKind::SmackLogic,
            WeaponClass::Axe => SkillKind::Slicing,
            WeaponClass::Bow => SkillKind::Archery,
            WeaponClass::Pistol => SkillKind::PistolMastering,
            WeaponClass::Rifle => SkillKind::Assaulting,
            WeaponClass::Launcher => SkillKind::Sending,
            WeaponClass::Throwable => SkillKind::Throwing,
        }
    }
}

/// Level and experience of one skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    level: u32,
    xp: u32,
    level_up_base: u32,
    level_up_factor: u32,
}

impl Default for Skill {
    fn default() -> Self {
        Self::new(SKILL_LEVEL_UP_BASE, SKILL_LEVEL_UP_FACTOR)
    }
}

impl Skill {
    pub fn new(level_up_base: u32, level_up_factor: u32) -> Self {
        Self {
            level: 1,
            xp: 0,
            level_up_base,
            level_up_factor,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn xp_to_next_level(&self) -> u32 {
        self.level_up_base
            .saturating_add(self.level.saturating_mul(self.level_up_factor))
    }

    /// Add experience, resolving every level-up it pays for.
    ///
    /// Returns the number of levels gained. A skill with a zero base never
    /// progresses.
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        if amount == 0 || self.level_up_base == 0 {
            return 0;
        }
        self.xp = self.xp.saturating_add(amount);

        let mut gained = 0;
        while self.xp >= self.xp_to_next_level() {
            self.xp -= self.xp_to_next_level();
            self.level += 1;
            gained += 1;
        }
        gained
    }
}

/// Per-actor table of skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillList {
    skills: HashMap<SkillKind, Skill>,
}

impl Default for SkillList {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillList {
    /// Every skill at level 1 with the standard curve
    pub fn new() -> Self {
        Self {
            skills: SkillKind::iter().map(|k| (k, Skill::default())).collect(),
        }
    }

    pub fn get(&self, kind: SkillKind) -> Option<&Skill> {
        self.skills.get(&kind)
    }

    pub fn level(&self, kind: SkillKind) -> u32 {
        self.skills.get(&kind).map_or(0, Skill::level)
    }

    /// Train a skill; returns levels gained
    pub fn add_xp(&mut self, kind: SkillKind, amount: u32) -> u32 {
        self.skills.entry(kind).or_default().add_xp(amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillKind, &Skill)> {
        SkillKind::iter().filter_map(|k| self.skills.get(&k).map(|s| (k, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_grows_per_level() {
        let skill = Skill::default();
        assert_eq!(skill.xp_to_next_level(), 350);
    }

    #[test]
    fn test_single_level_up() {
        let mut skill = Skill::default();
        assert_eq!(skill.add_xp(360), 1);
        assert_eq!(skill.level(), 2);
        assert_eq!(skill.xp(), 10);
    }

    #[test]
    fn test_multiple_level_ups_in_one_grant() {
        let mut skill = Skill::default();
        // 350 (L1->2) + 500 (L2->3) + 650 (L3->4) = 1500
        assert_eq!(skill.add_xp(1510), 3);
        assert_eq!(skill.level(), 4);
        assert_eq!(skill.xp(), 10);
        assert!(skill.xp() < skill.xp_to_next_level());
    }

    #[test]
    fn test_zero_base_never_progresses() {
        let mut skill = Skill::new(0, 150);
        assert_eq!(skill.add_xp(10_000), 0);
        assert_eq!(skill.level(), 1);
        assert_eq!(skill.xp(), 0);
    }

    #[test]
    fn test_lists_are_independent() {
        let mut a = SkillList::new();
        let b = a.clone();
        a.add_xp(SkillKind::FirstAid, 400);
        assert_eq!(a.level(SkillKind::FirstAid), 2);
        assert_eq!(b.level(SkillKind::FirstAid), 1);
    }

    #[test]
    fn test_weapon_skill_map() {
        assert_eq!(SkillKind::for_weapon(WeaponClass::Hammer), SkillKind::SmackLogic);
        assert_eq!(SkillKind::SmackLogic.to_string(), "Smack Logic");
        assert_eq!(SkillList::new().iter().count(), 14);
    }
}
