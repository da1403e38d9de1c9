//! Rule constants shared across the simulation.

/// Sight radius used for the player's field of view
pub const FOV_RADIUS: i32 = 8;

/// Melee to-hit chance before the dexterity adjustment
pub const BASE_HIT_CHANCE: i32 = 70;

/// Points of to-hit chance per point of dexterity difference
pub const DEXTERITY_HIT_FACTOR: i32 = 2;

/// Sides of the to-hit die
pub const HIT_DIE: i32 = 100;

/// Experience granted to a skill per qualifying event
pub const SKILL_XP_AWARD: u32 = 15;

/// Skill progression curve: `xp_to_next = base + level * factor`
pub const SKILL_LEVEL_UP_BASE: u32 = 200;
pub const SKILL_LEVEL_UP_FACTOR: u32 = 150;

/// Chance (percent) of a floor tile being swapped for its cosmetic variant
pub const ALT_FLOOR_PERCENT: u32 = 2;

/// Chance (percent) that a rolled room chest actually materializes
pub const ROOM_CHEST_PERCENT: u32 = 10;

/// Chance (percent) that the level chest is locked
pub const LEVEL_CHEST_LOCK_PERCENT: u32 = 20;

/// Content counts for chests, inclusive ranges
pub const ROOM_CHEST_ITEMS: (u32, u32) = (1, 3);
pub const LOCKED_CHEST_ITEMS: (u32, u32) = (3, 6);
pub const UNLOCKED_CHEST_ITEMS: (u32, u32) = (1, 5);

/// Highest chest identifier handed out to locked chests
pub const MAX_CHEST_ID: u32 = 9999;

/// Remains glyph and color
pub const CORPSE_GLYPH: char = '%';
pub const CORPSE_COLOR: [u8; 3] = [191, 0, 0];

/// Spent container glyph and color
pub const SPENT_CHEST_GLYPH: char = '_';
pub const SPENT_CHEST_COLOR: [u8; 3] = [100, 100, 40];

/// Number of messages retained by the message log
pub const MESSAGE_HISTORY_LIMIT: usize = 512;
