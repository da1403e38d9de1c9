//! Actor and item components

mod consumable;
mod equipment;
mod equippable;
mod fighter;
mod inventory;
mod skill;
mod spawn_curve;

pub use consumable::{Consumable, Targeting};
pub use equipment::{EquipChange, Equipment};
pub use equippable::Equippable;
pub use fighter::Fighter;
pub use inventory::{Inventory, Rejected};
pub use skill::{Skill, SkillKind, SkillList};
pub use spawn_curve::SpawnCurve;
