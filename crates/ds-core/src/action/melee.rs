//! Melee resolution
//!
//! The roll logic lives in [`resolve_melee`], which takes the dice as
//! arguments so it can be checked without a seeded stream.

use super::{ActionOutcome, Direction, TurnContext, capitalize, destination, impossible};
use crate::components::SkillKind;
use crate::consts::{BASE_HIT_CHANCE, DEXTERITY_HIT_FACTOR, HIT_DIE};
use crate::entity::{Actor, Entity, EntityId};
use crate::error::{ActionError, ContractViolation};

/// Result of one swing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeleeOutcome {
    Miss,
    /// Connected, but armor soaked everything
    NoDamage,
    Hit { damage: i32, critical: bool },
}

/// Percent chance to hit, before clamping by the die
pub const fn chance_to_hit(attacker_dexterity: i32, defender_dexterity: i32) -> i32 {
    BASE_HIT_CHANCE + DEXTERITY_HIT_FACTOR * (attacker_dexterity - defender_dexterity)
}

/// Resolve a swing from its two rolls.
///
/// `hit_roll` is in `1..=100`; a roll above the hit chance misses, and a
/// damaging roll of exactly 1 is a critical that doubles damage.
/// `spread_roll` is in `-power..=power` and half of it (truncated) is
/// added to `power - defense`.
pub fn resolve_melee(
    attacker: &Actor,
    defender: &Actor,
    hit_roll: i32,
    spread_roll: i32,
) -> MeleeOutcome {
    if hit_roll > chance_to_hit(attacker.dexterity(), defender.dexterity()) {
        return MeleeOutcome::Miss;
    }
    let damage = attacker.power() - defender.defense() + spread_roll / 2;
    if damage <= 0 {
        return MeleeOutcome::NoDamage;
    }
    if hit_roll == 1 {
        MeleeOutcome::Hit {
            damage: damage * 2,
            critical: true,
        }
    } else {
        MeleeOutcome::Hit {
            damage,
            critical: false,
        }
    }
}

pub(super) fn attack(
    ctx: &mut TurnContext,
    actor: EntityId,
    dir: Direction,
) -> Result<ActionOutcome, ActionError> {
    let (x, y) = destination(ctx.living_actor(actor)?, dir);
    let Some(target) = ctx.map.actor_at(x, y) else {
        return Err(impossible("You can't attack the air."));
    };

    let (attacker, defender) = (fighting(ctx, actor)?, fighting(ctx, target)?);
    let hit_roll = ctx.rng.range(1, HIT_DIE);
    let power = attacker.1.power();
    let spread_roll = ctx.rng.range(-power, power);
    let outcome = resolve_melee(&attacker.1, &defender.1, hit_roll, spread_roll);

    let desc = format!("{} attacks {}", capitalize(&attacker.0), defender.0);
    match outcome {
        MeleeOutcome::Miss => {
            if ctx.is_player(actor) {
                ctx.log.add("You miss.");
            } else {
                ctx.log.add(format!("{} misses.", capitalize(&attacker.0)));
            }
        }
        MeleeOutcome::NoDamage => ctx.log.add(format!("{desc} for no damage.")),
        MeleeOutcome::Hit { damage, critical } => {
            let extra = if critical { " Critical!" } else { "" };
            ctx.log.add(format!("{desc} for {damage} damage.{extra}"));

            ctx.train(target, SkillKind::PainMastering);
            if ctx.is_player(actor) {
                ctx.train(actor, SkillKind::MartialArts);
            }
            let weapon = attacker.1.equipment.weapon_class(&attacker.1.inventory);
            if let Some(skill) = weapon.map(SkillKind::for_weapon) {
                ctx.train(actor, skill);
            }
            ctx.damage(target, damage);
        }
    }
    Ok(ActionOutcome::Performed)
}

/// Name and a snapshot of the combat stats of a living actor
fn fighting(ctx: &TurnContext, id: EntityId) -> Result<(String, Actor), ContractViolation> {
    let entity = ctx.living_actor(id)?;
    let actor = entity
        .as_actor()
        .ok_or_else(|| ContractViolation::new(format!("entity {id} cannot fight")))?;
    Ok((entity.name.clone(), actor.clone()))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::super::{Action, perform};
    use super::*;
    use crate::components::{Equippable, Fighter, Inventory};
    use crate::data::WeaponClass;
    use crate::entity::Item;

    fn bare(power: i32, defense: i32, dexterity: i32) -> Actor {
        let fighter = Fighter::new(10, defense, power).with_dexterity(dexterity);
        Actor::new(fighter, Inventory::new(5, 10.0))
    }

    fn hit(damage: i32) -> MeleeOutcome {
        MeleeOutcome::Hit {
            damage,
            critical: false,
        }
    }

    #[test]
    fn test_hit_chance() {
        assert_eq!(chance_to_hit(5, 5), 70);
        assert_eq!(chance_to_hit(8, 3), 80);
        assert_eq!(chance_to_hit(0, 40), -10);
    }

    #[test]
    fn test_worked_example() {
        // power 5 vs defense 2, spread +3 adds 1
        let att = bare(5, 0, 0);
        let def = bare(1, 2, 0);
        assert_eq!(resolve_melee(&att, &def, 50, 3), hit(4));
        assert_eq!(
            resolve_melee(&att, &def, 1, 3),
            MeleeOutcome::Hit {
                damage: 8,
                critical: true
            }
        );
        assert_eq!(resolve_melee(&att, &def, 71, 3), MeleeOutcome::Miss);
        // negative spread truncates toward zero
        assert_eq!(resolve_melee(&att, &def, 50, -3), hit(2));
    }

    #[test]
    fn test_even_fight_without_spread() {
        // equal dexterity: hit chance 70, roll 50 hits, no spread
        let att = bare(5, 0, 0);
        let def = bare(1, 2, 0);
        assert_eq!(resolve_melee(&att, &def, 50, 0), hit(3));
    }

    #[test]
    fn test_resolved_damage_is_hp_lost() {
        let mut fx = Fixture::new();
        let player = fx.player;
        let bandit = fx.monster("Bandit", Fighter::new(10, 2, 1), 3, 2);

        let outcome = resolve_melee(fx.actor(player), fx.actor(bandit), 50, 0);
        let MeleeOutcome::Hit { damage, .. } = outcome else {
            panic!("expected a hit, got {outcome:?}");
        };
        assert_eq!(damage, 3);

        fx.ctx().damage(bandit, damage);
        assert_eq!(fx.actor(bandit).fighter.hp(), 7);
        assert!(fx.map.entity(bandit).unwrap().is_alive());
    }

    #[test]
    fn test_armor_soaks() {
        let att = bare(2, 0, 0);
        let def = bare(1, 5, 0);
        assert_eq!(resolve_melee(&att, &def, 1, 2), MeleeOutcome::NoDamage);
    }

    #[test]
    fn test_dexterity_shifts_hit_chance() {
        let quick = bare(5, 0, 10);
        let slow = bare(5, 0, 0);
        assert_ne!(resolve_melee(&quick, &slow, 85, 0), MeleeOutcome::Miss);
        assert_eq!(resolve_melee(&slow, &quick, 51, 0), MeleeOutcome::Miss);
    }

    #[test]
    fn test_attack_air_is_impossible() {
        let mut fx = Fixture::new();
        let player = fx.player;
        let err = perform(Action::Melee(Direction::East), player, &mut fx.ctx()).unwrap_err();
        assert!(matches!(err, ActionError::Impossible(_)));
        assert!(fx.log.is_empty());
    }

    #[test]
    fn test_repeated_attacks_kill_once() {
        let mut fx = Fixture::new();
        let dog = fx.monster("mangy dog", Fighter::new(1, 0, 1), 3, 2);
        let player = fx.player;

        // A few swings are enough for 5 power against 1 hp
        for _ in 0..50 {
            if !fx.map.entity(dog).unwrap().is_alive() {
                break;
            }
            perform(Action::Melee(Direction::East), player, &mut fx.ctx()).unwrap();
        }
        let corpse = fx.map.entity(dog).unwrap();
        assert!(!corpse.is_alive());
        assert_eq!(corpse.name, "remains of mangy dog");
        assert!(!corpse.blocks_movement);
        assert_eq!(fx.log.iter().filter(|m| m.text == "The mangy dog is dead!").count(), 1);

        // Nothing living to hit any more
        assert!(perform(Action::Melee(Direction::East), player, &mut fx.ctx()).is_err());
    }

    #[test]
    fn test_weapon_hit_trains_skills() {
        let mut fx = Fixture::new();
        let player = fx.player;
        let dagger = Item::equippable(0.5, Equippable::weapon(WeaponClass::Dagger));
        let shiv = fx.give(player, "Shiv", dagger);
        perform(Action::ToggleEquip(shiv), player, &mut fx.ctx()).unwrap();
        fx.monster("Mad Mechanic", Fighter::new(2000, 0, 1), 3, 2);

        for _ in 0..40 {
            perform(Action::Melee(Direction::East), player, &mut fx.ctx()).unwrap();
        }
        let skills = &fx.actor(player).skills;
        let martial = skills.get(SkillKind::MartialArts).map_or(0, |s| s.xp() + 1000 * s.level());
        assert!(martial > 1000);
        let knifology = skills
            .get(SkillKind::Knifology)
            .map_or(0, |s| s.xp() + 1000 * s.level());
        assert_eq!(knifology, martial);
        assert_eq!(skills.get(SkillKind::PainMastering).map(|s| (s.level(), s.xp())), Some((1, 0)));
    }
}
