use ds_core::components::Consumable;
use ds_core::data::{ArmorClass, EquipmentSlot, WeaponClass};
use ds_core::templates::TemplateSet;
use ds_data::{DataError, default_templates, from_json_str, load_templates};

fn minimal(items: &str, monsters: &str) -> String {
    format!(
        r#"{{
  "player": {{ "name": "Player", "glyph": "@", "color": [255, 255, 255],
              "fighter": {{ "hp": 30, "defense": 2, "power": 5 }},
              "inventory": {{ "capacity": 26, "max_weight": 55.0 }} }},
  "monsters": [{monsters}],
  "items": [{items}],
  "key": {{ "name": "Key", "glyph": ";", "color": [100, 100, 100], "weight": 0.01 }},
  "chest": {{ "name": "Crate", "glyph": "C", "color": [150, 150, 50] }}
}}"#
    )
}

const BANDIT: &str = r#"{ "name": "Bandit", "glyph": "b", "color": [1, 2, 3],
    "fighter": { "hp": 5, "defense": 4, "power": 1 },
    "inventory": { "capacity": 26, "max_weight": 55.0 },
    "spawn_curve": { "min_prob": 0.0, "peak_prob": 0.8, "start_floor": 1, "peak_floor": 4, "end_floor": 10 } }"#;

const BOTTLE: &str = r#"{ "name": "Bottle", "glyph": "!", "color": [1, 2, 3], "weight": 1.0,
    "behavior": "healing", "params": { "amount": 4 } }"#;

#[test]
fn test_shipped_templates_match_builtin() {
    let loaded = default_templates().unwrap();
    assert_eq!(loaded, TemplateSet::builtin());
}

#[test]
fn test_minimal_file() {
    let set = from_json_str(&minimal(BOTTLE, BANDIT)).unwrap();
    assert_eq!(set.monsters.len(), 1);
    assert_eq!(set.items[0].consumable(), Some(&Consumable::Healing { amount: 4 }));
    assert!(set.chest.as_chest().is_some_and(|c| c.breakable));
}

#[test]
fn test_equippable_selectors() {
    let items = r#"
      { "name": "Spear", "glyph": "/", "color": [0, 0, 0], "weight": 2.0,
        "behavior": "weapon", "params": { "class": "spear" } },
      { "name": "Plate", "glyph": "[", "color": [0, 0, 0], "weight": 9.0,
        "behavior": "armor", "params": { "slot": "torso", "armor_class": "heavy", "defense": 4 } },
      { "name": "Lucky Ring", "glyph": "o", "color": [0, 0, 0], "weight": 0.1,
        "behavior": "trinket", "params": { "slot": "ring", "dexterity": 2 } }"#;
    let set = from_json_str(&minimal(items, BANDIT)).unwrap();

    let spear = set.items[0].equippable().unwrap();
    assert_eq!(spear.weapon, Some(WeaponClass::Spear));
    assert_eq!(spear.slot, EquipmentSlot::Hands);

    let plate = set.items[1].equippable().unwrap();
    assert_eq!(plate.armor, Some(ArmorClass::Heavy));
    assert_eq!(plate.defense_bonus, 4);
    assert_eq!(plate.dexterity_bonus, -2);

    let ring = set.items[2].equippable().unwrap();
    assert_eq!(ring.slot, EquipmentSlot::Ring);
    assert_eq!(ring.dexterity_bonus, 2);
}

#[test]
fn test_unknown_behavior() {
    let item = r#"{ "name": "Gizmo", "glyph": "*", "color": [0, 0, 0], "weight": 1.0, "behavior": "teleport" }"#;
    let err = from_json_str(&minimal(item, BANDIT)).unwrap_err();
    assert!(matches!(
        err,
        DataError::UnknownBehavior { ref behavior, .. } if behavior == "teleport"
    ));
}

#[test]
fn test_missing_parameter() {
    let item = r#"{ "name": "Battery", "glyph": "}", "color": [0, 0, 0], "weight": 0.1,
        "behavior": "lightning", "params": { "damage": 15 } }"#;
    let err = from_json_str(&minimal(item, BANDIT)).unwrap_err();
    assert!(matches!(err, DataError::MissingField { field: "max_range", .. }));
}

#[test]
fn test_negative_capacity() {
    let monster = BANDIT.replace("\"capacity\": 26", "\"capacity\": -1");
    let err = from_json_str(&minimal(BOTTLE, &monster)).unwrap_err();
    assert!(matches!(err, DataError::InvalidValue { field: "capacity", .. }));
}

#[test]
fn test_bad_spawn_curve() {
    let monster = BANDIT.replace("\"end_floor\": 10", "\"end_floor\": 2");
    let err = from_json_str(&minimal(BOTTLE, &monster)).unwrap_err();
    assert!(matches!(err, DataError::BadSpawnCurve(ref name) if name == "Bandit"));
}

#[test]
fn test_duplicate_name() {
    let monsters = format!("{BANDIT}, {BANDIT}");
    let err = from_json_str(&minimal(BOTTLE, &monsters)).unwrap_err();
    assert!(matches!(err, DataError::DuplicateName(ref name) if name == "Bandit"));
}

#[test]
fn test_empty_roster_is_rejected() {
    let err = from_json_str(&minimal(BOTTLE, "")).unwrap_err();
    assert!(matches!(err, DataError::Incomplete(_)));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(from_json_str("{ not json"), Err(DataError::Json(_))));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("ds-data-templates-{}.json", std::process::id()));
    std::fs::write(&path, minimal(BOTTLE, BANDIT)).unwrap();
    let set = load_templates(&path).unwrap();
    assert_eq!(set.items.len(), 1);
    std::fs::remove_file(&path).ok();

    assert!(matches!(load_templates(&path), Err(DataError::Io(_))));
}
