//! Content domain: parsing, registry, and validation tests.

use std::path::Path;

use super::data::{DataFile, EnemyDef, EnemyTier, GameplayDefaults, PuzzleDef};
use super::loader::load_all_content;
use super::registry::ContentRegistry;
use super::validation::{missing_pools, validate_content};

#[test]
fn test_parse_enemy_data_file() {
    let source = r#"(
        schema_version: 1,
        items: [
            (id: "enemy_husk", name: "Husk", tier: Minor, health: 30.0, tags: ["undead"]),
            (id: "enemy_hollow_king", name: "Hollow King", tier: Boss, health: 400.0, tags: []),
        ],
    )"#;

    let parsed: DataFile<EnemyDef> = ron::from_str(source).unwrap();
    assert_eq!(parsed.schema_version, 1);
    assert_eq!(parsed.items.len(), 2);
    assert_eq!(parsed.items[1].tier, EnemyTier::Boss);
}

#[test]
fn test_parse_gameplay_defaults() {
    let source = r#"(
        schema_version: 1,
        dungeon: (
            min_rooms: 10,
            max_rooms: 24,
            rooms_per_difficulty: 3,
            base_special_quota: 3,
            specials_per_difficulty: 1,
            room_width: 960.0,
            room_height: 540.0,
        ),
        progression: (
            clear_quota: 3,
            final_level: 3,
            total_waves: 2,
            treasure_item_count: 2,
        ),
        scaling: (
            base_enemies: 3,
            max_enemies: 8,
            enemy_count_per_level: 1.0,
            enemy_health_per_level: 0.25,
            max_multiplier: 4.0,
        ),
    )"#;

    let parsed: GameplayDefaults = ron::from_str(source).unwrap();
    assert_eq!(parsed.dungeon.min_rooms, 10);
    assert_eq!(parsed.progression.clear_quota, 3);
    assert_eq!(parsed.progression.total_waves, 2);
}

#[test]
fn test_defaults_match_the_design_quotas() {
    let defaults = GameplayDefaults::default();
    assert_eq!(defaults.progression.clear_quota, 3);
    assert_eq!(defaults.progression.final_level, 3);
    assert_eq!(defaults.dungeon.base_special_quota, 3);
}

#[test]
fn test_builtin_registry_is_complete_and_valid() {
    let registry = ContentRegistry::builtin();
    assert!(!registry.enemies.is_empty());
    assert!(!registry.equipment_items.is_empty());
    assert!(!registry.puzzles.is_empty());
    assert!(validate_content(&registry).is_empty());
    assert!(missing_pools(&registry).is_empty());
}

#[test]
fn test_enemies_of_tier_filters_and_sorts() {
    let registry = ContentRegistry::builtin();
    let minors = registry.enemies_of_tier(EnemyTier::Minor);
    assert!(minors.iter().all(|e| e.tier == EnemyTier::Minor));
    let mut ids: Vec<&str> = minors.iter().map(|e| e.id.as_str()).collect();
    let sorted = ids.clone();
    ids.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn test_validation_flags_missing_reward_item() {
    let mut registry = ContentRegistry::builtin();
    registry.puzzles.insert(
        "puzzle_broken".to_string(),
        PuzzleDef {
            id: "puzzle_broken".to_string(),
            name: "Broken".to_string(),
            description: String::new(),
            reward_item_id: Some("item_does_not_exist".to_string()),
        },
    );

    let errors = validate_content(&registry);
    assert_eq!(errors.len(), 1);
    let message = errors[0].to_string();
    assert!(message.contains("puzzle_broken"));
    assert!(message.contains("item_does_not_exist"));
}

#[test]
fn test_load_from_missing_directory_fails_with_errors() {
    let result = load_all_content(Path::new("definitely/not/a/content/dir"));
    let errors = result.err().expect("missing directory must fail");
    assert!(!errors.is_empty());
    assert!(errors[0].to_string().contains("Failed to load"));
}
