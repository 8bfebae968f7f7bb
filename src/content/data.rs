//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Enemies (enemies.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Reflect, Default)]
pub enum EnemyTier {
    #[default]
    Minor,
    Major,
    Boss,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub tier: EnemyTier,
    pub health: f32,
    pub tags: Vec<String>,
}

// ============================================================================
// Equipment Items (equipment_items.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Reflect, Default)]
pub enum EquipmentSlot {
    #[default]
    Helmet,
    Chestplate,
    Gloves,
    Boots,
    Accessory,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct EquipmentItemDef {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    pub tier: u32,
    pub tags: Vec<String>,
}

// ============================================================================
// Puzzles (puzzles.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct PuzzleDef {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Optional bonus equipment granted on top of the key.
    #[serde(default)]
    pub reward_item_id: Option<String>,
}

// ============================================================================
// Gameplay Defaults (gameplay_defaults.ron) - Single struct, not a list
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect, Resource)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    pub dungeon: DungeonDefaults,
    pub progression: ProgressionDefaults,
    pub scaling: ScalingDefaults,
}

impl Default for GameplayDefaults {
    fn default() -> Self {
        Self {
            schema_version: 1,
            dungeon: DungeonDefaults::default(),
            progression: ProgressionDefaults::default(),
            scaling: ScalingDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct DungeonDefaults {
    pub min_rooms: u32,
    pub max_rooms: u32,
    /// Additional target rooms per difficulty step above 1.
    pub rooms_per_difficulty: u32,
    /// Minimum puzzle+treasure rooms at difficulty 1.
    pub base_special_quota: u32,
    /// Additional quota per difficulty step above 1.
    pub specials_per_difficulty: u32,
    pub room_width: f32,
    pub room_height: f32,
}

impl Default for DungeonDefaults {
    fn default() -> Self {
        Self {
            min_rooms: 10,
            max_rooms: 24,
            rooms_per_difficulty: 3,
            base_special_quota: 3,
            specials_per_difficulty: 1,
            room_width: 960.0,
            room_height: 540.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct ProgressionDefaults {
    /// Rooms that must be cleared per level before returning to spawn.
    pub clear_quota: u32,
    /// Level at which the boss encounter unlocks instead of leveling up.
    pub final_level: u32,
    /// Combat waves per combat room.
    pub total_waves: u32,
    /// Equipment pickups spawned in a treasure room.
    pub treasure_item_count: u32,
}

impl Default for ProgressionDefaults {
    fn default() -> Self {
        Self {
            clear_quota: 3,
            final_level: 3,
            total_waves: 2,
            treasure_item_count: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct ScalingDefaults {
    /// Enemies in a combat wave before level scaling.
    pub base_enemies: u32,
    /// Hard cap on enemies per wave.
    pub max_enemies: u32,
    pub enemy_count_per_level: f32,
    pub enemy_health_per_level: f32,
    pub max_multiplier: f32,
}

impl Default for ScalingDefaults {
    fn default() -> Self {
        Self {
            base_enemies: 3,
            max_enemies: 8,
            enemy_count_per_level: 1.0,
            enemy_health_per_level: 0.25,
            max_multiplier: 4.0,
        }
    }
}
