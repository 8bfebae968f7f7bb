//! ContentRegistry resource providing HashMap lookups for loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for all loaded game content.
/// Provides O(1) lookup by id for any content type.
#[derive(Resource, Default)]
pub struct ContentRegistry {
    pub enemies: HashMap<String, EnemyDef>,
    pub equipment_items: HashMap<String, EquipmentItemDef>,
    pub puzzles: HashMap<String, PuzzleDef>,
}

impl ContentRegistry {
    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Enemies: {}\n\
             - Equipment Items: {}\n\
             - Puzzles: {}",
            self.enemies.len(),
            self.equipment_items.len(),
            self.puzzles.len(),
        )
    }

    /// Enemy defs of a tier, sorted by id so selection stays
    /// deterministic for a given RNG stream.
    pub fn enemies_of_tier(&self, tier: EnemyTier) -> Vec<&EnemyDef> {
        let mut defs: Vec<&EnemyDef> = self.enemies.values().filter(|e| e.tier == tier).collect();
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        defs
    }

    /// Equipment defs sorted by id.
    pub fn equipment_sorted(&self) -> Vec<&EquipmentItemDef> {
        let mut defs: Vec<&EquipmentItemDef> = self.equipment_items.values().collect();
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        defs
    }

    /// Puzzle ids sorted for deterministic assignment.
    pub fn puzzle_ids_sorted(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.puzzles.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Compiled-in fallback content, used when assets/data is missing or
    /// unreadable so a run can still start.
    pub fn builtin() -> Self {
        let mut registry = Self::default();

        for def in [
            EnemyDef {
                id: "enemy_husk".to_string(),
                name: "Husk".to_string(),
                tier: EnemyTier::Minor,
                health: 30.0,
                tags: vec!["undead".to_string()],
            },
            EnemyDef {
                id: "enemy_warden".to_string(),
                name: "Warden".to_string(),
                tier: EnemyTier::Major,
                health: 80.0,
                tags: vec!["armored".to_string()],
            },
            EnemyDef {
                id: "enemy_hollow_king".to_string(),
                name: "Hollow King".to_string(),
                tier: EnemyTier::Boss,
                health: 400.0,
                tags: vec!["boss".to_string()],
            },
        ] {
            registry.enemies.insert(def.id.clone(), def);
        }

        for def in [
            EquipmentItemDef {
                id: "item_rusted_helm".to_string(),
                name: "Rusted Helm".to_string(),
                slot: EquipmentSlot::Helmet,
                tier: 1,
                tags: vec![],
            },
            EquipmentItemDef {
                id: "item_delver_boots".to_string(),
                name: "Delver Boots".to_string(),
                slot: EquipmentSlot::Boots,
                tier: 1,
                tags: vec![],
            },
            EquipmentItemDef {
                id: "item_sigil_band".to_string(),
                name: "Sigil Band".to_string(),
                slot: EquipmentSlot::Accessory,
                tier: 2,
                tags: vec![],
            },
        ] {
            registry.equipment_items.insert(def.id.clone(), def);
        }

        for def in [
            PuzzleDef {
                id: "puzzle_rune_order".to_string(),
                name: "Rune Order".to_string(),
                description: "Light the wall runes in their carved order.".to_string(),
                reward_item_id: None,
            },
            PuzzleDef {
                id: "puzzle_counterweight".to_string(),
                name: "Counterweight".to_string(),
                description: "Balance the floor plates to open the seal.".to_string(),
                reward_item_id: None,
            },
        ] {
            registry.puzzles.insert(def.id.clone(), def);
        }

        registry
    }
}
