//! Content domain: RON-loaded definitions and the content registry.

mod data;
mod loader;
mod registry;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{
    DataFile, DungeonDefaults, EnemyDef, EnemyTier, EquipmentItemDef, EquipmentSlot,
    GameplayDefaults, ProgressionDefaults, PuzzleDef, ScalingDefaults,
};
pub use loader::{ContentLoadError, load_all_content};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content};

use bevy::prelude::*;
use std::path::Path;

use crate::core::DifficultyScaling;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content);
    }
}

/// Load content at startup. Falls back to builtin definitions with an
/// error log when assets/data is missing or unreadable - a bad install
/// degrades, it does not abort.
pub(crate) fn load_content(mut commands: Commands) {
    let base_path = Path::new("assets/data");

    let (registry, defaults) = match load_all_content(base_path) {
        Ok((registry, defaults)) => {
            info!("{}", registry.summary());
            (registry, defaults)
        }
        Err(errors) => {
            for error in &errors {
                error!("{}", error);
            }
            error!("Content load failed; using builtin fallback definitions");
            (ContentRegistry::builtin(), GameplayDefaults::default())
        }
    };

    for error in validate_content(&registry) {
        error!("{}", error);
    }
    for pool in validation::missing_pools(&registry) {
        warn!("Content registry has no {}", pool);
    }

    commands.insert_resource(DifficultyScaling {
        base_multiplier: 1.0,
        enemy_count_per_level: defaults.scaling.enemy_count_per_level,
        enemy_health_per_level: defaults.scaling.enemy_health_per_level,
        max_multiplier: defaults.scaling.max_multiplier,
    });
    commands.insert_resource(registry);
    commands.insert_resource(defaults);
}
