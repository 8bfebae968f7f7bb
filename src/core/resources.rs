//! Core domain: shared resources for run configuration and scaling.

use bevy::prelude::*;
use rand::Rng;

/// Configuration for a single run. The seed drives dungeon generation;
/// the same seed and difficulty always produce the same room graph.
#[derive(Resource, Debug, Clone)]
pub struct RunConfig {
    pub seed: u64,
    /// Difficulty setting, 1-based. Raises room count, creation
    /// probability, and the special-room quota.
    pub difficulty: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
            difficulty: 1,
        }
    }
}

/// Configuration for how enemy pressure scales with the current level.
#[derive(Resource, Debug, Clone)]
pub struct DifficultyScaling {
    /// Base multiplier applied to all scaling
    pub base_multiplier: f32,
    /// Additional enemies per level (additive, floored)
    pub enemy_count_per_level: f32,
    /// How much enemy health increases per level (e.g. 0.25 = +25%)
    pub enemy_health_per_level: f32,
    /// Cap on the health multiplier growth
    pub max_multiplier: f32,
}

impl Default for DifficultyScaling {
    fn default() -> Self {
        Self {
            base_multiplier: 1.0,
            enemy_count_per_level: 1.0,
            enemy_health_per_level: 0.25,
            max_multiplier: 4.0,
        }
    }
}

impl DifficultyScaling {
    /// Health multiplier for enemies at the given level (1-based).
    pub fn enemy_health_multiplier(&self, level: u32) -> f32 {
        let raw =
            self.base_multiplier + (level.saturating_sub(1) as f32 * self.enemy_health_per_level);
        raw.min(self.max_multiplier)
    }

    /// Additional enemy count for the given level (1-based).
    pub fn bonus_enemy_count(&self, level: u32) -> usize {
        (level.saturating_sub(1) as f32 * self.enemy_count_per_level).floor() as usize
    }
}
