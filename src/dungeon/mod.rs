//! Dungeon domain: room graph arena and procedural generation.

mod generator;
mod graph;

#[cfg(test)]
mod tests;

pub use generator::{generate, min_special_rooms, target_room_count};
pub use graph::{Direction, DungeonError, Room, RoomGraph, RoomId, RoomType};

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::content::GameplayDefaults;
use crate::core::RunConfig;

pub struct DungeonPlugin;

impl Plugin for DungeonPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoomGraph>();
    }
}

/// Build the run's room graph from the seeded RNG stream. Scheduled by
/// the rooms plugin at run entry, ahead of the first room entry.
pub(crate) fn build_dungeon(
    mut graph: ResMut<RoomGraph>,
    run_config: Res<RunConfig>,
    defaults: Option<Res<GameplayDefaults>>,
) {
    let defaults = defaults
        .map(|d| d.clone())
        .unwrap_or_default();

    let mut rng = ChaCha8Rng::seed_from_u64(run_config.seed);
    *graph = generate(run_config.difficulty, &defaults.dungeon, &mut rng);

    info!(
        "Generated dungeon: {} rooms, {} special, boss room: {:?} (seed: {})",
        graph.len(),
        graph.special_count(),
        graph.boss_room(),
        run_config.seed
    );
}
