//! Rooms domain: door spawning and room population helpers.

use bevy::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::combat::{spawn_boss, spawn_enemy};
use crate::content::{ContentRegistry, EnemyDef, EnemyTier, GameplayDefaults};
use crate::core::DifficultyScaling;
use crate::dungeon::RoomGraph;
use crate::items::ItemPickup;
use crate::rooms::components::{
    Door, EncounterActive, PuzzleConsole, RoomInstance, RoomScoped, TreasureActive,
};
use crate::rooms::policy::{DoorSpec, PopulateKind};
use crate::rooms::progression::{ProgressionController, RoomEntry};

pub(crate) fn spawn_doors(commands: &mut Commands, specs: &[DoorSpec]) {
    for spec in specs {
        commands.spawn((
            Door {
                target: spec.target,
                target_type: spec.target_type,
                direction: spec.direction,
                position: spec.position,
                size: spec.size,
                lock: spec.lock,
            },
            Transform::from_xyz(spec.position.x, spec.position.y, 0.0),
            RoomScoped,
        ));
    }
}

/// Tear down the current door entities and spawn the given plan.
/// Doors are ephemeral: a rebuild is always a full replacement.
pub(crate) fn rebuild_doors(
    commands: &mut Commands,
    existing: &Query<Entity, With<Door>>,
    specs: &[DoorSpec],
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    spawn_doors(commands, specs);
}

/// Instantiate the entered room's contents per its populate rule.
pub(crate) fn populate_room(
    commands: &mut Commands,
    entry: &RoomEntry,
    graph: &RoomGraph,
    registry: &ContentRegistry,
    scaling: &DifficultyScaling,
    defaults: &GameplayDefaults,
    progression: &mut ProgressionController,
) {
    let room_size = graph
        .get(entry.room)
        .map(|r| r.size)
        .unwrap_or(Vec2::new(960.0, 540.0));

    let room_entity = commands
        .spawn((
            RoomInstance {
                id: entry.room,
                room_type: entry.room_type,
            },
            RoomScoped,
            Transform::default(),
        ))
        .id();

    match entry.populate {
        PopulateKind::Nothing => {}
        PopulateKind::Enemies => {
            progression.begin_combat(defaults.progression.total_waves);
            commands.entity(room_entity).insert(EncounterActive);
            spawn_combat_wave(
                commands,
                registry,
                scaling,
                defaults,
                room_size,
                progression.level,
                1,
            );
        }
        PopulateKind::Boss => {
            commands.entity(room_entity).insert(EncounterActive);
            spawn_boss_encounter(commands, registry, scaling, room_size, progression.level);
        }
        PopulateKind::Items => {
            commands.entity(room_entity).insert(TreasureActive);
            spawn_treasure_items(commands, registry, defaults, room_size);
        }
        PopulateKind::Puzzle => {
            if let Some(def_id) = progression.assign_puzzle(entry.room, registry) {
                info!("Puzzle room {:?} assigned '{}'", entry.room, def_id);
                commands.spawn((
                    PuzzleConsole { def_id },
                    Transform::default(),
                    RoomScoped,
                ));
            } else {
                warn!("No puzzle definitions loaded; puzzle room spawns empty");
            }
        }
    }
}

/// Spawn one combat wave, scaled to the current level.
pub(crate) fn spawn_combat_wave(
    commands: &mut Commands,
    registry: &ContentRegistry,
    scaling: &DifficultyScaling,
    defaults: &GameplayDefaults,
    room_size: Vec2,
    level: u32,
    wave: u32,
) {
    let mut pool: Vec<&EnemyDef> = registry.enemies_of_tier(EnemyTier::Minor);
    pool.extend(registry.enemies_of_tier(EnemyTier::Major));
    if pool.is_empty() {
        warn!("No combat enemies in registry; wave {} spawns empty", wave);
        return;
    }

    let count = (defaults.scaling.base_enemies as usize + scaling.bonus_enemy_count(level))
        .min(defaults.scaling.max_enemies as usize)
        .max(1);
    let health_mult = scaling.enemy_health_multiplier(level);

    // Placement jitter is cosmetic; determinism only matters to the
    // seeded generation stream, not to enemy positions.
    let mut rng = rand::rng();
    let margin = 80.0;
    let step = (room_size.x - 2.0 * margin) / count as f32;

    for i in 0..count {
        let Some(def) = pool.choose(&mut rng) else {
            break;
        };
        let x = -room_size.x / 2.0 + margin + (i as f32 + 0.5) * step;
        let y = rng.random_range(-room_size.y / 4.0..room_size.y / 4.0);
        let entity = spawn_enemy(commands, def, Vec2::new(x, y), health_mult);
        commands.entity(entity).insert(RoomScoped);
    }

    info!(
        "Spawned wave {} with {} enemies (health x{:.2})",
        wave, count, health_mult
    );
}

fn spawn_boss_encounter(
    commands: &mut Commands,
    registry: &ContentRegistry,
    scaling: &DifficultyScaling,
    room_size: Vec2,
    level: u32,
) {
    let bosses = registry.enemies_of_tier(EnemyTier::Boss);
    let Some(boss_def) = bosses.first() else {
        error!("No boss enemy in registry; boss room spawns empty");
        return;
    };

    let health_mult = scaling.enemy_health_multiplier(level);
    let entity = spawn_boss(commands, boss_def, Vec2::ZERO, health_mult);
    commands.entity(entity).insert(RoomScoped);

    // A couple of minions flanking the boss.
    let minions = registry.enemies_of_tier(EnemyTier::Minor);
    if let Some(minion_def) = minions.first() {
        for x in [-room_size.x / 4.0, room_size.x / 4.0] {
            let minion = spawn_enemy(commands, minion_def, Vec2::new(x, 0.0), health_mult);
            commands.entity(minion).insert(RoomScoped);
        }
    }

    info!(
        "Spawned boss '{}' (health x{:.2})",
        boss_def.id, health_mult
    );
}

fn spawn_treasure_items(
    commands: &mut Commands,
    registry: &ContentRegistry,
    defaults: &GameplayDefaults,
    room_size: Vec2,
) {
    let pool = registry.equipment_sorted();
    if pool.is_empty() {
        warn!("No equipment items in registry; treasure room spawns empty");
        return;
    }

    let count = (defaults.progression.treasure_item_count as usize).min(pool.len());
    let mut rng = rand::rng();
    let picks: Vec<_> = pool.choose_multiple(&mut rng, count).collect();
    let step = room_size.x / (count + 1) as f32;

    for (i, def) in picks.into_iter().enumerate() {
        let x = -room_size.x / 2.0 + (i + 1) as f32 * step;
        commands.spawn((
            ItemPickup {
                def_id: def.id.clone(),
                slot: def.slot,
            },
            Transform::from_xyz(x, 0.0, 0.0),
            RoomScoped,
        ));
    }

    info!("Spawned {} treasure items", count);
}
