//! Combat domain: enemy and boss spawning helpers.

use bevy::prelude::*;

use crate::combat::components::{BossEnemy, Enemy, EnemyIdentity, Health};
use crate::content::EnemyDef;

/// Spawn a regular enemy from its definition with level scaling applied.
/// The caller owns room scoping and any renderer-facing components.
pub fn spawn_enemy(
    commands: &mut Commands,
    def: &EnemyDef,
    position: Vec2,
    health_multiplier: f32,
) -> Entity {
    commands
        .spawn((
            Enemy,
            EnemyIdentity {
                def_id: def.id.clone(),
            },
            Health::new(def.health * health_multiplier),
            Transform::from_xyz(position.x, position.y, 0.0),
        ))
        .id()
}

/// Spawn the boss. Same shape as a regular enemy plus the boss marker.
pub fn spawn_boss(
    commands: &mut Commands,
    def: &EnemyDef,
    position: Vec2,
    health_multiplier: f32,
) -> Entity {
    let entity = spawn_enemy(commands, def, position, health_multiplier);
    commands.entity(entity).insert(BossEnemy);
    entity
}
