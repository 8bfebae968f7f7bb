//! Combat domain: enemy data and defeat bookkeeping for clear detection.

mod components;
mod events;
mod spawn;
mod systems;

pub use components::{BossEnemy, Enemy, EnemyIdentity, Health};
pub use events::EnemyDefeatedEvent;
pub use spawn::{spawn_boss, spawn_enemy};

use bevy::prelude::*;

use crate::core::GameState;
use crate::combat::systems::handle_enemy_defeated;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EnemyDefeatedEvent>().add_systems(
            Update,
            handle_enemy_defeated.run_if(in_state(GameState::Run)),
        );
    }
}
