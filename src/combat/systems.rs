//! Combat domain: defeat bookkeeping.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::components::{Enemy, EnemyIdentity};
use crate::combat::events::EnemyDefeatedEvent;

/// Despawn defeated enemies. Clear detection in the rooms domain counts
/// the survivors afterwards. Defeat reports for entities that are not
/// enemies (stale input, double delivery) are dropped with a diagnostic.
pub(crate) fn handle_enemy_defeated(
    mut commands: Commands,
    mut events: MessageReader<EnemyDefeatedEvent>,
    enemies: Query<Option<&EnemyIdentity>, With<Enemy>>,
) {
    for event in events.read() {
        let Ok(identity) = enemies.get(event.entity) else {
            warn!(
                "Ignoring defeat report for non-enemy entity {:?}",
                event.entity
            );
            continue;
        };

        if let Some(identity) = identity {
            debug!("Enemy '{}' defeated", identity.def_id);
        }
        commands.entity(event.entity).despawn();
    }
}
