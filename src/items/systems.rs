//! Items domain: collection handling.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::items::components::{Inventory, ItemPickup};
use crate::items::events::ItemCollectedEvent;

/// Move collected pickups into the inventory. Events naming entities
/// that are not pickups (stale or mid-transition input) are dropped
/// with a diagnostic.
pub(crate) fn handle_item_collected(
    mut commands: Commands,
    mut events: MessageReader<ItemCollectedEvent>,
    pickups: Query<&ItemPickup>,
    mut inventory: ResMut<Inventory>,
) {
    for event in events.read() {
        let Ok(pickup) = pickups.get(event.entity) else {
            warn!(
                "Ignoring collect request for non-pickup entity {:?}",
                event.entity
            );
            continue;
        };

        info!("Collected '{}' ({:?})", pickup.def_id, pickup.slot);
        inventory.add_equipment(pickup.def_id.clone());
        commands.entity(event.entity).despawn();
    }
}

/// Fresh inventory for a fresh run.
pub(crate) fn reset_inventory(mut inventory: ResMut<Inventory>) {
    inventory.reset();
}
