//! Items domain: inventory, keys, and equipment pickups.

mod components;
mod events;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{Inventory, ItemPickup};
pub use events::ItemCollectedEvent;

use bevy::prelude::*;

use crate::core::GameState;
use crate::items::systems::{handle_item_collected, reset_inventory};

pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Inventory>()
            .add_message::<ItemCollectedEvent>()
            .add_systems(OnEnter(GameState::Run), reset_inventory)
            .add_systems(
                Update,
                handle_item_collected.run_if(in_state(GameState::Run)),
            );
    }
}
