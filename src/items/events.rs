//! Items domain: item events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Delivered by the input router when the player picks up an item entity.
#[derive(Debug)]
pub struct ItemCollectedEvent {
    pub entity: Entity,
}

impl Message for ItemCollectedEvent {}
