//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Delivered by the combat plugin when an enemy entity dies.
#[derive(Debug)]
pub struct EnemyDefeatedEvent {
    pub entity: Entity,
}

impl Message for EnemyDefeatedEvent {}
