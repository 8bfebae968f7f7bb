//! Core domain: run-level events.

use bevy::ecs::message::Message;

/// Fired when the boss dies and the run is won. Audio/effects plugins
/// subscribe to this; the core only uses it to leave the Run state.
#[derive(Debug)]
pub struct VictoryEvent {
    pub level: u32,
}

impl Message for VictoryEvent {}
