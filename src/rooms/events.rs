//! Rooms domain: progression events and input-router entry points.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::dungeon::{RoomId, RoomType};

// ----------------------------------------------------------------------------
// Entry points, written by the input router
// ----------------------------------------------------------------------------

/// The player pressed interact at a world position (door use, key unlock).
#[derive(Debug)]
pub struct InteractRequestEvent {
    pub position: Vec2,
}

impl Message for InteractRequestEvent {}

/// Movement update: check whether the player position entered an open door.
#[derive(Debug)]
pub struct TransitionCheckEvent {
    pub player_position: Vec2,
}

impl Message for TransitionCheckEvent {}

/// The announce phase (fade, of caller-controlled length) is over:
/// perform the room swap now.
#[derive(Debug)]
pub struct TransitionActivateEvent;

impl Message for TransitionActivateEvent {}

/// The puzzle plugin reports the current room's puzzle as solved.
#[derive(Debug)]
pub struct PuzzleSolvedEvent;

impl Message for PuzzleSolvedEvent {}

// ----------------------------------------------------------------------------
// Emitted events, consumed by renderer/audio/effects plugins
// ----------------------------------------------------------------------------

/// A room transition was accepted; the announce phase begins. The
/// renderer owns the fade and replies with [`TransitionActivateEvent`].
#[derive(Debug)]
pub struct RoomTransitionStarted {
    pub from: Option<RoomId>,
    pub to: RoomId,
    pub to_type: RoomType,
}

impl Message for RoomTransitionStarted {}

/// The swap completed: the room is populated and its doors are built.
#[derive(Debug)]
pub struct RoomEnteredEvent {
    pub room: RoomId,
    pub room_type: RoomType,
}

impl Message for RoomEnteredEvent {}

/// A room's clear condition was met.
#[derive(Debug)]
pub struct RoomClearedEvent {
    pub room: RoomId,
    pub room_type: RoomType,
}

impl Message for RoomClearedEvent {}

/// The player tried a door that would not open.
#[derive(Debug)]
pub struct DoorLockedEvent {
    pub door: Entity,
    pub target_type: RoomType,
    /// True when the door needs a key the player does not have.
    pub needs_key: bool,
}

impl Message for DoorLockedEvent {}

/// The level counter advanced after a completed level.
#[derive(Debug)]
pub struct LevelUpEvent {
    pub new_level: u32,
}

impl Message for LevelUpEvent {}

/// The boss door is open at the spawn hub.
#[derive(Debug)]
pub struct BossUnlockedEvent {
    pub boss_room: RoomId,
}

impl Message for BossUnlockedEvent {}
