//! Rooms domain: door entities and room-scoped markers.

use bevy::prelude::*;

use crate::dungeon::{Direction, RoomId, RoomType};
use crate::items::Inventory;

/// Lock state of a door. Unlocked is terminal: doors never relock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorLock {
    Unlocked,
    Locked,
    LockedRequiresKey,
}

/// A door out of the current room.
///
/// Doors are ephemeral views of graph edges: the active room's door set
/// is rebuilt whenever the room or its clear state changes, and a door
/// is never looked up or mutated across room re-entries.
#[derive(Component, Debug, Clone)]
pub struct Door {
    pub target: RoomId,
    pub target_type: RoomType,
    pub direction: Direction,
    /// Center of the door in room-local coordinates.
    pub position: Vec2,
    pub size: Vec2,
    pub lock: DoorLock,
}

impl Door {
    /// Whether a world-space point (room-local) lies on this door.
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        (point.x - self.position.x).abs() <= half.x && (point.y - self.position.y).abs() <= half.y
    }

    /// Open a locked door directly (clear condition became true).
    /// Key doors are not affected.
    pub fn force_unlock(&mut self) {
        if self.lock == DoorLock::Locked {
            self.lock = DoorLock::Unlocked;
        }
    }

    /// Try to open this door with a key from the inventory.
    ///
    /// On `LockedRequiresKey`: consumes exactly one key and unlocks when
    /// one is held, otherwise returns false and changes nothing. Plain
    /// `Locked` doors cannot be opened this way. Returns true on an
    /// already-open door without touching the inventory.
    pub fn unlock(&mut self, inventory: &mut Inventory) -> bool {
        match self.lock {
            DoorLock::Unlocked => true,
            DoorLock::Locked => false,
            DoorLock::LockedRequiresKey => {
                if inventory.consume_key() {
                    self.lock = DoorLock::Unlocked;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Marker for every entity belonging to the active room (doors, enemies,
/// pickups, the room instance itself). Torn down on every transition.
#[derive(Component, Debug)]
pub struct RoomScoped;

/// The active room's anchor entity.
#[derive(Component, Debug)]
pub struct RoomInstance {
    pub id: RoomId,
    pub room_type: RoomType,
}

/// Present while the room's combat (or boss) encounter is live.
#[derive(Component, Debug)]
pub struct EncounterActive;

/// Present while the room's treasure haul is uncollected.
#[derive(Component, Debug)]
pub struct TreasureActive;

/// Marks a room instance whose clear condition already fired, to
/// prevent duplicate clear events.
#[derive(Component, Debug)]
pub struct RoomWasCleared;

/// The interactable puzzle fixture in a puzzle room.
#[derive(Component, Debug)]
pub struct PuzzleConsole {
    pub def_id: String,
}
