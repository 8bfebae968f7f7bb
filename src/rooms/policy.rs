//! Rooms domain: the per-room-type rule table.
//!
//! Clear conditions, door lock policy, and population are decided here,
//! in one place, so adding a room type is a single edit instead of a
//! set of synchronized match arms across the domain.

use bevy::prelude::*;

use crate::dungeon::{Direction, RoomId, RoomType};
use crate::rooms::components::DoorLock;

/// How a room of a given type is considered cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearCondition {
    /// Hub rooms have no obstacles.
    None,
    /// All enemies dead and the final wave reached.
    EnemiesDown,
    /// The external puzzle-solved event.
    PuzzleSolved,
    /// Every spawned equipment item collected.
    ItemsCollected,
    /// All enemies including the boss dead; ends the run.
    BossDown,
}

/// What gets spawned into a room of a given type on fresh entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulateKind {
    Nothing,
    Enemies,
    Puzzle,
    Items,
    Boss,
}

/// The full rule row for one room type.
#[derive(Debug, Clone, Copy)]
pub struct RoomTypeSpec {
    pub clear: ClearCondition,
    /// Base lock of a door leading into a room of this type.
    pub entry_lock: DoorLock,
    pub populate: PopulateKind,
    /// Boss rooms have no outbound doors.
    pub has_doors: bool,
}

pub fn spec_for(room_type: RoomType) -> RoomTypeSpec {
    match room_type {
        RoomType::Spawn => RoomTypeSpec {
            clear: ClearCondition::None,
            entry_lock: DoorLock::Unlocked,
            populate: PopulateKind::Nothing,
            has_doors: true,
        },
        RoomType::Combat => RoomTypeSpec {
            clear: ClearCondition::EnemiesDown,
            entry_lock: DoorLock::Locked,
            populate: PopulateKind::Enemies,
            has_doors: true,
        },
        RoomType::Puzzle => RoomTypeSpec {
            clear: ClearCondition::PuzzleSolved,
            entry_lock: DoorLock::Unlocked,
            populate: PopulateKind::Puzzle,
            has_doors: true,
        },
        RoomType::Treasure => RoomTypeSpec {
            clear: ClearCondition::ItemsCollected,
            entry_lock: DoorLock::LockedRequiresKey,
            populate: PopulateKind::Items,
            has_doors: true,
        },
        RoomType::Boss => RoomTypeSpec {
            clear: ClearCondition::BossDown,
            entry_lock: DoorLock::Unlocked,
            populate: PopulateKind::Boss,
            has_doors: false,
        },
    }
}

/// Progression facts the lock policy depends on.
#[derive(Debug, Clone, Copy)]
pub struct DoorPolicyContext {
    pub current_type: RoomType,
    pub current_cleared: bool,
    pub treasure_cleared_in_level: bool,
}

/// Lock for a door from the current room toward `target_type`.
///
/// An uncleared combat room locks every outbound door until the fight
/// ends. Treasure doors always require a key (the key only drops from
/// the puzzle, which is what enforces puzzle-before-treasure). Combat
/// doors open once the level's treasure is looted, or once the current
/// room's own clear condition fired.
pub fn door_lock(target_type: RoomType, ctx: &DoorPolicyContext) -> DoorLock {
    if ctx.current_type == RoomType::Combat && !ctx.current_cleared {
        return DoorLock::Locked;
    }

    match target_type {
        RoomType::Treasure => DoorLock::LockedRequiresKey,
        RoomType::Combat => {
            let route_open = ctx.treasure_cleared_in_level
                || (ctx.current_type != RoomType::Spawn && ctx.current_cleared);
            if route_open {
                DoorLock::Unlocked
            } else {
                DoorLock::Locked
            }
        }
        other => spec_for(other).entry_lock,
    }
}

// ----------------------------------------------------------------------------
// Door placement
// ----------------------------------------------------------------------------

pub const DOOR_SIZE: Vec2 = Vec2::new(28.0, 72.0);
/// Distance from the room edge to a door center.
const DOOR_INSET: f32 = 20.0;

/// Everything needed to spawn one door. Pure data, so a planned door
/// set can be compared and tested without an ECS world.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorSpec {
    pub target: RoomId,
    pub target_type: RoomType,
    pub direction: Direction,
    pub position: Vec2,
    pub size: Vec2,
    pub lock: DoorLock,
}

/// Evenly spaced positions along the right wall for `count` doors.
pub fn outbound_door_positions(room_size: Vec2, count: usize) -> Vec<Vec2> {
    let x = room_size.x / 2.0 - DOOR_INSET;
    (0..count)
        .map(|i| {
            let t = (i + 1) as f32 / (count + 1) as f32;
            Vec2::new(x, room_size.y * (0.5 - t))
        })
        .collect()
}

/// Position of the return-to-spawn door, on the left wall.
pub fn return_door_position(room_size: Vec2) -> Vec2 {
    Vec2::new(-room_size.x / 2.0 + DOOR_INSET, 0.0)
}
