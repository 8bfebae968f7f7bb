//! Rooms domain: the progression state machine.
//!
//! One controller instance owns everything that used to be scattered
//! flags and globals: the current room, level counters, the per-level
//! room-type pool, the puzzle assignment cache, and the phase machine
//! that gates level-ups and the boss unlock. All of it is plain data so
//! the whole machine is testable without an ECS world.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::content::{ContentRegistry, ProgressionDefaults};
use crate::dungeon::{Direction, Room, RoomGraph, RoomId, RoomType};
use crate::rooms::components::DoorLock;
use crate::rooms::policy::{
    self, DoorPolicyContext, DoorSpec, PopulateKind, door_lock, spec_for,
};

/// Room types offered from the spawn hub each level, in door order.
pub const EXPLORABLE_TYPES: [RoomType; 3] =
    [RoomType::Combat, RoomType::Puzzle, RoomType::Treasure];

/// Where the level currently stands. Replaces the original tangle of
/// `awaiting_level_up`/`just_leveled_up` booleans; invalid combinations
/// are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelPhase {
    /// Working through the level's rooms.
    #[default]
    Exploring,
    /// Quota met; the way back to the spawn hub is open.
    ReturningToSpawn,
    /// The spawn hub offers the single boss door.
    BossUnlocked,
}

/// A transition accepted but not yet activated by the caller.
#[derive(Debug, Clone)]
pub struct PendingTransition {
    pub from: Option<RoomId>,
    pub to: RoomId,
}

/// Two-phase room transition state. While `in_flight` is set, movement
/// and interaction input is rejected; this flag is the sole
/// backpressure mechanism and there is no timeout - a transition the
/// caller never activates stalls the machine on purpose.
#[derive(Resource, Debug, Default)]
pub struct TransitionState {
    pub pending: Option<PendingTransition>,
    pub in_flight: bool,
}

/// What happened on room entry, beyond doors and population.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryAction {
    None,
    LevelUp { new_level: u32 },
    BossUnlocked { boss_room: RoomId },
}

/// The planned result of entering a room: what to build, what to
/// announce. The systems layer turns this into entities and messages.
#[derive(Debug, Clone)]
pub struct RoomEntry {
    pub room: RoomId,
    pub room_type: RoomType,
    pub doors: Vec<DoorSpec>,
    pub action: EntryAction,
    pub populate: PopulateKind,
}

/// Outcome of recording a clear.
#[derive(Debug, Clone, Copy)]
pub struct ClearRecord {
    /// False when the room was already cleared this level.
    pub first_time: bool,
    /// True when this clear is the one that met the level quota.
    pub reached_quota: bool,
}

#[derive(Resource, Debug)]
pub struct ProgressionController {
    pub current_room: Option<RoomId>,
    /// 1-based level counter.
    pub level: u32,
    pub rooms_cleared_in_level: u32,
    /// Room types still on offer from the spawn hub this level.
    pub available_room_types: Vec<RoomType>,
    pub puzzle_cleared_in_level: bool,
    pub treasure_cleared_in_level: bool,
    pub phase: LevelPhase,
    /// 1-based wave counter inside a combat room; 0 when not in combat.
    pub current_wave: u32,
    pub total_waves: u32,
    cleared_rooms: HashSet<RoomId>,
    puzzle_assignments: HashMap<RoomId, String>,
}

impl Default for ProgressionController {
    fn default() -> Self {
        Self {
            current_room: None,
            level: 1,
            rooms_cleared_in_level: 0,
            available_room_types: EXPLORABLE_TYPES.to_vec(),
            puzzle_cleared_in_level: false,
            treasure_cleared_in_level: false,
            phase: LevelPhase::Exploring,
            current_wave: 0,
            total_waves: 0,
            cleared_rooms: HashSet::new(),
            puzzle_assignments: HashMap::new(),
        }
    }
}

impl ProgressionController {
    /// Fresh state for a fresh run.
    pub fn reset_for_run(&mut self) {
        *self = Self::default();
    }

    pub fn is_cleared(&self, room: RoomId) -> bool {
        self.cleared_rooms.contains(&room)
    }

    pub fn current_room_cleared(&self) -> bool {
        self.current_room.is_some_and(|room| self.is_cleared(room))
    }

    pub fn puzzle_assignment(&self, room: RoomId) -> Option<&str> {
        self.puzzle_assignments.get(&room).map(String::as_str)
    }

    /// The lock-policy view of the current state.
    pub fn door_context(&self, graph: &RoomGraph) -> DoorPolicyContext {
        let current_type = self
            .current_room
            .and_then(|id| graph.get(id))
            .map(|room| room.room_type)
            .unwrap_or(RoomType::Spawn);
        DoorPolicyContext {
            current_type,
            current_cleared: self.current_room_cleared(),
            treasure_cleared_in_level: self.treasure_cleared_in_level,
        }
    }

    /// Whether the spawn hub should offer the boss door instead of the
    /// regular room-type doors.
    pub fn boss_unlock_ready(&self, defaults: &ProgressionDefaults) -> bool {
        let quota_met_at_final = self.level == defaults.final_level
            && self.rooms_cleared_in_level >= defaults.clear_quota;
        let returning_at_final = self.level >= defaults.final_level
            && matches!(
                self.phase,
                LevelPhase::ReturningToSpawn | LevelPhase::BossUnlocked
            );
        quota_met_at_final || returning_at_final
    }

    /// Enter a room: update visited/available bookkeeping, run the
    /// spawn-hub logic (level-up, boss unlock) when applicable, and plan
    /// the door set. Returns None for an id not in the graph.
    pub fn enter_room(
        &mut self,
        graph: &mut RoomGraph,
        defaults: &ProgressionDefaults,
        room: RoomId,
    ) -> Option<RoomEntry> {
        let room_type = graph.get(room)?.room_type;
        self.current_room = Some(room);
        self.current_wave = 0;
        self.total_waves = 0;
        if let Some(entry) = graph.get_mut(room) {
            entry.visited = true;
        }

        let action = match room_type {
            RoomType::Spawn => self.enter_spawn(graph, defaults),
            RoomType::Boss => EntryAction::None,
            explorable => {
                // Returning to the hub must not re-offer an explored type.
                self.available_room_types.retain(|t| *t != explorable);
                EntryAction::None
            }
        };

        let populate = if self.is_cleared(room) {
            PopulateKind::Nothing
        } else {
            spec_for(room_type).populate
        };

        Some(RoomEntry {
            room,
            room_type,
            doors: self.plan_doors(graph, defaults),
            action,
            populate,
        })
    }

    /// Spawn-hub entry: boss unlock beats level-up beats nothing.
    fn enter_spawn(
        &mut self,
        graph: &mut RoomGraph,
        defaults: &ProgressionDefaults,
    ) -> EntryAction {
        if self.boss_unlock_ready(defaults) {
            // A tiny dungeon may have generated without a boss room.
            let Some(boss_room) = graph.ensure_boss_room() else {
                return EntryAction::None;
            };
            self.phase = LevelPhase::BossUnlocked;
            return EntryAction::BossUnlocked { boss_room };
        }

        if self.phase == LevelPhase::ReturningToSpawn && self.level < defaults.final_level {
            self.level += 1;
            self.rooms_cleared_in_level = 0;
            self.puzzle_cleared_in_level = false;
            self.treasure_cleared_in_level = false;
            self.available_room_types = EXPLORABLE_TYPES.to_vec();
            self.cleared_rooms.clear();
            self.puzzle_assignments.clear();
            self.phase = LevelPhase::Exploring;
            return EntryAction::LevelUp {
                new_level: self.level,
            };
        }

        EntryAction::None
    }

    /// Plan the current room's door set from the current state. Pure:
    /// planning twice with no intervening state change yields the same
    /// set, and rebuilding doors is exactly re-running this plan.
    pub fn plan_doors(&self, graph: &RoomGraph, defaults: &ProgressionDefaults) -> Vec<DoorSpec> {
        let Some(current) = self.current_room else {
            return Vec::new();
        };
        let Some(room) = graph.get(current) else {
            return Vec::new();
        };
        if !spec_for(room.room_type).has_doors {
            return Vec::new();
        }

        if room.room_type == RoomType::Spawn && self.phase == LevelPhase::BossUnlocked {
            return self.plan_boss_door(graph, room);
        }

        let ctx = self.door_context(graph);
        let mut doors = Vec::new();

        let mut targets = Vec::new();
        for &room_type in &self.available_room_types {
            if let Some(target) = pick_room_for_type(graph, current, room_type) {
                targets.push((target, room_type));
            }
        }

        let positions = policy::outbound_door_positions(room.size, targets.len());
        for ((target, target_type), position) in targets.into_iter().zip(positions) {
            let target_pos = graph.get(target).map(|r| r.grid_pos).unwrap_or_default();
            doors.push(DoorSpec {
                target,
                target_type,
                direction: Direction::toward(room.grid_pos, target_pos),
                position,
                size: policy::DOOR_SIZE,
                lock: door_lock(target_type, &ctx),
            });
        }

        // The way home opens only once the quota is met.
        if room.room_type != RoomType::Spawn
            && self.rooms_cleared_in_level >= defaults.clear_quota
            && self.phase == LevelPhase::ReturningToSpawn
        {
            if let Some(spawn) = graph.spawn_room() {
                let spawn_pos = graph.get(spawn).map(|r| r.grid_pos).unwrap_or_default();
                doors.push(DoorSpec {
                    target: spawn,
                    target_type: RoomType::Spawn,
                    direction: Direction::toward(room.grid_pos, spawn_pos),
                    position: policy::return_door_position(room.size),
                    size: policy::DOOR_SIZE,
                    lock: door_lock(RoomType::Spawn, &ctx),
                });
            }
        }

        doors
    }

    fn plan_boss_door(&self, graph: &RoomGraph, spawn: &Room) -> Vec<DoorSpec> {
        let Some(boss) = graph.boss_room() else {
            return Vec::new();
        };
        let boss_pos = graph.get(boss).map(|r| r.grid_pos).unwrap_or_default();
        let positions = policy::outbound_door_positions(spawn.size, 1);
        vec![DoorSpec {
            target: boss,
            target_type: RoomType::Boss,
            direction: Direction::toward(spawn.grid_pos, boss_pos),
            position: positions[0],
            size: policy::DOOR_SIZE,
            lock: DoorLock::Unlocked,
        }]
    }

    /// Record a clear for a room. Counters and flags move only on the
    /// first clear; the quota transition fires exactly once per level.
    pub fn record_clear(
        &mut self,
        room: RoomId,
        room_type: RoomType,
        defaults: &ProgressionDefaults,
    ) -> ClearRecord {
        if !self.cleared_rooms.insert(room) {
            return ClearRecord {
                first_time: false,
                reached_quota: false,
            };
        }

        self.rooms_cleared_in_level += 1;
        match room_type {
            RoomType::Puzzle => self.puzzle_cleared_in_level = true,
            RoomType::Treasure => self.treasure_cleared_in_level = true,
            _ => {}
        }

        let reached_quota = self.rooms_cleared_in_level >= defaults.clear_quota
            && self.phase == LevelPhase::Exploring;
        if reached_quota {
            self.phase = LevelPhase::ReturningToSpawn;
        }

        ClearRecord {
            first_time: true,
            reached_quota,
        }
    }

    /// Start the wave counter for a fresh combat room.
    pub fn begin_combat(&mut self, total_waves: u32) {
        self.current_wave = 1;
        self.total_waves = total_waves.max(1);
    }

    pub fn on_final_wave(&self) -> bool {
        self.current_wave >= self.total_waves
    }

    pub fn advance_wave(&mut self) -> u32 {
        self.current_wave += 1;
        self.current_wave
    }

    /// Stable puzzle assignment for a room, chosen once per level.
    pub fn assign_puzzle(&mut self, room: RoomId, registry: &ContentRegistry) -> Option<String> {
        if let Some(existing) = self.puzzle_assignments.get(&room) {
            return Some(existing.clone());
        }
        let ids = registry.puzzle_ids_sorted();
        if ids.is_empty() {
            return None;
        }
        let pick = ids[(self.level as usize + room.0 as usize) % ids.len()].clone();
        self.puzzle_assignments.insert(room, pick.clone());
        Some(pick)
    }
}

/// Choose the room a hub door of `room_type` should lead to: the
/// Manhattan-nearest room of that type, preferring unexplored ones so a
/// level keeps offering fresh rooms while the graph allows it.
fn pick_room_for_type(graph: &RoomGraph, from: RoomId, room_type: RoomType) -> Option<RoomId> {
    let from_pos = graph.get(from)?.grid_pos;
    let mut candidates: Vec<&Room> = graph
        .rooms()
        .iter()
        .filter(|r| r.room_type == room_type)
        .collect();
    if candidates.iter().any(|r| !r.visited) {
        candidates.retain(|r| !r.visited);
    }
    candidates
        .into_iter()
        .min_by_key(|r| {
            let d = (r.grid_pos.x - from_pos.x).abs() + (r.grid_pos.y - from_pos.y).abs();
            (d, r.id.0)
        })
        .map(|r| r.id)
}
