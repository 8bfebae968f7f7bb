//! Rooms domain: tests for door policy, lock state, and progression.

use bevy::prelude::*;

use super::components::{Door, DoorLock};
use super::policy::{DoorPolicyContext, door_lock, outbound_door_positions, spec_for};
use super::progression::{EntryAction, LevelPhase, ProgressionController, TransitionState};
use crate::content::{ContentRegistry, GameplayDefaults};
use crate::dungeon::{Direction, RoomGraph, RoomId, RoomType};
use crate::items::Inventory;
use crate::rooms::policy::PopulateKind;

const ROOM_SIZE: Vec2 = Vec2::new(960.0, 540.0);

fn defaults() -> GameplayDefaults {
    GameplayDefaults::default()
}

/// Spawn hub with one room of each type hanging off it.
fn test_graph() -> (RoomGraph, RoomId, RoomId, RoomId, RoomId, RoomId) {
    let mut graph = RoomGraph::default();
    let spawn = graph.add_room(IVec2::ZERO, ROOM_SIZE, RoomType::Spawn);
    let combat = graph.add_room(IVec2::new(1, 0), ROOM_SIZE, RoomType::Combat);
    let puzzle = graph.add_room(IVec2::new(0, 1), ROOM_SIZE, RoomType::Puzzle);
    let treasure = graph.add_room(IVec2::new(-1, 0), ROOM_SIZE, RoomType::Treasure);
    let boss = graph.add_room(IVec2::new(2, 0), ROOM_SIZE, RoomType::Boss);
    graph.connect(spawn, combat);
    graph.connect(spawn, puzzle);
    graph.connect(spawn, treasure);
    graph.connect(combat, boss);
    (graph, spawn, combat, puzzle, treasure, boss)
}

fn spawn_ctx() -> DoorPolicyContext {
    DoorPolicyContext {
        current_type: RoomType::Spawn,
        current_cleared: false,
        treasure_cleared_in_level: false,
    }
}

// -----------------------------------------------------------------------------
// Lock policy table
// -----------------------------------------------------------------------------

#[test]
fn test_spawn_door_locks_follow_the_fixed_ordering() {
    let ctx = spawn_ctx();
    assert_eq!(door_lock(RoomType::Combat, &ctx), DoorLock::Locked);
    assert_eq!(door_lock(RoomType::Puzzle, &ctx), DoorLock::Unlocked);
    assert_eq!(
        door_lock(RoomType::Treasure, &ctx),
        DoorLock::LockedRequiresKey
    );
    assert_eq!(door_lock(RoomType::Boss, &ctx), DoorLock::Unlocked);
}

#[test]
fn test_treasure_clear_opens_the_combat_door() {
    let ctx = DoorPolicyContext {
        treasure_cleared_in_level: true,
        ..spawn_ctx()
    };
    assert_eq!(door_lock(RoomType::Combat, &ctx), DoorLock::Unlocked);
}

#[test]
fn test_uncleared_combat_room_locks_every_door() {
    let ctx = DoorPolicyContext {
        current_type: RoomType::Combat,
        current_cleared: false,
        treasure_cleared_in_level: true,
    };
    for target in [
        RoomType::Spawn,
        RoomType::Combat,
        RoomType::Puzzle,
        RoomType::Treasure,
    ] {
        assert_eq!(door_lock(target, &ctx), DoorLock::Locked);
    }
}

#[test]
fn test_cleared_room_unlocks_non_key_doors() {
    let ctx = DoorPolicyContext {
        current_type: RoomType::Puzzle,
        current_cleared: true,
        treasure_cleared_in_level: false,
    };
    assert_eq!(door_lock(RoomType::Combat, &ctx), DoorLock::Unlocked);
    // Key doors are never force-opened.
    assert_eq!(
        door_lock(RoomType::Treasure, &ctx),
        DoorLock::LockedRequiresKey
    );
}

#[test]
fn test_room_type_spec_table() {
    assert!(!spec_for(RoomType::Boss).has_doors);
    assert!(spec_for(RoomType::Spawn).has_doors);
    assert_eq!(spec_for(RoomType::Combat).populate, PopulateKind::Enemies);
    assert_eq!(spec_for(RoomType::Treasure).populate, PopulateKind::Items);
    assert_eq!(
        spec_for(RoomType::Treasure).entry_lock,
        DoorLock::LockedRequiresKey
    );
}

#[test]
fn test_outbound_door_positions_are_evenly_spaced() {
    let positions = outbound_door_positions(ROOM_SIZE, 3);
    assert_eq!(positions.len(), 3);
    let gap_a = positions[0].y - positions[1].y;
    let gap_b = positions[1].y - positions[2].y;
    assert!((gap_a - gap_b).abs() < 1e-4);
    // All on the right wall.
    assert!(positions.iter().all(|p| p.x > 0.0));
}

// -----------------------------------------------------------------------------
// Door lock state machine
// -----------------------------------------------------------------------------

fn key_door() -> Door {
    Door {
        target: RoomId(3),
        target_type: RoomType::Treasure,
        direction: Direction::Left,
        position: Vec2::ZERO,
        size: Vec2::new(28.0, 72.0),
        lock: DoorLock::LockedRequiresKey,
    }
}

#[test]
fn test_key_unlock_without_key_fails_and_changes_nothing() {
    let mut door = key_door();
    let mut inventory = Inventory::default();

    assert!(!door.unlock(&mut inventory));
    assert_eq!(door.lock, DoorLock::LockedRequiresKey);
    assert_eq!(inventory.key_count(), 0);
}

#[test]
fn test_key_unlock_consumes_exactly_one_key() {
    let mut door = key_door();
    let mut inventory = Inventory::default();
    inventory.grant_key();
    inventory.grant_key();

    assert!(door.unlock(&mut inventory));
    assert_eq!(door.lock, DoorLock::Unlocked);
    assert_eq!(inventory.key_count(), 1);

    // Already open: succeeds without spending another key.
    assert!(door.unlock(&mut inventory));
    assert_eq!(inventory.key_count(), 1);
}

#[test]
fn test_plain_locked_door_ignores_keys() {
    let mut door = key_door();
    door.lock = DoorLock::Locked;
    let mut inventory = Inventory::default();
    inventory.grant_key();

    assert!(!door.unlock(&mut inventory));
    assert_eq!(door.lock, DoorLock::Locked);
    assert_eq!(inventory.key_count(), 1);
}

#[test]
fn test_force_unlock_opens_locked_but_not_key_doors() {
    let mut door = key_door();
    door.force_unlock();
    assert_eq!(door.lock, DoorLock::LockedRequiresKey);

    door.lock = DoorLock::Locked;
    door.force_unlock();
    assert_eq!(door.lock, DoorLock::Unlocked);
}

#[test]
fn test_door_contains_point() {
    let door = key_door();
    assert!(door.contains(Vec2::new(10.0, 30.0)));
    assert!(!door.contains(Vec2::new(40.0, 0.0)));
}

// -----------------------------------------------------------------------------
// Spawn hub entry
// -----------------------------------------------------------------------------

#[test]
fn test_fresh_spawn_offers_three_doors_with_the_fixed_locks() {
    let (mut graph, spawn, ..) = test_graph();
    let defaults = defaults();
    let mut progression = ProgressionController::default();

    let entry = progression
        .enter_room(&mut graph, &defaults.progression, spawn)
        .unwrap();

    assert_eq!(entry.action, EntryAction::None);
    assert_eq!(entry.populate, PopulateKind::Nothing);
    assert_eq!(entry.doors.len(), 3);

    let locks: Vec<(RoomType, DoorLock)> = entry
        .doors
        .iter()
        .map(|d| (d.target_type, d.lock))
        .collect();
    assert_eq!(
        locks,
        vec![
            (RoomType::Combat, DoorLock::Locked),
            (RoomType::Puzzle, DoorLock::Unlocked),
            (RoomType::Treasure, DoorLock::LockedRequiresKey),
        ]
    );
}

#[test]
fn test_door_planning_is_idempotent() {
    let (mut graph, spawn, ..) = test_graph();
    let defaults = defaults();
    let mut progression = ProgressionController::default();
    progression.enter_room(&mut graph, &defaults.progression, spawn).unwrap();

    let first = progression.plan_doors(&graph, &defaults.progression);
    let second = progression.plan_doors(&graph, &defaults.progression);
    assert_eq!(first, second);
}

#[test]
fn test_entering_unknown_room_is_rejected() {
    let (mut graph, ..) = test_graph();
    let defaults = defaults();
    let mut progression = ProgressionController::default();

    assert!(
        progression
            .enter_room(&mut graph, &defaults.progression, RoomId(99))
            .is_none()
    );
}

// -----------------------------------------------------------------------------
// Full level flow: puzzle -> treasure -> combat -> return -> level up
// -----------------------------------------------------------------------------

#[test]
fn test_full_level_flow() {
    let (mut graph, spawn, _combat, puzzle, treasure, _boss) = test_graph();
    let defaults = defaults();
    let cfg = &defaults.progression;
    let mut progression = ProgressionController::default();
    let mut inventory = Inventory::default();

    progression.enter_room(&mut graph, cfg, spawn).unwrap();

    // Puzzle room: own type drops off the hub offer, no way home yet.
    let entry = progression.enter_room(&mut graph, cfg, puzzle).unwrap();
    assert_eq!(
        progression.available_room_types,
        vec![RoomType::Combat, RoomType::Treasure]
    );
    assert_eq!(entry.populate, PopulateKind::Puzzle);
    assert!(entry.doors.iter().all(|d| d.target_type != RoomType::Spawn));
    let combat_door = entry
        .doors
        .iter()
        .find(|d| d.target_type == RoomType::Combat)
        .unwrap();
    assert_eq!(combat_door.lock, DoorLock::Locked);

    // Solve the puzzle: clear counters move, key in hand, sibling
    // non-key doors open.
    let record = progression.record_clear(puzzle, RoomType::Puzzle, cfg);
    inventory.grant_key();
    assert!(record.first_time);
    assert!(!record.reached_quota);
    assert!(progression.puzzle_cleared_in_level);
    assert_eq!(progression.rooms_cleared_in_level, 1);

    let doors = progression.plan_doors(&graph, cfg);
    let treasure_spec = doors
        .iter()
        .find(|d| d.target_type == RoomType::Treasure)
        .unwrap();
    assert_eq!(treasure_spec.lock, DoorLock::LockedRequiresKey);
    assert_eq!(
        doors
            .iter()
            .find(|d| d.target_type == RoomType::Combat)
            .unwrap()
            .lock,
        DoorLock::Unlocked
    );

    // Spend the key on the treasure door.
    let mut door = Door {
        target: treasure_spec.target,
        target_type: treasure_spec.target_type,
        direction: treasure_spec.direction,
        position: treasure_spec.position,
        size: treasure_spec.size,
        lock: treasure_spec.lock,
    };
    assert!(door.unlock(&mut inventory));
    assert_eq!(inventory.key_count(), 0);

    // Treasure room: combat stays gated until the loot is collected.
    let entry = progression.enter_room(&mut graph, cfg, treasure).unwrap();
    assert_eq!(entry.populate, PopulateKind::Items);
    assert_eq!(
        entry
            .doors
            .iter()
            .find(|d| d.target_type == RoomType::Combat)
            .unwrap()
            .lock,
        DoorLock::Locked
    );

    progression.record_clear(treasure, RoomType::Treasure, cfg);
    assert!(progression.treasure_cleared_in_level);
    assert_eq!(
        progression
            .plan_doors(&graph, cfg)
            .iter()
            .find(|d| d.target_type == RoomType::Combat)
            .unwrap()
            .lock,
        DoorLock::Unlocked
    );

    // Combat room: last offer gone, waves run, quota lands on clear.
    let combat_target = progression
        .plan_doors(&graph, cfg)
        .iter()
        .find(|d| d.target_type == RoomType::Combat)
        .unwrap()
        .target;
    let entry = progression.enter_room(&mut graph, cfg, combat_target).unwrap();
    assert!(progression.available_room_types.is_empty());
    assert!(entry.doors.is_empty());
    assert_eq!(entry.populate, PopulateKind::Enemies);

    progression.begin_combat(cfg.total_waves);
    assert_eq!(progression.current_wave, 1);
    assert!(!progression.on_final_wave());
    progression.advance_wave();
    assert!(progression.on_final_wave());

    let record = progression.record_clear(combat_target, RoomType::Combat, cfg);
    assert!(record.reached_quota);
    assert_eq!(progression.phase, LevelPhase::ReturningToSpawn);

    // Exactly one unlocked door back to the spawn hub.
    let doors = progression.plan_doors(&graph, cfg);
    assert_eq!(doors.len(), 1);
    assert_eq!(doors[0].target, spawn);
    assert_eq!(doors[0].target_type, RoomType::Spawn);
    assert_eq!(doors[0].lock, DoorLock::Unlocked);

    // Back at the hub: level up and a fresh offer.
    let entry = progression.enter_room(&mut graph, cfg, spawn).unwrap();
    assert_eq!(entry.action, EntryAction::LevelUp { new_level: 2 });
    assert_eq!(progression.level, 2);
    assert_eq!(progression.rooms_cleared_in_level, 0);
    assert!(!progression.puzzle_cleared_in_level);
    assert!(!progression.treasure_cleared_in_level);
    assert_eq!(progression.phase, LevelPhase::Exploring);
    assert_eq!(entry.doors.len(), 3);
    assert_eq!(entry.doors[0].lock, DoorLock::Locked);
}

#[test]
fn test_double_clear_does_not_double_count() {
    let (mut graph, spawn, _combat, puzzle, ..) = test_graph();
    let defaults = defaults();
    let mut progression = ProgressionController::default();
    progression.enter_room(&mut graph, &defaults.progression, spawn).unwrap();
    progression.enter_room(&mut graph, &defaults.progression, puzzle).unwrap();

    let first = progression.record_clear(puzzle, RoomType::Puzzle, &defaults.progression);
    let second = progression.record_clear(puzzle, RoomType::Puzzle, &defaults.progression);

    assert!(first.first_time);
    assert!(!second.first_time);
    assert_eq!(progression.rooms_cleared_in_level, 1);
}

// -----------------------------------------------------------------------------
// Boss unlock
// -----------------------------------------------------------------------------

#[test]
fn test_final_level_return_opens_the_boss_door() {
    let (mut graph, spawn, ..) = test_graph();
    let defaults = defaults();
    let mut progression = ProgressionController::default();
    progression.level = defaults.progression.final_level;
    progression.rooms_cleared_in_level = defaults.progression.clear_quota;
    progression.phase = LevelPhase::ReturningToSpawn;

    let entry = progression
        .enter_room(&mut graph, &defaults.progression, spawn)
        .unwrap();

    let EntryAction::BossUnlocked { boss_room } = entry.action.clone() else {
        panic!("expected boss unlock, got {:?}", entry.action);
    };
    assert_eq!(progression.phase, LevelPhase::BossUnlocked);
    assert_eq!(entry.doors.len(), 1);
    assert_eq!(entry.doors[0].target, boss_room);
    assert_eq!(entry.doors[0].target_type, RoomType::Boss);
    assert_eq!(entry.doors[0].lock, DoorLock::Unlocked);

    // Boss rooms have no outbound doors.
    let entry = progression
        .enter_room(&mut graph, &defaults.progression, boss_room)
        .unwrap();
    assert!(entry.doors.is_empty());
    assert_eq!(entry.populate, PopulateKind::Boss);
}

#[test]
fn test_boss_unlock_appends_a_boss_room_when_generation_left_none() {
    let mut graph = RoomGraph::default();
    let spawn = graph.add_room(IVec2::ZERO, ROOM_SIZE, RoomType::Spawn);
    let defaults = defaults();
    let mut progression = ProgressionController::default();
    progression.level = defaults.progression.final_level;
    progression.rooms_cleared_in_level = defaults.progression.clear_quota;
    progression.phase = LevelPhase::ReturningToSpawn;

    let entry = progression
        .enter_room(&mut graph, &defaults.progression, spawn)
        .unwrap();

    assert!(matches!(entry.action, EntryAction::BossUnlocked { .. }));
    assert_eq!(graph.count_of(RoomType::Boss), 1);
}

#[test]
fn test_boss_door_not_offered_below_final_level() {
    let (mut graph, spawn, ..) = test_graph();
    let defaults = defaults();
    let mut progression = ProgressionController::default();
    progression.rooms_cleared_in_level = defaults.progression.clear_quota;
    progression.phase = LevelPhase::ReturningToSpawn;

    let entry = progression
        .enter_room(&mut graph, &defaults.progression, spawn)
        .unwrap();
    assert_eq!(entry.action, EntryAction::LevelUp { new_level: 2 });
}

// -----------------------------------------------------------------------------
// Puzzle assignment cache
// -----------------------------------------------------------------------------

#[test]
fn test_puzzle_assignment_is_stable_within_a_level() {
    let (mut graph, spawn, _combat, puzzle, ..) = test_graph();
    let registry = ContentRegistry::builtin();
    let defaults = defaults();
    let mut progression = ProgressionController::default();
    progression.enter_room(&mut graph, &defaults.progression, spawn).unwrap();

    let first = progression.assign_puzzle(puzzle, &registry).unwrap();
    let second = progression.assign_puzzle(puzzle, &registry).unwrap();
    assert_eq!(first, second);
    assert_eq!(progression.puzzle_assignment(puzzle), Some(first.as_str()));
}

#[test]
fn test_transition_state_defaults_to_idle() {
    let transition = TransitionState::default();
    assert!(transition.pending.is_none());
    assert!(!transition.in_flight);
}
