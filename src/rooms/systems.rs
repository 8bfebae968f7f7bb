//! Rooms domain: room flow systems.
//!
//! Everything here is a thin adapter: the decisions live in
//! [`ProgressionController`] and the policy table, these systems turn
//! messages into state changes and planned door sets into entities.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::Enemy;
use crate::content::{ContentRegistry, GameplayDefaults};
use crate::core::{DifficultyScaling, VictoryEvent};
use crate::dungeon::{RoomGraph, RoomType};
use crate::items::{Inventory, ItemPickup};
use crate::rooms::components::{
    Door, DoorLock, EncounterActive, RoomInstance, RoomScoped, RoomWasCleared, TreasureActive,
};
use crate::rooms::events::{
    BossUnlockedEvent, DoorLockedEvent, InteractRequestEvent, LevelUpEvent, PuzzleSolvedEvent,
    RoomClearedEvent, RoomEnteredEvent, RoomTransitionStarted, TransitionActivateEvent,
    TransitionCheckEvent,
};
use crate::rooms::progression::{
    EntryAction, PendingTransition, ProgressionController, RoomEntry, TransitionState,
};
use crate::rooms::spawn::{populate_room, rebuild_doors, spawn_combat_wave, spawn_doors};

/// First entry after generation. A dungeon without a spawn room is a
/// fatal configuration error: the run is aborted here and the caller
/// may retry generation with a new seed.
pub(crate) fn start_run(
    mut commands: Commands,
    mut graph: ResMut<RoomGraph>,
    mut progression: ResMut<ProgressionController>,
    mut transition: ResMut<TransitionState>,
    registry: Option<Res<ContentRegistry>>,
    scaling: Res<DifficultyScaling>,
    defaults: Option<Res<GameplayDefaults>>,
    mut entered: MessageWriter<RoomEnteredEvent>,
    mut level_ups: MessageWriter<LevelUpEvent>,
    mut boss_unlocks: MessageWriter<BossUnlockedEvent>,
) {
    let Some(registry) = registry else {
        error!("Content registry missing; cannot start run");
        return;
    };
    if let Err(error) = graph.validate() {
        error!("Cannot start run: {}", error);
        return;
    }

    progression.reset_for_run();
    *transition = TransitionState::default();

    let Some(spawn) = graph.spawn_room() else {
        return;
    };
    let defaults = defaults.map(|d| d.clone()).unwrap_or_default();
    let Some(entry) = progression.enter_room(&mut graph, &defaults.progression, spawn) else {
        return;
    };
    apply_room_entry(
        &mut commands,
        &entry,
        &graph,
        &registry,
        &scaling,
        &defaults,
        &mut progression,
        &mut entered,
        &mut level_ups,
        &mut boss_unlocks,
    );
}

/// Interact input: use the door under the given position. Locked doors
/// answer with a door-locked message; key doors consume a key when one
/// is held. Input during a transition is dropped.
pub(crate) fn handle_interact_requests(
    mut events: MessageReader<InteractRequestEvent>,
    mut transition: ResMut<TransitionState>,
    progression: Res<ProgressionController>,
    mut inventory: ResMut<Inventory>,
    mut doors: Query<(Entity, &mut Door)>,
    mut started: MessageWriter<RoomTransitionStarted>,
    mut locked_events: MessageWriter<DoorLockedEvent>,
) {
    for event in events.read() {
        if transition.in_flight {
            warn!("Ignoring interact request during room transition");
            continue;
        }
        if progression.current_room.is_none() {
            warn!("Interact request with no current room");
            continue;
        }

        let Some((entity, mut door)) = doors
            .iter_mut()
            .find(|(_, door)| door.contains(event.position))
        else {
            continue;
        };

        match door.lock {
            DoorLock::Unlocked => {
                begin_transition(&mut transition, &progression, &door, &mut started);
            }
            DoorLock::Locked => {
                debug!("Door toward {:?} is locked", door.target_type);
                locked_events.write(DoorLockedEvent {
                    door: entity,
                    target_type: door.target_type,
                    needs_key: false,
                });
            }
            DoorLock::LockedRequiresKey => {
                if door.unlock(&mut inventory) {
                    info!(
                        "Unlocked {:?} door with a key ({} left)",
                        door.target_type,
                        inventory.key_count()
                    );
                } else {
                    locked_events.write(DoorLockedEvent {
                        door: entity,
                        target_type: door.target_type,
                        needs_key: true,
                    });
                }
            }
        }
    }
}

/// Movement input: walking into an open door starts a transition.
pub(crate) fn handle_transition_checks(
    mut events: MessageReader<TransitionCheckEvent>,
    mut transition: ResMut<TransitionState>,
    progression: Res<ProgressionController>,
    doors: Query<&Door>,
    mut started: MessageWriter<RoomTransitionStarted>,
) {
    for event in events.read() {
        if transition.in_flight {
            // Movement keeps streaming during the fade; not worth a log.
            continue;
        }
        if progression.current_room.is_none() {
            continue;
        }

        let open_door = doors.iter().find(|door| {
            door.lock == DoorLock::Unlocked && door.contains(event.player_position)
        });
        if let Some(door) = open_door {
            begin_transition(&mut transition, &progression, door, &mut started);
        }
    }
}

fn begin_transition(
    transition: &mut TransitionState,
    progression: &ProgressionController,
    door: &Door,
    started: &mut MessageWriter<RoomTransitionStarted>,
) {
    transition.pending = Some(PendingTransition {
        from: progression.current_room,
        to: door.target,
    });
    transition.in_flight = true;

    info!(
        "Transition started toward {:?} ({:?})",
        door.target, door.target_type
    );
    started.write(RoomTransitionStarted {
        from: progression.current_room,
        to: door.target,
        to_type: door.target_type,
    });
}

/// The caller finished the announce phase: swap rooms now. Tears down
/// the old room's transient entities, enters the new room, and finally
/// releases the in-flight flag.
pub(crate) fn activate_room_transition(
    mut commands: Commands,
    mut events: MessageReader<TransitionActivateEvent>,
    mut transition: ResMut<TransitionState>,
    mut graph: ResMut<RoomGraph>,
    mut progression: ResMut<ProgressionController>,
    registry: Option<Res<ContentRegistry>>,
    scaling: Res<DifficultyScaling>,
    defaults: Option<Res<GameplayDefaults>>,
    scoped: Query<Entity, With<RoomScoped>>,
    mut entered: MessageWriter<RoomEnteredEvent>,
    mut level_ups: MessageWriter<LevelUpEvent>,
    mut boss_unlocks: MessageWriter<BossUnlockedEvent>,
) {
    let activations = events.read().count();
    if activations == 0 {
        return;
    }

    let Some(pending) = transition.pending.take() else {
        warn!("Transition activation with no pending transition");
        transition.in_flight = false;
        return;
    };
    let Some(registry) = registry else {
        error!("Content registry missing; dropping transition");
        transition.in_flight = false;
        return;
    };

    // State swap: detach the old room's transient entities.
    for entity in scoped.iter() {
        commands.entity(entity).despawn();
    }

    let defaults = defaults.map(|d| d.clone()).unwrap_or_default();
    let Some(entry) = progression.enter_room(&mut graph, &defaults.progression, pending.to) else {
        warn!("Pending transition to unknown room {:?}", pending.to);
        transition.in_flight = false;
        return;
    };
    apply_room_entry(
        &mut commands,
        &entry,
        &graph,
        &registry,
        &scaling,
        &defaults,
        &mut progression,
        &mut entered,
        &mut level_ups,
        &mut boss_unlocks,
    );

    // Completion: release the input gate.
    transition.in_flight = false;
}

/// Shared tail of every room entry: announce hub actions, build doors,
/// populate, report the room as entered.
fn apply_room_entry(
    commands: &mut Commands,
    entry: &RoomEntry,
    graph: &RoomGraph,
    registry: &ContentRegistry,
    scaling: &DifficultyScaling,
    defaults: &GameplayDefaults,
    progression: &mut ProgressionController,
    entered: &mut MessageWriter<RoomEnteredEvent>,
    level_ups: &mut MessageWriter<LevelUpEvent>,
    boss_unlocks: &mut MessageWriter<BossUnlockedEvent>,
) {
    match &entry.action {
        EntryAction::LevelUp { new_level } => {
            info!("Level up! Now at level {}", new_level);
            level_ups.write(LevelUpEvent {
                new_level: *new_level,
            });
        }
        EntryAction::BossUnlocked { boss_room } => {
            info!("Boss door open at the spawn hub (room {:?})", boss_room);
            boss_unlocks.write(BossUnlockedEvent {
                boss_room: *boss_room,
            });
        }
        EntryAction::None => {}
    }

    spawn_doors(commands, &entry.doors);
    populate_room(
        commands,
        entry,
        graph,
        registry,
        scaling,
        defaults,
        progression,
    );

    info!(
        "Entered room {:?} ({:?}) with {} doors",
        entry.room,
        entry.room_type,
        entry.doors.len()
    );
    entered.write(RoomEnteredEvent {
        room: entry.room,
        room_type: entry.room_type,
    });
}

/// Puzzle plugin reported a solve. Only valid inside an unsolved puzzle
/// room; anything else is recovered locally and ignored.
pub(crate) fn handle_puzzle_solved(
    mut commands: Commands,
    mut events: MessageReader<PuzzleSolvedEvent>,
    progression: Res<ProgressionController>,
    graph: Res<RoomGraph>,
    registry: Option<Res<ContentRegistry>>,
    mut inventory: ResMut<Inventory>,
    instances: Query<(Entity, &RoomInstance), Without<RoomWasCleared>>,
    mut cleared: MessageWriter<RoomClearedEvent>,
) {
    let mut solved_this_frame = false;

    for _event in events.read() {
        let Some(current) = progression.current_room else {
            warn!("Puzzle-solved report with no current room");
            continue;
        };
        let is_puzzle = graph
            .get(current)
            .is_some_and(|room| room.room_type == RoomType::Puzzle);
        if !is_puzzle || progression.is_cleared(current) || solved_this_frame {
            warn!("Ignoring puzzle-solved outside an unsolved puzzle room");
            continue;
        }
        solved_this_frame = true;

        // Solving the puzzle is the level's only key source.
        inventory.grant_key();
        info!("Puzzle solved; key granted ({} held)", inventory.key_count());

        if let (Some(registry), Some(def_id)) =
            (registry.as_ref(), progression.puzzle_assignment(current))
        {
            if let Some(reward) = registry
                .puzzles
                .get(def_id)
                .and_then(|def| def.reward_item_id.clone())
            {
                info!("Puzzle reward: '{}'", reward);
                inventory.add_equipment(reward);
            }
        }

        for (entity, instance) in instances.iter() {
            if instance.id == current {
                commands.entity(entity).insert(RoomWasCleared);
            }
        }
        cleared.write(RoomClearedEvent {
            room: current,
            room_type: RoomType::Puzzle,
        });
    }
}

/// Treasure clear condition: every spawned pickup collected.
pub(crate) fn detect_treasure_cleared(
    mut commands: Commands,
    instances: Query<(Entity, &RoomInstance), (With<TreasureActive>, Without<RoomWasCleared>)>,
    pickups: Query<Entity, With<ItemPickup>>,
    mut cleared: MessageWriter<RoomClearedEvent>,
) {
    for (entity, instance) in instances.iter() {
        if pickups.iter().count() > 0 {
            continue;
        }
        commands.entity(entity).insert(RoomWasCleared);
        info!("Treasure room {:?} looted clean", instance.id);
        cleared.write(RoomClearedEvent {
            room: instance.id,
            room_type: RoomType::Treasure,
        });
    }
}

/// Combat and boss clear conditions: no enemies left. Combat rooms run
/// through their wave count before counting as cleared; the boss room
/// ends the run instead of feeding door logic.
pub(crate) fn detect_room_cleared(
    mut commands: Commands,
    mut progression: ResMut<ProgressionController>,
    graph: Res<RoomGraph>,
    registry: Option<Res<ContentRegistry>>,
    scaling: Res<DifficultyScaling>,
    defaults: Option<Res<GameplayDefaults>>,
    instances: Query<(Entity, &RoomInstance), (With<EncounterActive>, Without<RoomWasCleared>)>,
    enemies: Query<Entity, With<Enemy>>,
    mut cleared: MessageWriter<RoomClearedEvent>,
    mut victories: MessageWriter<VictoryEvent>,
) {
    if enemies.iter().count() > 0 {
        return;
    }
    let defaults = defaults.map(|d| d.clone()).unwrap_or_default();

    for (entity, instance) in instances.iter() {
        match instance.room_type {
            RoomType::Boss => {
                commands.entity(entity).insert(RoomWasCleared);
                info!("Boss defeated!");
                victories.write(VictoryEvent {
                    level: progression.level,
                });
            }
            RoomType::Combat => {
                if !progression.on_final_wave() {
                    let wave = progression.advance_wave();
                    info!(
                        "Wave {}/{} incoming in room {:?}",
                        wave, progression.total_waves, instance.id
                    );
                    let Some(registry) = registry.as_ref() else {
                        continue;
                    };
                    let room_size = graph
                        .get(instance.id)
                        .map(|r| r.size)
                        .unwrap_or(Vec2::new(960.0, 540.0));
                    spawn_combat_wave(
                        &mut commands,
                        registry,
                        &scaling,
                        &defaults,
                        room_size,
                        progression.level,
                        wave,
                    );
                    continue;
                }
                commands.entity(entity).insert(RoomWasCleared);
                cleared.write(RoomClearedEvent {
                    room: instance.id,
                    room_type: RoomType::Combat,
                });
            }
            _ => {}
        }
    }
}

/// Bookkeeping shared by every clear: counters, phase, door rebuild.
pub(crate) fn apply_room_clear(
    mut commands: Commands,
    mut events: MessageReader<RoomClearedEvent>,
    mut progression: ResMut<ProgressionController>,
    graph: Res<RoomGraph>,
    defaults: Option<Res<GameplayDefaults>>,
    doors: Query<Entity, With<Door>>,
) {
    let defaults = defaults.map(|d| d.clone()).unwrap_or_default();

    for event in events.read() {
        let record = progression.record_clear(event.room, event.room_type, &defaults.progression);
        if !record.first_time {
            continue;
        }

        info!(
            "Room {:?} ({:?}) cleared - {}/{} this level",
            event.room,
            event.room_type,
            progression.rooms_cleared_in_level,
            defaults.progression.clear_quota
        );
        if record.reached_quota {
            info!("Clear quota met; the way back to the spawn hub is open");
        }

        let specs = progression.plan_doors(&graph, &defaults.progression);
        rebuild_doors(&mut commands, &doors, &specs);
    }
}

/// Tear down all room-scoped entities when leaving the run state.
pub(crate) fn cleanup_run(
    mut commands: Commands,
    scoped: Query<Entity, With<RoomScoped>>,
    mut transition: ResMut<TransitionState>,
) {
    for entity in scoped.iter() {
        commands.entity(entity).despawn();
    }
    *transition = TransitionState::default();
}
