//! Rooms domain: doors, progression, and room-flow wiring.

mod components;
mod events;
mod policy;
mod progression;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    Door, DoorLock, EncounterActive, PuzzleConsole, RoomInstance, RoomScoped, RoomWasCleared,
    TreasureActive,
};
pub use events::{
    BossUnlockedEvent, DoorLockedEvent, InteractRequestEvent, LevelUpEvent, PuzzleSolvedEvent,
    RoomClearedEvent, RoomEnteredEvent, RoomTransitionStarted, TransitionActivateEvent,
    TransitionCheckEvent,
};
pub use policy::{
    ClearCondition, DoorPolicyContext, DoorSpec, PopulateKind, RoomTypeSpec, door_lock, spec_for,
};
pub use progression::{
    EXPLORABLE_TYPES, ClearRecord, EntryAction, LevelPhase, PendingTransition,
    ProgressionController, RoomEntry, TransitionState,
};

use bevy::prelude::*;

use crate::core::GameState;
use crate::dungeon::build_dungeon;
use crate::rooms::systems::{
    activate_room_transition, apply_room_clear, cleanup_run, detect_room_cleared,
    detect_treasure_cleared, handle_interact_requests, handle_puzzle_solved,
    handle_transition_checks, start_run,
};

pub struct RoomsPlugin;

impl Plugin for RoomsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProgressionController>()
            .init_resource::<TransitionState>()
            .add_message::<InteractRequestEvent>()
            .add_message::<TransitionCheckEvent>()
            .add_message::<TransitionActivateEvent>()
            .add_message::<PuzzleSolvedEvent>()
            .add_message::<RoomTransitionStarted>()
            .add_message::<RoomEnteredEvent>()
            .add_message::<RoomClearedEvent>()
            .add_message::<DoorLockedEvent>()
            .add_message::<LevelUpEvent>()
            .add_message::<BossUnlockedEvent>()
            .add_systems(OnEnter(GameState::Run), (build_dungeon, start_run).chain())
            .add_systems(OnExit(GameState::Run), cleanup_run)
            .add_systems(
                Update,
                (
                    handle_interact_requests,
                    handle_transition_checks,
                    activate_room_transition,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                (
                    handle_puzzle_solved,
                    detect_treasure_cleared,
                    detect_room_cleared,
                    apply_room_clear,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
