//! Core domain: game states, run configuration, and run-level events.

mod events;
mod resources;
mod state;
mod systems;

pub use events::VictoryEvent;
pub use resources::{DifficultyScaling, RunConfig};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{finish_boot, handle_victory};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunConfig>()
            .init_resource::<DifficultyScaling>()
            .add_message::<VictoryEvent>()
            .add_systems(Update, finish_boot.run_if(in_state(GameState::Boot)))
            .add_systems(Update, handle_victory.run_if(in_state(GameState::Run)));
    }
}
