//! Core domain: run flow systems.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::content::ContentRegistry;
use crate::core::events::VictoryEvent;
use crate::core::resources::RunConfig;
use crate::core::state::GameState;

/// Leave Boot once content is available. The content plugin inserts the
/// registry during Startup (falling back to builtin data on load errors),
/// so this fires on the first Update frame.
pub(crate) fn finish_boot(
    registry: Option<Res<ContentRegistry>>,
    run_config: Res<RunConfig>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if registry.is_none() {
        return;
    }

    info!(
        "Starting run (seed: {}, difficulty: {})",
        run_config.seed, run_config.difficulty
    );
    game_state.set(GameState::Run);
}

/// Handle victory - transition out of the run.
pub(crate) fn handle_victory(
    mut events: MessageReader<VictoryEvent>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        info!("Victory! Boss defeated at level {}.", event.level);
        game_state.set(GameState::Victory);
    }
}
