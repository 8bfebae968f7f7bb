//! Undercroft: dungeon generation and progression core.
//!
//! This crate owns the room graph, door lock state, and level/boss
//! progression of a run. Rendering, audio, input capture, and combat
//! resolution live in collaborating plugins: they read this core's
//! resources and components, and feed it discrete messages (enemy
//! defeated, puzzle solved, item collected, transition requests).

pub mod combat;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod dungeon;
pub mod items;
pub mod rooms;

use bevy::prelude::*;

/// Adds every core plugin. Host applications add their own renderer,
/// audio, and input plugins alongside this one.
pub struct UndercroftPlugin;

impl Plugin for UndercroftPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            dungeon::DungeonPlugin,
            combat::CombatPlugin,
            items::ItemsPlugin,
            rooms::RoomsPlugin,
        ));

        #[cfg(feature = "dev-tools")]
        app.add_plugins(debug::DebugPlugin);
    }
}
