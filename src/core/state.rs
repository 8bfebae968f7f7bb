//! Core domain: game state definitions for the run flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Content loading; left as soon as the registry is available.
    #[default]
    Boot,
    /// A run is active: the dungeon exists and progression is live.
    Run,
    /// The boss is dead and the run is won.
    Victory,
}
