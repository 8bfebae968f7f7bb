//! Debug tooling for fast iteration (dev-tools feature).
//!
//! Serializes the generated dungeon and the progression state so a
//! layout or a stuck run can be inspected without a renderer attached.

use bevy::prelude::*;
use serde_json::json;

use crate::core::GameState;
use crate::dungeon::RoomGraph;
use crate::rooms::ProgressionController;

/// JSON snapshot of the generated room graph.
pub fn dungeon_to_json(graph: &RoomGraph) -> String {
    let rooms: Vec<serde_json::Value> = graph
        .rooms()
        .iter()
        .map(|room| {
            json!({
                "id": room.id.0,
                "grid_pos": [room.grid_pos.x, room.grid_pos.y],
                "type": format!("{:?}", room.room_type),
                "visited": room.visited,
                "connections": room.connections().iter().map(|c| c.0).collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({ "rooms": rooms }).to_string()
}

/// One-line progression summary for log correlation.
pub fn progression_summary(progression: &ProgressionController) -> String {
    format!(
        "level {} | cleared {}/level | phase {:?} | room {:?} | wave {}/{}",
        progression.level,
        progression.rooms_cleared_in_level,
        progression.phase,
        progression.current_room,
        progression.current_wave,
        progression.total_waves,
    )
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            log_dungeon_layout.run_if(in_state(GameState::Run)),
        );
    }
}

/// Dump the generated layout once per run, after generation lands.
fn log_dungeon_layout(
    graph: Res<RoomGraph>,
    progression: Res<ProgressionController>,
    mut logged: Local<bool>,
) {
    if *logged || graph.is_empty() {
        return;
    }
    *logged = true;
    debug!("Dungeon layout: {}", dungeon_to_json(&graph));
    debug!("Progression: {}", progression_summary(&progression));
}
