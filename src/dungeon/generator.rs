//! Dungeon domain: procedural generation of the room graph.
//!
//! Generation is a pure, synchronous computation over the caller's RNG:
//! the same seed, difficulty, and defaults always produce the same graph.
//! It never fails - when the frontier runs dry it degrades by producing
//! fewer rooms, and connectivity is always restored before returning.

use bevy::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::{HashSet, VecDeque};

use crate::content::DungeonDefaults;
use crate::dungeon::graph::{Direction, RoomGraph, RoomId, RoomType};

/// Floor for the per-direction creation probability as rooms get far
/// from the spawn.
const MIN_CREATION_CHANCE: f32 = 0.3;
/// Creation probability at the spawn, before distance falloff.
const BASE_CREATION_CHANCE: f32 = 0.9;
/// Falloff per grid unit of Euclidean distance from the spawn.
const DISTANCE_FALLOFF: f32 = 0.1;
/// Probability bonus per difficulty step above 1.
const DIFFICULTY_CHANCE_BONUS: f32 = 0.1;
/// Chance a new room rolls treasure.
const TREASURE_CHANCE: f32 = 0.3;
/// Chance a non-treasure room rolls puzzle.
const PUZZLE_CHANCE: f32 = 0.4;
/// Frontier re-seed passes before giving up below the target count.
const MAX_RESEED_PASSES: u32 = 64;

/// Target room count for a difficulty, clamped to the configured range.
pub fn target_room_count(difficulty: u32, cfg: &DungeonDefaults) -> u32 {
    let steps = difficulty.saturating_sub(1) * cfg.rooms_per_difficulty;
    (cfg.min_rooms + steps).clamp(cfg.min_rooms, cfg.max_rooms)
}

/// Minimum combined puzzle+treasure count for a difficulty.
pub fn min_special_rooms(difficulty: u32, cfg: &DungeonDefaults) -> u32 {
    cfg.base_special_quota + difficulty.saturating_sub(1) * cfg.specials_per_difficulty
}

/// Build a room graph for the given difficulty.
///
/// Postconditions, unconditionally: exactly one spawn room at the grid
/// origin; at most one boss room, placed at the farthest grid cell from
/// the spawn; every room reachable from the spawn; puzzle+treasure count
/// at least [`min_special_rooms`] (as long as enough rooms exist to
/// convert).
pub fn generate(difficulty: u32, cfg: &DungeonDefaults, rng: &mut impl Rng) -> RoomGraph {
    let difficulty = difficulty.max(1);
    let target = target_room_count(difficulty, cfg) as usize;
    let room_size = Vec2::new(cfg.room_width, cfg.room_height);

    let mut graph = RoomGraph::default();
    let spawn = graph.add_room(IVec2::ZERO, room_size, RoomType::Spawn);

    let mut frontier = VecDeque::new();
    frontier.push_back(spawn);

    // Farthest room from the origin, tracked as expansion proceeds.
    // Becomes the boss room unless the dungeon never left the spawn.
    let mut farthest = spawn;
    let mut farthest_dist = 0.0f32;
    let mut reseed_passes = 0;

    while graph.len() < target {
        let Some(current) = frontier.pop_front() else {
            // Frontier exhausted below target: re-seed from every room.
            // Cells farther out are always free, so this converges; the
            // pass cap only guards against pathological RNG streams.
            reseed_passes += 1;
            if reseed_passes > MAX_RESEED_PASSES {
                break;
            }
            let ids: Vec<RoomId> = graph.rooms().iter().map(|r| r.id).collect();
            frontier.extend(ids);
            continue;
        };

        let Some(current_pos) = graph.get(current).map(|r| r.grid_pos) else {
            continue;
        };
        let distance = current_pos.as_vec2().length();
        let chance = (BASE_CREATION_CHANCE - DISTANCE_FALLOFF * distance).max(MIN_CREATION_CHANCE)
            + DIFFICULTY_CHANCE_BONUS * difficulty.saturating_sub(1) as f32;

        for dir in Direction::ALL {
            if graph.len() >= target {
                break;
            }
            let cell = current_pos + dir.offset();
            if graph.room_at(cell).is_some() {
                continue;
            }
            if rng.random::<f32>() >= chance {
                continue;
            }

            let room_type = roll_room_type(rng);
            let id = graph.add_room(cell, room_size, room_type);
            graph.connect(current, id);
            frontier.push_back(id);

            let dist = cell.as_vec2().length();
            if dist > farthest_dist {
                farthest_dist = dist;
                farthest = id;
            }
        }
    }

    place_boss(&mut graph, spawn, farthest);
    apply_special_quota(&mut graph, difficulty, cfg, rng);
    repair_connectivity(&mut graph);
    graph
}

fn roll_room_type(rng: &mut impl Rng) -> RoomType {
    if rng.random::<f32>() < TREASURE_CHANCE {
        RoomType::Treasure
    } else if rng.random::<f32>() < PUZZLE_CHANCE {
        RoomType::Puzzle
    } else {
        RoomType::Combat
    }
}

/// Retype the farthest room to boss, in place, keeping its coordinates
/// and edges. A no-op when the farthest room is the spawn itself; the
/// progression layer appends a boss room on demand in that case.
///
/// Runs before the quota pass so that retyping cannot consume a room
/// the quota pass already counted.
fn place_boss(graph: &mut RoomGraph, spawn: RoomId, farthest: RoomId) {
    if farthest == spawn {
        return;
    }
    if let Some(room) = graph.get_mut(farthest) {
        room.room_type = RoomType::Boss;
    }
}

/// Convert random combat rooms (never spawn or boss) until the
/// puzzle+treasure count meets the quota, alternating treasure/puzzle.
/// Conversion is in place: coordinates and edges are untouched.
fn apply_special_quota(
    graph: &mut RoomGraph,
    difficulty: u32,
    cfg: &DungeonDefaults,
    rng: &mut impl Rng,
) {
    let needed = min_special_rooms(difficulty, cfg) as usize;
    let mut convert_to_treasure = true;

    while graph.special_count() < needed {
        let eligible: Vec<RoomId> = graph
            .rooms()
            .iter()
            .filter(|r| r.room_type == RoomType::Combat)
            .map(|r| r.id)
            .collect();
        let Some(&pick) = eligible.choose(rng) else {
            // Nothing left to convert; quota degrades with the room count.
            break;
        };
        if let Some(room) = graph.get_mut(pick) {
            room.room_type = if convert_to_treasure {
                RoomType::Treasure
            } else {
                RoomType::Puzzle
            };
        }
        convert_to_treasure = !convert_to_treasure;
    }
}

/// Hard postcondition: every room reachable from the spawn. BFS from the
/// spawn; each unreached room is wired to its Manhattan-nearest visited
/// room and the search continues until coverage is total.
pub(crate) fn repair_connectivity(graph: &mut RoomGraph) {
    let Some(spawn) = graph.spawn_room() else {
        return;
    };

    let mut visited: HashSet<RoomId> = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(spawn);
    queue.push_back(spawn);

    loop {
        while let Some(id) = queue.pop_front() {
            let neighbors: Vec<RoomId> = graph.neighbors(id).to_vec();
            for next in neighbors {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        let Some(stranded) = graph
            .rooms()
            .iter()
            .map(|r| r.id)
            .find(|id| !visited.contains(id))
        else {
            return;
        };

        let stranded_pos = match graph.get(stranded) {
            Some(room) => room.grid_pos,
            None => return,
        };
        // Tie-break on id to keep repair deterministic for a given seed.
        let nearest = visited
            .iter()
            .copied()
            .min_by_key(|&id| {
                let pos = graph.get(id).map(|r| r.grid_pos).unwrap_or(IVec2::ZERO);
                (manhattan(pos, stranded_pos), id.0)
            })
            .unwrap_or(spawn);

        graph.connect(stranded, nearest);
        visited.insert(stranded);
        queue.push_back(stranded);
    }
}

fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
