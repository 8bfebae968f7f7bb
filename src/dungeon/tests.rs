//! Dungeon domain: tests for generation invariants and graph helpers.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::generator::repair_connectivity;
use super::{
    Direction, DungeonError, RoomGraph, RoomType, generate, min_special_rooms, target_room_count,
};
use crate::content::DungeonDefaults;

const ROOM_SIZE: Vec2 = Vec2::new(960.0, 540.0);

fn defaults() -> DungeonDefaults {
    DungeonDefaults::default()
}

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

// -----------------------------------------------------------------------------
// Direction tests
// -----------------------------------------------------------------------------

#[test]
fn test_opposite_direction_is_symmetric() {
    for dir in Direction::ALL {
        assert_eq!(dir.opposite().opposite(), dir);
    }
}

#[test]
fn test_direction_toward_dominant_axis() {
    let origin = IVec2::ZERO;
    assert_eq!(Direction::toward(origin, IVec2::new(3, 1)), Direction::Right);
    assert_eq!(
        Direction::toward(origin, IVec2::new(-2, 1)),
        Direction::Left
    );
    assert_eq!(Direction::toward(origin, IVec2::new(1, 4)), Direction::Up);
    assert_eq!(
        Direction::toward(origin, IVec2::new(0, -2)),
        Direction::Down
    );
}

// -----------------------------------------------------------------------------
// RoomGraph tests
// -----------------------------------------------------------------------------

#[test]
fn test_connect_is_symmetric_and_deduped() {
    let mut graph = RoomGraph::default();
    let a = graph.add_room(IVec2::ZERO, ROOM_SIZE, RoomType::Spawn);
    let b = graph.add_room(IVec2::new(1, 0), ROOM_SIZE, RoomType::Combat);

    graph.connect(a, b);
    graph.connect(a, b);
    graph.connect(b, a);
    graph.connect(a, a);

    assert_eq!(graph.neighbors(a), &[b]);
    assert_eq!(graph.neighbors(b), &[a]);
}

#[test]
fn test_validate_requires_spawn() {
    let mut graph = RoomGraph::default();
    assert_eq!(graph.validate(), Err(DungeonError::MissingSpawn));

    graph.add_room(IVec2::ZERO, ROOM_SIZE, RoomType::Spawn);
    assert!(graph.validate().is_ok());
}

#[test]
fn test_ensure_boss_room_appends_next_to_spawn() {
    let mut graph = RoomGraph::default();
    let spawn = graph.add_room(IVec2::ZERO, ROOM_SIZE, RoomType::Spawn);

    let boss = graph.ensure_boss_room().expect("boss room");
    assert_eq!(graph.count_of(RoomType::Boss), 1);
    assert!(graph.neighbors(spawn).contains(&boss));

    // A second call returns the same room instead of appending another.
    assert_eq!(graph.ensure_boss_room(), Some(boss));
    assert_eq!(graph.count_of(RoomType::Boss), 1);
}

#[test]
fn test_connectivity_repair_wires_islands() {
    let mut graph = RoomGraph::default();
    let spawn = graph.add_room(IVec2::ZERO, ROOM_SIZE, RoomType::Spawn);
    let near = graph.add_room(IVec2::new(1, 0), ROOM_SIZE, RoomType::Combat);
    graph.connect(spawn, near);

    // An island two cells out, internally connected but unreachable.
    let island_a = graph.add_room(IVec2::new(3, 0), ROOM_SIZE, RoomType::Combat);
    let island_b = graph.add_room(IVec2::new(3, 1), ROOM_SIZE, RoomType::Puzzle);
    graph.connect(island_a, island_b);
    assert!(!graph.is_fully_connected());

    repair_connectivity(&mut graph);

    assert!(graph.is_fully_connected());
    // The island attached to its Manhattan-nearest reachable room.
    assert!(graph.neighbors(island_a).contains(&near) || graph.neighbors(island_b).contains(&near));
}

// -----------------------------------------------------------------------------
// Generation invariants, across seeds and difficulties
// -----------------------------------------------------------------------------

#[test]
fn test_generation_room_count_in_bounds() {
    let cfg = defaults();
    for difficulty in 1..=3 {
        for seed in 0..20 {
            let graph = generate(difficulty, &cfg, &mut rng(seed));
            let n = graph.len() as u32;
            assert!(
                (cfg.min_rooms..=cfg.max_rooms).contains(&n),
                "difficulty {} seed {}: {} rooms outside [{}, {}]",
                difficulty,
                seed,
                n,
                cfg.min_rooms,
                cfg.max_rooms
            );
        }
    }
}

#[test]
fn test_generation_exactly_one_spawn() {
    let cfg = defaults();
    for difficulty in 1..=3 {
        for seed in 0..20 {
            let graph = generate(difficulty, &cfg, &mut rng(seed));
            assert_eq!(graph.count_of(RoomType::Spawn), 1);
            let spawn = graph.spawn_room().unwrap();
            assert_eq!(graph.get(spawn).unwrap().grid_pos, IVec2::ZERO);
        }
    }
}

#[test]
fn test_generation_boss_at_max_distance() {
    let cfg = defaults();
    for difficulty in 1..=3 {
        for seed in 0..20 {
            let graph = generate(difficulty, &cfg, &mut rng(seed));
            assert!(graph.count_of(RoomType::Boss) <= 1);

            let Some(boss) = graph.boss_room() else {
                continue;
            };
            // Retyping never moves rooms, so the boss must sit at (or
            // tie for) the maximum distance from the spawn.
            let boss_dist = graph.get(boss).unwrap().grid_pos.as_vec2().length();
            let max_dist = graph
                .rooms()
                .iter()
                .map(|r| r.grid_pos.as_vec2().length())
                .fold(0.0f32, f32::max);
            assert!(
                boss_dist >= max_dist - 1e-4,
                "seed {}: boss at {} but max distance is {}",
                seed,
                boss_dist,
                max_dist
            );
        }
    }
}

#[test]
fn test_generation_special_room_quota() {
    let cfg = defaults();
    for difficulty in 1..=3 {
        for seed in 0..20 {
            let graph = generate(difficulty, &cfg, &mut rng(seed));
            let needed = min_special_rooms(difficulty, &cfg) as usize;
            assert!(
                graph.special_count() >= needed,
                "difficulty {} seed {}: {} special rooms, needed {}",
                difficulty,
                seed,
                graph.special_count(),
                needed
            );
        }
    }
}

#[test]
fn test_generation_all_rooms_reachable() {
    let cfg = defaults();
    for difficulty in 1..=3 {
        for seed in 0..20 {
            let graph = generate(difficulty, &cfg, &mut rng(seed));
            let spawn = graph.spawn_room().unwrap();
            assert_eq!(
                graph.reachable_from(spawn).len(),
                graph.len(),
                "difficulty {} seed {}: not all rooms reachable",
                difficulty,
                seed
            );
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    let cfg = defaults();
    for seed in 0..10 {
        let a = generate(2, &cfg, &mut rng(seed));
        let b = generate(2, &cfg, &mut rng(seed));

        assert_eq!(a.len(), b.len());
        for (ra, rb) in a.rooms().iter().zip(b.rooms()) {
            assert_eq!(ra.grid_pos, rb.grid_pos);
            assert_eq!(ra.room_type, rb.room_type);
            assert_eq!(ra.connections(), rb.connections());
        }
    }
}

#[test]
fn test_difficulty_one_scenario() {
    let cfg = defaults();
    for seed in 0..20 {
        let graph = generate(1, &cfg, &mut rng(seed));
        assert!(
            (10..=12).contains(&graph.len()),
            "seed {}: {} rooms",
            seed,
            graph.len()
        );
        assert!(graph.is_fully_connected());
        assert!(graph.special_count() >= 3);
    }
}

#[test]
fn test_target_room_count_scales_with_difficulty() {
    let cfg = defaults();
    assert_eq!(target_room_count(1, &cfg), cfg.min_rooms);
    assert_eq!(
        target_room_count(2, &cfg),
        cfg.min_rooms + cfg.rooms_per_difficulty
    );
    // Silly difficulties clamp to the configured ceiling.
    assert_eq!(target_room_count(100, &cfg), cfg.max_rooms);
}

#[test]
fn test_min_special_rooms_scales_with_difficulty() {
    let cfg = defaults();
    assert_eq!(min_special_rooms(1, &cfg), 3);
    assert_eq!(min_special_rooms(2, &cfg), 4);
    assert_eq!(min_special_rooms(3, &cfg), 5);
}
