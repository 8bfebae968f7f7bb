//! Dungeon domain: the generated room graph.
//!
//! Rooms live in an arena indexed by stable [`RoomId`]s with adjacency
//! stored as id lists, so the graph is cheap to clone, inspect, and test.
//! After generation the graph is treated as immutable; the single
//! exception is [`RoomGraph::ensure_boss_room`], used when a tiny dungeon
//! left generation without a boss room.

use bevy::prelude::*;
use std::collections::{HashSet, VecDeque};

/// Stable identifier of a room in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomType {
    Spawn,
    Combat,
    Puzzle,
    Treasure,
    Boss,
}

impl RoomType {
    /// Puzzle and treasure rooms count toward the generation quota.
    pub fn is_special(self) -> bool {
        matches!(self, RoomType::Puzzle | RoomType::Treasure)
    }
}

/// Cardinal direction on the room grid. Up is +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, 1),
            Direction::Down => IVec2::new(0, -1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Dominant-axis direction from one grid cell toward another.
    /// Ties and zero offsets resolve to the horizontal axis.
    pub fn toward(from: IVec2, to: IVec2) -> Direction {
        let delta = to - from;
        if delta.y.abs() > delta.x.abs() {
            if delta.y > 0 { Direction::Up } else { Direction::Down }
        } else if delta.x < 0 {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    /// Position on the fixed room-size grid, spawn at the origin.
    pub grid_pos: IVec2,
    /// World-space footprint of the room.
    pub size: Vec2,
    pub room_type: RoomType,
    /// Whether the player has ever entered this room.
    pub visited: bool,
    /// Legacy whole-room lock flag. Door state supersedes it; kept for
    /// renderer compatibility (dimmed map cells).
    pub locked: bool,
    connections: Vec<RoomId>,
}

impl Room {
    pub fn connections(&self) -> &[RoomId] {
        &self.connections
    }
}

/// Fatal precondition failures detected after generation.
#[derive(Debug, PartialEq, Eq)]
pub enum DungeonError {
    MissingSpawn,
}

impl std::fmt::Display for DungeonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DungeonError::MissingSpawn => {
                write!(f, "generated dungeon has no spawn room")
            }
        }
    }
}

/// The generated, connectivity-guaranteed set of rooms and their
/// adjacency. Built once per run.
#[derive(Resource, Debug, Default, Clone)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl RoomGraph {
    pub fn add_room(&mut self, grid_pos: IVec2, size: Vec2, room_type: RoomType) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(Room {
            id,
            grid_pos,
            size,
            room_type,
            visited: false,
            locked: false,
            connections: Vec::new(),
        });
        id
    }

    /// Connect two rooms. Connections are symmetric: connecting a to b
    /// always records b to a as well. Self-loops and duplicates are ignored.
    pub fn connect(&mut self, a: RoomId, b: RoomId) {
        if a == b || self.get(a).is_none() || self.get(b).is_none() {
            return;
        }
        if !self.rooms[a.0 as usize].connections.contains(&b) {
            self.rooms[a.0 as usize].connections.push(b);
        }
        if !self.rooms[b.0 as usize].connections.contains(&a) {
            self.rooms[b.0 as usize].connections.push(a);
        }
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0 as usize)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        self.get(id).map(|r| r.connections.as_slice()).unwrap_or(&[])
    }

    pub fn room_at(&self, grid_pos: IVec2) -> Option<RoomId> {
        self.rooms
            .iter()
            .find(|r| r.grid_pos == grid_pos)
            .map(|r| r.id)
    }

    pub fn spawn_room(&self) -> Option<RoomId> {
        self.rooms
            .iter()
            .find(|r| r.room_type == RoomType::Spawn)
            .map(|r| r.id)
    }

    pub fn boss_room(&self) -> Option<RoomId> {
        self.rooms
            .iter()
            .find(|r| r.room_type == RoomType::Boss)
            .map(|r| r.id)
    }

    pub fn count_of(&self, room_type: RoomType) -> usize {
        self.rooms
            .iter()
            .filter(|r| r.room_type == room_type)
            .count()
    }

    /// Number of rooms counting toward the special-room quota.
    pub fn special_count(&self) -> usize {
        self.rooms
            .iter()
            .filter(|r| r.room_type.is_special())
            .count()
    }

    /// All room ids reachable from `start` over the adjacency lists.
    pub fn reachable_from(&self, start: RoomId) -> HashSet<RoomId> {
        let mut visited = HashSet::new();
        if self.get(start).is_none() {
            return visited;
        }
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);
        while let Some(id) = queue.pop_front() {
            for &next in self.neighbors(id) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }

    pub fn is_fully_connected(&self) -> bool {
        match self.spawn_room() {
            Some(spawn) => self.reachable_from(spawn).len() == self.rooms.len(),
            None => false,
        }
    }

    /// Post-generation precondition check: exactly one spawn room.
    pub fn validate(&self) -> Result<(), DungeonError> {
        if self.count_of(RoomType::Spawn) == 1 {
            Ok(())
        } else {
            Err(DungeonError::MissingSpawn)
        }
    }

    /// Return the boss room, appending one next to the spawn if the
    /// generated layout ended up without one (farthest room was the
    /// spawn itself). Returns None only when there is no spawn room.
    pub fn ensure_boss_room(&mut self) -> Option<RoomId> {
        if let Some(boss) = self.boss_room() {
            return Some(boss);
        }
        let spawn = self.spawn_room()?;
        let (spawn_pos, size) = {
            let room = self.get(spawn)?;
            (room.grid_pos, room.size)
        };
        // Walk outward from the spawn until a free cell turns up.
        for radius in 1..=8 {
            for dir in Direction::ALL {
                let cell = spawn_pos + dir.offset() * radius;
                if self.room_at(cell).is_none() {
                    let boss = self.add_room(cell, size, RoomType::Boss);
                    self.connect(spawn, boss);
                    return Some(boss);
                }
            }
        }
        None
    }
}
