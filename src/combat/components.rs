//! Combat domain: enemy entity components.
//!
//! Combat resolution (AI, attacks, damage) belongs to a collaborating
//! plugin. This core only owns the data the renderer reads and the
//! bookkeeping clear-detection needs: who is an enemy, which one is the
//! boss, and how much health to spawn them with.

use bevy::prelude::*;

/// Marks an entity as an enemy in the current room.
#[derive(Component, Debug)]
pub struct Enemy;

/// Marks the boss enemy. Its death ends the run.
#[derive(Component, Debug)]
pub struct BossEnemy;

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }
}

/// Identifies an enemy by its definition in the content registry.
#[derive(Component, Debug, Clone)]
pub struct EnemyIdentity {
    pub def_id: String,
}

#[cfg(test)]
mod tests {
    use super::Health;

    #[test]
    fn test_health_damage_is_clamped() {
        let mut health = Health::new(50.0);
        assert_eq!(health.take_damage(20.0), 20.0);
        assert_eq!(health.current, 30.0);
        assert_eq!(health.take_damage(100.0), 30.0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_health_percent() {
        let mut health = Health::new(200.0);
        health.take_damage(50.0);
        assert_eq!(health.percent(), 0.75);
    }
}
