//! Items domain: inventory resource and pickup components.

use bevy::prelude::*;

use crate::content::EquipmentSlot;

/// The player's carried items. Keys gate treasure doors; equipment is
/// opaque to the core and surfaced to the inventory UI by id.
#[derive(Resource, Debug, Default)]
pub struct Inventory {
    keys: u32,
    equipment: Vec<String>,
}

impl Inventory {
    pub fn key_count(&self) -> u32 {
        self.keys
    }

    pub fn grant_key(&mut self) {
        self.keys += 1;
    }

    /// Remove one key. Returns false (and changes nothing) when empty.
    pub fn consume_key(&mut self) -> bool {
        if self.keys == 0 {
            return false;
        }
        self.keys -= 1;
        true
    }

    pub fn add_equipment(&mut self, item_id: impl Into<String>) {
        self.equipment.push(item_id.into());
    }

    pub fn equipment(&self) -> &[String] {
        &self.equipment
    }

    pub fn reset(&mut self) {
        self.keys = 0;
        self.equipment.clear();
    }
}

/// An equipment item lying in the current room, waiting to be collected.
/// Room-scoped: despawned when the room is torn down.
#[derive(Component, Debug, Clone)]
pub struct ItemPickup {
    pub def_id: String,
    pub slot: EquipmentSlot,
}
