//! Items domain: inventory tests.

use super::Inventory;

#[test]
fn test_inventory_starts_empty() {
    let inventory = Inventory::default();
    assert_eq!(inventory.key_count(), 0);
    assert!(inventory.equipment().is_empty());
}

#[test]
fn test_consume_key_on_empty_inventory_fails() {
    let mut inventory = Inventory::default();
    assert!(!inventory.consume_key());
    assert_eq!(inventory.key_count(), 0);
}

#[test]
fn test_keys_grant_and_consume_one_at_a_time() {
    let mut inventory = Inventory::default();
    inventory.grant_key();
    inventory.grant_key();

    assert!(inventory.consume_key());
    assert_eq!(inventory.key_count(), 1);
    assert!(inventory.consume_key());
    assert!(!inventory.consume_key());
}

#[test]
fn test_equipment_accumulates() {
    let mut inventory = Inventory::default();
    inventory.add_equipment("item_rusted_helm");
    inventory.add_equipment("item_delver_boots");
    assert_eq!(
        inventory.equipment(),
        ["item_rusted_helm", "item_delver_boots"]
    );
}

#[test]
fn test_reset_clears_everything() {
    let mut inventory = Inventory::default();
    inventory.grant_key();
    inventory.add_equipment("item_sigil_band");

    inventory.reset();
    assert_eq!(inventory.key_count(), 0);
    assert!(inventory.equipment().is_empty());
}
