//! Validation for cross-references between content definitions.

use super::data::EnemyTier;
use super::registry::ContentRegistry;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub target_type: &'static str,
    pub missing_id: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' references missing {} '{}' in field '{}'",
            self.source_type, self.source_id, self.target_type, self.missing_id, self.field
        )
    }
}

/// Validate all cross-references in the registry.
/// Returns a list of validation errors, empty if all references are valid.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (id, puzzle) in &registry.puzzles {
        if let Some(ref item_id) = puzzle.reward_item_id {
            if !registry.equipment_items.contains_key(item_id) {
                errors.push(ValidationError {
                    source_type: "Puzzle",
                    source_id: id.to_string(),
                    field: "reward_item_id",
                    target_type: "EquipmentItem",
                    missing_id: item_id.to_string(),
                });
            }
        }
    }

    errors
}

/// Content pools the progression layer depends on. Missing pools don't
/// block startup but rooms of the affected type will populate empty.
pub fn missing_pools(registry: &ContentRegistry) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if registry.enemies_of_tier(EnemyTier::Minor).is_empty()
        && registry.enemies_of_tier(EnemyTier::Major).is_empty()
    {
        missing.push("combat enemies (tier Minor/Major)");
    }
    if registry.enemies_of_tier(EnemyTier::Boss).is_empty() {
        missing.push("boss enemies (tier Boss)");
    }
    if registry.equipment_items.is_empty() {
        missing.push("equipment items");
    }
    if registry.puzzles.is_empty() {
        missing.push("puzzles");
    }
    missing
}
