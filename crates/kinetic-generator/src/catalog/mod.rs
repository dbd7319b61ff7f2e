// ABOUTME: Read-only movement catalog snapshot consumed by the block composer
// ABOUTME: Built-in snapshot cached once; external snapshots loaded from JSON and validated
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Movement Catalog
//!
//! A snapshot is an immutable value: movements are sorted by id at construction and
//! never change afterwards. Generations share a snapshot through `Arc`, so a catalog
//! refresh builds a new snapshot instead of mutating one in use.

mod builtin;

use kinetic_core::errors::ValidationError;
use kinetic_core::models::{Movement, MovementCategory};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

/// Cached built-in catalog, built once and shared
static BUILTIN_CATALOG: OnceLock<Arc<MovementCatalog>> = OnceLock::new();

/// Immutable catalog snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementCatalog {
    movements: Vec<Movement>,
    by_id: BTreeMap<String, usize>,
}

impl MovementCatalog {
    /// Shared built-in snapshot
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(BUILTIN_CATALOG.get_or_init(|| {
            Arc::new(Self::index(builtin::movements()))
        }))
    }

    /// Build a snapshot from movements, rejecting empty or duplicate ids
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MalformedCatalog` for empty ids, empty names, movements
    /// without patterns, or duplicate ids
    pub fn from_movements(movements: Vec<Movement>) -> Result<Self, ValidationError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for movement in &movements {
            if movement.id.trim().is_empty() {
                return Err(ValidationError::malformed_catalog("movement with empty id"));
            }
            if movement.name.trim().is_empty() {
                return Err(ValidationError::malformed_catalog(format!(
                    "movement '{}' has an empty name",
                    movement.id
                )));
            }
            if movement.patterns.is_empty() {
                return Err(ValidationError::malformed_catalog(format!(
                    "movement '{}' has no patterns",
                    movement.id
                )));
            }
            if !seen.insert(movement.id.as_str()) {
                return Err(ValidationError::malformed_catalog(format!(
                    "duplicate movement id '{}'",
                    movement.id
                )));
            }
        }
        drop(seen);
        Ok(Self::index(movements))
    }

    /// Parse a JSON array of movements into a snapshot
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MalformedCatalog` when the JSON does not describe a
    /// valid list of movements
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let movements: Vec<Movement> = serde_json::from_str(json)
            .map_err(|e| ValidationError::malformed_catalog(e.to_string()))?;
        Self::from_movements(movements)
    }

    fn index(mut movements: Vec<Movement>) -> Self {
        movements.sort_by(|a, b| a.id.cmp(&b.id));
        let by_id = movements
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.id.clone(), idx))
            .collect();
        Self { movements, by_id }
    }

    /// Look up a movement by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Movement> {
        self.by_id.get(id).and_then(|idx| self.movements.get(*idx))
    }

    /// Movements in id order
    pub fn iter(&self) -> impl Iterator<Item = &Movement> {
        self.movements.iter()
    }

    /// Number of movements
    #[must_use]
    pub fn len(&self) -> usize {
        self.movements.len()
    }

    /// Whether the snapshot holds no movements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Movements usable with `equipment` and not hit by any exclusion token, in id order
    #[must_use]
    pub fn eligible<'a>(
        &'a self,
        equipment: &BTreeSet<String>,
        exclusions: &[String],
    ) -> Vec<&'a Movement> {
        self.movements
            .iter()
            .filter(|m| m.is_available_with(equipment))
            .filter(|m| !is_excluded(m, exclusions))
            .collect()
    }

    /// Count of movements per category, for diagnostics
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<MovementCategory, usize> {
        let mut counts = BTreeMap::new();
        for movement in &self.movements {
            *counts.entry(movement.category).or_insert(0) += 1;
        }
        counts
    }
}

/// Whether an exclusion token hits the movement's id, name or one of its patterns
#[must_use]
pub fn is_excluded(movement: &Movement, exclusions: &[String]) -> bool {
    if exclusions.is_empty() {
        return false;
    }
    let slug_name = movement.name.to_lowercase().replace(' ', "-");
    exclusions.iter().any(|token| {
        movement.id.contains(token.as_str())
            || slug_name.contains(token.as_str())
            || movement.patterns.contains(token)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_builtin_catalog_is_valid_and_sorted() {
        let catalog = MovementCatalog::builtin();
        let rebuilt = MovementCatalog::from_movements(catalog.iter().cloned().collect());

        assert!(rebuilt.is_ok());
        assert!(catalog.len() > 40);
        let ids: Vec<&str> = catalog.iter().map(|m| m.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_builtin_catalog_covers_every_category() {
        let counts = MovementCatalog::builtin().category_counts();
        for category in [
            MovementCategory::Strength,
            MovementCategory::Conditioning,
            MovementCategory::Mobility,
            MovementCategory::Cardio,
        ] {
            assert!(counts.get(&category).copied().unwrap_or(0) > 0);
        }
    }

    #[test]
    fn test_eligible_respects_equipment() {
        let catalog = MovementCatalog::builtin();
        let equipment = set(&["barbell", "bodyweight"]);

        for movement in catalog.eligible(&equipment, &[]) {
            for needed in movement.effective_equipment() {
                assert!(equipment.contains(needed), "{} needs {needed}", movement.id);
            }
        }
        assert!(catalog.eligible(&set(&["specialized-machine"]), &[]).is_empty());
    }

    #[test]
    fn test_exclusions_remove_matching_movements() {
        let catalog = MovementCatalog::builtin();
        let equipment = set(&["bodyweight"]);
        let exclusions = vec!["jump".to_owned()];

        let eligible = catalog.eligible(&equipment, &exclusions);
        assert!(!eligible.is_empty());
        assert!(eligible.iter().all(|m| !m.patterns.contains("jump")));
        assert!(eligible.iter().all(|m| !m.id.contains("jump")));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": "squat", "name": "Squat", "patterns": ["squat"], "category": "strength"},
            {"id": "squat", "name": "Squat Again", "patterns": ["squat"], "category": "strength"}
        ]"#;

        let err = MovementCatalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_from_json_defaults_to_bodyweight() {
        let json = r#"[
            {"id": "air-squat", "name": "Air Squat", "patterns": ["squat"], "category": "strength"}
        ]"#;

        let catalog = MovementCatalog::from_json(json).unwrap();
        let movement = catalog.get("air-squat").unwrap();
        assert!(movement.required_equipment.is_empty());
        assert!(movement.is_available_with(&set(&["bodyweight"])));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(MovementCatalog::from_json("{not json").is_err());
        assert!(MovementCatalog::from_json(
            r#"[{"id": "", "name": "x", "patterns": ["squat"], "category": "strength"}]"#
        )
        .is_err());
    }
}
