// ABOUTME: Movement catalog entry with pattern tags and equipment requirements
// ABOUTME: Owned by the catalog snapshot and read-only to the generator
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use crate::constants::equipment::BODYWEIGHT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Broad grouping of a movement, used when no pattern matches a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementCategory {
    /// Loaded or bodyweight strength work
    Strength,
    /// Short, high-output metabolic work
    Conditioning,
    /// Stretching and joint preparation
    Mobility,
    /// Monostructural aerobic work (run, row, bike)
    Cardio,
}

/// One exercise in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    /// Stable identifier (`back-squat`, `kb-swing`, ...)
    pub id: String,
    /// Display name
    pub name: String,
    /// Movement patterns (`squat`, `hinge`, `push`, ...)
    pub patterns: BTreeSet<String>,
    /// Equipment needed; empty means bodyweight only
    #[serde(default)]
    pub required_equipment: BTreeSet<String>,
    /// Broad grouping
    pub category: MovementCategory,
}

impl Movement {
    /// Equipment that must be available for this movement. A movement without
    /// requirements needs `bodyweight`.
    #[must_use]
    pub fn effective_equipment(&self) -> BTreeSet<&str> {
        if self.required_equipment.is_empty() {
            BTreeSet::from([BODYWEIGHT])
        } else {
            self.required_equipment.iter().map(String::as_str).collect()
        }
    }

    /// Whether every required piece of equipment is in `available`
    #[must_use]
    pub fn is_available_with(&self, available: &BTreeSet<String>) -> bool {
        self.effective_equipment()
            .iter()
            .all(|item| available.contains(*item))
    }

    /// Whether the movement carries any of the given patterns
    #[must_use]
    pub fn matches_any_pattern(&self, patterns: &[&str]) -> bool {
        patterns.iter().any(|p| self.patterns.contains(*p))
    }
}
