// ABOUTME: Canonical generation request produced by the constraint normalizer
// ABOUTME: Immutable input to one generation call; every field is already clamped
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use super::Focus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical, clamped request for one generation call.
///
/// Built by the constraint normalizer; `duration_minutes` is within 10-60,
/// `intensity` within 1-10 and `equipment` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Workout style
    pub focus: Focus,
    /// Target session length
    pub duration_minutes: u32,
    /// Requested intensity on the 1-10 scale
    pub intensity: u8,
    /// Available equipment (lowercase identifiers)
    pub equipment: BTreeSet<String>,
    /// Normalized free-form exclusions
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl GenerationRequest {
    /// Target session length in seconds
    #[must_use]
    pub const fn target_seconds(&self) -> u32 {
        self.duration_minutes * 60
    }
}
