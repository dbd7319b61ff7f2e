// ABOUTME: Constraint normalizer turning caller-supplied inputs into a canonical GenerationRequest
// ABOUTME: Clamps numeric fields, defaults equipment and normalizes free-form exclusions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Constraint Normalizer
//!
//! Out-of-range numbers are clamped, never rejected. Only structurally invalid input
//! fails: an unknown or blank focus, or a non-finite duration or intensity. Nothing in
//! this module draws from the RNG, so validation always happens before any draw.

use crate::config::GeneratorConfig;
use kinetic_core::constants::equipment;
use kinetic_core::errors::ValidationError;
use kinetic_core::models::{Focus, GenerationRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the session happens; supplies equipment when the caller lists none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Commercial gym
    Gym,
    /// Home setup
    Home,
    /// Park or track
    Outdoor,
    /// Hotel room
    Travel,
}

impl Location {
    /// Parse a location hint; unknown hints are ignored rather than rejected
    #[must_use]
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_lowercase().as_str() {
            "gym" | "commercial-gym" | "box" => Some(Self::Gym),
            "home" | "home-gym" | "garage" => Some(Self::Home),
            "outdoor" | "outdoors" | "park" | "track" => Some(Self::Outdoor),
            "travel" | "hotel" => Some(Self::Travel),
            _ => None,
        }
    }

    /// Equipment typically available at this location
    #[must_use]
    pub fn default_equipment(self) -> &'static [&'static str] {
        match self {
            Self::Gym => &[
                equipment::BODYWEIGHT,
                equipment::BARBELL,
                equipment::DUMBBELL,
                equipment::KETTLEBELL,
                equipment::PULLUP_BAR,
                equipment::ROWER,
                equipment::BIKE,
                equipment::BOX,
                equipment::BENCH,
                equipment::BAND,
                equipment::MEDICINE_BALL,
                equipment::JUMP_ROPE,
            ],
            Self::Home => &[equipment::BODYWEIGHT, equipment::DUMBBELL, equipment::BAND],
            Self::Outdoor => &[equipment::BODYWEIGHT, equipment::JUMP_ROPE],
            Self::Travel => &[equipment::BODYWEIGHT, equipment::BAND],
        }
    }
}

/// Caller-supplied constraints before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConstraints {
    /// Focus or archetype name
    pub focus: String,
    /// Requested session length in minutes
    pub duration_minutes: f64,
    /// Requested intensity on the 1-10 scale
    pub intensity: f64,
    /// Available equipment, any casing
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Free-form exclusions (`no jumping`, `burpees`)
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Optional location hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl RawConstraints {
    /// Constraints with the given focus, duration and intensity and nothing else
    #[must_use]
    pub fn new(focus: impl Into<String>, duration_minutes: f64, intensity: f64) -> Self {
        Self {
            focus: focus.into(),
            duration_minutes,
            intensity,
            ..Self::default()
        }
    }

    /// Replace the equipment list
    #[must_use]
    pub fn with_equipment<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment = items.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the exclusion list
    #[must_use]
    pub fn with_constraints<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints = items.into_iter().map(Into::into).collect();
        self
    }

    /// Set the location hint
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl From<&GenerationRequest> for RawConstraints {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            focus: request.focus.as_str().to_owned(),
            duration_minutes: f64::from(request.duration_minutes),
            intensity: f64::from(request.intensity),
            equipment: request.equipment.iter().cloned().collect(),
            constraints: request.constraints.clone(),
            location: None,
        }
    }
}

/// Validate and clamp raw constraints into a canonical request
///
/// # Errors
///
/// Returns `ValidationError` for a blank or unknown focus, or a non-finite duration or
/// intensity
pub fn normalize(
    raw: &RawConstraints,
    config: &GeneratorConfig,
) -> Result<GenerationRequest, ValidationError> {
    if raw.focus.trim().is_empty() {
        return Err(ValidationError::MissingField { field: "focus" });
    }
    let focus: Focus = raw.focus.parse()?;

    if !raw.duration_minutes.is_finite() {
        return Err(ValidationError::non_finite("durationMinutes"));
    }
    if !raw.intensity.is_finite() {
        return Err(ValidationError::non_finite("intensity"));
    }

    let duration_minutes = clamp_round(
        raw.duration_minutes,
        f64::from(config.duration.min_minutes),
        f64::from(config.duration.max_minutes),
    ) as u32;
    let intensity = clamp_round(
        raw.intensity,
        f64::from(config.intensity.min),
        f64::from(config.intensity.max),
    ) as u8;

    Ok(GenerationRequest {
        focus,
        duration_minutes,
        intensity,
        equipment: resolve_equipment(raw, config),
        constraints: normalize_exclusions(&raw.constraints),
    })
}

fn clamp_round(value: f64, min: f64, max: f64) -> f64 {
    value.round().clamp(min, max)
}

fn resolve_equipment(raw: &RawConstraints, config: &GeneratorConfig) -> BTreeSet<String> {
    let listed: BTreeSet<String> = raw
        .equipment
        .iter()
        .filter_map(|item| canonical_equipment(item))
        .collect();
    if !listed.is_empty() {
        return listed;
    }

    if let Some(location) = raw.location.as_deref().and_then(Location::from_hint) {
        return location
            .default_equipment()
            .iter()
            .map(|item| (*item).to_owned())
            .collect();
    }

    let defaults: BTreeSet<String> = config
        .default_equipment
        .iter()
        .filter_map(|item| canonical_equipment(item))
        .collect();
    if defaults.is_empty() {
        BTreeSet::from([equipment::BODYWEIGHT.to_owned()])
    } else {
        defaults
    }
}

/// Canonical identifier for a piece of equipment, `None` when blank
#[must_use]
pub fn canonical_equipment(raw: &str) -> Option<String> {
    let slug = raw
        .trim()
        .to_lowercase()
        .replace(['_', ' '], "-");
    if slug.is_empty() {
        return None;
    }
    let canonical = match slug.as_str() {
        "none" | "no-equipment" | "body-weight" | "bw" => equipment::BODYWEIGHT,
        "dumbbells" | "db" => equipment::DUMBBELL,
        "kettlebells" | "kb" => equipment::KETTLEBELL,
        "barbells" | "bar" => equipment::BARBELL,
        "pull-up-bar" | "pullup" | "pull-up" => equipment::PULLUP_BAR,
        "rowing-machine" | "erg" => equipment::ROWER,
        "bands" | "resistance-band" => equipment::BAND,
        "jumprope" | "rope" => equipment::JUMP_ROPE,
        "med-ball" | "medball" => equipment::MEDICINE_BALL,
        "air-bike" | "assault-bike" | "spin-bike" => equipment::BIKE,
        "plyo-box" => equipment::BOX,
        other => other,
    };
    Some(canonical.to_owned())
}

/// Normalize free-form exclusions into match tokens, dropping blanks and duplicates
#[must_use]
pub fn normalize_exclusions(raw: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    raw.iter()
        .filter_map(|entry| exclusion_token(entry))
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Reduce one exclusion phrase to a token: `"No Jumping"` becomes `jump`
#[must_use]
pub fn exclusion_token(raw: &str) -> Option<String> {
    let lowered = raw.trim_start().to_lowercase();
    let phrase = ["no ", "no-", "avoid ", "without "]
        .iter()
        .find_map(|prefix| lowered.strip_prefix(*prefix))
        .unwrap_or(&lowered)
        .trim();

    let stem = stem_word(phrase);
    let token = stem.split_whitespace().collect::<Vec<_>>().join("-");
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn stem_word(word: &str) -> String {
    if let Some(base) = word.strip_suffix("ing") {
        if base.chars().count() >= 3 {
            let mut chars: Vec<char> = base.chars().collect();
            let doubled = matches!(
                chars.as_slice(),
                [.., a, b] if a == b && !is_vowel(*b)
            );
            if doubled {
                chars.pop();
            }
            return chars.into_iter().collect();
        }
        return word.to_owned();
    }
    match word.strip_suffix('s') {
        Some(base) if word.len() > 3 && !base.ends_with('s') => base.to_owned(),
        _ => word.to_owned(),
    }
}

const fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
