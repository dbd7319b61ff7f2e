// ABOUTME: Deterministic per-user daily workout suggestions with an in-memory rotation offset
// ABOUTME: Derives focus, duration, intensity and seed from a hash of user, UTC date and offset
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Daily suggestions
//!
//! `today` is a pure function of `(user id, UTC date, rotation offset)`, so the same
//! user sees the same suggestion all day until they rotate. `rotate` advances the
//! offset; offsets reset when the date changes. Offsets from earlier dates are dropped
//! on every rotation, so the map holds at most one entry per user who rotated today.

use chrono::NaiveDate;
use dashmap::DashMap;
use kinetic_core::constants::request_bounds;
use kinetic_core::models::{Focus, Seed};
use kinetic_generator::RawConstraints;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::debug;

/// Duration steps around the configured session length (minutes)
const DURATION_STEPS: [i64; 3] = [-10, 0, 10];
/// Lowest intensity a suggestion proposes
const BASE_INTENSITY: u8 = 5;
/// Number of intensity levels above the base
const INTENSITY_SPREAD: u8 = 3;

/// Generation inputs of a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedConfig {
    /// Workout focus
    pub focus: Focus,
    /// Session length in minutes
    pub duration_min: u32,
    /// Intensity on the 1-10 scale
    pub intensity: u8,
    /// Equipment assumed available
    pub equipment: Vec<String>,
    /// Exclusions (none by default)
    pub constraints: Vec<String>,
}

impl SuggestedConfig {
    /// Constraints ready for the generator, matching what a client posts to `generate`
    #[must_use]
    pub fn to_raw(&self) -> RawConstraints {
        RawConstraints::new(
            self.focus.as_str(),
            f64::from(self.duration_min),
            f64::from(self.intensity),
        )
        .with_equipment(self.equipment.iter().cloned())
        .with_constraints(self.constraints.iter().cloned())
    }
}

/// One suggestion plus the seed that reproduces its plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySuggestion {
    /// Generation inputs
    pub config: SuggestedConfig,
    /// Seed for the generator
    pub seed: Seed,
    /// UTC date the suggestion belongs to
    pub date: NaiveDate,
    /// How many times the user rotated today
    pub rotation: u32,
}

/// Suggestion service holding each user's rotation offset for the current day
#[derive(Debug, Clone)]
pub struct SuggestionService {
    /// user id -> (date of last rotation, offset)
    rotations: Arc<DashMap<String, (NaiveDate, u32)>>,
    suggest_minutes: u32,
    equipment: Vec<String>,
}

impl SuggestionService {
    /// Service suggesting sessions around `suggest_minutes` with the given equipment
    #[must_use]
    pub fn new(suggest_minutes: u32, equipment: Vec<String>) -> Self {
        Self {
            rotations: Arc::new(DashMap::new()),
            suggest_minutes,
            equipment,
        }
    }

    /// Current suggestion for `user_id` on `date`
    #[must_use]
    pub fn today(&self, user_id: &str, date: NaiveDate) -> DailySuggestion {
        let offset = self
            .rotations
            .get(user_id)
            .filter(|entry| entry.value().0 == date)
            .map_or(0, |entry| entry.value().1);
        self.derive(user_id, date, offset)
    }

    /// Advance the user's offset for `date` and return the next suggestion
    #[must_use]
    pub fn rotate(&self, user_id: &str, date: NaiveDate) -> DailySuggestion {
        self.prune_before(date);
        let mut entry = self
            .rotations
            .entry(user_id.to_owned())
            .or_insert((date, 0));
        let (day, offset) = entry.value_mut();
        if *day == date {
            *offset = offset.saturating_add(1);
        } else {
            *day = date;
            *offset = 1;
        }
        let offset = *offset;
        drop(entry);

        debug!(user.id = %user_id, offset, "suggestion rotated");
        self.derive(user_id, date, offset)
    }

    /// Number of users holding a rotation offset
    #[must_use]
    pub fn tracked_users(&self) -> usize {
        self.rotations.len()
    }

    fn prune_before(&self, date: NaiveDate) {
        let before = self.rotations.len();
        self.rotations.retain(|_, (day, _)| *day >= date);
        let dropped = before.saturating_sub(self.rotations.len());
        if dropped > 0 {
            debug!(dropped, %date, "stale suggestion rotations dropped");
        }
    }

    fn derive(&self, user_id: &str, date: NaiveDate, offset: u32) -> DailySuggestion {
        let digest = Sha256::digest(format!("{user_id}|{date}|{offset}").as_bytes());

        let focus = Focus::ALL[usize::from(digest[0]) % Focus::ALL.len()];
        let step = DURATION_STEPS[usize::from(digest[1]) % DURATION_STEPS.len()];
        let duration_min = (i64::from(self.suggest_minutes) + step).clamp(
            i64::from(request_bounds::MIN_DURATION_MINUTES),
            i64::from(request_bounds::MAX_DURATION_MINUTES),
        ) as u32;
        let intensity = BASE_INTENSITY + digest[2] % INTENSITY_SPREAD;
        let seed = Seed::new(format!("daily-{}", hex::encode(&digest[3..11])));

        DailySuggestion {
            config: SuggestedConfig {
                focus,
                duration_min,
                intensity,
                equipment: self.equipment.clone(),
                constraints: Vec::new(),
            },
            seed,
            date,
            rotation: offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_generator::{RecoveryContext, WorkoutGenerator};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn service() -> SuggestionService {
        SuggestionService::new(30, vec!["bodyweight".to_owned(), "dumbbell".to_owned()])
    }

    #[test]
    fn test_today_is_stable_within_a_day() {
        let service = service();
        assert_eq!(service.today("ana", date(4)), service.today("ana", date(4)));
    }

    #[test]
    fn test_rotate_changes_seed_and_today_follows() {
        let service = service();
        let first = service.today("ana", date(4));
        let rotated = service.rotate("ana", date(4));

        assert_eq!(rotated.rotation, 1);
        assert_ne!(rotated.seed, first.seed);
        assert_eq!(service.today("ana", date(4)), rotated);
    }

    #[test]
    fn test_rotation_resets_on_new_day() {
        let service = service();
        let _ = service.rotate("ana", date(4));
        let _ = service.rotate("ana", date(4));

        assert_eq!(service.today("ana", date(5)).rotation, 0);
        assert_eq!(service.rotate("ana", date(5)).rotation, 1);
    }

    #[test]
    fn test_users_are_independent() {
        let service = service();
        let _ = service.rotate("ana", date(4));
        assert_eq!(service.today("ben", date(4)).rotation, 0);
    }

    #[test]
    fn test_config_stays_within_bounds() {
        let service = SuggestionService::new(58, vec!["bodyweight".to_owned()]);
        for user in ["a", "b", "c", "d", "e", "f", "g", "h"] {
            let config = service.today(user, date(9)).config;
            assert!((10..=60).contains(&config.duration_min));
            assert!((5..=7).contains(&config.intensity));
            assert_eq!(config.equipment, vec!["bodyweight".to_owned()]);
        }
    }

    #[test]
    fn test_stale_rotations_are_dropped_on_a_new_day() {
        let service = service();
        for user in ["ana", "ben", "cid"] {
            let _ = service.rotate(user, date(4));
        }
        assert_eq!(service.tracked_users(), 3);

        let _ = service.rotate("ana", date(5));
        assert_eq!(service.tracked_users(), 1);
        assert_eq!(service.today("ben", date(5)).rotation, 0);
        assert_eq!(service.today("ana", date(5)).rotation, 1);
    }

    #[test]
    fn test_suggested_config_generates_matching_plan() {
        let generator = WorkoutGenerator::with_builtin_catalog();
        let service = service();

        for user in ["ana", "ben", "cid", "dee"] {
            let suggestion = service.today(user, date(12));
            let outcome = generator
                .generate(
                    &suggestion.config.to_raw(),
                    &RecoveryContext::none(),
                    Some(suggestion.seed.clone()),
                )
                .unwrap();

            assert_eq!(outcome.request.focus, suggestion.config.focus);
            assert_eq!(outcome.request.duration_minutes, suggestion.config.duration_min);
            assert_eq!(outcome.request.intensity, suggestion.config.intensity);
            assert!(outcome
                .request
                .equipment
                .iter()
                .eq(suggestion.config.equipment.iter()));
            assert_eq!(outcome.seed, suggestion.seed);
        }
    }
}
