// ABOUTME: Generator configuration for duration bounds, recovery capping and block composition
// ABOUTME: Loads defaults, applies environment overrides and validates before use
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Generator Configuration Module
//!
//! Type-safe configuration for every tunable policy of the engine. The values are part
//! of a generator revision: changing any of them can change the plan a seed produces.
//!
//! # Module Structure
//! - `duration` - request duration bounds and assembler tolerance
//! - `intensity` - intensity scale bounds
//! - `recovery` - recovery-aware capping curve and composite weights
//! - `composer` - per-block item limits and prescription safety bounds

pub mod error;

pub use error::ConfigError;

use kinetic_core::constants::{equipment, request_bounds, safety_limits};
use kinetic_core::models::BlockKey;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static GENERATOR_CONFIG: OnceLock<GeneratorConfig> = OnceLock::new();

/// Main generator configuration container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Duration bounds and tolerance
    pub duration: DurationConfig,
    /// Intensity scale bounds
    pub intensity: IntensityBoundsConfig,
    /// Recovery-aware capping
    pub recovery: RecoveryCapConfig,
    /// Block composition limits
    pub composer: ComposerConfig,
    /// Equipment used when the caller supplies none
    pub default_equipment: Vec<String>,
}

/// Duration bounds applied by the normalizer and tolerance enforced by the assembler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationConfig {
    /// Shortest accepted session (minutes)
    pub min_minutes: u32,
    /// Longest accepted session (minutes)
    pub max_minutes: u32,
    /// Allowed drift of summed block time boxes from the target (percent)
    pub tolerance_percent: f64,
}

/// Intensity scale bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityBoundsConfig {
    /// Lowest intensity
    pub min: u8,
    /// Highest intensity
    pub max: u8,
}

/// Recovery-aware intensity capping policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryCapConfig {
    /// Recovery composite below which a cap is computed (0-100)
    pub cap_threshold: f64,
    /// Composite below which the reason reports high fatigue (0-100)
    pub high_fatigue_threshold: f64,
    /// Weight of the sleep component in the composite
    pub sleep_weight: f64,
    /// Weight of the training-load component in the composite
    pub load_weight: f64,
    /// Sleep duration scored as fully recovered (hours)
    pub optimal_sleep_hours: f64,
    /// Sleep duration scored as zero (hours)
    pub minimum_sleep_hours: f64,
    /// Acute:chronic load ratio scored as fully recovered
    pub balanced_load_ratio: f64,
    /// Acute:chronic load ratio scored as zero
    pub overload_ratio: f64,
    /// Reason reported below `high_fatigue_threshold`
    pub high_fatigue_reason: String,
    /// Reason reported between the two thresholds
    pub incomplete_recovery_reason: String,
}

/// Maximum number of items composed into each block kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockItemLimits {
    /// Warm-up items
    pub warmup: usize,
    /// Main-set items
    pub main: usize,
    /// Accessory items
    pub accessory: usize,
    /// Conditioning items
    pub conditioning: usize,
    /// Cool-down items
    pub cooldown: usize,
}

impl BlockItemLimits {
    /// Limit for a block key
    #[must_use]
    pub const fn for_key(&self, key: BlockKey) -> usize {
        match key {
            BlockKey::Warmup => self.warmup,
            BlockKey::Main => self.main,
            BlockKey::Accessory => self.accessory,
            BlockKey::Conditioning => self.conditioning,
            BlockKey::Cooldown => self.cooldown,
        }
    }
}

/// Block composition and prescription bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Maximum items per block kind
    pub max_items: BlockItemLimits,
    /// Sets never exceed this
    pub max_sets: u32,
    /// Reps per set never exceed this
    pub max_reps: u32,
    /// Rest never exceeds this (seconds)
    pub max_rest_sec: u32,
    /// Time estimate for one repetition (seconds)
    pub seconds_per_rep: f64,
    /// A further item is skipped when it would push the block past this share of its
    /// budget (percent)
    pub overshoot_percent: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            duration: DurationConfig::default(),
            intensity: IntensityBoundsConfig::default(),
            recovery: RecoveryCapConfig::default(),
            composer: ComposerConfig::default(),
            default_equipment: vec![equipment::BODYWEIGHT.to_owned()],
        }
    }
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            min_minutes: request_bounds::MIN_DURATION_MINUTES,
            max_minutes: request_bounds::MAX_DURATION_MINUTES,
            tolerance_percent: 10.0,
        }
    }
}

impl Default for IntensityBoundsConfig {
    fn default() -> Self {
        Self {
            min: request_bounds::MIN_INTENSITY,
            max: request_bounds::MAX_INTENSITY,
        }
    }
}

impl Default for RecoveryCapConfig {
    fn default() -> Self {
        Self {
            cap_threshold: 60.0,
            high_fatigue_threshold: 35.0,
            sleep_weight: 0.6,
            load_weight: 0.4,
            optimal_sleep_hours: 8.0,
            minimum_sleep_hours: 4.0,
            balanced_load_ratio: 1.0,
            overload_ratio: 1.8,
            high_fatigue_reason: "recovery signal indicates high fatigue".into(),
            incomplete_recovery_reason: "recovery signal indicates incomplete recovery".into(),
        }
    }
}

impl Default for BlockItemLimits {
    fn default() -> Self {
        Self {
            warmup: 4,
            main: 2,
            accessory: 3,
            conditioning: 5,
            cooldown: 3,
        }
    }
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_items: BlockItemLimits::default(),
            max_sets: safety_limits::MAX_SETS,
            max_reps: safety_limits::MAX_REPS,
            max_rest_sec: safety_limits::MAX_REST_SECONDS,
            seconds_per_rep: 3.0,
            overshoot_percent: 115.0,
        }
    }
}

impl GeneratorConfig {
    /// Process-wide configuration, loaded once; invalid overrides fall back to defaults
    #[must_use]
    pub fn global() -> &'static Self {
        GENERATOR_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load generator config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate ordering, scale and weight constraints
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        let recovery = &self.recovery;
        let composer = &self.composer;
        if ![
            self.duration.tolerance_percent,
            recovery.cap_threshold,
            recovery.high_fatigue_threshold,
            recovery.sleep_weight,
            recovery.load_weight,
            recovery.optimal_sleep_hours,
            recovery.minimum_sleep_hours,
            recovery.balanced_load_ratio,
            recovery.overload_ratio,
            composer.seconds_per_rep,
            composer.overshoot_percent,
        ]
        .iter()
        .all(|value| value.is_finite())
        {
            return Err(ConfigError::ValueOutOfRange(
                "every numeric setting must be a finite number",
            ));
        }

        if self.duration.min_minutes == 0 || self.duration.min_minutes >= self.duration.max_minutes
        {
            return Err(ConfigError::InvalidRange(
                "duration: 0 < min_minutes < max_minutes required",
            ));
        }
        if !(0.0..=50.0).contains(&self.duration.tolerance_percent) {
            return Err(ConfigError::ValueOutOfRange(
                "duration: tolerance_percent must be within 0-50",
            ));
        }

        if self.intensity.min == 0 || self.intensity.min > self.intensity.max {
            return Err(ConfigError::InvalidRange(
                "intensity: 0 < min <= max required",
            ));
        }

        if !(0.0..=100.0).contains(&recovery.cap_threshold) {
            return Err(ConfigError::ValueOutOfRange(
                "recovery: cap_threshold must be within 0-100",
            ));
        }
        if recovery.high_fatigue_threshold > recovery.cap_threshold {
            return Err(ConfigError::InvalidRange(
                "recovery: high_fatigue_threshold must be <= cap_threshold",
            ));
        }
        if !(0.0..=1.0).contains(&recovery.sleep_weight)
            || !(0.0..=1.0).contains(&recovery.load_weight)
            || (recovery.sleep_weight + recovery.load_weight - 1.0).abs() > 0.01
        {
            return Err(ConfigError::InvalidWeights(
                "recovery: sleep_weight + load_weight must sum to 1.0",
            ));
        }
        if recovery.minimum_sleep_hours >= recovery.optimal_sleep_hours {
            return Err(ConfigError::InvalidRange(
                "recovery: minimum_sleep_hours must be < optimal_sleep_hours",
            ));
        }
        if recovery.balanced_load_ratio >= recovery.overload_ratio {
            return Err(ConfigError::InvalidRange(
                "recovery: balanced_load_ratio must be < overload_ratio",
            ));
        }

        let limits = &composer.max_items;
        if [
            limits.warmup,
            limits.main,
            limits.accessory,
            limits.conditioning,
            limits.cooldown,
        ]
        .contains(&0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "composer: every block must allow at least one item",
            ));
        }
        if composer.max_sets == 0 || composer.max_reps == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "composer: max_sets and max_reps must be positive",
            ));
        }
        if composer.seconds_per_rep <= 0.0 || composer.overshoot_percent < 100.0 {
            return Err(ConfigError::ValueOutOfRange(
                "composer: seconds_per_rep > 0 and overshoot_percent >= 100 required",
            ));
        }

        if self.default_equipment.is_empty() {
            return Err(ConfigError::ValueOutOfRange(
                "default_equipment must not be empty",
            ));
        }

        Ok(())
    }

    /// Parse an environment variable into `target` when it is set
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "KINETIC_DURATION_TOLERANCE_PERCENT",
            &mut self.duration.tolerance_percent,
        )?;
        Self::apply_env_var(
            "KINETIC_RECOVERY_CAP_THRESHOLD",
            &mut self.recovery.cap_threshold,
        )?;
        Self::apply_env_var(
            "KINETIC_RECOVERY_HIGH_FATIGUE_THRESHOLD",
            &mut self.recovery.high_fatigue_threshold,
        )?;
        Self::apply_env_var(
            "KINETIC_RECOVERY_SLEEP_WEIGHT",
            &mut self.recovery.sleep_weight,
        )?;
        Self::apply_env_var(
            "KINETIC_RECOVERY_LOAD_WEIGHT",
            &mut self.recovery.load_weight,
        )?;
        Self::apply_env_var("KINETIC_COMPOSER_MAX_SETS", &mut self.composer.max_sets)?;
        Self::apply_env_var("KINETIC_COMPOSER_MAX_REPS", &mut self.composer.max_reps)?;

        if let Ok(list) = env::var("KINETIC_DEFAULT_EQUIPMENT") {
            let parsed: Vec<String> = list
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            if parsed.is_empty() {
                return Err(ConfigError::Parse(
                    "Invalid KINETIC_DEFAULT_EQUIPMENT".to_owned(),
                ));
            }
            self.default_equipment = parsed;
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_is_cached_and_valid() {
        let first = GeneratorConfig::global();
        let second = GeneratorConfig::global();

        assert!(std::ptr::eq(first, second));
        assert!(first.validate().is_ok());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_recovery_weights_must_sum_to_one() {
        let mut config = GeneratorConfig::default();
        config.recovery.sleep_weight = 0.9;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_fatigue_threshold_above_cap_threshold_is_rejected() {
        let mut config = GeneratorConfig::default();
        config.recovery.high_fatigue_threshold = 80.0;

        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
    }

    #[test]
    fn test_zero_item_limit_is_rejected() {
        let mut config = GeneratorConfig::default();
        config.composer.max_items.cooldown = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_non_finite_settings_are_rejected() {
        let mut config = GeneratorConfig::default();
        config.recovery.sleep_weight = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.recovery.high_fatigue_threshold = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.composer.seconds_per_rep = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_recovery_weight_is_rejected() {
        let mut config = GeneratorConfig::default();
        config.recovery.sleep_weight = 1.5;
        config.recovery.load_weight = -0.5;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }
}
