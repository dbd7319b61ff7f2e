// ABOUTME: Recovery-aware intensity capper lowering requested intensity when recovery is poor
// ABOUTME: Stateless and draw-free; folds sleep and training load into a 0-100 recovery composite
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Recovery-Aware Intensity Capper
//!
//! The cap curve maps a recovery composite `s` (0-100) onto a ceiling:
//!
//! ```text
//! s >= cap_threshold  ->  no cap
//! otherwise           ->  ceiling = max(1, floor(10 * s / cap_threshold))
//! ```
//!
//! The ceiling is non-increasing as recovery worsens and never below 1. A cap is applied
//! only when the ceiling is below the requested intensity, so the effective intensity is
//! never above the request. The capper keeps no memory between calls: a caller who
//! overrides the cap simply asks again with `override_cap` set.

use crate::config::RecoveryCapConfig;
use kinetic_core::constants::request_bounds::{
    MAX_INTENSITY, MAX_RECOVERY_SCORE, MIN_INTENSITY, MIN_RECOVERY_SCORE,
};
use kinetic_core::errors::ValidationError;
use kinetic_core::models::IntensityCap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Raw recovery indicators that can be folded into the composite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryInputs {
    /// Hours slept last night
    pub sleep_hours: f64,
    /// Acute (7 day) to chronic (28 day) training load ratio
    pub acute_chronic_ratio: f64,
}

/// Recovery information supplied with one generation call
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryContext {
    /// Precomputed composite (0-100); wins over `inputs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<f64>,
    /// Raw indicators used when no composite is supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<RecoveryInputs>,
    /// Train at the requested intensity even if recovery suggests a cap
    #[serde(default)]
    pub override_cap: bool,
}

impl RecoveryContext {
    /// No recovery information: intensity is never capped
    #[must_use]
    pub const fn none() -> Self {
        Self {
            signal: None,
            inputs: None,
            override_cap: false,
        }
    }

    /// Context carrying a precomputed composite
    #[must_use]
    pub const fn with_signal(signal: f64) -> Self {
        Self {
            signal: Some(signal),
            inputs: None,
            override_cap: false,
        }
    }

    /// Context folding raw indicators into the composite
    #[must_use]
    pub const fn with_inputs(inputs: RecoveryInputs) -> Self {
        Self {
            signal: None,
            inputs: Some(inputs),
            override_cap: false,
        }
    }

    /// Same context, asking to ignore any cap
    #[must_use]
    pub const fn overridden(mut self) -> Self {
        self.override_cap = true;
        self
    }

    /// Resolve the composite, if any
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonFiniteField` when the signal or an input is NaN or
    /// infinite
    pub fn composite(&self, config: &RecoveryCapConfig) -> Result<Option<f64>, ValidationError> {
        if let Some(signal) = self.signal {
            if !signal.is_finite() {
                return Err(ValidationError::non_finite("recoverySignal"));
            }
            return Ok(Some(signal.clamp(MIN_RECOVERY_SCORE, MAX_RECOVERY_SCORE)));
        }
        self.inputs
            .map(|inputs| recovery_composite(&inputs, config))
            .transpose()
    }
}

/// Fold sleep and training load into a 0-100 composite
///
/// # Errors
///
/// Returns `ValidationError::NonFiniteField` for NaN or infinite inputs
pub fn recovery_composite(
    inputs: &RecoveryInputs,
    config: &RecoveryCapConfig,
) -> Result<f64, ValidationError> {
    if !inputs.sleep_hours.is_finite() {
        return Err(ValidationError::non_finite("sleepHours"));
    }
    if !inputs.acute_chronic_ratio.is_finite() {
        return Err(ValidationError::non_finite("acuteChronicRatio"));
    }

    let sleep_span = config.optimal_sleep_hours - config.minimum_sleep_hours;
    let sleep_score =
        ((inputs.sleep_hours - config.minimum_sleep_hours) / sleep_span).clamp(0.0, 1.0);

    let load_span = config.overload_ratio - config.balanced_load_ratio;
    let load_score =
        (1.0 - (inputs.acute_chronic_ratio - config.balanced_load_ratio) / load_span)
            .clamp(0.0, 1.0);

    let composite =
        (config.sleep_weight * sleep_score + config.load_weight * load_score) * MAX_RECOVERY_SCORE;
    Ok(composite.clamp(MIN_RECOVERY_SCORE, MAX_RECOVERY_SCORE))
}

/// Outcome of capping one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapDecision {
    /// Intensity the pipeline uses
    pub effective: u8,
    /// Applied cap, if recovery lowered the intensity
    pub cap: Option<IntensityCap>,
    /// Cap the caller chose to ignore via `override_cap`
    pub overridden: Option<IntensityCap>,
}

impl CapDecision {
    const fn uncapped(requested: u8) -> Self {
        Self {
            effective: requested,
            cap: None,
            overridden: None,
        }
    }
}

/// Ceiling implied by a composite, or `None` when recovery is good enough
#[must_use]
pub fn ceiling_for(signal: f64, config: &RecoveryCapConfig) -> Option<u8> {
    let signal = signal.clamp(MIN_RECOVERY_SCORE, MAX_RECOVERY_SCORE);
    if signal >= config.cap_threshold {
        return None;
    }
    let scaled = (f64::from(MAX_INTENSITY) * signal / config.cap_threshold).floor();
    Some((scaled as u8).clamp(MIN_INTENSITY, MAX_INTENSITY))
}

/// Apply the recovery cap to a requested intensity
///
/// # Errors
///
/// Returns `ValidationError::NonFiniteField` when the recovery context carries a
/// non-finite value
pub fn cap_intensity(
    requested: u8,
    recovery: &RecoveryContext,
    config: &RecoveryCapConfig,
) -> Result<CapDecision, ValidationError> {
    let Some(signal) = recovery.composite(config)? else {
        return Ok(CapDecision::uncapped(requested));
    };
    let Some(ceiling) = ceiling_for(signal, config) else {
        debug!(signal, requested, "recovery above cap threshold");
        return Ok(CapDecision::uncapped(requested));
    };
    if ceiling >= requested {
        return Ok(CapDecision::uncapped(requested));
    }

    let reason = if signal < config.high_fatigue_threshold {
        config.high_fatigue_reason.clone()
    } else {
        config.incomplete_recovery_reason.clone()
    };
    let cap = IntensityCap {
        original: requested,
        capped: ceiling,
        reason,
    };

    if recovery.override_cap {
        debug!(signal, requested, ceiling, "intensity cap overridden by caller");
        return Ok(CapDecision {
            effective: requested,
            cap: None,
            overridden: Some(cap),
        });
    }

    warn!(signal, requested, ceiling, "intensity capped for recovery");
    Ok(CapDecision {
        effective: ceiling,
        cap: Some(cap),
        overridden: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RecoveryCapConfig {
        RecoveryCapConfig::default()
    }

    #[test]
    fn test_no_signal_means_no_cap() {
        let decision = cap_intensity(9, &RecoveryContext::none(), &config()).unwrap();

        assert_eq!(decision.effective, 9);
        assert!(decision.cap.is_none());
    }

    #[test]
    fn test_low_recovery_caps_with_reason() {
        let decision = cap_intensity(9, &RecoveryContext::with_signal(20.0), &config()).unwrap();

        assert!(decision.effective < 9);
        let cap = decision.cap.unwrap();
        assert_eq!(cap.original, 9);
        assert_eq!(cap.capped, decision.effective);
        assert!(cap.reason.contains("high fatigue"));
    }

    #[test]
    fn test_moderate_recovery_reports_incomplete_recovery() {
        let decision = cap_intensity(10, &RecoveryContext::with_signal(45.0), &config()).unwrap();

        let cap = decision.cap.unwrap();
        assert_eq!(cap.capped, 7);
        assert!(cap.reason.contains("incomplete recovery"));
    }

    #[test]
    fn test_good_recovery_is_uncapped() {
        let decision = cap_intensity(10, &RecoveryContext::with_signal(85.0), &config()).unwrap();
        assert_eq!(decision.effective, 10);
        assert!(decision.cap.is_none());
    }

    #[test]
    fn test_ceiling_at_or_above_request_is_not_a_cap() {
        let decision = cap_intensity(3, &RecoveryContext::with_signal(40.0), &config()).unwrap();
        assert_eq!(decision.effective, 3);
        assert!(decision.cap.is_none());
    }

    #[test]
    fn test_ceiling_is_monotonic_and_floored() {
        let config = config();
        let mut previous = u8::MAX;
        for signal in (0..=100).rev() {
            let ceiling = ceiling_for(f64::from(signal), &config).unwrap_or(MAX_INTENSITY);
            assert!(ceiling <= previous);
            assert!(ceiling >= MIN_INTENSITY);
            previous = ceiling;
        }
        assert_eq!(ceiling_for(0.0, &config), Some(1));
    }

    #[test]
    fn test_worse_recovery_never_raises_intensity() {
        let config = config();
        for requested in 1..=10 {
            for signal in 0..100 {
                let better =
                    cap_intensity(requested, &RecoveryContext::with_signal(f64::from(signal + 1)), &config)
                        .unwrap();
                let worse =
                    cap_intensity(requested, &RecoveryContext::with_signal(f64::from(signal)), &config)
                        .unwrap();
                assert!(worse.effective <= better.effective);
                assert!(better.effective <= requested);
            }
        }
    }

    #[test]
    fn test_override_honors_original_intensity() {
        let context = RecoveryContext::with_signal(10.0).overridden();
        let decision = cap_intensity(8, &context, &config()).unwrap();

        assert_eq!(decision.effective, 8);
        assert!(decision.cap.is_none());
        assert_eq!(decision.overridden.unwrap().capped, 1);

        let again = cap_intensity(8, &RecoveryContext::with_signal(10.0), &config()).unwrap();
        assert_eq!(again.effective, 1);
    }

    #[test]
    fn test_out_of_range_signal_is_clamped() {
        let decision = cap_intensity(9, &RecoveryContext::with_signal(-50.0), &config()).unwrap();
        assert_eq!(decision.effective, 1);

        let decision = cap_intensity(9, &RecoveryContext::with_signal(400.0), &config()).unwrap();
        assert_eq!(decision.effective, 9);
    }

    #[test]
    fn test_non_finite_signal_is_rejected() {
        let result = cap_intensity(5, &RecoveryContext::with_signal(f64::NAN), &config());
        assert_eq!(result, Err(ValidationError::non_finite("recoverySignal")));
    }

    #[test]
    fn test_composite_from_inputs() {
        let config = config();
        let rested = RecoveryInputs {
            sleep_hours: 8.5,
            acute_chronic_ratio: 0.9,
        };
        let wrecked = RecoveryInputs {
            sleep_hours: 3.0,
            acute_chronic_ratio: 2.2,
        };

        assert!((recovery_composite(&rested, &config).unwrap() - 100.0).abs() < 1e-9);
        assert!(recovery_composite(&wrecked, &config).unwrap().abs() < 1e-9);

        let decision =
            cap_intensity(9, &RecoveryContext::with_inputs(wrecked), &config).unwrap();
        assert_eq!(decision.effective, 1);
    }

    #[test]
    fn test_signal_wins_over_inputs() {
        let context = RecoveryContext {
            signal: Some(90.0),
            inputs: Some(RecoveryInputs {
                sleep_hours: 2.0,
                acute_chronic_ratio: 3.0,
            }),
            override_cap: false,
        };

        assert_eq!(context.composite(&config()).unwrap(), Some(90.0));
    }
}
