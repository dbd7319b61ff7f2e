// ABOUTME: Property checks of the generator over many seeds and requests
// ABOUTME: Determinism, equipment containment, duration conservation, intensity monotonicity
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{generator, sample_requests, seeds};
use kinetic_core::models::{BlockKey, PrescriptionKind, Seed};
use kinetic_generator::{RawConstraints, RecoveryContext};
use std::collections::BTreeSet;

#[test]
fn test_determinism_across_requests_and_seeds() {
    common::init_test_logging();
    let generator = generator();

    for raw in sample_requests() {
        for seed in seeds().into_iter().take(5) {
            let a = generator
                .generate(&raw, &RecoveryContext::none(), Some(Seed::from(seed.as_str())))
                .unwrap();
            let b = generator
                .replay(
                    &raw,
                    &RecoveryContext::none(),
                    &Seed::from(seed.as_str()),
                    generator.version(),
                )
                .unwrap();

            assert_eq!(a.plan, b.plan, "plan differs for {raw:?} / {seed}");
            assert_eq!(a.choices, b.choices);
            assert!(b.version_mismatch.is_none());
        }
    }
}

#[test]
fn test_equipment_containment() {
    let generator = generator();

    for raw in sample_requests() {
        for seed in seeds() {
            let outcome = generator
                .generate(&raw, &RecoveryContext::none(), Some(Seed::from(seed.as_str())))
                .unwrap();
            for id in outcome.plan.movement_ids() {
                let movement = generator.catalog().get(id).unwrap();
                assert!(
                    movement.is_available_with(&outcome.request.equipment),
                    "{id} needs equipment outside {:?}",
                    outcome.request.equipment
                );
            }
        }
    }
}

#[test]
fn test_duration_conservation_within_tolerance() {
    let generator = generator();

    for raw in sample_requests() {
        for seed in seeds() {
            let outcome = generator
                .generate(&raw, &RecoveryContext::none(), Some(Seed::from(seed.as_str())))
                .unwrap();
            let target = outcome.request.target_seconds();
            let total = outcome.plan.total_target_seconds();
            let drift = f64::from(total.abs_diff(target));
            assert!(
                drift <= f64::from(target) * 0.10,
                "total {total}s vs target {target}s for {raw:?} / {seed}"
            );
        }
    }
}

#[test]
fn test_effective_intensity_never_exceeds_request() {
    let generator = generator();
    let raw = RawConstraints::new("mixed", 40.0, 8.0).with_equipment(["bodyweight", "dumbbell"]);

    for signal in (0..=100).step_by(5) {
        let outcome = generator
            .generate(
                &raw,
                &RecoveryContext::with_signal(f64::from(signal)),
                Some(Seed::from("monotone")),
            )
            .unwrap();
        assert!(outcome.plan.intensity <= 8);
    }
}

#[test]
fn test_worse_recovery_never_raises_intensity() {
    let generator = generator();
    let raw = RawConstraints::new("strength", 30.0, 9.0).with_equipment(["barbell", "bodyweight"]);

    let mut previous = 0_u8;
    for signal in (0..=100).step_by(2) {
        let outcome = generator
            .generate(
                &raw,
                &RecoveryContext::with_signal(f64::from(signal)),
                Some(Seed::from("monotone")),
            )
            .unwrap();
        assert!(
            outcome.plan.intensity >= previous,
            "signal {signal} gave {} after {previous}",
            outcome.plan.intensity
        );
        previous = outcome.plan.intensity;
    }
    assert_eq!(previous, 9);
}

#[test]
fn test_regenerate_mints_distinct_seed_and_varies_plans() {
    let generator = generator();
    let raw = RawConstraints::new("conditioning", 30.0, 7.0)
        .with_equipment(["bodyweight", "dumbbell", "kettlebell"]);
    let previous = Seed::from("first");
    let original = generator
        .generate(&raw, &RecoveryContext::none(), Some(previous.clone()))
        .unwrap();

    let mut compositions = BTreeSet::new();
    for _ in 0..10 {
        let regenerated = generator
            .regenerate(&raw, &RecoveryContext::none(), &previous)
            .unwrap();
        assert_ne!(regenerated.seed, previous);
        assert_eq!(regenerated.plan.seed, regenerated.seed);
        compositions.insert(regenerated.plan.movement_ids().collect::<Vec<_>>().join(","));
    }

    let original_ids = original.plan.movement_ids().collect::<Vec<_>>().join(",");
    assert!(compositions.iter().any(|ids| *ids != original_ids));
}

#[test]
fn test_blocks_follow_phase_order() {
    let generator = generator();

    for raw in sample_requests() {
        let outcome = generator
            .generate(&raw, &RecoveryContext::none(), Some(Seed::from("order")))
            .unwrap();
        let keys: Vec<_> = outcome.plan.blocks.iter().map(|b| b.key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted, "blocks out of order for {raw:?}");
    }
}

#[test]
fn test_block_role_decides_prescription_kind() {
    let generator = generator();
    let kits: [&[&str]; 3] = [
        &["barbell", "bodyweight"],
        &["bodyweight"],
        &["bodyweight", "dumbbell", "kettlebell"],
    ];

    for focus in ["strength", "mixed", "conditioning", "endurance"] {
        for kit in kits {
            for intensity in 1..=10 {
                let raw = RawConstraints::new(focus, 45.0, f64::from(intensity))
                    .with_equipment(kit.iter().copied());
                for seed in seeds().into_iter().take(4) {
                    let outcome = generator
                        .generate(&raw, &RecoveryContext::none(), Some(Seed::from(seed.as_str())))
                        .unwrap();
                    for block in &outcome.plan.blocks {
                        for item in &block.items {
                            let kind = item.prescription.kind();
                            match block.key {
                                BlockKey::Main => assert_eq!(
                                    kind,
                                    PrescriptionKind::Reps,
                                    "{} in main for {focus} {kit:?} @{intensity} / {seed}",
                                    item.movement_id
                                ),
                                BlockKey::Conditioning => assert!(
                                    matches!(kind, PrescriptionKind::Time | PrescriptionKind::Distance),
                                    "{} prescribed {kind:?} in conditioning for {focus} {kit:?} @{intensity} / {seed}",
                                    item.movement_id
                                ),
                                _ => {}
                            }
                        }
                    }
                }
            }
        }
    }
}
