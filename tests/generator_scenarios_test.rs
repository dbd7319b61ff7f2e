// ABOUTME: Scenario tests for the seeded generator pipeline
// ABOUTME: Basic strength, empty-equipment defect, capped intensity, replay and validation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::generator;
use kinetic_core::errors::ValidationError;
use kinetic_core::models::{
    BlockKey, GeneratorVersion, PlanDefect, PrescriptionKind, Seed,
};
use kinetic_generator::{ChoiceStep, RawConstraints, RecoveryContext, RecoveryInputs};

#[test]
fn test_basic_strength_without_cap() {
    common::init_test_logging();
    let generator = generator();
    let raw = RawConstraints::new("strength", 30.0, 6.0).with_equipment(["barbell", "bodyweight"]);

    let outcome = generator
        .generate(&raw, &RecoveryContext::none(), Some(Seed::from("abc")))
        .unwrap();
    let plan = &outcome.plan;

    assert_eq!(plan.intensity, 6);
    assert!(plan.intensity_cap.is_none());
    assert!(!plan.has_defects());
    assert_eq!(outcome.seed, Seed::from("abc"));

    let main_blocks: Vec<_> = plan
        .blocks
        .iter()
        .filter(|b| b.key == BlockKey::Main)
        .collect();
    assert!(!main_blocks.is_empty());
    assert!(main_blocks.iter().any(|block| !block.items.is_empty()
        && block
            .items
            .iter()
            .all(|item| item.prescription.kind() == PrescriptionKind::Reps)));

    for id in plan.movement_ids() {
        let movement = generator.catalog().get(id).unwrap();
        for needed in movement.effective_equipment() {
            assert!(["barbell", "bodyweight"].contains(&needed), "{id} needs {needed}");
        }
    }
}

#[test]
fn test_unknown_equipment_surfaces_empty_block_defect() {
    let generator = generator();
    let raw = RawConstraints::new("strength", 30.0, 6.0)
        .with_equipment(["specialized-machine-not-in-catalog"]);

    let outcome = generator
        .generate(&raw, &RecoveryContext::none(), Some(Seed::from("abc")))
        .unwrap();
    let plan = &outcome.plan;

    assert!(plan.blocks.iter().any(|b| b.items.is_empty()));
    assert!(plan.has_defects());
    for defect in &plan.defects {
        let PlanDefect::EmptyBlock { block_index, key } = defect;
        assert!(plan.blocks[*block_index].items.is_empty());
        assert_eq!(plan.blocks[*block_index].key, *key);
    }
    assert!(plan.coaching_notes.contains("regenerate"));
    assert_eq!(plan.total_target_seconds(), 30 * 60);
}

#[test]
fn test_low_recovery_caps_intensity_with_reason() {
    let generator = generator();
    let raw = RawConstraints::new("conditioning", 30.0, 9.0).with_equipment(["bodyweight"]);

    let outcome = generator
        .generate(&raw, &RecoveryContext::with_signal(20.0), Some(Seed::from("tired")))
        .unwrap();
    let plan = &outcome.plan;

    assert!(plan.intensity < 9);
    let cap = plan.intensity_cap.as_ref().unwrap();
    assert_eq!(cap.original, 9);
    assert_eq!(cap.capped, plan.intensity);
    assert!(!cap.reason.is_empty());
    assert!(plan.coaching_notes.contains(&cap.reason));
    assert_eq!(outcome.choices[0].step, ChoiceStep::Intensity);
}

#[test]
fn test_override_restores_requested_intensity() {
    let generator = generator();
    let raw = RawConstraints::new("conditioning", 30.0, 9.0).with_equipment(["bodyweight"]);

    let outcome = generator
        .generate(
            &raw,
            &RecoveryContext::with_signal(20.0).overridden(),
            Some(Seed::from("tired")),
        )
        .unwrap();

    assert_eq!(outcome.plan.intensity, 9);
    assert!(outcome.plan.intensity_cap.is_none());
}

#[test]
fn test_recovery_inputs_fold_into_cap() {
    let generator = generator();
    let raw = RawConstraints::new("mixed", 30.0, 9.0).with_equipment(["bodyweight"]);
    let exhausted = RecoveryContext::with_inputs(RecoveryInputs {
        sleep_hours: 4.0,
        acute_chronic_ratio: 1.8,
    });

    let outcome = generator
        .generate(&raw, &exhausted, Some(Seed::from("inputs")))
        .unwrap();

    assert!(outcome.plan.intensity < 9);
    assert!(outcome.plan.intensity >= 1);
}

#[test]
fn test_replay_matches_original_generation() {
    let generator = generator();
    let raw = RawConstraints::new("mixed", 45.0, 7.0)
        .with_equipment(["dumbbell", "kettlebell", "bodyweight"]);

    let first = generator
        .generate(&raw, &RecoveryContext::none(), None)
        .unwrap();
    let replayed = generator
        .replay(
            &raw,
            &RecoveryContext::none(),
            &first.seed,
            &first.plan.generator_version,
        )
        .unwrap();

    assert_eq!(replayed.plan, first.plan);
    assert_eq!(
        serde_json::to_string(&replayed.plan).unwrap(),
        serde_json::to_string(&first.plan).unwrap()
    );
}

#[test]
fn test_replay_with_foreign_version_reports_mismatch() {
    let generator = generator();
    let raw = RawConstraints::new("endurance", 40.0, 5.0).with_equipment(["rower", "bodyweight"]);

    let outcome = generator
        .replay(
            &raw,
            &RecoveryContext::none(),
            &Seed::from("old"),
            &GeneratorVersion::new("kinetic-gen-0"),
        )
        .unwrap();

    let mismatch = outcome.version_mismatch.unwrap();
    assert_eq!(mismatch.requested, GeneratorVersion::new("kinetic-gen-0"));
    assert_eq!(&mismatch.used, generator.version());
    assert_eq!(&outcome.plan.generator_version, generator.version());
}

#[test]
fn test_exclusions_remove_matching_movements() {
    let generator = generator();
    let raw = RawConstraints::new("conditioning", 30.0, 7.0)
        .with_equipment(["bodyweight", "jump-rope", "box"])
        .with_constraints(["no jumping", "no burpees"]);

    for seed in ["x1", "x2", "x3", "x4", "x5"] {
        let outcome = generator
            .generate(&raw, &RecoveryContext::none(), Some(Seed::from(seed)))
            .unwrap();
        for id in outcome.plan.movement_ids() {
            let movement = generator.catalog().get(id).unwrap();
            assert!(!movement.id.contains("jump"), "{id} survived 'no jumping'");
            assert!(!movement.id.contains("burpee"), "{id} survived 'no burpees'");
            assert!(!movement.patterns.contains("jump"));
        }
    }
}

#[test]
fn test_location_supplies_equipment_when_none_listed() {
    let generator = generator();
    let raw = RawConstraints::new("strength", 30.0, 6.0).with_location("home");

    let outcome = generator
        .generate(&raw, &RecoveryContext::none(), Some(Seed::from("home")))
        .unwrap();

    assert!(outcome.request.equipment.contains("dumbbell"));
    assert!(!outcome.request.equipment.contains("barbell"));
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let generator = generator();
    let raw = RawConstraints::new("strength", 500.0, -3.0);

    let outcome = generator
        .generate(&raw, &RecoveryContext::none(), Some(Seed::from("clamp")))
        .unwrap();

    assert_eq!(outcome.request.duration_minutes, 60);
    assert_eq!(outcome.request.intensity, 1);
    assert!(!outcome.request.equipment.is_empty());
}

#[test]
fn test_structural_errors_are_rejected() {
    let generator = generator();

    let unknown = generator.generate(
        &RawConstraints::new("yoga", 30.0, 5.0),
        &RecoveryContext::none(),
        None,
    );
    assert!(matches!(unknown, Err(ValidationError::UnknownFocus { .. })));

    let nan = generator.generate(
        &RawConstraints::new("strength", f64::NAN, 5.0),
        &RecoveryContext::none(),
        None,
    );
    assert!(matches!(nan, Err(ValidationError::NonFiniteField { .. })));

    let bad_signal = generator.generate(
        &RawConstraints::new("strength", 30.0, 5.0),
        &RecoveryContext::with_signal(f64::INFINITY),
        None,
    );
    assert!(matches!(bad_signal, Err(ValidationError::NonFiniteField { .. })));
}
