// ABOUTME: Output formatting helpers for kinetic-cli
// ABOUTME: Readable renderings of plans, decision traces and catalog listings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use kinetic_core::models::{Movement, WorkoutPlan};
use kinetic_generator::{GenerationChoice, VersionMismatch};

/// Print a plan block by block
pub fn print_plan(plan: &WorkoutPlan) {
    println!("\n{}", plan.title);
    println!("{}", "=".repeat(60));
    println!("{}", plan.summary);
    println!(
        "Seed: {}   Version: {}",
        plan.seed, plan.generator_version
    );
    if let Some(cap) = &plan.intensity_cap {
        println!(
            "Intensity capped {} -> {}: {}",
            cap.original, cap.capped, cap.reason
        );
    }

    for (index, block) in plan.blocks.iter().enumerate() {
        let minutes = f64::from(block.target_seconds) / 60.0;
        println!("\n{}. {} ({minutes:.1} min)", index + 1, block.title);
        if let Some(title) = &block.workout_title {
            println!("   {title}");
        }
        if block.is_empty() {
            println!("   (no movement available - regenerate or relax equipment)");
        }
        for item in &block.items {
            println!("   - {:<28} {}", item.name, item.prescription.describe());
        }
        if let Some(cues) = &block.coaching_cues {
            println!("   Cues: {cues}");
        }
    }

    println!("\n{}", plan.coaching_notes);
}

/// Print the decision trace
pub fn print_choices(choices: &[GenerationChoice]) {
    println!("\nDecision trace:");
    for choice in choices {
        println!("   [{:>3}] {:?}: {}", choice.draw, choice.step, choice.detail);
    }
}

/// Warn that a replay ran under another generator version
pub fn print_version_mismatch(mismatch: &VersionMismatch) {
    println!(
        "\nWARNING seed was produced by {}, interpreted by {}; this is a new plan",
        mismatch.requested, mismatch.used
    );
}

/// Print catalog movements one per line
pub fn print_movements(movements: &[&Movement]) {
    for movement in movements {
        let category = format!("{:?}", movement.category).to_lowercase();
        let equipment: Vec<&str> = movement.effective_equipment().into_iter().collect();
        println!(
            "{:<26} {:<14} {}",
            movement.id,
            category,
            equipment.join(", ")
        );
    }
    println!("\n{} movement(s)", movements.len());
}
