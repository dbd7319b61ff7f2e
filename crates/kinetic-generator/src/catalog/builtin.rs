// ABOUTME: Built-in movement table shipped with the generator
// ABOUTME: Covers strength, conditioning, cardio and mobility across common home and gym equipment
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use kinetic_core::constants::equipment::{
    BAND, BARBELL, BENCH, BIKE, BOX, DUMBBELL, JUMP_ROPE, KETTLEBELL, MEDICINE_BALL, PULLUP_BAR,
    ROWER,
};
use kinetic_core::models::{Movement, MovementCategory};

use MovementCategory::{Cardio, Conditioning, Mobility, Strength};

fn movement(
    id: &str,
    name: &str,
    patterns: &[&str],
    equipment: &[&str],
    category: MovementCategory,
) -> Movement {
    Movement {
        id: id.to_owned(),
        name: name.to_owned(),
        patterns: patterns.iter().map(|p| (*p).to_owned()).collect(),
        required_equipment: equipment.iter().map(|e| (*e).to_owned()).collect(),
        category,
    }
}

/// Every built-in movement. Bodyweight movements list no equipment.
pub(super) fn movements() -> Vec<Movement> {
    vec![
        // Barbell strength
        movement("back-squat", "Back Squat", &["squat", "compound"], &[BARBELL], Strength),
        movement("front-squat", "Front Squat", &["squat", "compound"], &[BARBELL], Strength),
        movement("deadlift", "Deadlift", &["hinge", "compound"], &[BARBELL], Strength),
        movement(
            "romanian-deadlift",
            "Romanian Deadlift",
            &["hinge", "compound"],
            &[BARBELL],
            Strength,
        ),
        movement(
            "bench-press",
            "Bench Press",
            &["push", "compound"],
            &[BARBELL, BENCH],
            Strength,
        ),
        movement("overhead-press", "Overhead Press", &["push", "compound"], &[BARBELL], Strength),
        movement("barbell-row", "Barbell Row", &["pull", "compound"], &[BARBELL], Strength),
        movement("hip-thrust", "Barbell Hip Thrust", &["hinge"], &[BARBELL, BENCH], Strength),
        // Dumbbell and kettlebell strength
        movement("goblet-squat", "Goblet Squat", &["squat", "compound"], &[DUMBBELL], Strength),
        movement(
            "db-bench-press",
            "Dumbbell Bench Press",
            &["push", "compound"],
            &[DUMBBELL, BENCH],
            Strength,
        ),
        movement("db-row", "Single-Arm Dumbbell Row", &["pull"], &[DUMBBELL], Strength),
        movement(
            "db-shoulder-press",
            "Dumbbell Shoulder Press",
            &["push", "compound"],
            &[DUMBBELL],
            Strength,
        ),
        movement("db-reverse-lunge", "Dumbbell Reverse Lunge", &["lunge"], &[DUMBBELL], Strength),
        movement("db-curl", "Dumbbell Curl", &["pull", "isolation"], &[DUMBBELL], Strength),
        movement("kb-deadlift", "Kettlebell Deadlift", &["hinge", "compound"], &[KETTLEBELL], Strength),
        movement("kb-goblet-squat", "Kettlebell Goblet Squat", &["squat"], &[KETTLEBELL], Strength),
        movement("pull-up", "Pull-up", &["pull", "compound"], &[PULLUP_BAR], Strength),
        movement("band-pull-apart", "Band Pull-Apart", &["pull", "isolation"], &[BAND], Strength),
        movement("bench-dip", "Bench Dip", &["push", "isolation"], &[BENCH], Strength),
        // Bodyweight strength
        movement("push-up", "Push-up", &["push", "compound"], &[], Strength),
        movement("air-squat", "Air Squat", &["squat"], &[], Strength),
        movement(
            "single-leg-glute-bridge",
            "Single-Leg Glute Bridge",
            &["hinge"],
            &[],
            Strength,
        ),
        movement("walking-lunge", "Walking Lunge", &["lunge"], &[], Strength),
        movement(
            "split-squat",
            "Bulgarian Split Squat",
            &["lunge", "squat"],
            &[],
            Strength,
        ),
        movement("pike-push-up", "Pike Push-up", &["push"], &[], Strength),
        // Core and carries
        movement("plank", "Plank", &["core", "isometric"], &[], Strength),
        movement("hollow-hold", "Hollow Hold", &["core", "isometric"], &[], Strength),
        movement("dead-bug", "Dead Bug", &["core"], &[], Strength),
        movement("farmer-carry", "Farmer Carry", &["carry"], &[DUMBBELL], Strength),
        movement("suitcase-carry", "Kettlebell Suitcase Carry", &["carry", "core"], &[KETTLEBELL], Strength),
        // Conditioning
        movement("burpee", "Burpee", &["jump", "push"], &[], Conditioning),
        movement("jumping-jack", "Jumping Jack", &["jump", "locomotion"], &[], Conditioning),
        movement("mountain-climber", "Mountain Climber", &["core", "locomotion"], &[], Conditioning),
        movement("squat-jump", "Squat Jump", &["jump", "squat"], &[], Conditioning),
        movement("kb-swing", "Kettlebell Swing", &["hinge"], &[KETTLEBELL], Conditioning),
        movement("db-thruster", "Dumbbell Thruster", &["squat", "push"], &[DUMBBELL], Conditioning),
        movement("db-snatch", "Dumbbell Snatch", &["hinge", "push"], &[DUMBBELL], Conditioning),
        movement("box-jump", "Box Jump", &["jump"], &[BOX], Conditioning),
        movement("wall-ball", "Wall Ball", &["squat", "push"], &[MEDICINE_BALL], Conditioning),
        movement("jump-rope", "Jump Rope", &["jump", "locomotion"], &[JUMP_ROPE], Conditioning),
        movement("thruster", "Barbell Thruster", &["squat", "push"], &[BARBELL], Conditioning),
        // Monostructural cardio
        movement("run", "Run", &["run", "locomotion"], &[], Cardio),
        movement("shuttle-run", "Shuttle Run", &["run", "locomotion"], &[], Cardio),
        movement("row", "Row", &["row", "locomotion"], &[ROWER], Cardio),
        movement("bike", "Bike", &["bike", "locomotion"], &[BIKE], Cardio),
        // Mobility and recovery
        movement(
            "worlds-greatest-stretch",
            "World's Greatest Stretch",
            &["mobility", "lunge"],
            &[],
            Mobility,
        ),
        movement("cat-cow", "Cat-Cow", &["mobility"], &[], Mobility),
        movement("hip-circle", "Hip Circles", &["mobility", "activation"], &[], Mobility),
        movement("arm-circle", "Arm Circles", &["mobility", "activation"], &[], Mobility),
        movement("inchworm", "Inchworm", &["mobility", "activation", "core"], &[], Mobility),
        movement("glute-bridge", "Glute Bridge", &["activation", "hinge"], &[], Mobility),
        movement("band-dislocate", "Band Dislocate", &["mobility", "activation"], &[BAND], Mobility),
        movement("couch-stretch", "Couch Stretch", &["stretch", "mobility"], &[], Mobility),
        movement("childs-pose", "Child's Pose", &["stretch"], &[], Mobility),
        movement("pigeon-stretch", "Pigeon Stretch", &["stretch", "mobility"], &[], Mobility),
        movement("hamstring-stretch", "Standing Hamstring Stretch", &["stretch"], &[], Mobility),
    ]
}
