// ABOUTME: Application constants organized by domain
// ABOUTME: Request bounds, prescription safety limits, equipment names and version tags
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Constants shared by the generation engine and the HTTP service.

/// Bounds applied by the constraint normalizer
pub mod request_bounds {
    /// Shortest workout the engine composes (minutes)
    pub const MIN_DURATION_MINUTES: u32 = 10;
    /// Longest workout the engine composes (minutes)
    pub const MAX_DURATION_MINUTES: u32 = 60;
    /// Lowest intensity on the 1-10 scale
    pub const MIN_INTENSITY: u8 = 1;
    /// Highest intensity on the 1-10 scale
    pub const MAX_INTENSITY: u8 = 10;
    /// Lowest recovery composite
    pub const MIN_RECOVERY_SCORE: f64 = 0.0;
    /// Highest recovery composite
    pub const MAX_RECOVERY_SCORE: f64 = 100.0;
}

/// Upper limits no prescription may exceed regardless of intensity
pub mod safety_limits {
    /// Maximum sets for a single movement
    pub const MAX_SETS: u32 = 6;
    /// Maximum reps per set
    pub const MAX_REPS: u32 = 20;
    /// Maximum work seconds per set
    pub const MAX_SECONDS_PER_SET: u32 = 1_800;
    /// Maximum meters per set
    pub const MAX_METERS_PER_SET: u32 = 5_000;
    /// Maximum rest between sets (seconds)
    pub const MAX_REST_SECONDS: u32 = 240;
}

/// Well-known equipment identifiers
pub mod equipment {
    /// Implicit equipment of every movement with no requirements
    pub const BODYWEIGHT: &str = "bodyweight";
    /// Olympic barbell and plates
    pub const BARBELL: &str = "barbell";
    /// Dumbbells
    pub const DUMBBELL: &str = "dumbbell";
    /// Kettlebells
    pub const KETTLEBELL: &str = "kettlebell";
    /// Pull-up bar
    pub const PULLUP_BAR: &str = "pullup-bar";
    /// Rowing ergometer
    pub const ROWER: &str = "rower";
    /// Air or spin bike
    pub const BIKE: &str = "bike";
    /// Jump rope
    pub const JUMP_ROPE: &str = "jump-rope";
    /// Plyo box
    pub const BOX: &str = "box";
    /// Flat bench
    pub const BENCH: &str = "bench";
    /// Resistance band
    pub const BAND: &str = "band";
    /// Medicine ball
    pub const MEDICINE_BALL: &str = "medicine-ball";
}

/// Generator identification
pub mod generator {
    /// Tag of the current algorithm revision. Bump whenever template tables, the catalog
    /// ordering or any draw sequence changes, since seeds are interpreted per revision.
    pub const CURRENT_VERSION: &str = "kinetic-gen-1";
}

/// Service names used in structured logging
pub mod service_names {
    /// HTTP service
    pub const KINETIC_SERVER: &str = "kinetic-server";
    /// Command line client
    pub const KINETIC_CLI: &str = "kinetic-cli";
}
