// ABOUTME: Deterministic seeded workout generation engine
// ABOUTME: Pipeline of normalizer, capper, template selector, composer, assembler and envelope
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

#![deny(unsafe_code)]

//! # Kinetic Generator
//!
//! Turns a small set of constraints (focus, duration, equipment, intensity, optional
//! seed) into a structured, reproducible workout plan.
//!
//! ```text
//! normalizer -> intensity -> templates -> composer (per slot) -> assembler -> envelope
//! ```
//!
//! The [`rng::SeededRng`] is threaded through every stochastic step, so a run is a pure
//! function of the request, the seed, the generator version, the catalog snapshot and
//! the configuration.
//!
//! ```rust,no_run
//! use kinetic_generator::{RawConstraints, RecoveryContext, WorkoutGenerator};
//! use kinetic_core::models::Seed;
//!
//! let generator = WorkoutGenerator::with_builtin_catalog();
//! let raw = RawConstraints::new("strength", 30.0, 6.0).with_equipment(["barbell", "bodyweight"]);
//! let outcome = generator
//!     .generate(&raw, &RecoveryContext::none(), Some(Seed::from("abc")))
//!     .unwrap();
//! println!("{}", outcome.plan.summary);
//! ```

/// Plan assembly, summary and duration tolerance
pub mod assembler;
/// Read-only movement catalog snapshots
pub mod catalog;
/// Slot filling and prescriptions
pub mod composer;
/// Generator configuration
pub mod config;
/// Generate, regenerate and replay
pub mod envelope;
/// Recovery-aware intensity capping
pub mod intensity;
/// Constraint normalization
pub mod normalizer;
/// Seeded deterministic RNG
pub mod rng;
/// Template tables and selection
pub mod templates;

pub use catalog::MovementCatalog;
pub use config::{ConfigError, GeneratorConfig};
pub use envelope::{
    ChoiceStep, GenerationChoice, GenerationOutcome, VersionMismatch, WorkoutGenerator,
};
pub use intensity::{RecoveryContext, RecoveryInputs};
pub use normalizer::{Location, RawConstraints};
pub use rng::{mint_seed, SeededRng};
