// ABOUTME: Core data models for workout generation
// ABOUTME: Requests, plans, blocks, prescriptions, catalog movements and seeds
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! # Data Models
//!
//! Plain data shared by the engine and the HTTP boundary. All collections that reach
//! serialized output are ordered (`Vec` or `BTreeSet`) so that identical inputs always
//! serialize to identical bytes.

/// Workout focus (archetype)
pub mod focus;
/// Catalog movements
pub mod movement;
/// Generated plans, blocks and prescriptions
pub mod plan;
/// Canonical generation request
pub mod request;
/// Seeds and generator versions
pub mod seed;

pub use focus::Focus;
pub use movement::{Movement, MovementCategory};
pub use plan::{
    Block, BlockItem, BlockKey, IntensityCap, PlanDefect, Prescription, PrescriptionKind,
    WorkoutPlan,
};
pub use request::GenerationRequest;
pub use seed::{GeneratorVersion, Seed};
