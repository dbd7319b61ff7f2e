// ABOUTME: Core types and constants for the Kinetic workout generation service
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

#![deny(unsafe_code)]

//! # Kinetic Core
//!
//! Foundation crate providing shared types and constants for the Kinetic workout
//! generation service. This crate is designed to change infrequently, so the engine
//! and the HTTP service can evolve independently on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ValidationError`
//! - **constants**: Bounds and defaults shared by the engine and the service
//! - **models**: Requests, plans, blocks, prescriptions, movements and seeds

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`GenerationRequest`, `WorkoutPlan`, `Movement`, `Seed`, etc.)
pub mod models;
