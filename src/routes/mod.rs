// ABOUTME: Route module organization for the Kinetic HTTP endpoints
// ABOUTME: Health checks, workout generation endpoints and daily suggestions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Route module for the Kinetic server
//!
//! Each domain module contains only route definitions and thin handler functions that
//! delegate to the generator or the service layer.

/// Health check routes
pub mod health;
/// Daily suggestion routes
pub mod suggest;
/// Workout preview, simulate, generate, regenerate and replay routes
pub mod workouts;

pub use health::HealthRoutes;
pub use suggest::SuggestRoutes;
pub use workouts::WorkoutRoutes;
