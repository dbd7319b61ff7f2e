// ABOUTME: Domain service layer for state that lives beside the stateless generator
// ABOUTME: In-memory plan persistence and per-user daily suggestions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Domain service layer
//!
//! The generator itself is a pure function. The services here hold the little state
//! the HTTP boundary needs: plans persisted by `generate`, and each user's rotation
//! offset for daily suggestions.

/// Persisted plans keyed by id
pub mod plan_store;

/// Deterministic per-user daily suggestions
pub mod suggestions;

pub use plan_store::{PlanStore, StoredPlan};
pub use suggestions::{DailySuggestion, SuggestedConfig, SuggestionService};
