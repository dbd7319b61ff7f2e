// ABOUTME: Route handlers for workout generation: preview, simulate, generate, regenerate, replay
// ABOUTME: Maps client request bodies onto the seeded generator and persists generated plans
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Workout routes
//!
//! Every endpoint except `generate` is side-effect free: the same body with the same
//! seed returns the same plan. Validation failures map to 400 before any seed is
//! minted.

use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::services::StoredPlan;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use kinetic_core::errors::AppError;
use kinetic_core::models::{GeneratorVersion, Seed, WorkoutPlan};
use kinetic_generator::{
    GenerationChoice, GenerationOutcome, RawConstraints, RecoveryContext, VersionMismatch,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Body of `POST /api/workouts/preview`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    /// Focus name
    #[serde(default)]
    pub focus: String,
    /// Session length in minutes
    pub duration_min: f64,
    /// Available equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Requested intensity
    pub intensity: f64,
    /// Seed to reproduce; minted when absent
    #[serde(default)]
    pub seed: Option<String>,
    /// Recovery signal or inputs
    #[serde(default)]
    pub recovery: Option<RecoveryContext>,
}

impl From<&PreviewRequest> for RawConstraints {
    fn from(body: &PreviewRequest) -> Self {
        Self::new(body.focus.clone(), body.duration_min, body.intensity)
            .with_equipment(body.equipment.iter().cloned())
    }
}

/// Response of `POST /api/workouts/preview`
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// The plan
    pub preview: WorkoutPlan,
    /// Seed that reproduces it
    pub seed: Seed,
}

/// Wizard inputs shared by simulate, generate, regenerate and replay
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInputs {
    /// Focus or archetype name
    #[serde(default)]
    pub archetype: String,
    /// Session length in minutes
    pub minutes: f64,
    /// Requested intensity
    pub target_intensity: f64,
    /// Available equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Free-form exclusions
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Location hint
    #[serde(default)]
    pub location: Option<String>,
}

impl From<&WorkoutInputs> for RawConstraints {
    fn from(inputs: &WorkoutInputs) -> Self {
        let raw = Self::new(inputs.archetype.clone(), inputs.minutes, inputs.target_intensity)
            .with_equipment(inputs.equipment.iter().cloned())
            .with_constraints(inputs.constraints.iter().cloned());
        match &inputs.location {
            Some(location) => raw.with_location(location.clone()),
            None => raw,
        }
    }
}

/// Body of `POST /api/workouts/simulate`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    /// Wizard inputs
    pub inputs: WorkoutInputs,
    /// Seed to reproduce; minted when absent
    #[serde(default)]
    pub rng_seed: Option<String>,
    /// Generator version the seed came from
    #[serde(default)]
    pub generator_version: Option<String>,
    /// Recovery signal or inputs
    #[serde(default)]
    pub recovery: Option<RecoveryContext>,
}

/// Response of `POST /api/workouts/simulate`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    /// The plan
    pub workout: WorkoutPlan,
    /// Ordered decision trace
    pub choices: Vec<GenerationChoice>,
    /// Seed that reproduces the plan
    pub seed: Seed,
    /// Effective intensity when recovery capping lowered it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capped_intensity: Option<u8>,
    /// Present when `generatorVersion` named another revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_mismatch: Option<VersionMismatch>,
}

impl From<GenerationOutcome> for SimulateResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        Self {
            capped_intensity: outcome.plan.intensity_cap.as_ref().map(|cap| cap.capped),
            workout: outcome.plan,
            choices: outcome.choices,
            seed: outcome.seed,
            version_mismatch: outcome.version_mismatch,
        }
    }
}

/// Body of `POST /api/workouts/generate`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Wizard inputs
    pub inputs: WorkoutInputs,
    /// Seed chosen by the caller, typically from a preview; minted when absent
    #[serde(default)]
    pub seed: Option<String>,
    /// Recovery signal or inputs
    #[serde(default)]
    pub recovery: Option<RecoveryContext>,
}

/// Response of `POST /api/workouts/generate` and `GET /api/workouts/:id`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlanResponse {
    /// Plan id
    pub id: Uuid,
    /// When the plan was stored
    pub created_at: DateTime<Utc>,
    /// Plan fields
    #[serde(flatten)]
    pub plan: WorkoutPlan,
}

impl From<StoredPlan> for StoredPlanResponse {
    fn from(stored: StoredPlan) -> Self {
        Self {
            id: stored.id,
            created_at: stored.created_at,
            plan: stored.plan,
        }
    }
}

/// Body of `POST /api/workouts/regenerate`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    /// Wizard inputs
    pub inputs: WorkoutInputs,
    /// Seed of the plan being replaced
    pub previous_seed: String,
    /// Recovery signal or inputs
    #[serde(default)]
    pub recovery: Option<RecoveryContext>,
}

/// Body of `POST /api/workouts/replay`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayRequest {
    /// Wizard inputs
    pub inputs: WorkoutInputs,
    /// Exact seed to rerun
    pub seed: String,
    /// Revision the seed was produced by
    pub generator_version: String,
    /// Recovery signal or inputs
    #[serde(default)]
    pub recovery: Option<RecoveryContext>,
}

/// Workout routes implementation
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts/preview", post(Self::handle_preview))
            .route("/api/workouts/simulate", post(Self::handle_simulate))
            .route("/api/workouts/generate", post(Self::handle_generate))
            .route("/api/workouts/regenerate", post(Self::handle_regenerate))
            .route("/api/workouts/replay", post(Self::handle_replay))
            .route("/api/workouts/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle POST /api/workouts/preview
    async fn handle_preview(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<PreviewRequest>,
    ) -> Result<Response, AppError> {
        let recovery = body.recovery.unwrap_or_default();
        let outcome = resources.generator.generate(
            &RawConstraints::from(&body),
            &recovery,
            body.seed.map(Seed::from),
        )?;
        Self::log_outcome("preview", &outcome);

        let response = PreviewResponse {
            preview: outcome.plan,
            seed: outcome.seed,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/workouts/simulate
    ///
    /// With both `rngSeed` and `generatorVersion` this is a replay and reports a
    /// version mismatch; otherwise it generates.
    async fn handle_simulate(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<SimulateRequest>,
    ) -> Result<Response, AppError> {
        let raw = RawConstraints::from(&body.inputs);
        let recovery = body.recovery.unwrap_or_default();
        let outcome = match (body.rng_seed, body.generator_version) {
            (Some(seed), Some(version)) => resources.generator.replay(
                &raw,
                &recovery,
                &Seed::from(seed),
                &GeneratorVersion::new(version),
            )?,
            (seed, _) => resources
                .generator
                .generate(&raw, &recovery, seed.map(Seed::from))?,
        };
        Self::log_outcome("simulate", &outcome);

        Ok((StatusCode::OK, Json(SimulateResponse::from(outcome))).into_response())
    }

    /// Handle POST /api/workouts/generate - the only call that persists
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<GenerateRequest>,
    ) -> Result<Response, AppError> {
        let recovery = body.recovery.unwrap_or_default();
        let outcome = resources.generator.generate(
            &RawConstraints::from(&body.inputs),
            &recovery,
            body.seed.map(Seed::from),
        )?;
        Self::log_outcome("generate", &outcome);

        let stored = resources.plans.insert(&outcome);
        Ok((StatusCode::CREATED, Json(StoredPlanResponse::from(stored))).into_response())
    }

    /// Handle GET /api/workouts/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let stored = Uuid::parse_str(&id)
            .ok()
            .and_then(|uuid| resources.plans.get(&uuid))
            .ok_or_else(|| AppError::not_found(format!("Workout plan {id}")))?;

        Ok((StatusCode::OK, Json(StoredPlanResponse::from(stored))).into_response())
    }

    /// Handle POST /api/workouts/regenerate
    async fn handle_regenerate(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegenerateRequest>,
    ) -> Result<Response, AppError> {
        let recovery = body.recovery.unwrap_or_default();
        let outcome = resources.generator.regenerate(
            &RawConstraints::from(&body.inputs),
            &recovery,
            &Seed::from(body.previous_seed),
        )?;
        Self::log_outcome("regenerate", &outcome);

        Ok((StatusCode::OK, Json(SimulateResponse::from(outcome))).into_response())
    }

    /// Handle POST /api/workouts/replay
    async fn handle_replay(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<ReplayRequest>,
    ) -> Result<Response, AppError> {
        let recovery = body.recovery.unwrap_or_default();
        let outcome = resources.generator.replay(
            &RawConstraints::from(&body.inputs),
            &recovery,
            &Seed::from(body.seed),
            &GeneratorVersion::new(body.generator_version),
        )?;
        Self::log_outcome("replay", &outcome);

        Ok((StatusCode::OK, Json(SimulateResponse::from(outcome))).into_response())
    }

    fn log_outcome(route: &str, outcome: &GenerationOutcome) {
        AppLogger::log_generation(
            route,
            outcome.plan.focus.as_str(),
            outcome.plan.duration_minutes,
            outcome.seed.as_str(),
            outcome.plan.defects.len(),
        );
    }
}
