// ABOUTME: Route handlers for daily workout suggestions
// ABOUTME: GET today and POST rotate, keyed by the x-user-id header and the UTC date
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Suggestion routes
//!
//! User identity comes from the `x-user-id` header set by the authenticating proxy in
//! front of this service.

use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::services::DailySuggestion;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use kinetic_core::errors::{AppError, ErrorCode};
use std::sync::Arc;

/// Header identifying the caller
pub const USER_ID_HEADER: &str = "x-user-id";

/// Suggestion routes implementation
pub struct SuggestRoutes;

impl SuggestRoutes {
    /// Create all suggestion routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/suggest/today", get(Self::handle_today))
            .route("/api/suggest/rotate", post(Self::handle_rotate))
            .with_state(resources)
    }

    fn user_id(headers: &HeaderMap) -> Result<String, AppError> {
        headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::MissingRequiredField,
                    format!("Missing {USER_ID_HEADER} header"),
                )
            })
    }

    fn respond(user_id: &str, suggestion: &DailySuggestion) -> Response {
        AppLogger::log_suggestion(
            user_id,
            &suggestion.date.to_string(),
            suggestion.rotation,
        );
        (StatusCode::OK, Json(suggestion)).into_response()
    }

    /// Handle GET /api/suggest/today
    async fn handle_today(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = Self::user_id(&headers)?;
        let suggestion = resources
            .suggestions
            .today(&user_id, Utc::now().date_naive());
        Ok(Self::respond(&user_id, &suggestion))
    }

    /// Handle POST /api/suggest/rotate
    async fn handle_rotate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = Self::user_id(&headers)?;
        let suggestion = resources
            .suggestions
            .rotate(&user_id, Utc::now().date_naive());
        Ok(Self::respond(&user_id, &suggestion))
    }
}
