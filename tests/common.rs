// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, generator fixtures and an in-process router
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `kinetic_server`

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use kinetic_generator::{RawConstraints, WorkoutGenerator};
use kinetic_server::{config::ServerConfig, resources::ServerResources, server::build_router};
use serde_json::Value;
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Generator over the built-in catalog with default policy
pub fn generator() -> WorkoutGenerator {
    WorkoutGenerator::with_builtin_catalog()
}

/// A representative request for each focus, cycling equipment profiles
pub fn sample_requests() -> Vec<RawConstraints> {
    let profiles: [&[&str]; 4] = [
        &["bodyweight"],
        &["barbell", "bodyweight"],
        &["dumbbell", "kettlebell", "bodyweight"],
        &["rower", "bike", "jump-rope", "bodyweight", "dumbbell"],
    ];
    let mut requests = Vec::new();
    for (i, focus) in ["strength", "conditioning", "mixed", "endurance"]
        .into_iter()
        .enumerate()
    {
        for (j, minutes) in [10.0, 25.0, 45.0, 60.0].into_iter().enumerate() {
            let equipment = profiles[(i + j) % profiles.len()];
            requests.push(
                RawConstraints::new(focus, minutes, 3.0 + (i + j) as f64)
                    .with_equipment(equipment.iter().copied()),
            );
        }
    }
    requests
}

/// Seeds used by the property tests
pub fn seeds() -> Vec<String> {
    (0..25).map(|i| format!("seed-{i}")).collect()
}

/// Router over fresh resources with default configuration
pub fn test_router() -> Router {
    init_test_logging();
    let resources = ServerResources::new(ServerConfig::default(), generator());
    build_router(Arc::new(resources))
}

/// Send a request through the router and decode the JSON body
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// POST a JSON body
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// GET with optional user id header
pub fn get(uri: &str, user_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user_id {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::empty()).unwrap()
}
