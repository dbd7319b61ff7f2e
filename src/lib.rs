// ABOUTME: Main library entry point for the Kinetic workout generation service
// ABOUTME: HTTP boundary, configuration, logging and services around the seeded generator
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

#![deny(unsafe_code)]

//! # Kinetic Server
//!
//! HTTP service in front of the deterministic workout generator. Clients send a small
//! set of constraints and get back a structured plan plus the seed that reproduces it.
//!
//! ## Endpoints
//!
//! - `POST /api/workouts/preview` - plan plus seed, no side effects
//! - `POST /api/workouts/simulate` - plan with the decision trace
//! - `POST /api/workouts/generate` - plan persisted under an id
//! - `GET /api/workouts/:id` - a persisted plan
//! - `POST /api/workouts/regenerate` - same inputs, fresh seed
//! - `POST /api/workouts/replay` - exact seed and generator version
//! - `GET /api/suggest/today`, `POST /api/suggest/rotate` - daily suggestion
//! - `GET /health`, `GET /ready`
//!
//! ## Architecture
//!
//! - **kinetic-core**: errors, models and constants
//! - **kinetic-generator**: the seeded pipeline
//! - this crate: routes, middleware, plan store and suggestion service
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use kinetic_server::config::ServerConfig;
//! use kinetic_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::from_config(config)?);
//!     kinetic_server::server::run(resources).await
//! }
//! ```

/// Server configuration from the environment
pub mod config;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (request ids, tracing spans, CORS)
pub mod middleware;

/// Shared resources handed to route handlers
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Plan store and daily suggestions
pub mod services;

pub use kinetic_core::errors;
pub use kinetic_core::models;
