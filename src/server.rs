// ABOUTME: HTTP server assembly for the Kinetic service
// ABOUTME: Merges route groups, applies tracing, request id and CORS layers, and serves
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use crate::middleware::{create_request_span, setup_cors, MakeRequestId};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, SuggestRoutes, WorkoutRoutes};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build the complete router with middleware
///
/// Layer order, outermost first: request id assignment, request span, request id
/// propagation to the response, CORS.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .merge(SuggestRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

/// Bind the configured address and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = resources.config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("HTTP server listening on http://{}", address);

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
