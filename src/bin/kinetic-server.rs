// ABOUTME: HTTP server binary for the Kinetic workout generation service
// ABOUTME: Loads configuration, initializes logging and serves the generator endpoints
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! # Kinetic Server Binary
//!
//! Starts the HTTP service with the built-in movement catalog or the snapshot named by
//! `KINETIC_CATALOG_PATH`.

use anyhow::Result;
use clap::Parser;
use kinetic_server::{config::ServerConfig, logging, resources::ServerResources, server};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "kinetic-server")]
#[command(about = "Kinetic - deterministic seeded workout generation API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Movement catalog snapshot (JSON) replacing the built-in catalog
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(catalog) = args.catalog {
        config.catalog_path = Some(catalog);
    }

    info!("Starting Kinetic workout generation service");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config)?);
    info!(
        "Generator {} ready with {} movements",
        resources.generator.version(),
        resources.generator.catalog().len()
    );

    display_available_endpoints(&resources.config.host, resources.config.http_port);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
fn display_available_endpoints(host: &str, port: u16) {
    info!("=== Available API Endpoints ===");
    display_workout_endpoints(host, port);
    display_suggest_endpoints(host, port);
    display_health_endpoints(host, port);
    info!("=== End of Endpoint List ===");
}

#[allow(clippy::cognitive_complexity)]
fn display_workout_endpoints(host: &str, port: u16) {
    info!("Workouts:");
    info!("   Preview:           POST http://{host}:{port}/api/workouts/preview");
    info!("   Simulate:          POST http://{host}:{port}/api/workouts/simulate");
    info!("   Generate:          POST http://{host}:{port}/api/workouts/generate");
    info!("   Get Plan:          GET  http://{host}:{port}/api/workouts/{{id}}");
    info!("   Regenerate:        POST http://{host}:{port}/api/workouts/regenerate");
    info!("   Replay:            POST http://{host}:{port}/api/workouts/replay");
}

#[allow(clippy::cognitive_complexity)]
fn display_suggest_endpoints(host: &str, port: u16) {
    info!("Daily Suggestions:");
    info!("   Today:             GET  http://{host}:{port}/api/suggest/today");
    info!("   Rotate:            POST http://{host}:{port}/api/suggest/rotate");
}

fn display_health_endpoints(host: &str, port: u16) {
    info!("Monitoring:");
    info!("   Health:            GET  http://{host}:{port}/health");
    info!("   Ready:             GET  http://{host}:{port}/ready");
}
