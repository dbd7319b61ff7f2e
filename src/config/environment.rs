// ABOUTME: Environment-based server configuration for the Kinetic HTTP service
// ABOUTME: Reads listener, catalog snapshot, equipment and suggestion settings from env vars
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Environment-based configuration management

use anyhow::{bail, Context, Result};
use kinetic_generator::{GeneratorConfig, MovementCatalog, WorkoutGenerator};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default session length offered by the daily suggestion
pub const DEFAULT_SUGGEST_MINUTES: u32 = 30;
/// Default number of generated plans kept in memory
pub const DEFAULT_MAX_STORED_PLANS: usize = 10_000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listener port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Optional JSON movement catalog snapshot replacing the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Session length offered by `suggest/today`
    pub suggest_minutes: u32,
    /// Plans kept by the in-memory store before the oldest are evicted
    pub max_stored_plans: usize,
    /// Comma-separated allowed origins, or `*`
    pub cors_origins: String,
    /// Engine policy, including environment overrides
    pub generator: GeneratorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            host: DEFAULT_HOST.to_owned(),
            catalog_path: None,
            suggest_minutes: DEFAULT_SUGGEST_MINUTES,
            max_stored_plans: DEFAULT_MAX_STORED_PLANS,
            cors_origins: "*".to_owned(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value or the generator
    /// configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Engine overrides, including KINETIC_DEFAULT_EQUIPMENT
        let generator = GeneratorConfig::load().context("Invalid generator configuration")?;

        let max_stored_plans: usize = env_var_or(
            "KINETIC_MAX_STORED_PLANS",
            &DEFAULT_MAX_STORED_PLANS.to_string(),
        )
        .parse()
        .context("Invalid KINETIC_MAX_STORED_PLANS value")?;
        if max_stored_plans == 0 {
            bail!("KINETIC_MAX_STORED_PLANS must be positive");
        }

        Ok(Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            host: env_var_or("HOST", DEFAULT_HOST),
            catalog_path: env::var("KINETIC_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            suggest_minutes: env_var_or(
                "KINETIC_SUGGEST_MINUTES",
                &DEFAULT_SUGGEST_MINUTES.to_string(),
            )
            .parse()
            .context("Invalid KINETIC_SUGGEST_MINUTES value")?,
            max_stored_plans,
            cors_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            generator,
        })
    }

    /// Listener address as `host:port`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Load the configured catalog snapshot, or the built-in one
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot file cannot be read or is malformed
    pub fn load_catalog(&self) -> Result<Arc<MovementCatalog>> {
        let Some(path) = &self.catalog_path else {
            return Ok(MovementCatalog::builtin());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog snapshot {}", path.display()))?;
        let catalog = MovementCatalog::from_json(&json)
            .with_context(|| format!("Malformed catalog snapshot {}", path.display()))?;
        info!(
            path = %path.display(),
            movements = catalog.len(),
            "Loaded movement catalog snapshot"
        );
        Ok(Arc::new(catalog))
    }

    /// Build the generator over the configured catalog and policy
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog snapshot cannot be loaded
    pub fn build_generator(&self) -> Result<WorkoutGenerator> {
        Ok(WorkoutGenerator::new(
            self.load_catalog()?,
            self.generator.clone(),
        ))
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Kinetic Server Configuration:\n\
             - Listen: {}\n\
             - Catalog: {}\n\
             - Default Equipment: {}\n\
             - Suggestion Length: {} min\n\
             - Stored Plan Limit: {}\n\
             - CORS Origins: {}\n\
             - Duration Tolerance: {}%\n\
             - Recovery Cap Threshold: {}",
            self.bind_address(),
            self.catalog_path
                .as_ref()
                .map_or_else(|| "built-in".to_owned(), |p| p.display().to_string()),
            self.generator.default_equipment.join(", "),
            self.suggest_minutes,
            self.max_stored_plans,
            self.cors_origins,
            self.generator.duration.tolerance_percent,
            self.generator.recovery.cap_threshold,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
