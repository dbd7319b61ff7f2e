// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Generator snapshot, plan store, suggestion service and configuration behind one Arc
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use crate::config::ServerConfig;
use crate::services::{PlanStore, SuggestionService};
use anyhow::Result;
use kinetic_generator::WorkoutGenerator;
use std::sync::Arc;

/// Everything a request handler needs
///
/// The generator is immutable once built; replacing the catalog means building a new
/// `ServerResources`, so in-flight requests keep the snapshot they started with.
#[derive(Debug, Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Generator bound to one catalog snapshot
    pub generator: Arc<WorkoutGenerator>,
    /// Plans persisted by `generate`
    pub plans: PlanStore,
    /// Daily suggestions
    pub suggestions: SuggestionService,
}

impl ServerResources {
    /// Resources around an already-built generator
    #[must_use]
    pub fn new(config: ServerConfig, generator: WorkoutGenerator) -> Self {
        let suggestions = SuggestionService::new(
            config.suggest_minutes,
            generator.config().default_equipment.clone(),
        );
        let plans = PlanStore::with_capacity(config.max_stored_plans);
        Self {
            config: Arc::new(config),
            generator: Arc::new(generator),
            plans,
            suggestions,
        }
    }

    /// Build the generator described by `config` and wrap it
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog snapshot cannot be loaded
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let generator = config.build_generator()?;
        Ok(Self::new(config, generator))
    }
}
