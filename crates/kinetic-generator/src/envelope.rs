// ABOUTME: Reproducibility envelope running the full pipeline under an explicit seed and version
// ABOUTME: Provides generate, regenerate and replay plus a trace of every seeded choice
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Reproducibility Envelope
//!
//! A run is a pure function of `(request, recovery, seed, version, catalog snapshot,
//! config)`. The generator holds the snapshot, config and version explicitly; nothing is
//! read from globals during a run. Fresh seeds are minted only in [`WorkoutGenerator::generate`]
//! and [`WorkoutGenerator::regenerate`], before the pipeline starts.
//!
//! Replay with a foreign generator version does not fail. The current algorithm
//! interprets the seed, the outcome carries a [`VersionMismatch`] and a warning is
//! logged; callers must treat such a plan as new.

use crate::assembler::{assemble, AssemblyInput};
use crate::catalog::MovementCatalog;
use crate::composer::BlockComposer;
use crate::config::GeneratorConfig;
use crate::intensity::{cap_intensity, RecoveryContext};
use crate::normalizer::{normalize, RawConstraints};
use crate::rng::{mint_seed, mint_seed_distinct_from, SeededRng};
use crate::templates::select_template;
use kinetic_core::errors::ValidationError;
use kinetic_core::models::{GenerationRequest, GeneratorVersion, Seed, WorkoutPlan};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pipeline stage a choice belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceStep {
    /// Recovery capping outcome
    Intensity,
    /// Template selection
    Template,
    /// One composed block
    Block,
    /// Duration rescale by the assembler
    Rescale,
}

/// One recorded decision of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationChoice {
    /// Stage
    pub step: ChoiceStep,
    /// What was decided
    pub detail: String,
    /// RNG draws consumed once the decision was made
    pub draw: u64,
}

/// Replay asked for a revision other than the one that ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMismatch {
    /// Version supplied by the caller
    pub requested: GeneratorVersion,
    /// Version that interpreted the seed
    pub used: GeneratorVersion,
}

/// Everything one run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// The plan, carrying its seed and version
    pub plan: WorkoutPlan,
    /// Seed that reproduces the plan
    pub seed: Seed,
    /// Canonical request the plan was built from
    pub request: GenerationRequest,
    /// Ordered decision trace
    pub choices: Vec<GenerationChoice>,
    /// Present when a replay asked for a different version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_mismatch: Option<VersionMismatch>,
}

/// Seeded workout generator bound to one catalog snapshot, config and version
#[derive(Debug, Clone)]
pub struct WorkoutGenerator {
    catalog: Arc<MovementCatalog>,
    config: GeneratorConfig,
    version: GeneratorVersion,
}

impl WorkoutGenerator {
    /// Generator for the current algorithm revision
    #[must_use]
    pub fn new(catalog: Arc<MovementCatalog>, config: GeneratorConfig) -> Self {
        Self {
            catalog,
            config,
            version: GeneratorVersion::current(),
        }
    }

    /// Generator over the built-in catalog with the process-wide configuration
    #[must_use]
    pub fn with_builtin_catalog() -> Self {
        Self::new(MovementCatalog::builtin(), GeneratorConfig::global().clone())
    }

    /// Algorithm revision this generator implements
    #[must_use]
    pub const fn version(&self) -> &GeneratorVersion {
        &self.version
    }

    /// Catalog snapshot in use
    #[must_use]
    pub fn catalog(&self) -> &Arc<MovementCatalog> {
        &self.catalog
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Normalize constraints without generating
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for structurally invalid constraints
    pub fn normalize(&self, raw: &RawConstraints) -> Result<GenerationRequest, ValidationError> {
        normalize(raw, &self.config)
    }

    /// Generate a plan, minting a seed when none is given
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for structurally invalid constraints or recovery input;
    /// no seed is minted and no draw happens in that case
    pub fn generate(
        &self,
        raw: &RawConstraints,
        recovery: &RecoveryContext,
        seed: Option<Seed>,
    ) -> Result<GenerationOutcome, ValidationError> {
        let request = self.normalize(raw)?;
        recovery.composite(&self.config.recovery)?;
        let seed = seed.unwrap_or_else(mint_seed);
        self.run(&request, recovery, &seed)
    }

    /// Try again with a fresh seed distinct from `previous`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for structurally invalid constraints or recovery input
    pub fn regenerate(
        &self,
        raw: &RawConstraints,
        recovery: &RecoveryContext,
        previous: &Seed,
    ) -> Result<GenerationOutcome, ValidationError> {
        let request = self.normalize(raw)?;
        recovery.composite(&self.config.recovery)?;
        let seed = mint_seed_distinct_from(previous);
        debug!(previous = %previous, seed = %seed, "regenerating with fresh seed");
        self.run(&request, recovery, &seed)
    }

    /// Rerun with an exact seed. Byte-identical to the original run when `version`
    /// matches this generator's version.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for structurally invalid constraints or recovery input
    pub fn replay(
        &self,
        raw: &RawConstraints,
        recovery: &RecoveryContext,
        seed: &Seed,
        version: &GeneratorVersion,
    ) -> Result<GenerationOutcome, ValidationError> {
        let request = self.normalize(raw)?;
        let mut outcome = self.run(&request, recovery, seed)?;
        if version != &self.version {
            warn!(
                requested = %version,
                used = %self.version,
                seed = %seed,
                "replay requested a different generator version; plan is not a reproduction"
            );
            outcome.version_mismatch = Some(VersionMismatch {
                requested: version.clone(),
                used: self.version.clone(),
            });
        }
        Ok(outcome)
    }

    /// Run the pipeline on an already-normalized request
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the recovery context carries a non-finite value;
    /// this is checked before the first draw
    pub fn run(
        &self,
        request: &GenerationRequest,
        recovery: &RecoveryContext,
        seed: &Seed,
    ) -> Result<GenerationOutcome, ValidationError> {
        let decision = cap_intensity(request.intensity, recovery, &self.config.recovery)?;
        let mut rng = SeededRng::from_seed(seed);
        let mut choices = Vec::new();

        choices.push(GenerationChoice {
            step: ChoiceStep::Intensity,
            detail: decision.cap.as_ref().map_or_else(
                || format!("intensity {} (uncapped)", decision.effective),
                |cap| format!("intensity {} capped to {}", cap.original, cap.capped),
            ),
            draw: rng.draws(),
        });

        let selection = select_template(request.focus, request.duration_minutes, &mut rng);
        choices.push(GenerationChoice {
            step: ChoiceStep::Template,
            detail: format!(
                "{} ({} of {} eligible)",
                selection.template.id,
                selection.template.name,
                selection.eligible_count
            ),
            draw: rng.draws(),
        });

        let mut composer = BlockComposer::new(
            &self.catalog,
            &self.config.composer,
            request,
            decision.effective,
        );
        let mut blocks = Vec::with_capacity(selection.slots.len());
        for slot in &selection.slots {
            let composed = composer.compose(slot, &mut rng);
            let block = &composed.block;
            let mut detail = format!(
                "{} '{}': {} item(s) from {} candidate(s)",
                block.key,
                block.title,
                block.items.len(),
                composed.candidate_count
            );
            if let Some(title) = &block.workout_title {
                detail.push_str(&format!(", {title}"));
            }
            if composed.used_fallback {
                detail.push_str(", fallback category");
            }
            choices.push(GenerationChoice {
                step: ChoiceStep::Block,
                detail,
                draw: rng.draws(),
            });
            blocks.push(composed.block);
        }

        let assembly = assemble(
            AssemblyInput {
                template: selection.template,
                request,
                blocks,
                decision: &decision,
                seed,
                version: &self.version,
            },
            &self.catalog,
            self.config.duration.tolerance_percent,
        );
        if let Some(rescale) = assembly.rescale {
            choices.push(GenerationChoice {
                step: ChoiceStep::Rescale,
                detail: format!(
                    "{}s -> {}s (x{:.3})",
                    rescale.from_seconds, rescale.to_seconds, rescale.factor
                ),
                draw: rng.draws(),
            });
        }

        info!(
            seed = %seed,
            version = %self.version,
            template = selection.template.id,
            focus = %request.focus,
            minutes = request.duration_minutes,
            intensity = decision.effective,
            defects = assembly.plan.defects.len(),
            draws = rng.draws(),
            "workout generated"
        );

        Ok(GenerationOutcome {
            plan: assembly.plan,
            seed: seed.clone(),
            request: request.clone(),
            choices,
            version_mismatch: None,
        })
    }
}
