// ABOUTME: Workout commands for kinetic-cli: generate, regenerate and replay
// ABOUTME: Maps command line flags onto raw constraints and recovery context
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use crate::helpers::display;
use anyhow::Result;
use clap::Args;
use kinetic_core::models::{GeneratorVersion, Seed};
use kinetic_generator::{
    GenerationOutcome, RawConstraints, RecoveryContext, RecoveryInputs, WorkoutGenerator,
};

/// Inputs shared by every workout command
#[derive(Args)]
pub struct WorkoutArgs {
    /// Focus or archetype (strength, conditioning, mixed, endurance)
    #[arg(long)]
    focus: String,

    /// Session length in minutes
    #[arg(long, default_value_t = 30.0)]
    minutes: f64,

    /// Requested intensity (1-10)
    #[arg(long, default_value_t = 6.0)]
    intensity: f64,

    /// Available equipment (comma-separated)
    #[arg(long, value_delimiter = ',')]
    equipment: Vec<String>,

    /// Free-form exclusion, repeatable (`--exclude "no jumping"`)
    #[arg(long = "exclude")]
    exclusions: Vec<String>,

    /// Location hint (gym, home, outdoor, travel)
    #[arg(long)]
    location: Option<String>,

    /// Precomputed recovery composite (0-100)
    #[arg(long)]
    recovery_signal: Option<f64>,

    /// Hours slept, folded into the recovery composite with `--load-ratio`
    #[arg(long, requires = "load_ratio")]
    sleep_hours: Option<f64>,

    /// Acute to chronic training load ratio
    #[arg(long, requires = "sleep_hours")]
    load_ratio: Option<f64>,

    /// Keep the requested intensity even when recovery suggests a cap
    #[arg(long)]
    override_cap: bool,
}

impl WorkoutArgs {
    fn raw(&self) -> RawConstraints {
        let raw = RawConstraints::new(self.focus.clone(), self.minutes, self.intensity)
            .with_equipment(self.equipment.iter().cloned())
            .with_constraints(self.exclusions.iter().cloned());
        match &self.location {
            Some(location) => raw.with_location(location.clone()),
            None => raw,
        }
    }

    fn recovery(&self) -> RecoveryContext {
        let context = match (self.recovery_signal, self.sleep_hours, self.load_ratio) {
            (Some(signal), _, _) => RecoveryContext::with_signal(signal),
            (None, Some(sleep_hours), Some(acute_chronic_ratio)) => {
                RecoveryContext::with_inputs(RecoveryInputs {
                    sleep_hours,
                    acute_chronic_ratio,
                })
            }
            _ => RecoveryContext::none(),
        };
        if self.override_cap {
            context.overridden()
        } else {
            context
        }
    }
}

/// Generate a plan
pub fn generate(
    generator: &WorkoutGenerator,
    args: &WorkoutArgs,
    seed: Option<String>,
    trace: bool,
    pretty: bool,
) -> Result<()> {
    let outcome = generator.generate(&args.raw(), &args.recovery(), seed.map(Seed::from))?;
    emit(&outcome, trace, pretty)
}

/// Generate with a fresh seed
pub fn regenerate(
    generator: &WorkoutGenerator,
    args: &WorkoutArgs,
    previous_seed: &str,
    pretty: bool,
) -> Result<()> {
    let outcome =
        generator.regenerate(&args.raw(), &args.recovery(), &Seed::from(previous_seed))?;
    emit(&outcome, false, pretty)
}

/// Rerun an exact seed
pub fn replay(
    generator: &WorkoutGenerator,
    args: &WorkoutArgs,
    seed: &str,
    version: Option<String>,
    pretty: bool,
) -> Result<()> {
    let version = version.map_or_else(|| generator.version().clone(), GeneratorVersion::new);
    let outcome = generator.replay(&args.raw(), &args.recovery(), &Seed::from(seed), &version)?;
    emit(&outcome, true, pretty)
}

fn emit(outcome: &GenerationOutcome, trace: bool, pretty: bool) -> Result<()> {
    if pretty {
        display::print_plan(&outcome.plan);
        if let Some(mismatch) = &outcome.version_mismatch {
            display::print_version_mismatch(mismatch);
        }
        if trace {
            display::print_choices(&outcome.choices);
        }
        return Ok(());
    }

    let json = if trace {
        serde_json::to_string_pretty(outcome)?
    } else {
        serde_json::to_string_pretty(&serde_json::json!({
            "plan": outcome.plan,
            "seed": outcome.seed,
        }))?
    };
    println!("{json}");
    Ok(())
}
