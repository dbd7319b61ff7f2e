// ABOUTME: Kinetic CLI - offline workout generation, replay and catalog inspection
// ABOUTME: Prints plans and catalog snapshots as JSON, or a readable summary on request
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! # Kinetic CLI
//!
//! Usage:
//! ```bash
//! # Generate a 30 minute strength plan with a fixed seed
//! kinetic-cli generate --focus strength --minutes 30 --intensity 6 \
//!     --equipment barbell,bodyweight --seed abc
//!
//! # Same inputs, fresh seed
//! kinetic-cli regenerate --focus strength --minutes 30 --intensity 6 --previous-seed abc
//!
//! # Reproduce a stored plan exactly
//! kinetic-cli replay --focus strength --minutes 30 --intensity 6 \
//!     --seed abc --generator-version kinetic-gen-1
//!
//! # List bodyweight movements of the catalog in use
//! kinetic-cli catalog --equipment bodyweight
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kinetic_server::config::ServerConfig;
use kinetic_server::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::debug;

use commands::workout::WorkoutArgs;

#[derive(Parser)]
#[command(
    name = "kinetic-cli",
    about = "Kinetic workout generator CLI",
    long_about = "Generate, regenerate and replay seeded workout plans offline, and inspect the movement catalog."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Movement catalog snapshot (JSON) replacing the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print a readable summary instead of JSON
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Generate a plan, minting a seed unless one is given
    Generate {
        #[command(flatten)]
        workout: WorkoutArgs,

        /// Seed to use
        #[arg(long)]
        seed: Option<String>,

        /// Include the decision trace
        #[arg(long)]
        trace: bool,
    },

    /// Generate again with a fresh seed distinct from the previous one
    Regenerate {
        #[command(flatten)]
        workout: WorkoutArgs,

        /// Seed of the plan being replaced
        #[arg(long)]
        previous_seed: String,
    },

    /// Rerun an exact seed under a generator version
    Replay {
        #[command(flatten)]
        workout: WorkoutArgs,

        /// Seed to rerun
        #[arg(long)]
        seed: String,

        /// Generator version the seed came from (defaults to the current one)
        #[arg(long)]
        generator_version: Option<String>,
    },

    /// List catalog movements
    Catalog {
        /// Only movements available with this equipment (comma-separated)
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,

        /// Only movements of this category
        #[arg(long)]
        category: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }
    let generator = config.build_generator()?;
    debug!(
        version = %generator.version(),
        movements = generator.catalog().len(),
        "generator ready"
    );

    match cli.command {
        Command::Generate {
            workout,
            seed,
            trace,
        } => commands::workout::generate(&generator, &workout, seed, trace, cli.pretty)?,
        Command::Regenerate {
            workout,
            previous_seed,
        } => commands::workout::regenerate(&generator, &workout, &previous_seed, cli.pretty)?,
        Command::Replay {
            workout,
            seed,
            generator_version,
        } => commands::workout::replay(
            &generator,
            &workout,
            &seed,
            generator_version,
            cli.pretty,
        )?,
        Command::Catalog {
            equipment,
            category,
        } => commands::catalog::list(&generator, &equipment, category.as_deref(), cli.pretty)?,
    }

    Ok(())
}
