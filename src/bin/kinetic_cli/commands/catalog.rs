// ABOUTME: Catalog command for kinetic-cli
// ABOUTME: Lists movements of the snapshot in use, filtered by equipment or category
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use crate::helpers::display;
use anyhow::{Context, Result};
use kinetic_core::models::{Movement, MovementCategory};
use kinetic_generator::normalizer::canonical_equipment;
use kinetic_generator::WorkoutGenerator;
use std::collections::BTreeSet;

/// List catalog movements
pub fn list(
    generator: &WorkoutGenerator,
    equipment: &[String],
    category: Option<&str>,
    pretty: bool,
) -> Result<()> {
    let category = category
        .map(|name| {
            serde_json::from_value::<MovementCategory>(serde_json::Value::String(
                name.trim().to_lowercase(),
            ))
            .with_context(|| format!("Unknown movement category '{name}'"))
        })
        .transpose()?;
    let available: BTreeSet<String> = equipment
        .iter()
        .filter_map(|item| canonical_equipment(item))
        .collect();

    let movements: Vec<&Movement> = generator
        .catalog()
        .iter()
        .filter(|m| available.is_empty() || m.is_available_with(&available))
        .filter(|m| category.is_none_or(|c| m.category == c))
        .collect();

    if pretty {
        display::print_movements(&movements);
    } else {
        println!("{}", serde_json::to_string_pretty(&movements)?);
    }
    Ok(())
}
