// ABOUTME: Plan assembler aggregating composed blocks into the final WorkoutPlan
// ABOUTME: Derives summary and coaching notes, enforces the duration tolerance, lists defects
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Plan Assembler
//!
//! Everything here is derived from the composed blocks; the assembler never draws from
//! the RNG. When the summed block time boxes drift from the requested duration by more
//! than the configured tolerance, every block is rescaled proportionally and the rounding
//! residual lands on the largest block, so the total matches the request exactly.

use crate::catalog::MovementCatalog;
use crate::intensity::CapDecision;
use crate::templates::WorkoutTemplate;
use kinetic_core::models::{
    Block, Focus, GenerationRequest, GeneratorVersion, PlanDefect, Seed, WorkoutPlan,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Pattern tags that describe form rather than emphasis
const NEUTRAL_PATTERNS: &[&str] = &["compound", "isolation", "activation", "locomotion"];

/// Everything the assembler needs from the earlier stages
#[derive(Debug)]
pub struct AssemblyInput<'a> {
    /// Selected template
    pub template: &'a WorkoutTemplate,
    /// Canonical request
    pub request: &'a GenerationRequest,
    /// Composed blocks in template order
    pub blocks: Vec<Block>,
    /// Capper outcome
    pub decision: &'a CapDecision,
    /// Seed that drove the run
    pub seed: &'a Seed,
    /// Algorithm revision that interpreted the seed
    pub version: &'a GeneratorVersion,
}

/// Proportional rescale applied to bring the plan back within tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    /// Summed block seconds before rescaling
    pub from_seconds: u32,
    /// Requested session seconds
    pub to_seconds: u32,
    /// Applied factor
    pub factor: f64,
}

/// Assembled plan plus any rescale that was applied
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// Final plan
    pub plan: WorkoutPlan,
    /// Present when block time boxes were rescaled
    pub rescale: Option<Rescale>,
}

/// Build the final plan
#[must_use]
pub fn assemble(
    input: AssemblyInput<'_>,
    catalog: &MovementCatalog,
    tolerance_percent: f64,
) -> Assembly {
    let AssemblyInput {
        template,
        request,
        mut blocks,
        decision,
        seed,
        version,
    } = input;

    let target = request.target_seconds();
    let rescale = enforce_tolerance(&mut blocks, target, tolerance_percent);
    let defects = find_defects(&blocks);
    if !defects.is_empty() {
        warn!(
            template = template.id,
            empty_blocks = defects.len(),
            "plan contains empty blocks"
        );
    }

    let used_equipment = equipment_used(&blocks, catalog);
    let patterns = dominant_patterns(&blocks, catalog, 2);
    let summary = summarize(
        request.focus,
        request.duration_minutes,
        decision.effective,
        &blocks,
        &patterns,
        &used_equipment,
    );
    let coaching_notes = coaching_notes(request.focus, decision, &defects);

    Assembly {
        plan: WorkoutPlan {
            title: template.name.to_owned(),
            template_id: template.id.to_owned(),
            focus: request.focus,
            duration_minutes: request.duration_minutes,
            intensity: decision.effective,
            summary,
            equipment: request.equipment.clone(),
            blocks,
            coaching_notes,
            seed: seed.clone(),
            generator_version: version.clone(),
            intensity_cap: decision.cap.clone(),
            defects,
        },
        rescale,
    }
}

/// Rescale block time boxes when they drift beyond `tolerance_percent` of `target`
fn enforce_tolerance(blocks: &mut [Block], target: u32, tolerance_percent: f64) -> Option<Rescale> {
    let total: u32 = blocks.iter().map(|b| b.target_seconds).sum();
    if total == 0 || blocks.is_empty() {
        return None;
    }
    let drift = f64::from(total.abs_diff(target));
    if drift <= f64::from(target) * tolerance_percent / 100.0 {
        return None;
    }

    let factor = f64::from(target) / f64::from(total);
    for block in blocks.iter_mut() {
        block.target_seconds = ((f64::from(block.target_seconds) * factor).floor() as u32).max(1);
    }

    let scaled: u32 = blocks.iter().map(|b| b.target_seconds).sum();
    if let Some(largest) = largest_block(blocks) {
        let adjusted = i64::from(largest.target_seconds) + i64::from(target) - i64::from(scaled);
        largest.target_seconds = u32::try_from(adjusted.max(1)).unwrap_or(largest.target_seconds);
    }

    debug!(from = total, to = target, factor, "block time boxes rescaled");
    Some(Rescale {
        from_seconds: total,
        to_seconds: target,
        factor,
    })
}

/// First block with the largest time box
fn largest_block(blocks: &mut [Block]) -> Option<&mut Block> {
    let max = blocks.iter().map(|b| b.target_seconds).max()?;
    blocks.iter_mut().find(|b| b.target_seconds == max)
}

fn find_defects(blocks: &[Block]) -> Vec<PlanDefect> {
    blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| block.is_empty())
        .map(|(block_index, block)| PlanDefect::EmptyBlock {
            block_index,
            key: block.key,
        })
        .collect()
}

/// Equipment actually needed by the prescribed movements
#[must_use]
pub fn equipment_used(blocks: &[Block], catalog: &MovementCatalog) -> BTreeSet<String> {
    blocks
        .iter()
        .flat_map(|b| &b.items)
        .filter_map(|item| catalog.get(&item.movement_id))
        .flat_map(|movement| {
            movement
                .effective_equipment()
                .into_iter()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Most frequent emphasis patterns, ties broken alphabetically
#[must_use]
pub fn dominant_patterns(blocks: &[Block], catalog: &MovementCatalog, limit: usize) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for movement in blocks
        .iter()
        .flat_map(|b| &b.items)
        .filter_map(|item| catalog.get(&item.movement_id))
    {
        for pattern in &movement.patterns {
            if !NEUTRAL_PATTERNS.contains(&pattern.as_str()) {
                *counts.entry(pattern.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(pattern, _)| pattern.to_owned())
        .collect()
}

fn summarize(
    focus: Focus,
    minutes: u32,
    intensity: u8,
    blocks: &[Block],
    patterns: &[String],
    equipment: &BTreeSet<String>,
) -> String {
    let emphasis = if patterns.is_empty() {
        "none".to_owned()
    } else {
        patterns.join(", ")
    };
    let gear = if equipment.is_empty() {
        "none".to_owned()
    } else {
        equipment.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    let mut label = focus.as_str().to_owned();
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!(
        "{label} session, {minutes} min at intensity {intensity}/10 across {} blocks. Emphasis: {emphasis}. Equipment: {gear}.",
        blocks.len()
    )
}

fn coaching_notes(focus: Focus, decision: &CapDecision, defects: &[PlanDefect]) -> String {
    let mut notes = vec![
        match focus {
            Focus::Strength => "Strength day: quality reps on the main lifts come first.",
            Focus::Conditioning => "Conditioning day: sustain output and keep transitions tight.",
            Focus::Mixed => "Mixed session: lift with intent, then push the engine.",
            Focus::Endurance => "Endurance day: stay aerobic and build time on task.",
        }
        .to_owned(),
        format!("Target effort: {}/10.", decision.effective),
    ];

    if let Some(cap) = &decision.cap {
        notes.push(format!(
            "Intensity capped from {} to {}: {}.",
            cap.original, cap.capped, cap.reason
        ));
    }
    if let Some(skipped) = &decision.overridden {
        notes.push(format!(
            "Recovery suggested intensity {}; training at {} as requested.",
            skipped.capped, skipped.original
        ));
    }
    if !defects.is_empty() {
        notes.push(format!(
            "{} block(s) could not be filled with the available equipment; regenerate or relax constraints.",
            defects.len()
        ));
    }
    notes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::template_by_id;
    use kinetic_core::models::{BlockItem, BlockKey, IntensityCap, Prescription};

    fn block(key: BlockKey, seconds: u32, movement_ids: &[&str]) -> Block {
        Block {
            key,
            title: key.as_str().to_owned(),
            target_seconds: seconds,
            workout_title: None,
            score_type: None,
            coaching_cues: None,
            items: movement_ids
                .iter()
                .map(|id| BlockItem {
                    movement_id: (*id).to_owned(),
                    name: (*id).to_owned(),
                    prescription: Prescription::Reps {
                        sets: 3,
                        reps: 5,
                        load: None,
                        rest_sec: 120,
                    },
                })
                .collect(),
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            focus: Focus::Strength,
            duration_minutes: 30,
            intensity: 6,
            equipment: ["barbell", "bodyweight"].iter().map(|s| (*s).to_owned()).collect(),
            constraints: Vec::new(),
        }
    }

    fn uncapped() -> CapDecision {
        CapDecision {
            effective: 6,
            cap: None,
            overridden: None,
        }
    }

    fn assemble_blocks(blocks: Vec<Block>, decision: &CapDecision) -> Assembly {
        let catalog = MovementCatalog::builtin();
        let request = request();
        let seed = Seed::from("abc");
        let version = GeneratorVersion::current();
        let template = template_by_id("strength-foundations").unwrap();
        assemble(
            AssemblyInput {
                template,
                request: &request,
                blocks,
                decision,
                seed: &seed,
                version: &version,
            },
            &catalog,
            10.0,
        )
    }

    #[test]
    fn test_within_tolerance_is_untouched() {
        let blocks = vec![
            block(BlockKey::Warmup, 180, &["cat-cow"]),
            block(BlockKey::Main, 1_000, &["back-squat"]),
            block(BlockKey::Cooldown, 500, &["childs-pose"]),
        ];
        let assembly = assemble_blocks(blocks, &uncapped());

        assert!(assembly.rescale.is_none());
        assert_eq!(assembly.plan.total_target_seconds(), 1_680);
    }

    #[test]
    fn test_drift_is_rescaled_to_exact_target() {
        let blocks = vec![
            block(BlockKey::Warmup, 100, &["cat-cow"]),
            block(BlockKey::Main, 700, &["back-squat"]),
            block(BlockKey::Cooldown, 101, &["childs-pose"]),
        ];
        let assembly = assemble_blocks(blocks, &uncapped());

        let rescale = assembly.rescale.unwrap();
        assert_eq!(rescale.from_seconds, 901);
        assert_eq!(assembly.plan.total_target_seconds(), 1_800);
        let main = &assembly.plan.blocks[1];
        assert!(main.target_seconds > assembly.plan.blocks[0].target_seconds);
    }

    #[test]
    fn test_empty_blocks_become_defects() {
        let blocks = vec![
            block(BlockKey::Warmup, 180, &[]),
            block(BlockKey::Main, 1_440, &["back-squat"]),
            block(BlockKey::Cooldown, 180, &[]),
        ];
        let assembly = assemble_blocks(blocks, &uncapped());

        assert_eq!(
            assembly.plan.defects,
            vec![
                PlanDefect::EmptyBlock {
                    block_index: 0,
                    key: BlockKey::Warmup
                },
                PlanDefect::EmptyBlock {
                    block_index: 2,
                    key: BlockKey::Cooldown
                },
            ]
        );
        assert!(assembly.plan.coaching_notes.contains("regenerate"));
    }

    #[test]
    fn test_summary_mentions_patterns_and_equipment() {
        let blocks = vec![
            block(BlockKey::Main, 900, &["back-squat", "deadlift"]),
            block(BlockKey::Accessory, 900, &["front-squat", "push-up"]),
        ];
        let assembly = assemble_blocks(blocks, &uncapped());
        let summary = &assembly.plan.summary;

        assert!(summary.starts_with("Strength session, 30 min"));
        assert!(summary.contains("Emphasis: squat, hinge"));
        assert!(summary.contains("Equipment: barbell, bodyweight"));
        assert_eq!(assembly.plan.title, "Strength Foundations");
    }

    #[test]
    fn test_cap_metadata_and_notes() {
        let decision = CapDecision {
            effective: 3,
            cap: Some(IntensityCap {
                original: 9,
                capped: 3,
                reason: "recovery signal indicates high fatigue".into(),
            }),
            overridden: None,
        };
        let blocks = vec![block(BlockKey::Main, 1_800, &["back-squat"])];
        let assembly = assemble_blocks(blocks, &decision);

        assert_eq!(assembly.plan.intensity, 3);
        assert_eq!(assembly.plan.intensity_cap, decision.cap);
        assert!(assembly.plan.coaching_notes.contains("capped from 9 to 3"));
    }

    #[test]
    fn test_no_cap_metadata_without_cap() {
        let blocks = vec![block(BlockKey::Main, 1_800, &["back-squat"])];
        let assembly = assemble_blocks(blocks, &uncapped());

        assert!(assembly.plan.intensity_cap.is_none());
        assert!(assembly.plan.defects.is_empty());
    }
}
