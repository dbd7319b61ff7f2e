// ABOUTME: Generated workout plan aggregate with ordered blocks and prescriptions
// ABOUTME: Prescriptions are an explicit tagged union of reps, time and distance
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Output side of the generator.
//!
//! A block with zero items is a generation defect, not a valid terminal state. The plan
//! keeps such blocks in place and lists them in [`WorkoutPlan::defects`] so callers can
//! offer a regenerate action.

use super::{Focus, GeneratorVersion, Seed};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Phase of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKey {
    /// Preparation
    Warmup,
    /// Primary strength work
    Main,
    /// Secondary strength work
    Accessory,
    /// Metabolic or aerobic piece
    Conditioning,
    /// Down-regulation and mobility
    Cooldown,
}

impl BlockKey {
    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warmup => "warmup",
            Self::Main => "main",
            Self::Accessory => "accessory",
            Self::Conditioning => "conditioning",
            Self::Cooldown => "cooldown",
        }
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of a [`Prescription`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionKind {
    /// Sets of repetitions
    Reps,
    /// Sets of timed work
    Time,
    /// Sets of covered distance
    Distance,
}

/// Quantified instruction for one movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prescription {
    /// `sets` x `reps`
    Reps {
        /// Number of sets (> 0)
        sets: u32,
        /// Repetitions per set (> 0)
        reps: u32,
        /// Load hint (`RPE 8`, `~75% 1RM`, ...)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        load: Option<String>,
        /// Rest after each set
        #[serde(rename = "restSec")]
        rest_sec: u32,
    },
    /// `sets` x `seconds` of work
    Time {
        /// Number of sets (> 0)
        sets: u32,
        /// Work seconds per set (> 0)
        seconds: u32,
        /// Load hint
        #[serde(default, skip_serializing_if = "Option::is_none")]
        load: Option<String>,
        /// Rest after each set
        #[serde(rename = "restSec")]
        rest_sec: u32,
    },
    /// `sets` x `meters`
    Distance {
        /// Number of sets (> 0)
        sets: u32,
        /// Meters per set (> 0)
        meters: u32,
        /// Load hint
        #[serde(default, skip_serializing_if = "Option::is_none")]
        load: Option<String>,
        /// Rest after each set
        #[serde(rename = "restSec")]
        rest_sec: u32,
    },
}

impl Prescription {
    /// Variant discriminant
    #[must_use]
    pub const fn kind(&self) -> PrescriptionKind {
        match self {
            Self::Reps { .. } => PrescriptionKind::Reps,
            Self::Time { .. } => PrescriptionKind::Time,
            Self::Distance { .. } => PrescriptionKind::Distance,
        }
    }

    /// Number of sets
    #[must_use]
    pub const fn sets(&self) -> u32 {
        match self {
            Self::Reps { sets, .. } | Self::Time { sets, .. } | Self::Distance { sets, .. } => {
                *sets
            }
        }
    }

    /// Rest after each set
    #[must_use]
    pub const fn rest_sec(&self) -> u32 {
        match self {
            Self::Reps { rest_sec, .. }
            | Self::Time { rest_sec, .. }
            | Self::Distance { rest_sec, .. } => *rest_sec,
        }
    }

    /// Load hint, if any
    #[must_use]
    pub fn load(&self) -> Option<&str> {
        match self {
            Self::Reps { load, .. } | Self::Time { load, .. } | Self::Distance { load, .. } => {
                load.as_deref()
            }
        }
    }

    /// Copy of this prescription with a different set count
    #[must_use]
    pub fn with_sets(&self, new_sets: u32) -> Self {
        let mut next = self.clone();
        match &mut next {
            Self::Reps { sets, .. } | Self::Time { sets, .. } | Self::Distance { sets, .. } => {
                *sets = new_sets;
            }
        }
        next
    }

    /// Short human-readable form, e.g. `4x5 @ RPE 8`
    #[must_use]
    pub fn describe(&self) -> String {
        let body = match self {
            Self::Reps { sets, reps, .. } => format!("{sets}x{reps}"),
            Self::Time { sets, seconds, .. } => format!("{sets}x{seconds}s"),
            Self::Distance { sets, meters, .. } => format!("{sets}x{meters}m"),
        };
        match self.load() {
            Some(load) => format!("{body} @ {load}"),
            None => body,
        }
    }
}

/// One prescribed movement inside a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockItem {
    /// Catalog movement id
    pub movement_id: String,
    /// Movement display name
    pub name: String,
    /// What to do
    pub prescription: Prescription,
}

/// One phase of the workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Phase
    pub key: BlockKey,
    /// Display title
    pub title: String,
    /// Time box for this block
    pub target_seconds: u32,
    /// Named piece (`AMRAP 12`), conditioning blocks only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_title: Option<String>,
    /// How the piece is scored (`rounds+reps`, `total reps`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_type: Option<String>,
    /// Coaching cues for the block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coaching_cues: Option<String>,
    /// Ordered prescribed movements
    pub items: Vec<BlockItem>,
}

impl Block {
    /// Whether this block is the empty-block defect
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Record of a recovery-driven intensity reduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntensityCap {
    /// Intensity the caller asked for
    pub original: u8,
    /// Intensity actually used
    pub capped: u8,
    /// Human-readable explanation
    pub reason: String,
}

/// Content defect surfaced to the caller instead of failing the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanDefect {
    /// A block could not be filled from the equipment-filtered catalog
    EmptyBlock {
        /// Position of the block in `blocks`
        #[serde(rename = "blockIndex")]
        block_index: usize,
        /// Phase of the empty block
        key: BlockKey,
    },
}

/// Final output of one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    /// Display title (template name)
    pub title: String,
    /// Template identifier
    pub template_id: String,
    /// Workout style
    pub focus: Focus,
    /// Requested session length
    pub duration_minutes: u32,
    /// Effective intensity after recovery capping
    pub intensity: u8,
    /// One-line description
    pub summary: String,
    /// Equipment the request allowed
    pub equipment: BTreeSet<String>,
    /// Ordered workout phases
    pub blocks: Vec<Block>,
    /// Session-level coaching notes
    pub coaching_notes: String,
    /// Seed that reproduces this plan
    pub seed: Seed,
    /// Algorithm revision that interpreted the seed
    pub generator_version: GeneratorVersion,
    /// Present only when recovery capping lowered the intensity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_cap: Option<IntensityCap>,
    /// Content defects; empty for a complete plan
    #[serde(default)]
    pub defects: Vec<PlanDefect>,
}

impl WorkoutPlan {
    /// Sum of all block time boxes
    #[must_use]
    pub fn total_target_seconds(&self) -> u32 {
        self.blocks.iter().map(|b| b.target_seconds).sum()
    }

    /// Whether the caller should offer a regenerate/relax action
    #[must_use]
    pub fn has_defects(&self) -> bool {
        !self.defects.is_empty()
    }

    /// All prescribed movement ids in plan order
    pub fn movement_ids(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .flat_map(|b| b.items.iter().map(|i| i.movement_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prescription_serializes_with_type_tag() {
        let prescription = Prescription::Reps {
            sets: 4,
            reps: 5,
            load: Some("RPE 8".into()),
            rest_sec: 150,
        };
        let json = serde_json::to_value(&prescription).unwrap();

        assert_eq!(json["type"], "reps");
        assert_eq!(json["restSec"], 150);
        assert_eq!(json["load"], "RPE 8");
    }

    #[test]
    fn test_describe_and_with_sets() {
        let prescription = Prescription::Distance {
            sets: 1,
            meters: 500,
            load: None,
            rest_sec: 60,
        };

        assert_eq!(prescription.describe(), "1x500m");
        assert_eq!(prescription.with_sets(3).sets(), 3);
        assert_eq!(prescription.with_sets(3).kind(), PrescriptionKind::Distance);
    }

    #[test]
    fn test_empty_block_defect_serialization() {
        let defect = PlanDefect::EmptyBlock {
            block_index: 2,
            key: BlockKey::Accessory,
        };
        let json = serde_json::to_value(&defect).unwrap();

        assert_eq!(json["kind"], "empty_block");
        assert_eq!(json["blockIndex"], 2);
        assert_eq!(json["key"], "accessory");
    }
}
