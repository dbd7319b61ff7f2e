// ABOUTME: Block composer filling template slots with catalog movements and prescriptions
// ABOUTME: Filters by equipment, exclusions and slot emphasis; scales prescriptions with intensity
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Block Composer
//!
//! Each slot is filled from the equipment-filtered catalog. Movements matching the slot
//! emphasis come first, then movements of the slot's fallback categories. Within each
//! group, movements not yet used by an earlier block precede reused ones, and every group
//! is shuffled with the seeded RNG. Movements are drawn without replacement until the
//! slot budget is consumed or the block's item limit is reached.
//!
//! The slot decides the prescription type: main-strength slots prescribe reps, every
//! conditioning slot prescribes time or distance.
//!
//! A slot with no usable movement yields a block with zero items. That block is a
//! defect the caller must see; it is never dropped.

use crate::catalog::MovementCatalog;
use crate::config::ComposerConfig;
use crate::rng::SeededRng;
use crate::templates::{PlannedSlot, SlotStyle};
use kinetic_core::constants::equipment::{BARBELL, DUMBBELL, KETTLEBELL, MEDICINE_BALL};
use kinetic_core::constants::safety_limits::{MAX_METERS_PER_SET, MAX_SECONDS_PER_SET};
use kinetic_core::models::{
    Block, BlockItem, GenerationRequest, Movement, MovementCategory, Prescription,
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Metabolic circuit format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitFormat {
    /// As many rounds as possible
    Amrap,
    /// Fixed rounds of timed stations, scored by total reps
    RoundsForReps,
    /// Every minute on the minute
    Emom,
}

impl CircuitFormat {
    const ALL: [Self; 3] = [Self::Amrap, Self::RoundsForReps, Self::Emom];
}

/// Movement preferences for a slot style
struct Emphasis {
    patterns: &'static [&'static str],
    categories: &'static [MovementCategory],
    fallback: &'static [MovementCategory],
    /// Patterns that can never fill the slot, primary or fallback
    excluded: &'static [&'static str],
}

impl Emphasis {
    const fn for_style(style: SlotStyle) -> Self {
        use MovementCategory::{Cardio, Conditioning, Mobility, Strength};
        match style {
            SlotStyle::Prep => Self {
                patterns: &["mobility", "activation"],
                categories: &[Mobility],
                fallback: &[Cardio],
                excluded: &[],
            },
            // Holds and carries cannot be prescribed as reps
            SlotStyle::Strength => Self {
                patterns: &["compound"],
                categories: &[Strength],
                fallback: &[Strength],
                excluded: &["isometric", "carry"],
            },
            SlotStyle::Accessory => Self {
                patterns: &["lunge", "core", "carry", "isolation", "isometric"],
                categories: &[Strength],
                fallback: &[Strength],
                excluded: &[],
            },
            SlotStyle::Metcon | SlotStyle::Intervals => Self {
                patterns: &[],
                categories: &[Conditioning, Cardio],
                fallback: &[Strength],
                excluded: &[],
            },
            SlotStyle::Steady => Self {
                patterns: &["run", "row", "bike"],
                categories: &[Cardio],
                fallback: &[Conditioning],
                excluded: &[],
            },
            SlotStyle::Recovery => Self {
                patterns: &["stretch", "mobility"],
                categories: &[Mobility],
                fallback: &[Mobility],
                excluded: &[],
            },
        }
    }

    fn admits(&self, movement: &Movement) -> bool {
        !movement.matches_any_pattern(self.excluded)
    }

    fn is_primary(&self, movement: &Movement) -> bool {
        self.admits(movement)
            && self.categories.contains(&movement.category)
            && (self.patterns.is_empty() || movement.matches_any_pattern(self.patterns))
    }

    fn is_fallback(&self, movement: &Movement) -> bool {
        self.admits(movement) && self.fallback.contains(&movement.category)
    }
}

/// A composed block plus what the composer saw while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedBlock {
    /// The block, possibly with zero items
    pub block: Block,
    /// Movements that were eligible for the slot
    pub candidate_count: usize,
    /// Whether any item came from the fallback categories
    pub used_fallback: bool,
}

/// Stateful composer for one generation: remembers movements used by earlier blocks
pub struct BlockComposer<'a> {
    config: &'a ComposerConfig,
    eligible: Vec<&'a Movement>,
    intensity: u8,
    used: BTreeSet<String>,
}

impl<'a> BlockComposer<'a> {
    /// Composer for one request at the given effective intensity
    #[must_use]
    pub fn new(
        catalog: &'a MovementCatalog,
        config: &'a ComposerConfig,
        request: &GenerationRequest,
        intensity: u8,
    ) -> Self {
        Self {
            config,
            eligible: catalog.eligible(&request.equipment, &request.constraints),
            intensity,
            used: BTreeSet::new(),
        }
    }

    /// Movements usable at all with the request's equipment and exclusions
    #[must_use]
    pub fn eligible_count(&self) -> usize {
        self.eligible.len()
    }

    /// Fill one slot
    pub fn compose(&mut self, slot: &PlannedSlot, rng: &mut SeededRng) -> ComposedBlock {
        let spec = slot.spec;
        let budget = slot.target_seconds;
        let emphasis = Emphasis::for_style(spec.style);

        let primary: Vec<&'a Movement> = self
            .eligible
            .iter()
            .copied()
            .filter(|m| emphasis.is_primary(m))
            .collect();
        let fallback: Vec<&'a Movement> = self
            .eligible
            .iter()
            .copied()
            .filter(|m| !emphasis.is_primary(m) && emphasis.is_fallback(m))
            .collect();
        let candidate_count = primary.len() + fallback.len();

        let mut block = Block {
            key: spec.key,
            title: spec.title.to_owned(),
            target_seconds: budget,
            workout_title: None,
            score_type: None,
            coaching_cues: None,
            items: Vec::new(),
        };

        if candidate_count == 0 {
            warn!(
                key = %spec.key,
                title = spec.title,
                "no eligible movement for slot, emitting empty block"
            );
            return ComposedBlock {
                block,
                candidate_count,
                used_fallback: false,
            };
        }

        let fallback_ids: BTreeSet<&str> = fallback.iter().map(|m| m.id.as_str()).collect();
        let candidates = self.order_candidates(primary, fallback, rng);
        let max_items = self.config.max_items.for_key(spec.key);

        let filled = match spec.style {
            SlotStyle::Prep | SlotStyle::Recovery | SlotStyle::Strength | SlotStyle::Accessory => {
                self.fill_sequential(spec.style, &candidates, budget, max_items, rng)
            }
            SlotStyle::Metcon => self.fill_metcon(&candidates, budget, max_items, rng),
            SlotStyle::Intervals => self.fill_intervals(&candidates, budget, max_items, rng),
            SlotStyle::Steady => self.fill_steady(&candidates, budget),
        };

        block.target_seconds = filled.seconds.max(1);
        block.workout_title = filled.workout_title;
        block.score_type = filled.score_type;
        block.coaching_cues = (!filled.cues.is_empty()).then_some(filled.cues);
        block.items = filled.items;

        let used_fallback = block
            .items
            .iter()
            .any(|item| fallback_ids.contains(item.movement_id.as_str()));
        for item in &block.items {
            self.used.insert(item.movement_id.clone());
        }

        debug!(
            key = %spec.key,
            items = block.items.len(),
            budget,
            estimate = block.target_seconds,
            candidate_count,
            "block composed"
        );

        ComposedBlock {
            block,
            candidate_count,
            used_fallback,
        }
    }

    fn order_candidates(
        &self,
        primary: Vec<&'a Movement>,
        fallback: Vec<&'a Movement>,
        rng: &mut SeededRng,
    ) -> Vec<&'a Movement> {
        let (mut primary_fresh, mut primary_used): (Vec<_>, Vec<_>) = primary
            .into_iter()
            .partition(|m| !self.used.contains(&m.id));
        let (mut fallback_fresh, mut fallback_used): (Vec<_>, Vec<_>) = fallback
            .into_iter()
            .partition(|m| !self.used.contains(&m.id));

        let mut ordered = Vec::new();
        for group in [
            &mut primary_fresh,
            &mut fallback_fresh,
            &mut primary_used,
            &mut fallback_used,
        ] {
            rng.shuffle(group);
            ordered.append(group);
        }
        ordered
    }

    fn fill_sequential(
        &self,
        style: SlotStyle,
        candidates: &[&Movement],
        budget: u32,
        max_items: usize,
        rng: &mut SeededRng,
    ) -> Filled {
        let limit = overshoot_limit(budget, self.config.overshoot_percent);
        let planned_count = max_items.min(candidates.len()).max(1) as u32;
        let mut picked: Vec<(&Movement, Prescription)> = Vec::new();
        let mut used_seconds = 0_u32;

        for movement in candidates.iter().copied() {
            if picked.len() >= max_items || used_seconds >= budget {
                break;
            }
            let prescription = match style {
                SlotStyle::Prep => self.prep_prescription(budget, planned_count),
                SlotStyle::Recovery => recovery_prescription(budget, planned_count),
                SlotStyle::Strength => self.strength_prescription(movement, rng),
                _ => self.accessory_prescription(movement, rng),
            };
            let estimate = estimate_seconds(&prescription, movement, self.config);
            if !picked.is_empty() && used_seconds + estimate > limit {
                continue;
            }
            used_seconds += estimate;
            picked.push((movement, prescription));
        }

        if matches!(style, SlotStyle::Strength | SlotStyle::Accessory) {
            used_seconds = self.top_up_sets(&mut picked, used_seconds, budget, limit);
        }

        Filled {
            items: picked
                .into_iter()
                .map(|(movement, prescription)| item(movement, prescription))
                .collect(),
            seconds: used_seconds,
            workout_title: None,
            score_type: None,
            cues: self.sequential_cues(style),
        }
    }

    /// Add sets round-robin while the block is under budget and within safety bounds
    fn top_up_sets(
        &self,
        picked: &mut [(&Movement, Prescription)],
        mut used_seconds: u32,
        budget: u32,
        limit: u32,
    ) -> u32 {
        loop {
            let mut grew = false;
            for (movement, prescription) in picked.iter_mut() {
                if used_seconds >= budget {
                    return used_seconds;
                }
                let sets = prescription.sets();
                if sets >= self.config.max_sets {
                    continue;
                }
                let per_set = estimate_seconds(&prescription.with_sets(1), movement, self.config);
                if used_seconds + per_set > limit {
                    continue;
                }
                *prescription = prescription.with_sets(sets + 1);
                used_seconds += per_set;
                grew = true;
            }
            if !grew {
                return used_seconds;
            }
        }
    }

    fn fill_metcon(
        &self,
        candidates: &[&Movement],
        budget: u32,
        max_items: usize,
        rng: &mut SeededRng,
    ) -> Filled {
        let format = *rng.pick(&CircuitFormat::ALL).unwrap_or(&CircuitFormat::Amrap);
        let wanted = rng.range_inclusive(3, 5) as usize;
        let count = wanted.min(max_items).min(candidates.len());

        let mut items: Vec<(&Movement, Prescription)> = candidates
            .iter()
            .take(count)
            .map(|movement| (*movement, self.circuit_prescription(movement)))
            .collect();
        let round_seconds: u32 = items
            .iter()
            .map(|(movement, prescription)| estimate_seconds(prescription, movement, self.config))
            .sum::<u32>()
            .max(1);
        let minutes = (budget / 60).max(1);

        let (seconds, workout_title, score_type, cues) = match format {
            CircuitFormat::Amrap => (
                budget,
                format!("AMRAP {minutes}"),
                "rounds+reps",
                "Work each station for its full time at a pace you can hold; score rounds plus reps.",
            ),
            CircuitFormat::RoundsForReps => {
                let rounds = (budget / round_seconds).clamp(1, self.config.max_sets);
                for (_, prescription) in &mut items {
                    *prescription = prescription.with_sets(rounds);
                }
                (
                    rounds * round_seconds,
                    format!("{rounds} Rounds For Reps"),
                    "total reps",
                    "Count reps at every station and keep the transitions tight.",
                )
            }
            CircuitFormat::Emom => {
                let stations = count.max(1) as u32;
                let per_item = (minutes / stations).clamp(1, self.config.max_sets);
                let emom_minutes = minutes.min(per_item * stations);
                for (_, prescription) in &mut items {
                    *prescription = prescription.with_sets(per_item);
                }
                (
                    emom_minutes * 60,
                    format!("EMOM {emom_minutes}"),
                    "completion",
                    "Start each minute on the clock, work the station, rest with whatever remains.",
                )
            }
        };

        Filled {
            items: items
                .into_iter()
                .map(|(movement, prescription)| item(movement, prescription))
                .collect(),
            seconds,
            workout_title: Some(workout_title),
            score_type: Some(score_type.to_owned()),
            cues: cues.to_owned(),
        }
    }

    fn fill_intervals(
        &self,
        candidates: &[&Movement],
        budget: u32,
        max_items: usize,
        rng: &mut SeededRng,
    ) -> Filled {
        let intensity = u32::from(self.intensity);
        let rest = 40_u32.saturating_sub(2 * intensity).max(10);
        let base_work = 20 + 2 * intensity;
        let wanted = rng.range_inclusive(2, 4) as usize;
        let count = wanted.min(max_items).min(candidates.len()).max(1) as u32;

        let rounds = (budget / (count * (base_work + rest))).clamp(1, self.config.max_sets);
        let stretched = (budget / (rounds * count)).saturating_sub(rest);
        let work = stretched.clamp(base_work, base_work * 3);

        let items: Vec<BlockItem> = candidates
            .iter()
            .take(count as usize)
            .map(|movement| {
                item(
                    movement,
                    Prescription::Time {
                        sets: rounds,
                        seconds: work,
                        load: None,
                        rest_sec: rest,
                    },
                )
            })
            .collect();

        Filled {
            items,
            seconds: rounds * count * (work + rest),
            workout_title: Some(format!("{rounds} Rounds: {work}s On / {rest}s Off")),
            score_type: Some("total reps".to_owned()),
            cues: "Hit every work interval hard and recover fully in the rest.".to_owned(),
        }
    }

    fn fill_steady(&self, candidates: &[&Movement], budget: u32) -> Filled {
        let zone = aerobic_zone(self.intensity);
        let minutes = (budget / 60).max(1);
        let Some(movement) = candidates.first() else {
            return Filled::empty(budget);
        };

        let (prescription, score_type) = if is_monostructural(movement) {
            let total = round_down_to(
                (f64::from(budget) * pace_mps(movement)) as u32,
                50,
            )
            .max(50);
            let sets = total.div_ceil(MAX_METERS_PER_SET).max(1);
            (
                Prescription::Distance {
                    sets,
                    meters: round_down_to(total / sets, 50).max(50),
                    load: Some(zone.to_owned()),
                    rest_sec: 0,
                },
                "distance",
            )
        } else {
            let sets = budget.div_ceil(MAX_SECONDS_PER_SET).max(1);
            (
                Prescription::Time {
                    sets,
                    seconds: (budget / sets).max(1),
                    load: Some(zone.to_owned()),
                    rest_sec: 0,
                },
                "time",
            )
        };

        Filled {
            seconds: estimate_seconds(&prescription, movement, self.config),
            items: vec![item(movement, prescription)],
            workout_title: Some(format!("Steady {minutes}'")),
            score_type: Some(score_type.to_owned()),
            cues: format!("Hold a conversational {zone} effort throughout."),
        }
    }

    fn prep_prescription(&self, budget: u32, planned_count: u32) -> Prescription {
        let rest = 15;
        Prescription::Time {
            sets: 1,
            seconds: paced_hold(budget, planned_count, rest),
            load: None,
            rest_sec: rest.min(self.config.max_rest_sec),
        }
    }

    fn strength_prescription(&self, movement: &Movement, rng: &mut SeededRng) -> Prescription {
        let intensity = u32::from(self.intensity);
        let sets = (3 + u32::from(intensity >= 6) + u32::from(intensity >= 8))
            .min(self.config.max_sets);
        let rest_sec = (60 + 15 * intensity).min(self.config.max_rest_sec);
        let (low, high) = strength_rep_range(self.intensity);
        Prescription::Reps {
            sets,
            reps: rng.range_inclusive(low, high).min(self.config.max_reps),
            load: Some(strength_load(movement, self.intensity)),
            rest_sec,
        }
    }

    fn accessory_prescription(&self, movement: &Movement, rng: &mut SeededRng) -> Prescription {
        let intensity = u32::from(self.intensity);
        let sets = 3_u32.min(self.config.max_sets);
        let rest_sec = 90_u32.saturating_sub(5 * intensity).max(30);

        if has_pattern(movement, "isometric") {
            return Prescription::Time {
                sets,
                seconds: 20 + 3 * intensity,
                load: None,
                rest_sec,
            };
        }
        if has_pattern(movement, "carry") {
            return Prescription::Distance {
                sets,
                meters: 30 + 5 * intensity,
                load: accessory_load(movement, self.intensity),
                rest_sec,
            };
        }

        let (low, high) = if self.intensity <= 5 { (12, 15) } else { (8, 12) };
        Prescription::Reps {
            sets,
            reps: rng.range_inclusive(low, high).min(self.config.max_reps),
            load: accessory_load(movement, self.intensity),
            rest_sec,
        }
    }

    fn circuit_prescription(&self, movement: &Movement) -> Prescription {
        if is_monostructural(movement) {
            return Prescription::Distance {
                sets: 1,
                meters: circuit_meters(movement),
                load: None,
                rest_sec: 0,
            };
        }
        Prescription::Time {
            sets: 1,
            seconds: station_seconds(self.intensity),
            load: needs_external_load(movement)
                .then(|| if self.intensity >= 7 { "heavy" } else { "moderate" }.to_owned()),
            rest_sec: 0,
        }
    }

    fn sequential_cues(&self, style: SlotStyle) -> String {
        match style {
            SlotStyle::Prep => "Move through full range and raise temperature gradually.".to_owned(),
            SlotStyle::Recovery => "Breathe slowly and ease into each position.".to_owned(),
            SlotStyle::Strength => {
                let reserve = match self.intensity {
                    8..=u8::MAX => 1,
                    5..=7 => 2,
                    _ => 3,
                };
                format!("Build to your working weight, then leave {reserve} reps in reserve.")
            }
            _ => "Controlled tempo and full range; keep rest honest.".to_owned(),
        }
    }
}

/// Output of one fill strategy
struct Filled {
    items: Vec<BlockItem>,
    seconds: u32,
    workout_title: Option<String>,
    score_type: Option<String>,
    cues: String,
}

impl Filled {
    fn empty(budget: u32) -> Self {
        Self {
            items: Vec::new(),
            seconds: budget,
            workout_title: None,
            score_type: None,
            cues: String::new(),
        }
    }
}

fn recovery_prescription(budget: u32, planned_count: u32) -> Prescription {
    Prescription::Time {
        sets: 1,
        seconds: paced_hold(budget, planned_count, 0),
        load: None,
        rest_sec: 0,
    }
}

fn item(movement: &Movement, prescription: Prescription) -> BlockItem {
    BlockItem {
        movement_id: movement.id.clone(),
        name: movement.name.clone(),
        prescription,
    }
}

/// Estimated wall-clock seconds for a prescription, rest included
#[must_use]
pub fn estimate_seconds(
    prescription: &Prescription,
    movement: &Movement,
    config: &ComposerConfig,
) -> u32 {
    match prescription {
        Prescription::Reps {
            sets,
            reps,
            rest_sec,
            ..
        } => {
            let work = (f64::from(*reps) * config.seconds_per_rep).round() as u32;
            sets * (work + rest_sec)
        }
        Prescription::Time {
            sets,
            seconds,
            rest_sec,
            ..
        } => sets * (seconds + rest_sec),
        Prescription::Distance {
            sets,
            meters,
            rest_sec,
            ..
        } => {
            let work = (f64::from(*meters) / pace_mps(movement)).round() as u32;
            sets * (work + rest_sec)
        }
    }
}

/// Typical covered meters per second for distance work
#[must_use]
pub fn pace_mps(movement: &Movement) -> f64 {
    if has_pattern(movement, "bike") {
        7.0
    } else if has_pattern(movement, "row") {
        3.6
    } else if has_pattern(movement, "run") {
        3.3
    } else if has_pattern(movement, "carry") {
        1.2
    } else {
        2.5
    }
}

fn has_pattern(movement: &Movement, pattern: &str) -> bool {
    movement.patterns.contains(pattern)
}

fn is_monostructural(movement: &Movement) -> bool {
    movement.matches_any_pattern(&["run", "row", "bike"])
}

fn needs_external_load(movement: &Movement) -> bool {
    [BARBELL, DUMBBELL, KETTLEBELL, MEDICINE_BALL]
        .iter()
        .any(|kind| movement.required_equipment.contains(*kind))
}

/// Work seconds per circuit station; always leaves rest inside an EMOM minute
fn station_seconds(intensity: u8) -> u32 {
    30 + 2 * u32::from(intensity.min(10))
}

fn circuit_meters(movement: &Movement) -> u32 {
    if has_pattern(movement, "bike") {
        500
    } else if has_pattern(movement, "row") {
        250
    } else {
        200
    }
}

const fn strength_rep_range(intensity: u8) -> (u32, u32) {
    match intensity {
        0..=3 => (10, 12),
        4..=6 => (6, 8),
        7..=8 => (4, 5),
        _ => (2, 3),
    }
}

fn rpe(intensity: u8) -> u8 {
    (5 + intensity / 2).min(10)
}

fn strength_load(movement: &Movement, intensity: u8) -> String {
    if movement.required_equipment.contains(BARBELL) {
        let percent = round_to_nearest(50 + 4 * u32::from(intensity), 5);
        format!("~{percent}% 1RM")
    } else if needs_external_load(movement) {
        format!("RPE {}", rpe(intensity))
    } else {
        format!("bodyweight @ RPE {}", rpe(intensity))
    }
}

fn accessory_load(movement: &Movement, intensity: u8) -> Option<String> {
    needs_external_load(movement)
        .then(|| if intensity >= 7 { "challenging" } else { "moderate" }.to_owned())
}

const fn aerobic_zone(intensity: u8) -> &'static str {
    match intensity {
        0..=4 => "Zone 2",
        5..=7 => "Zone 3",
        _ => "Zone 4",
    }
}

/// Work seconds per item so `count` items with `rest` fill `budget`, rounded to 5s
fn paced_hold(budget: u32, count: u32, rest: u32) -> u32 {
    let raw = (budget / count.max(1)).saturating_sub(rest);
    round_to_nearest(raw, 5).clamp(20, 120)
}

fn overshoot_limit(budget: u32, overshoot_percent: f64) -> u32 {
    (f64::from(budget) * overshoot_percent / 100.0).floor() as u32
}

const fn round_to_nearest(value: u32, step: u32) -> u32 {
    (value + step / 2) / step * step
}

const fn round_down_to(value: u32, step: u32) -> u32 {
    value / step * step
}
