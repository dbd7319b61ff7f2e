// ABOUTME: Workout template tables and the seeded template selector
// ABOUTME: Maps focus and duration to an ordered block skeleton with exact second splits
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Template Selector
//!
//! Templates are static tables. Selection draws exactly one RNG value and maps it onto
//! the eligible templates for the focus and duration, even when only one template is
//! eligible. Changing any table here changes what a seed produces, so it requires a
//! generator version bump.

use crate::rng::SeededRng;
use kinetic_core::models::{BlockKey, Focus};
use serde::Serialize;

/// How a slot is filled and prescribed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStyle {
    /// Warm-up mobility and activation
    Prep,
    /// Heavy compound lifting
    Strength,
    /// Secondary strength and core work
    Accessory,
    /// Mixed-modal circuit of timed stations (AMRAP, rounds for reps, EMOM)
    Metcon,
    /// Work/rest intervals
    Intervals,
    /// Single continuous aerobic effort
    Steady,
    /// Cool-down stretching
    Recovery,
}

/// One slot of a template skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotSpec {
    /// Phase
    pub key: BlockKey,
    /// Block title
    pub title: &'static str,
    /// Share of the session in percent
    pub share_percent: u32,
    /// Fill and prescription style
    pub style: SlotStyle,
}

/// Static workout skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkoutTemplate {
    /// Stable identifier
    pub id: &'static str,
    /// Display name, used as the plan title
    pub name: &'static str,
    /// Focus this template serves
    pub focus: Focus,
    /// Shortest eligible session
    pub min_minutes: u32,
    /// Longest eligible session
    pub max_minutes: u32,
    /// Ordered slots; shares sum to 100
    pub slots: &'static [SlotSpec],
}

impl WorkoutTemplate {
    /// Whether the template can serve a session of `minutes`
    #[must_use]
    pub const fn fits(&self, minutes: u32) -> bool {
        minutes >= self.min_minutes && minutes <= self.max_minutes
    }
}

/// A slot with its time budget resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedSlot {
    /// Slot definition
    pub spec: SlotSpec,
    /// Seconds allotted to the slot
    pub target_seconds: u32,
}

/// Result of template selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSelection {
    /// Chosen template
    pub template: &'static WorkoutTemplate,
    /// Slots with budgets summing exactly to the session length
    pub slots: Vec<PlannedSlot>,
    /// Number of templates that were eligible
    pub eligible_count: usize,
}

const fn slot(key: BlockKey, title: &'static str, share_percent: u32, style: SlotStyle) -> SlotSpec {
    SlotSpec {
        key,
        title,
        share_percent,
        style,
    }
}

const WARMUP: BlockKey = BlockKey::Warmup;
const MAIN: BlockKey = BlockKey::Main;
const ACCESSORY: BlockKey = BlockKey::Accessory;
const CONDITIONING: BlockKey = BlockKey::Conditioning;
const COOLDOWN: BlockKey = BlockKey::Cooldown;

/// Every template, grouped by focus in canonical order
pub static TEMPLATES: &[WorkoutTemplate] = &[
    WorkoutTemplate {
        id: "strength-heavy-split",
        name: "Heavy Compound Split",
        focus: Focus::Strength,
        min_minutes: 30,
        max_minutes: 60,
        slots: &[
            slot(WARMUP, "Warm-up", 10, SlotStyle::Prep),
            slot(MAIN, "Primary Lift", 35, SlotStyle::Strength),
            slot(MAIN, "Secondary Lift", 25, SlotStyle::Strength),
            slot(ACCESSORY, "Accessory Work", 20, SlotStyle::Accessory),
            slot(COOLDOWN, "Cool-down", 10, SlotStyle::Recovery),
        ],
    },
    WorkoutTemplate {
        id: "strength-foundations",
        name: "Strength Foundations",
        focus: Focus::Strength,
        min_minutes: 20,
        max_minutes: 60,
        slots: &[
            slot(WARMUP, "Warm-up", 10, SlotStyle::Prep),
            slot(MAIN, "Main Lifts", 55, SlotStyle::Strength),
            slot(ACCESSORY, "Accessory Work", 25, SlotStyle::Accessory),
            slot(COOLDOWN, "Cool-down", 10, SlotStyle::Recovery),
        ],
    },
    WorkoutTemplate {
        id: "strength-primer",
        name: "Short Strength Primer",
        focus: Focus::Strength,
        min_minutes: 10,
        max_minutes: 20,
        slots: &[
            slot(WARMUP, "Warm-up", 15, SlotStyle::Prep),
            slot(MAIN, "Main Lift", 75, SlotStyle::Strength),
            slot(COOLDOWN, "Cool-down", 10, SlotStyle::Recovery),
        ],
    },
    WorkoutTemplate {
        id: "conditioning-single-piece",
        name: "Single Engine Piece",
        focus: Focus::Conditioning,
        min_minutes: 10,
        max_minutes: 60,
        slots: &[
            slot(WARMUP, "Warm-up", 10, SlotStyle::Prep),
            slot(CONDITIONING, "Conditioning", 80, SlotStyle::Metcon),
            slot(COOLDOWN, "Cool-down", 10, SlotStyle::Recovery),
        ],
    },
    WorkoutTemplate {
        id: "conditioning-interval-ladder",
        name: "Interval Ladder",
        focus: Focus::Conditioning,
        min_minutes: 10,
        max_minutes: 60,
        slots: &[
            slot(WARMUP, "Warm-up", 15, SlotStyle::Prep),
            slot(CONDITIONING, "Intervals", 70, SlotStyle::Intervals),
            slot(COOLDOWN, "Cool-down", 15, SlotStyle::Recovery),
        ],
    },
    WorkoutTemplate {
        id: "mixed-strength-metcon",
        name: "Strength + Metcon",
        focus: Focus::Mixed,
        min_minutes: 25,
        max_minutes: 60,
        slots: &[
            slot(WARMUP, "Warm-up", 10, SlotStyle::Prep),
            slot(MAIN, "Strength", 40, SlotStyle::Strength),
            slot(CONDITIONING, "Metcon", 40, SlotStyle::Metcon),
            slot(COOLDOWN, "Cool-down", 10, SlotStyle::Recovery),
        ],
    },
    WorkoutTemplate {
        id: "mixed-hybrid-circuit",
        name: "Hybrid Circuit",
        focus: Focus::Mixed,
        min_minutes: 35,
        max_minutes: 60,
        slots: &[
            slot(WARMUP, "Warm-up", 10, SlotStyle::Prep),
            slot(MAIN, "Strength", 30, SlotStyle::Strength),
            slot(ACCESSORY, "Accessory Superset", 20, SlotStyle::Accessory),
            slot(CONDITIONING, "Finisher", 30, SlotStyle::Metcon),
            slot(COOLDOWN, "Cool-down", 10, SlotStyle::Recovery),
        ],
    },
    WorkoutTemplate {
        id: "mixed-express",
        name: "Express Hybrid",
        focus: Focus::Mixed,
        min_minutes: 10,
        max_minutes: 30,
        slots: &[
            slot(WARMUP, "Warm-up", 10, SlotStyle::Prep),
            slot(MAIN, "Strength", 35, SlotStyle::Strength),
            slot(CONDITIONING, "Intervals", 45, SlotStyle::Intervals),
            slot(COOLDOWN, "Cool-down", 10, SlotStyle::Recovery),
        ],
    },
    WorkoutTemplate {
        id: "endurance-steady",
        name: "Steady Aerobic",
        focus: Focus::Endurance,
        min_minutes: 10,
        max_minutes: 60,
        slots: &[
            slot(WARMUP, "Warm-up", 10, SlotStyle::Prep),
            slot(CONDITIONING, "Aerobic Base", 80, SlotStyle::Steady),
            slot(COOLDOWN, "Cool-down", 10, SlotStyle::Recovery),
        ],
    },
    WorkoutTemplate {
        id: "endurance-tempo-builder",
        name: "Tempo Builder",
        focus: Focus::Endurance,
        min_minutes: 30,
        max_minutes: 60,
        slots: &[
            slot(WARMUP, "Warm-up", 15, SlotStyle::Prep),
            slot(CONDITIONING, "Tempo Block", 55, SlotStyle::Steady),
            slot(CONDITIONING, "Surges", 20, SlotStyle::Intervals),
            slot(COOLDOWN, "Cool-down", 10, SlotStyle::Recovery),
        ],
    },
];

/// Templates serving `focus`, in table order
pub fn templates_for(focus: Focus) -> impl Iterator<Item = &'static WorkoutTemplate> {
    TEMPLATES.iter().filter(move |t| t.focus == focus)
}

/// Templates serving `focus` at `minutes`; falls back to every template of the focus
/// when none fits
#[must_use]
pub fn eligible_templates(focus: Focus, minutes: u32) -> Vec<&'static WorkoutTemplate> {
    let fitting: Vec<_> = templates_for(focus).filter(|t| t.fits(minutes)).collect();
    if fitting.is_empty() {
        templates_for(focus).collect()
    } else {
        fitting
    }
}

/// Template by identifier
#[must_use]
pub fn template_by_id(id: &str) -> Option<&'static WorkoutTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Choose a template with one draw and resolve slot budgets
#[must_use]
pub fn select_template(focus: Focus, minutes: u32, rng: &mut SeededRng) -> TemplateSelection {
    let eligible = eligible_templates(focus, minutes);
    let idx = rng.index(eligible.len());
    // Every focus has at least one template, so the table fallback is unreachable
    let template = eligible.get(idx).copied().unwrap_or(&TEMPLATES[0]);
    TemplateSelection {
        template,
        slots: plan_slots(template, minutes * 60),
        eligible_count: eligible.len(),
    }
}

/// Split `total_seconds` across the template slots by largest remainder so the
/// budgets sum exactly to the total
#[must_use]
pub fn plan_slots(template: &WorkoutTemplate, total_seconds: u32) -> Vec<PlannedSlot> {
    let share_total: u32 = template.slots.iter().map(|s| s.share_percent).sum::<u32>().max(1);
    let mut budgets: Vec<(u32, u32)> = template
        .slots
        .iter()
        .map(|s| {
            let exact = u64::from(total_seconds) * u64::from(s.share_percent);
            let share_total = u64::from(share_total);
            ((exact / share_total) as u32, (exact % share_total) as u32)
        })
        .collect();

    let assigned: u32 = budgets.iter().map(|(base, _)| base).sum();
    let mut order: Vec<usize> = (0..budgets.len()).collect();
    order.sort_by(|a, b| budgets[*b].1.cmp(&budgets[*a].1).then(a.cmp(b)));
    for idx in order
        .into_iter()
        .take(total_seconds.saturating_sub(assigned) as usize)
    {
        budgets[idx].0 += 1;
    }

    template
        .slots
        .iter()
        .zip(budgets)
        .map(|(spec, (target_seconds, _))| PlannedSlot {
            spec: *spec,
            target_seconds,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::models::Seed;

    #[test]
    fn test_template_shares_sum_to_one_hundred() {
        for template in TEMPLATES {
            let total: u32 = template.slots.iter().map(|s| s.share_percent).sum();
            assert_eq!(total, 100, "{}", template.id);
        }
    }

    #[test]
    fn test_every_focus_and_duration_has_a_fitting_template() {
        for focus in Focus::ALL {
            for minutes in 10..=60 {
                assert!(
                    templates_for(focus).any(|t| t.fits(minutes)),
                    "{focus} at {minutes} min"
                );
            }
        }
    }

    #[test]
    fn test_template_ids_are_unique() {
        for (i, a) in TEMPLATES.iter().enumerate() {
            for b in &TEMPLATES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
        assert!(template_by_id("strength-primer").is_some());
        assert!(template_by_id("nope").is_none());
    }

    #[test]
    fn test_slot_budgets_sum_exactly() {
        for template in TEMPLATES {
            for minutes in [10, 17, 23, 30, 45, 59, 60] {
                let total = minutes * 60;
                let slots = plan_slots(template, total);
                let sum: u32 = slots.iter().map(|s| s.target_seconds).sum();
                assert_eq!(sum, total, "{} at {minutes}", template.id);
            }
        }
    }

    #[test]
    fn test_selection_draws_exactly_once() {
        let mut rng = SeededRng::from_seed(&Seed::from("one-draw"));
        let selection = select_template(Focus::Strength, 12, &mut rng);

        assert_eq!(selection.eligible_count, 1);
        assert_eq!(selection.template.id, "strength-primer");
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_selection_respects_focus_and_duration() {
        for focus in Focus::ALL {
            for seed in 0..50 {
                let mut rng = SeededRng::from_seed(&Seed::new(format!("s{seed}")));
                let selection = select_template(focus, 30, &mut rng);
                assert_eq!(selection.template.focus, focus);
                assert!(selection.template.fits(30));
            }
        }
    }

    #[test]
    fn test_selection_is_deterministic() {
        let mut a = SeededRng::from_seed(&Seed::from("abc"));
        let mut b = SeededRng::from_seed(&Seed::from("abc"));

        assert_eq!(
            select_template(Focus::Mixed, 40, &mut a),
            select_template(Focus::Mixed, 40, &mut b)
        );
    }

    #[test]
    fn test_strength_templates_have_multiple_strength_blocks() {
        let heavy = template_by_id("strength-heavy-split").unwrap();
        let strength_slots = heavy
            .slots
            .iter()
            .filter(|s| matches!(s.key, BlockKey::Main | BlockKey::Accessory))
            .count();
        assert!(strength_slots >= 3);

        let single = template_by_id("conditioning-single-piece").unwrap();
        let longest = single.slots.iter().map(|s| s.share_percent).max().unwrap();
        assert!(longest >= 70);
    }
}
