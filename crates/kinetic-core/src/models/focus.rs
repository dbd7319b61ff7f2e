// ABOUTME: Workout focus enumeration (strength, conditioning, mixed, endurance)
// ABOUTME: Parsing accepts the archetype aliases used by the client wizards
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// High-level workout style requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    /// Heavy compound lifting with accessory work
    Strength,
    /// Metabolic circuits and intervals
    Conditioning,
    /// A strength piece followed by conditioning
    Mixed,
    /// Long aerobic efforts
    Endurance,
}

impl Focus {
    /// Every supported focus, in canonical order
    pub const ALL: [Self; 4] = [
        Self::Strength,
        Self::Conditioning,
        Self::Mixed,
        Self::Endurance,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Conditioning => "conditioning",
            Self::Mixed => "mixed",
            Self::Endurance => "endurance",
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Focus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "power" => Ok(Self::Strength),
            "conditioning" | "metcon" | "hiit" => Ok(Self::Conditioning),
            "mixed" | "hybrid" => Ok(Self::Mixed),
            "endurance" | "aerobic" => Ok(Self::Endurance),
            _ => Err(ValidationError::unknown_focus(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_focus_aliases() {
        assert_eq!("Strength".parse::<Focus>(), Ok(Focus::Strength));
        assert_eq!(" hybrid ".parse::<Focus>(), Ok(Focus::Mixed));
        assert_eq!("hiit".parse::<Focus>(), Ok(Focus::Conditioning));
    }

    #[test]
    fn test_unknown_focus_is_rejected() {
        let err = "yoga".parse::<Focus>().unwrap_err();
        assert_eq!(err.field(), "focus");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for focus in Focus::ALL {
            assert_eq!(focus.to_string().parse::<Focus>(), Ok(focus));
        }
    }
}
