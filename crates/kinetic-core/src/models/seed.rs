// ABOUTME: Opaque reproducibility seed and generator version tag
// ABOUTME: Identical seed + request + version must always yield an identical plan
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use crate::constants::generator::CURRENT_VERSION;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reproducibility key. Any string is accepted; the engine hashes it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(String);

impl Seed {
    /// Wrap a caller-supplied seed string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Seed text as supplied
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Tag of the algorithm revision used to interpret a seed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratorVersion(String);

impl GeneratorVersion {
    /// Wrap a version tag
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The revision implemented by this build
    #[must_use]
    pub fn current() -> Self {
        Self(CURRENT_VERSION.to_owned())
    }

    /// Version text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneratorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
