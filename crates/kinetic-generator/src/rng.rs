// ABOUTME: Pure deterministic pseudo-random source keyed by an explicit seed string
// ABOUTME: Every stochastic choice in the pipeline draws from here, never from ambient entropy
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Seeded RNG
//!
//! The seed text is hashed with SHA-256 into a `ChaCha8` key, so any string (empty,
//! unicode, very long) is a valid seed. [`SeededRng::next`] is the pure primitive:
//! the same state always yields the same `(value, next_state)` pair. The `&mut self`
//! helpers are conveniences built on that primitive for threading a cursor through
//! the pipeline.
//!
//! Fresh seeds are minted only at the boundary ([`mint_seed`]); the clock and OS
//! entropy are read there once and never during a draw.

use chrono::Utc;
use kinetic_core::models::Seed;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Scale factor mapping the top 53 bits of a `u64` into `[0, 1)`
const UNIT_SCALE: f64 = 1.0 / (1_u64 << 53) as f64;

/// Deterministic draw cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    draws: u64,
}

impl SeededRng {
    /// Key a new cursor from a seed. Malformed or empty seeds are hashed like any other.
    #[must_use]
    pub fn from_seed(seed: &Seed) -> Self {
        let digest = Sha256::digest(seed.as_str().as_bytes());
        let mut key = [0_u8; 32];
        key.copy_from_slice(&digest);
        Self {
            inner: ChaCha8Rng::from_seed(key),
            draws: 0,
        }
    }

    /// Pure draw: a value in `[0, 1)` and the successor state. `self` is untouched.
    #[must_use]
    pub fn next(&self) -> (f64, Self) {
        let mut successor = self.clone();
        let value = successor.next_f64();
        (value, successor)
    }

    /// Draw a value in `[0, 1)` and advance the cursor
    pub fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        (self.inner.next_u64() >> 11) as f64 * UNIT_SCALE
    }

    /// Draw an index in `0..len`. `len` of zero returns zero and still advances, so the
    /// cursor position never depends on collection sizes.
    pub fn index(&mut self, len: usize) -> usize {
        let value = self.next_f64();
        if len == 0 {
            return 0;
        }
        ((value * len as f64) as usize).min(len - 1)
    }

    /// Pick one element, or `None` for an empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = self.index(items.len());
        items.get(idx)
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    /// Integer in `[low, high]`, inclusive
    pub fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            self.next_f64();
            return low;
        }
        let span = (high - low) as usize + 1;
        low + self.index(span) as u32
    }

    /// Number of values drawn so far
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

/// Mint a fresh seed at the boundary: UTC timestamp plus 64 random bits
#[must_use]
pub fn mint_seed() -> Seed {
    let millis = Utc::now().timestamp_millis();
    let mut entropy = [0_u8; 8];
    rand::thread_rng().fill_bytes(&mut entropy);
    Seed::new(format!("{millis:x}-{}", hex::encode(entropy)))
}

/// Mint a seed guaranteed to differ from `previous`
#[must_use]
pub fn mint_seed_distinct_from(previous: &Seed) -> Seed {
    let fresh = mint_seed();
    if &fresh == previous {
        return Seed::new(format!("{fresh}-r"));
    }
    fresh
}
