// ABOUTME: In-memory persistence for plans produced by the generate endpoint
// ABOUTME: Bounded sharded map keyed by plan id; the oldest plans are evicted past capacity
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use crate::config::environment::DEFAULT_MAX_STORED_PLANS;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use kinetic_core::models::{GenerationRequest, WorkoutPlan};
use kinetic_generator::GenerationOutcome;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// A plan persisted by `generate`, with the canonical request that reproduces it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlan {
    /// Plan id returned to the caller
    pub id: Uuid,
    /// When the plan was stored
    pub created_at: DateTime<Utc>,
    /// Canonical request
    pub request: GenerationRequest,
    /// The plan itself; its seed and generator version allow an exact replay
    pub plan: WorkoutPlan,
}

/// Plan store backed by a sharded concurrent `HashMap`
///
/// Holds at most `capacity` plans; inserting past that evicts the earliest inserted.
/// A plan evicted from the store can still be rebuilt through `replay` from its seed.
/// Cheap to clone; clones share the same map.
#[derive(Debug, Clone)]
pub struct PlanStore {
    /// plan id -> (insertion sequence, plan)
    plans: Arc<DashMap<Uuid, (u64, StoredPlan)>>,
    sequence: Arc<AtomicU64>,
    capacity: usize,
}

impl Default for PlanStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_STORED_PLANS)
    }
}

impl PlanStore {
    /// Empty store with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store holding at most `capacity` plans (at least one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            plans: Arc::new(DashMap::new()),
            sequence: Arc::new(AtomicU64::new(0)),
            capacity: capacity.max(1),
        }
    }

    /// Maximum number of plans kept
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Persist the plan of a generation outcome under a fresh id
    #[must_use]
    pub fn insert(&self, outcome: &GenerationOutcome) -> StoredPlan {
        let stored = StoredPlan {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            request: outcome.request.clone(),
            plan: outcome.plan.clone(),
        };
        let order = self.sequence.fetch_add(1, Ordering::Relaxed);
        debug!(plan.id = %stored.id, seed = %outcome.seed, "plan stored");
        self.plans.insert(stored.id, (order, stored.clone()));
        self.evict_overflow();
        stored
    }

    /// Look up a stored plan
    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<StoredPlan> {
        self.plans.get(id).map(|entry| entry.value().1.clone())
    }

    fn evict_overflow(&self) {
        while self.plans.len() > self.capacity {
            let oldest = self
                .plans
                .iter()
                .min_by_key(|entry| entry.value().0)
                .map(|entry| *entry.key());
            let Some(id) = oldest else {
                return;
            };
            if self.plans.remove(&id).is_some() {
                info!(plan.id = %id, capacity = self.capacity, "evicted oldest stored plan");
            }
        }
    }

    /// Number of stored plans
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether nothing has been stored yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
