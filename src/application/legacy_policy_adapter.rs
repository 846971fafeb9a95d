//! Concrete `PolicyLearningPlane` wiring the coordinator is normally built
//! with (§4.6). Translates `PolicyContext` + candidates into a `PolicyInput`,
//! borrows the performance store's tables if one is attached, and re-wraps
//! the controller's output as the plane-boundary `PolicyDecisionBatch`.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::performance_store::PerformanceStore;
use crate::application::policy_controller::{AdaptivePolicyController, PolicyInput};
use crate::domain::policy::{PolicyContext, PolicyDecisionBatch};
use crate::domain::ports::PolicyLearningPlane;
use crate::domain::signal::Signal;

/// Holds the pure controller plus an optional, swappable performance store
/// reference. The store can be replaced at runtime (e.g. after a periodic
/// `rebuild`) without reconstructing the adapter.
pub struct LegacyPolicyAdapter {
    performance_store: RwLock<Option<PerformanceStore>>,
}

impl LegacyPolicyAdapter {
    pub fn new() -> Self {
        Self {
            performance_store: RwLock::new(None),
        }
    }

    pub fn with_performance_store(store: PerformanceStore) -> Self {
        Self {
            performance_store: RwLock::new(Some(store)),
        }
    }

    /// Swaps the attached performance store reference without rebuilding the
    /// adapter itself.
    pub fn set_performance_store(&self, store: PerformanceStore) {
        *self.performance_store.write().expect("performance store lock poisoned") = Some(store);
    }

    pub fn clear_performance_store(&self) {
        *self.performance_store.write().expect("performance store lock poisoned") = None;
    }
}

impl Default for LegacyPolicyAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PolicyLearningPlane for LegacyPolicyAdapter {
    async fn select_candidates(&self, candidates: &[Signal], context: &PolicyContext) -> PolicyDecisionBatch {
        let guard = self.performance_store.read().expect("performance store lock poisoned");

        let input = match guard.as_ref() {
            Some(store) => PolicyInput {
                candidates,
                small_seed_mode: context.small_seed_mode,
                max_new_orders_per_scan: context.max_new_orders_per_scan,
                dominant_regime: context.dominant_regime,
                by_strategy: Some(store.by_strategy()),
                by_bucket: Some(store.by_bucket()),
            },
            None => PolicyInput {
                candidates,
                small_seed_mode: context.small_seed_mode,
                max_new_orders_per_scan: context.max_new_orders_per_scan,
                dominant_regime: context.dominant_regime,
                by_strategy: None,
                by_bucket: None,
            },
        };

        AdaptivePolicyController::select(&input)
    }
}
