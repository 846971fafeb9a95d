//! Trading-Cycle Coordinator (§4.5): thin fan-out over the three plane
//! interfaces with an explicit, tested null-plane pass-through contract.
//! Grounded on `TradingCycleCoordinator.cpp`'s default-collaborator behavior.

use std::sync::Arc;

use crate::domain::errors::ConfigError;
use crate::domain::plane_types::{ExecutionRequest, ExecutionUpdate, Position, PreTradeCheck};
use crate::domain::policy::{PolicyContext, PolicyDecisionBatch};
use crate::domain::ports::{ExecutionPlane, PolicyLearningPlane, RiskCompliancePlane};
use crate::domain::signal::Signal;

const RISK_PLANE_UNSET_REASON: &str = "risk_plane_unset";

/// Construction-time wiring for [`TradingCycleCoordinator`]: which planes are
/// attached (each is independently optional — §4.5's null-plane contract) and
/// the default scan capacity the coordinator is configured for. Validated
/// once at construction via [`CoordinatorConfig::validate`], not per cycle
/// (§7).
#[derive(Clone, Default)]
pub struct CoordinatorConfig {
    pub policy_plane: Option<Arc<dyn PolicyLearningPlane>>,
    pub risk_plane: Option<Arc<dyn RiskCompliancePlane>>,
    pub execution_plane: Option<Arc<dyn ExecutionPlane>>,
    pub max_new_orders_per_scan: i32,
}

impl CoordinatorConfig {
    pub fn new(max_new_orders_per_scan: i32) -> Self {
        Self {
            policy_plane: None,
            risk_plane: None,
            execution_plane: None,
            max_new_orders_per_scan,
        }
    }

    pub fn with_policy_plane(mut self, plane: Arc<dyn PolicyLearningPlane>) -> Self {
        self.policy_plane = Some(plane);
        self
    }

    pub fn with_risk_plane(mut self, plane: Arc<dyn RiskCompliancePlane>) -> Self {
        self.risk_plane = Some(plane);
        self
    }

    pub fn with_execution_plane(mut self, plane: Arc<dyn ExecutionPlane>) -> Self {
        self.execution_plane = Some(plane);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_new_orders_per_scan < 1 {
            return Err(ConfigError::InvalidCapacity(self.max_new_orders_per_scan));
        }
        Ok(())
    }
}

/// Holds optional references to each plane. A `None` plane is not an error
/// condition (§7 MissingCollaborator) — each method below documents its
/// pass-through behavior for that case.
#[derive(Clone, Default)]
pub struct TradingCycleCoordinator {
    policy_plane: Option<Arc<dyn PolicyLearningPlane>>,
    risk_plane: Option<Arc<dyn RiskCompliancePlane>>,
    execution_plane: Option<Arc<dyn ExecutionPlane>>,
    max_new_orders_per_scan: i32,
}

impl TradingCycleCoordinator {
    /// Validates `config`, then builds a coordinator from its plane wiring.
    pub fn new(config: CoordinatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            policy_plane: config.policy_plane,
            risk_plane: config.risk_plane,
            execution_plane: config.execution_plane,
            max_new_orders_per_scan: config.max_new_orders_per_scan,
        })
    }

    /// The scan capacity this coordinator was configured with, for callers
    /// building the per-cycle `PolicyContext` consistently with it.
    pub fn max_new_orders_per_scan(&self) -> i32 {
        self.max_new_orders_per_scan
    }

    /// All candidates selected, no decisions, when no policy plane is wired.
    pub async fn select_policy_candidates(&self, candidates: &[Signal], context: &PolicyContext) -> PolicyDecisionBatch {
        match &self.policy_plane {
            Some(plane) => plane.select_candidates(candidates, context).await,
            None => PolicyDecisionBatch {
                selected_candidates: candidates.to_vec(),
                dropped_by_policy: 0,
                decisions: Vec::new(),
            },
        }
    }

    /// `{allowed: true, reason: "risk_plane_unset"}` when no risk plane is wired.
    pub async fn validate_entry(&self, request: &ExecutionRequest, signal: &Signal) -> PreTradeCheck {
        match &self.risk_plane {
            Some(plane) => plane.validate_entry(request, signal).await,
            None => PreTradeCheck::allowed(RISK_PLANE_UNSET_REASON),
        }
    }

    /// `{allowed: true, reason: "risk_plane_unset"}` when no risk plane is wired.
    pub async fn validate_exit(&self, market: &str, position: &Position, exit_price: f64) -> PreTradeCheck {
        match &self.risk_plane {
            Some(plane) => plane.validate_exit(market, position, exit_price).await,
            None => PreTradeCheck::allowed(RISK_PLANE_UNSET_REASON),
        }
    }

    /// `false` when no execution plane is wired.
    pub async fn submit(&self, request: &ExecutionRequest) -> bool {
        match &self.execution_plane {
            Some(plane) => plane.submit(request).await,
            None => false,
        }
    }

    /// `false` when no execution plane is wired.
    pub async fn cancel(&self, order_id: &str) -> bool {
        match &self.execution_plane {
            Some(plane) => plane.cancel(order_id).await,
            None => false,
        }
    }

    /// No-op when no execution plane is wired.
    pub async fn poll_execution(&self) {
        if let Some(plane) = &self.execution_plane {
            plane.poll().await;
        }
    }

    /// Empty when no execution plane is wired.
    pub async fn drain_execution_updates(&self) -> Vec<ExecutionUpdate> {
        match &self.execution_plane {
            Some(plane) => plane.drain_updates().await,
            None => Vec::new(),
        }
    }
}
