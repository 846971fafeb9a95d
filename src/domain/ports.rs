//! The coordinator's contract with its collaborators (§4.5, §6). Each trait
//! is a "plane": a named subsystem with a stable interface. The coordinator
//! only ever depends on these traits, never on a concrete implementation.

use async_trait::async_trait;

use crate::domain::plane_types::{ExecutionRequest, ExecutionUpdate, Position, PreTradeCheck};
use crate::domain::policy::{PolicyContext, PolicyDecisionBatch};
use crate::domain::signal::Signal;

#[async_trait]
pub trait PolicyLearningPlane: Send + Sync {
    async fn select_candidates(
        &self,
        candidates: &[Signal],
        context: &PolicyContext,
    ) -> PolicyDecisionBatch;
}

#[async_trait]
pub trait RiskCompliancePlane: Send + Sync {
    async fn validate_entry(&self, request: &ExecutionRequest, signal: &Signal) -> PreTradeCheck;
    async fn validate_exit(&self, market: &str, position: &Position, exit_price: f64) -> PreTradeCheck;
}

#[async_trait]
pub trait ExecutionPlane: Send + Sync {
    async fn submit(&self, request: &ExecutionRequest) -> bool;
    async fn cancel(&self, order_id: &str) -> bool;
    async fn poll(&self);
    async fn drain_updates(&self) -> Vec<ExecutionUpdate>;
}
