//! Algorithms and services that operate on the domain types: indicator math,
//! regime classification, performance aggregation, the policy controller,
//! and the coordinator that fans out to collaborator planes.

pub mod coordinator;
pub mod indicators;
pub mod legacy_policy_adapter;
pub mod performance_store;
pub mod policy_controller;
pub mod regime_detector;

pub use coordinator::{CoordinatorConfig, TradingCycleCoordinator};
pub use legacy_policy_adapter::LegacyPolicyAdapter;
pub use performance_store::PerformanceStore;
pub use policy_controller::{AdaptivePolicyController, PolicyInput, PolicyOutput};
pub use regime_detector::RegimeDetector;
