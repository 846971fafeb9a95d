use serde::Serialize;

use crate::domain::regime::MarketRegime;
use crate::domain::signal::Signal;

/// Caller-supplied context for one policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyContext {
    pub small_seed_mode: bool,
    pub max_new_orders_per_scan: i32,
    pub dominant_regime: MarketRegime,
}

impl Default for PolicyContext {
    fn default() -> Self {
        Self {
            small_seed_mode: false,
            max_new_orders_per_scan: 1,
            dominant_regime: MarketRegime::Unknown,
        }
    }
}

/// Why a candidate was (or wasn't) selected. Serializes to the exact
/// lowercase tokens named in the data model, matching the journal and CSV
/// conventions elsewhere in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    Selected,
    DroppedLowStrength,
    DroppedSmallSeedQuality,
    DroppedSmallSeedLiqvol,
    DroppedCapacity,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::Selected => "selected",
            DropReason::DroppedLowStrength => "dropped_low_strength",
            DropReason::DroppedSmallSeedQuality => "dropped_small_seed_quality",
            DropReason::DroppedSmallSeedLiqvol => "dropped_small_seed_liqvol",
            DropReason::DroppedCapacity => "dropped_capacity",
        }
    }
}

/// Per-candidate audit row explaining the policy outcome. This IS the
/// user-visible explanation of why a candidate was accepted or dropped (§7).
#[derive(Debug, Clone, Serialize)]
pub struct PolicyDecisionRecord {
    pub market: String,
    pub strategy_name: String,
    pub selected: bool,
    pub reason: DropReason,
    pub base_score: f64,
    pub policy_score: f64,
    pub strength: f64,
    pub expected_value: f64,
    pub liquidity_score: f64,
    pub volatility: f64,
    pub strategy_trades: i32,
    pub strategy_win_rate: f64,
    pub strategy_profit_factor: f64,
}

/// Result of one `select_candidates` call at the plane boundary.
#[derive(Debug, Clone, Default)]
pub struct PolicyDecisionBatch {
    pub selected_candidates: Vec<Signal>,
    pub dropped_by_policy: i32,
    pub decisions: Vec<PolicyDecisionRecord>,
}
