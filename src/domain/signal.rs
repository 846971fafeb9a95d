use serde::{Deserialize, Serialize};

use crate::domain::regime::MarketRegime;

/// Directional classification a strategy attaches to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    None,
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Default for SignalKind {
    fn default() -> Self {
        SignalKind::None
    }
}

/// A candidate trading signal considered by the policy controller this cycle.
///
/// Fields without data use `0` (or the kind-appropriate zero value) as a
/// sentinel rather than `Option` — the controller never rejects a candidate
/// for having unpopulated fields, it only scores what it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub market: String,
    pub strategy_name: String,
    pub strength: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub position_size_ratio: f64,
    pub reason: String,
    pub timestamp_ms: i64,
    pub score: f64,
    pub liquidity_score: f64,
    pub volatility: f64,
    pub expected_value: f64,
    pub market_regime: MarketRegime,
    pub strategy_trade_count: i32,
    pub strategy_win_rate: f64,
    pub strategy_profit_factor: f64,
}

impl Default for Signal {
    fn default() -> Self {
        Self {
            kind: SignalKind::None,
            market: String::new(),
            strategy_name: String::new(),
            strength: 0.0,
            entry_price: 0.0,
            stop_loss: 0.0,
            take_profit: 0.0,
            position_size_ratio: 0.0,
            reason: String::new(),
            timestamp_ms: 0,
            score: 0.0,
            liquidity_score: 0.0,
            volatility: 0.0,
            expected_value: 0.0,
            market_regime: MarketRegime::Unknown,
            strategy_trade_count: 0,
            strategy_win_rate: 0.0,
            strategy_profit_factor: 0.0,
        }
    }
}
