//! Deterministic fixture builders shared across unit and integration tests.
//! Not part of the public API surface — compiled only under `#[cfg(test)]`.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::candle::Candle;
use crate::domain::performance::TradeHistory;
use crate::domain::regime::MarketRegime;
use crate::domain::signal::{Signal, SignalKind};

/// A `Signal` with reasonable, gate-passing defaults. Override individual
/// fields with struct-update syntax in call sites that need a specific edge
/// case.
pub fn signal_fixture(market: &str, strategy: &str) -> Signal {
    Signal {
        kind: SignalKind::Buy,
        market: market.to_string(),
        strategy_name: strategy.to_string(),
        strength: 0.75,
        entry_price: 100.0,
        stop_loss: 95.0,
        take_profit: 112.0,
        position_size_ratio: 1.0,
        reason: "fixture".to_string(),
        timestamp_ms: Utc::now().timestamp_millis(),
        score: 0.6,
        liquidity_score: 65.0,
        volatility: 2.0,
        expected_value: 0.0025,
        market_regime: MarketRegime::Ranging,
        strategy_trade_count: 0,
        strategy_win_rate: 0.0,
        strategy_profit_factor: 0.0,
    }
}

/// A unique but deterministic-shaped entity id for journal/execution fixtures.
pub fn fixture_entity_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// `count` ascending candles starting at `start_close`, each bar moving by
/// `step` with a small fixed high/low spread around the close.
pub fn candle_series(count: usize, start_close: f64, step: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = start_close + step * i as f64;
            let spread = close.abs().max(1.0) * 0.005;
            Candle::new(i as i64 * 60_000, close, close + spread, close - spread, close, 1_000.0)
        })
        .collect()
}

/// A single realized trade outcome for performance-store fixtures.
pub fn trade_fixture(strategy: &str, regime: MarketRegime, liquidity_score: f64, profit_loss: f64) -> TradeHistory {
    TradeHistory {
        strategy_name: strategy.to_string(),
        market_regime: regime,
        liquidity_score,
        profit_loss,
    }
}
