//! Market regime classification (§4.1). Pure function of a candle window;
//! grounded on the teacher's `MarketRegimeDetector`, generalized to the
//! five-regime/description contract and the Wilder indicator functions in
//! [`super::indicators`].

use tracing::debug;

use crate::application::indicators::{ema, wilder_adx, wilder_atr};
use crate::domain::candle::Candle;
use crate::domain::regime::{MarketRegime, RegimeAnalysis};

const LOOKBACK: usize = 50;
const ADX_ATR_PERIOD: usize = 14;
const FAST_EMA: usize = 20;
const SLOW_EMA: usize = 50;
const VOLATILITY_GATE_PCT: f64 = 2.0;
const TREND_ADX_THRESHOLD: f64 = 25.0;

/// Classifies the most recent window of candles into a [`MarketRegime`].
pub struct RegimeDetector;

impl RegimeDetector {
    /// Requires at least 50 candles; returns `RegimeAnalysis::insufficient_data()`
    /// otherwise. See §4.1 for the full six-step algorithm this implements.
    pub fn analyze(candles: &[Candle]) -> RegimeAnalysis {
        if candles.len() < LOOKBACK {
            debug!(candles = candles.len(), "insufficient candles for regime analysis");
            return RegimeAnalysis::insufficient_data();
        }

        let last_close = candles.last().expect("checked len >= LOOKBACK").close;
        let adx = wilder_adx(candles, ADX_ATR_PERIOD);
        let atr = wilder_atr(candles, ADX_ATR_PERIOD);
        let atr_pct = if last_close.abs() > 1e-12 {
            (atr / last_close) * 100.0
        } else {
            0.0
        };

        if atr_pct > VOLATILITY_GATE_PCT {
            debug!(atr_pct, "regime classified as high volatility");
            return RegimeAnalysis {
                regime: MarketRegime::HighVolatility,
                adx,
                atr_pct,
                trend_score: 0.0,
                description: "High Volatility (ATR > 2%)".to_string(),
            };
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let ema_fast = ema(&closes, FAST_EMA);
        let ema_slow = ema(&closes, SLOW_EMA);
        let direction = if ema_fast > ema_slow { 1.0 } else { -1.0 };
        let trend_score = direction * adx / 100.0;

        let (regime, description) = if adx >= TREND_ADX_THRESHOLD {
            if direction > 0.0 {
                (MarketRegime::TrendingUp, "Strong Uptrend")
            } else {
                (MarketRegime::TrendingDown, "Strong Downtrend")
            }
        } else {
            (MarketRegime::Ranging, "Ranging / Weak Trend")
        };

        debug!(%regime, adx, atr_pct, trend_score, "regime classified");

        RegimeAnalysis {
            regime,
            adx,
            atr_pct,
            trend_score,
            description: description.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(i: usize, close: f64, spread: f64) -> Candle {
        Candle::new(i as i64 * 60_000, close, close + spread, close - spread, close, 1_000.0)
    }

    #[test]
    fn insufficient_data_below_fifty_candles() {
        let candles: Vec<Candle> = (0..10).map(|i| candle(i, 100.0, 0.5)).collect();
        let analysis = RegimeDetector::analyze(&candles);
        assert_eq!(analysis, RegimeAnalysis::insufficient_data());
    }

    #[test]
    fn strong_uptrend_is_classified_trending_up() {
        let candles: Vec<Candle> = (0..60).map(|i| candle(i, 100.0 + i as f64 * 1.5, 0.3)).collect();
        let analysis = RegimeDetector::analyze(&candles);
        assert_eq!(analysis.regime, MarketRegime::TrendingUp);
        assert_eq!(analysis.description, "Strong Uptrend");
        assert!(analysis.trend_score > 0.0);
    }

    #[test]
    fn wide_swings_trigger_high_volatility_gate() {
        let candles: Vec<Candle> = (0..60)
            .map(|i| {
                let close = 100.0 + if i % 2 == 0 { 10.0 } else { -10.0 };
                candle(i, close, 8.0)
            })
            .collect();
        let analysis = RegimeDetector::analyze(&candles);
        assert_eq!(analysis.regime, MarketRegime::HighVolatility);
        assert_eq!(analysis.trend_score, 0.0);
    }

    #[test]
    fn flat_series_is_classified_ranging() {
        let candles: Vec<Candle> = (0..60).map(|i| candle(i, 100.0, 0.05)).collect();
        let analysis = RegimeDetector::analyze(&candles);
        assert_eq!(analysis.regime, MarketRegime::Ranging);
    }
}
