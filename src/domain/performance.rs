use serde::{Deserialize, Serialize};

use crate::domain::regime::MarketRegime;

/// A single realized trade outcome, as handed to `PerformanceStore::rebuild`
/// by the collaborator that tracks closed positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeHistory {
    pub strategy_name: String,
    pub market_regime: MarketRegime,
    pub liquidity_score: f64,
    pub profit_loss: f64,
}

/// Aggregate outcome statistics for a strategy, or a (strategy, regime,
/// liquidity-bucket) bucket. Every derived metric is total: it never panics
/// or divides by zero, it falls back to the documented zero value instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyPerformanceStats {
    pub trades: i32,
    pub wins: i32,
    pub gross_profit: f64,
    pub gross_loss_abs: f64,
    pub net_profit: f64,
}

impl StrategyPerformanceStats {
    /// `wins / trades`, `0.0` when there are no trades yet.
    pub fn win_rate(&self) -> f64 {
        if self.trades > 0 {
            self.wins as f64 / self.trades as f64
        } else {
            0.0
        }
    }

    /// `net_profit / trades`, `0.0` when there are no trades yet.
    pub fn expectancy(&self) -> f64 {
        if self.trades > 0 {
            self.net_profit / self.trades as f64
        } else {
            0.0
        }
    }

    /// `gross_profit / gross_loss_abs`, `0.0` when losses are negligible
    /// (guards the otherwise-unbounded ratio when a strategy has no losers).
    pub fn profit_factor(&self) -> f64 {
        if self.gross_loss_abs > 1e-12 {
            self.gross_profit / self.gross_loss_abs
        } else {
            0.0
        }
    }

    pub(crate) fn accumulate(&mut self, profit_loss: f64) {
        self.trades += 1;
        self.net_profit += profit_loss;
        if profit_loss > 0.0 {
            self.wins += 1;
            self.gross_profit += profit_loss;
        } else if profit_loss < 0.0 {
            self.gross_loss_abs += profit_loss.abs();
        }
    }
}

/// Key into the per-(strategy, regime, liquidity-bucket) statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerformanceBucketKey {
    pub strategy_name: String,
    pub regime: MarketRegime,
    pub liquidity_bucket: i32,
}

/// Partitions the liquidity-score real line into four buckets. Shared
/// verbatim by the Performance Store (keying `by_bucket`) and the Policy
/// Controller (looking candidates up in it) — one function, two call sites.
pub fn liquidity_bucket(liquidity_score: f64) -> i32 {
    if liquidity_score < 40.0 {
        0
    } else if liquidity_score < 60.0 {
        1
    } else if liquidity_score < 80.0 {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liquidity_bucket_partitions_the_real_line() {
        assert_eq!(liquidity_bucket(f64::NEG_INFINITY), 0);
        assert_eq!(liquidity_bucket(-10.0), 0);
        assert_eq!(liquidity_bucket(39.999), 0);
        assert_eq!(liquidity_bucket(40.0), 1);
        assert_eq!(liquidity_bucket(59.999), 1);
        assert_eq!(liquidity_bucket(60.0), 2);
        assert_eq!(liquidity_bucket(79.999), 2);
        assert_eq!(liquidity_bucket(80.0), 3);
        assert_eq!(liquidity_bucket(1000.0), 3);
    }

    #[test]
    fn stats_identities_hold_on_empty() {
        let s = StrategyPerformanceStats::default();
        assert_eq!(s.win_rate(), 0.0);
        assert_eq!(s.expectancy(), 0.0);
        assert_eq!(s.profit_factor(), 0.0);
    }

    #[test]
    fn stats_accumulate_matches_definitions() {
        let mut s = StrategyPerformanceStats::default();
        s.accumulate(100.0);
        s.accumulate(-40.0);
        s.accumulate(0.0);
        assert_eq!(s.trades, 3);
        assert_eq!(s.wins, 1);
        assert_eq!(s.gross_profit, 100.0);
        assert_eq!(s.gross_loss_abs, 40.0);
        assert_eq!(s.net_profit, 60.0);
        assert!((s.win_rate() - 1.0 / 3.0).abs() < 1e-12);
        assert!((s.expectancy() - 20.0).abs() < 1e-12);
        assert_eq!(s.profit_factor(), 2.5);
    }

    #[test]
    fn profit_factor_guards_near_zero_losses() {
        let mut s = StrategyPerformanceStats::default();
        s.accumulate(50.0);
        assert_eq!(s.profit_factor(), 0.0);
    }
}
