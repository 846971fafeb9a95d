//! Strategy/bucket performance aggregation (§4.2). Grounded on the teacher's
//! `StrategyPerformanceStats`/performance calculator, generalized to the two
//! keyed tables the policy controller reads from.

use std::collections::HashMap;

use crate::domain::performance::{liquidity_bucket, PerformanceBucketKey, StrategyPerformanceStats, TradeHistory};

const UNKNOWN_STRATEGY: &str = "unknown";

/// Holds two aggregate tables rebuilt from trade history: one keyed by
/// strategy name, one keyed by `(strategy, regime, liquidity_bucket)`.
/// `rebuild` replaces both atomically; there is no incremental update path.
#[derive(Debug, Clone, Default)]
pub struct PerformanceStore {
    by_strategy: HashMap<String, StrategyPerformanceStats>,
    by_bucket: HashMap<PerformanceBucketKey, StrategyPerformanceStats>,
}

impl PerformanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both tables from scratch. Empty `strategy_name` is remapped
    /// to `"unknown"`. Idempotent: rebuilding twice with the same history
    /// produces identical tables (§8 property 7).
    pub fn rebuild(&mut self, history: &[TradeHistory]) {
        let mut by_strategy = HashMap::new();
        let mut by_bucket = HashMap::new();

        for trade in history {
            let name = if trade.strategy_name.is_empty() {
                UNKNOWN_STRATEGY
            } else {
                trade.strategy_name.as_str()
            };

            by_strategy
                .entry(name.to_string())
                .or_insert_with(StrategyPerformanceStats::default)
                .accumulate(trade.profit_loss);

            let key = PerformanceBucketKey {
                strategy_name: name.to_string(),
                regime: trade.market_regime,
                liquidity_bucket: liquidity_bucket(trade.liquidity_score),
            };
            by_bucket
                .entry(key)
                .or_insert_with(StrategyPerformanceStats::default)
                .accumulate(trade.profit_loss);
        }

        self.by_strategy = by_strategy;
        self.by_bucket = by_bucket;
    }

    pub fn by_strategy(&self) -> &HashMap<String, StrategyPerformanceStats> {
        &self.by_strategy
    }

    pub fn by_bucket(&self) -> &HashMap<PerformanceBucketKey, StrategyPerformanceStats> {
        &self.by_bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::regime::MarketRegime;

    fn trade(strategy: &str, regime: MarketRegime, liquidity: f64, pl: f64) -> TradeHistory {
        TradeHistory {
            strategy_name: strategy.to_string(),
            market_regime: regime,
            liquidity_score: liquidity,
            profit_loss: pl,
        }
    }

    #[test]
    fn rebuild_accumulates_by_strategy_and_bucket() {
        let history = vec![
            trade("alpha", MarketRegime::Ranging, 65.0, 100.0),
            trade("alpha", MarketRegime::Ranging, 65.0, -40.0),
            trade("alpha", MarketRegime::TrendingUp, 65.0, 20.0),
        ];
        let mut store = PerformanceStore::new();
        store.rebuild(&history);

        let stats = store.by_strategy().get("alpha").unwrap();
        assert_eq!(stats.trades, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.net_profit, 80.0);

        let key = PerformanceBucketKey {
            strategy_name: "alpha".to_string(),
            regime: MarketRegime::Ranging,
            liquidity_bucket: 2,
        };
        let bucket_stats = store.by_bucket().get(&key).unwrap();
        assert_eq!(bucket_stats.trades, 2);
    }

    #[test]
    fn empty_strategy_name_remapped_to_unknown() {
        let history = vec![trade("", MarketRegime::Unknown, 10.0, 5.0)];
        let mut store = PerformanceStore::new();
        store.rebuild(&history);
        assert!(store.by_strategy().contains_key("unknown"));
    }

    #[test]
    fn rebuild_is_idempotent_on_identical_input() {
        let history = vec![trade("beta", MarketRegime::TrendingDown, 80.0, -10.0)];
        let mut store = PerformanceStore::new();
        store.rebuild(&history);
        let first = store.by_strategy().clone();
        store.rebuild(&history);
        assert_eq!(first, *store.by_strategy());
    }

    #[test]
    fn rebuild_replaces_rather_than_accumulates() {
        let mut store = PerformanceStore::new();
        store.rebuild(&[trade("gamma", MarketRegime::Unknown, 50.0, 10.0)]);
        store.rebuild(&[]);
        assert!(store.by_strategy().is_empty());
        assert!(store.by_bucket().is_empty());
    }
}
