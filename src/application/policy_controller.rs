//! The Adaptive Policy Controller (§4.3) — the scoring and selection heart of
//! this crate. Grounded directly on `AdaptivePolicyController.cpp`'s
//! `computePolicyScore`/`selectCandidates` pipeline: a pure, deterministic
//! function with no I/O and no hidden state.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::performance::{liquidity_bucket, PerformanceBucketKey, StrategyPerformanceStats};
use crate::domain::policy::{DropReason, PolicyDecisionBatch, PolicyDecisionRecord};
use crate::domain::regime::MarketRegime;
use crate::domain::signal::Signal;

fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

fn regime_stress(regime: MarketRegime) -> f64 {
    regime.stress()
}

/// Everything the controller needs for one `select` call. Borrowed, never
/// owned: the controller does not outlive the call, and the performance
/// store's tables are borrowed for the call's duration only (§9).
pub struct PolicyInput<'a> {
    pub candidates: &'a [Signal],
    pub small_seed_mode: bool,
    pub max_new_orders_per_scan: i32,
    pub dominant_regime: MarketRegime,
    pub by_strategy: Option<&'a HashMap<String, StrategyPerformanceStats>>,
    pub by_bucket: Option<&'a HashMap<PerformanceBucketKey, StrategyPerformanceStats>>,
}

/// The controller's output: identical shape to [`PolicyDecisionBatch`], the
/// type the Legacy Policy Adapter re-wraps it as at the plane boundary.
pub type PolicyOutput = PolicyDecisionBatch;

/// Resolved `(trades, win_rate, profit_factor, expectancy)` for a candidate,
/// computed once per candidate and reused across every gate and score term
/// that needs it (§4.3.1 final bullet).
struct ResolvedStats {
    trades: i32,
    wr: f64,
    pf: f64,
    expectancy: f64,
}

fn resolve_strategy_stats(signal: &Signal, by_strategy: Option<&HashMap<String, StrategyPerformanceStats>>) -> ResolvedStats {
    if let Some(table) = by_strategy {
        if let Some(stats) = table.get(&signal.strategy_name) {
            return ResolvedStats {
                trades: stats.trades,
                wr: stats.win_rate(),
                pf: stats.profit_factor(),
                expectancy: stats.expectancy(),
            };
        }
    }
    ResolvedStats {
        trades: signal.strategy_trade_count,
        wr: signal.strategy_win_rate,
        pf: signal.strategy_profit_factor,
        expectancy: 0.0,
    }
}

fn strategy_modifier(resolved: &ResolvedStats) -> f64 {
    if resolved.trades <= 0 {
        return 0.0;
    }
    let wr_score = clamp((resolved.wr - 0.50) / 0.20, -1.0, 1.0) * 0.10;
    let pf_score = clamp((resolved.pf - 1.0) / 0.60, -1.0, 1.0) * 0.08;
    let ex_score = clamp(resolved.expectancy / 1500.0, -1.0, 1.0) * 0.05;
    let mut modifier = wr_score + pf_score + ex_score;
    if resolved.trades >= 10 && (resolved.wr < 0.45 || resolved.pf < 0.85) {
        modifier -= 0.12;
    }
    modifier
}

fn bucket_modifier(signal: &Signal, by_bucket: Option<&HashMap<PerformanceBucketKey, StrategyPerformanceStats>>) -> f64 {
    let Some(table) = by_bucket else {
        return 0.0;
    };
    let key = PerformanceBucketKey {
        strategy_name: signal.strategy_name.clone(),
        regime: signal.market_regime,
        liquidity_bucket: liquidity_bucket(signal.liquidity_score),
    };
    match table.get(&key) {
        Some(stats) if stats.trades >= 5 => {
            clamp((stats.win_rate() - 0.5) / 0.20, -1.0, 1.0) * 0.07
                + clamp((stats.profit_factor() - 1.0) / 0.60, -1.0, 1.0) * 0.05
        }
        _ => 0.0,
    }
}

fn small_seed_penalty(signal: &Signal) -> f64 {
    let liq_penalty = clamp((62.0 - signal.liquidity_score) / 30.0, 0.0, 1.0) * 0.10;
    let vol_penalty = clamp((signal.volatility - 3.0) / 5.0, 0.0, 1.0) * 0.08;
    liq_penalty + vol_penalty
}

fn base_score(signal: &Signal) -> f64 {
    if signal.score > 0.0 {
        signal.score
    } else {
        signal.strength
    }
}

struct Scored {
    signal: Signal,
    resolved: ResolvedStats,
    base_score: f64,
    policy_score: f64,
}

/// Pure scoring/selection. See §4.3 for the full algorithm; this function is
/// the only place that algorithm is implemented.
pub struct AdaptivePolicyController;

impl AdaptivePolicyController {
    pub fn select(input: &PolicyInput<'_>) -> PolicyOutput {
        let stress = regime_stress(input.dominant_regime);
        let min_strength = 0.36 + 0.10 * stress;

        let mut decisions: Vec<PolicyDecisionRecord> = Vec::with_capacity(input.candidates.len());
        let mut ranking: Vec<Scored> = Vec::new();
        let mut dropped_by_policy = 0;

        // Phase A: per-candidate gates, in input order.
        for signal in input.candidates {
            let resolved = resolve_strategy_stats(signal, input.by_strategy);
            let base = base_score(signal);

            if signal.strength < min_strength {
                debug!(market = %signal.market, strategy = %signal.strategy_name, "dropped_low_strength");
                decisions.push(decision_record(signal, &resolved, DropReason::DroppedLowStrength, base, 0.0));
                dropped_by_policy += 1;
                continue;
            }

            if input.small_seed_mode && resolved.trades >= 10 && (resolved.wr < 0.50 || resolved.pf < 0.90) {
                debug!(market = %signal.market, strategy = %signal.strategy_name, "dropped_small_seed_quality");
                decisions.push(decision_record(signal, &resolved, DropReason::DroppedSmallSeedQuality, base, 0.0));
                dropped_by_policy += 1;
                continue;
            }

            let liq_bonus = clamp((signal.liquidity_score - 50.0) / 40.0, -1.0, 1.0) * 0.08;
            let vol_penalty = clamp((signal.volatility - 2.5) / 6.0, 0.0, 1.0) * 0.08;
            let ev_bonus = clamp(signal.expected_value / 0.0035, -1.0, 1.0) * 0.10;
            let strength_bonus = (signal.strength - 0.5) * (0.08 + 0.04 * stress);
            let strat_mod = strategy_modifier(&resolved);
            let bucket_mod = bucket_modifier(signal, input.by_bucket);
            let small_seed_pen = if input.small_seed_mode { small_seed_penalty(signal) } else { 0.0 };

            let policy_score =
                base + liq_bonus - vol_penalty + ev_bonus + strength_bonus + strat_mod + bucket_mod - small_seed_pen;

            ranking.push(Scored {
                signal: signal.clone(),
                resolved,
                base_score: base,
                policy_score,
            });
        }

        // Phase B: stable sort descending by (policy_score, strength, score).
        ranking.sort_by(|a, b| {
            b.policy_score
                .partial_cmp(&a.policy_score)
                .unwrap()
                .then_with(|| b.signal.strength.partial_cmp(&a.signal.strength).unwrap())
                .then_with(|| b.signal.score.partial_cmp(&a.signal.score).unwrap())
        });

        // Phase C: small-seed liq/vol filter, post-sort, order-preserving.
        let mut survivors: Vec<Scored> = Vec::with_capacity(ranking.len());
        for scored in ranking {
            if input.small_seed_mode && (scored.signal.liquidity_score < 45.0 || scored.signal.volatility > 8.0) {
                debug!(market = %scored.signal.market, "dropped_small_seed_liqvol");
                decisions.push(decision_record(
                    &scored.signal,
                    &scored.resolved,
                    DropReason::DroppedSmallSeedLiqvol,
                    scored.base_score,
                    scored.policy_score,
                ));
                dropped_by_policy += 1;
                continue;
            }
            survivors.push(scored);
        }

        // Phase D: capacity.
        let cap = std::cmp::max(1, input.max_new_orders_per_scan) as usize;
        let mut selected_candidates = Vec::with_capacity(cap.min(survivors.len()));
        for (i, scored) in survivors.into_iter().enumerate() {
            if i < cap {
                decisions.push(decision_record(
                    &scored.signal,
                    &scored.resolved,
                    DropReason::Selected,
                    scored.base_score,
                    scored.policy_score,
                ));
                selected_candidates.push(scored.signal);
            } else {
                decisions.push(decision_record(
                    &scored.signal,
                    &scored.resolved,
                    DropReason::DroppedCapacity,
                    scored.base_score,
                    scored.policy_score,
                ));
                dropped_by_policy += 1;
            }
        }

        PolicyOutput {
            selected_candidates,
            dropped_by_policy,
            decisions,
        }
    }
}

fn decision_record(
    signal: &Signal,
    resolved: &ResolvedStats,
    reason: DropReason,
    base_score: f64,
    policy_score: f64,
) -> PolicyDecisionRecord {
    PolicyDecisionRecord {
        market: signal.market.clone(),
        strategy_name: signal.strategy_name.clone(),
        selected: matches!(reason, DropReason::Selected),
        reason,
        base_score,
        policy_score,
        strength: signal.strength,
        expected_value: signal.expected_value,
        liquidity_score: signal.liquidity_score,
        volatility: signal.volatility,
        strategy_trades: resolved.trades,
        strategy_win_rate: resolved.wr,
        strategy_profit_factor: resolved.pf,
    }
}
