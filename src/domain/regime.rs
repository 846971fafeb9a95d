use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse market state label produced by the Regime Detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketRegime {
    Unknown,
    TrendingUp,
    TrendingDown,
    Ranging,
    HighVolatility,
}

impl Default for MarketRegime {
    fn default() -> Self {
        MarketRegime::Unknown
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketRegime::Unknown => write!(f, "Unknown"),
            MarketRegime::TrendingUp => write!(f, "Trending Up"),
            MarketRegime::TrendingDown => write!(f, "Trending Down"),
            MarketRegime::Ranging => write!(f, "Ranging"),
            MarketRegime::HighVolatility => write!(f, "High Volatility"),
        }
    }
}

impl MarketRegime {
    /// Stress multiplier the policy controller applies to the strength gate
    /// and the strength bonus. Total on all five variants (§8 property 8).
    pub fn stress(self) -> f64 {
        match self {
            MarketRegime::TrendingDown => 1.0,
            MarketRegime::HighVolatility => 0.8,
            MarketRegime::Ranging => 0.45,
            MarketRegime::TrendingUp => 0.2,
            MarketRegime::Unknown => 0.3,
        }
    }
}

/// Output of `RegimeDetector::analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeAnalysis {
    pub regime: MarketRegime,
    pub adx: f64,
    pub atr_pct: f64,
    pub trend_score: f64,
    pub description: String,
}

impl RegimeAnalysis {
    pub fn insufficient_data() -> Self {
        Self {
            regime: MarketRegime::Unknown,
            adx: 0.0,
            atr_pct: 0.0,
            trend_score: 0.0,
            description: "Insufficient Data".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stress_is_defined_for_every_regime() {
        let regimes = [
            MarketRegime::Unknown,
            MarketRegime::TrendingUp,
            MarketRegime::TrendingDown,
            MarketRegime::Ranging,
            MarketRegime::HighVolatility,
        ];
        for r in regimes {
            let s = r.stress();
            assert!(s.is_finite());
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn stress_values_match_contract() {
        assert_eq!(MarketRegime::TrendingDown.stress(), 1.0);
        assert_eq!(MarketRegime::HighVolatility.stress(), 0.8);
        assert_eq!(MarketRegime::Ranging.stress(), 0.45);
        assert_eq!(MarketRegime::TrendingUp.stress(), 0.2);
        assert_eq!(MarketRegime::Unknown.stress(), 0.3);
    }
}
