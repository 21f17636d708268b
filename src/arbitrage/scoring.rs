//! Composite ranking score for sized opportunities

use serde::{Deserialize, Serialize};

/// Floor applied to gas before dividing, so free inclusion still ranks.
const MIN_GAS_USD_FLOOR: f64 = 1e-9;
/// Floor applied to inclusion time before dividing.
const MIN_SECONDS_FLOOR: f64 = 1e-3;

/// Linear blend of absolute net, capital efficiency per gas dollar and
/// profit velocity per second of expected inclusion time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub net: f64,
    pub profit_per_gas: f64,
    pub profit_per_second: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            net: 1.0,
            profit_per_gas: 0.6,
            profit_per_second: 0.6,
        }
    }
}

impl ScoreWeights {
    /// Scores one sized opportunity. Negative nets produce negative scores,
    /// so unprofitable entries sink in a descending sort.
    pub fn score(&self, net_usd: f64, gas_usd: f64, inclusion_seconds: f64) -> f64 {
        let profit_per_gas = net_usd / gas_usd.max(MIN_GAS_USD_FLOOR);
        let profit_per_second = net_usd / inclusion_seconds.max(MIN_SECONDS_FLOOR);
        self.net * net_usd
            + self.profit_per_gas * profit_per_gas
            + self.profit_per_second * profit_per_second
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_weights() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.net, 1.0);
        assert_eq!(weights.profit_per_gas, 0.6);
        assert_eq!(weights.profit_per_second, 0.6);
    }

    #[test]
    fn test_score_blends_all_three_terms() {
        let weights = ScoreWeights::default();
        // 1.0 * 10 + 0.6 * (10 / 2) + 0.6 * (10 / 4) = 14.5
        assert_relative_eq!(weights.score(10.0, 2.0, 4.0), 14.5, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_gas_uses_floor() {
        let weights = ScoreWeights::default();
        let score = weights.score(1.0, 0.0, 1.0);
        assert!(score.is_finite());
        assert_relative_eq!(score, 1.0 + 0.6 * 1e9 + 0.6, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_inclusion_uses_floor() {
        let weights = ScoreWeights {
            net: 0.0,
            profit_per_gas: 0.0,
            profit_per_second: 1.0,
        };
        assert_relative_eq!(weights.score(2.0, 1.0, 0.0), 2_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_net_scores_negative() {
        let weights = ScoreWeights::default();
        assert!(weights.score(-5.0, 1.0, 1.0) < 0.0);
    }

    #[test]
    fn test_no_trade_scores_zero() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.score(0.0, 3.0, 2.0), 0.0);
    }
}
