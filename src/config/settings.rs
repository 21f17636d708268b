//! Engine configuration and environment variable handling
//!
//! Malformed values fail loudly at load time. The evaluation paths never
//! read the environment themselves.

use std::env;
use std::str::FromStr;

use crate::arbitrage::ScoreWeights;
use crate::backtest::MonteCarloConfig;
use crate::costs::CostModel;
use crate::errors::{EngineError, EngineResult};
use crate::sizing::{SizeOptimizer, SizingLimits};
use crate::types::{BacktestParams, FrictionParameters, GasParameters, LatencyParameters};
use crate::utils::{clamp_probability, BPS_SCALE};

// Gas bounds
pub const MAX_FEE_GWEI: f64 = 500.0;
pub const MIN_GAS_LIMIT: u64 = 21_000; // bare transfer
pub const MAX_GAS_LIMIT: u64 = 10_000_000;

// Sizing bounds
pub const MAX_POOL_FRACTION_CEILING: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Config {
    pub gas: GasParameters,
    pub latency: LatencyParameters,
    pub friction: FrictionParameters,
    pub fail_prob: f64,
    // Sizing configuration
    pub slip_cap_bps: f64,
    pub notional_cap_usd: f64,
    pub max_pool_fraction: f64,
    // Ranking and selection configuration
    pub weights: ScoreWeights,
    pub gas_budget_usd: f64,
    // Replay configuration
    pub backtest: BacktestParams,
    pub monte_carlo: MonteCarloConfig,
    pub opportunities_file: String,
    pub backtest_records_file: String,
}

impl Config {
    pub fn load() -> EngineResult<Self> {
        let config = Self {
            gas: GasParameters {
                base_fee_gwei: env_parsed::<f64>("BASE_FEE_GWEI")?
                    .unwrap_or(0.5)
                    .max(0.0)
                    .min(MAX_FEE_GWEI),
                priority_tip_gwei: env_parsed::<f64>("PRIORITY_TIP_GWEI")?
                    .unwrap_or(0.5)
                    .max(0.0)
                    .min(MAX_FEE_GWEI),
                gas_limit: env_parsed("GAS_LIMIT")?
                    .unwrap_or(200_000)
                    .max(MIN_GAS_LIMIT)
                    .min(MAX_GAS_LIMIT),
                native_usd_price: env_parsed("NATIVE_USD_PRICE")?.unwrap_or(2_500.0),
                max_gas_usd_cap: env_parsed::<f64>("MAX_GAS_USD_CAP")?.unwrap_or(100.0).max(0.0),
            },
            latency: LatencyParameters {
                decision_delay_ms: env_parsed::<f64>("DECISION_DELAY_MS")?
                    .unwrap_or(250.0)
                    .max(0.0),
                inclusion_blocks: env_parsed("INCLUSION_BLOCKS")?.unwrap_or(1),
                seconds_per_block: env_parsed::<f64>("SECONDS_PER_BLOCK")?.unwrap_or(1.0).max(0.0),
                k_vol: env_parsed::<f64>("K_VOL")?.unwrap_or(0.0).max(0.0),
                notional_beta: env_parsed::<f64>("NOTIONAL_BETA")?.unwrap_or(1.0).max(0.0),
            },
            friction: FrictionParameters {
                lp_fee_bps: env_parsed::<f64>("LP_FEE_BPS")?.unwrap_or(0.0).max(0.0),
                router_fee_bps: env_parsed::<f64>("ROUTER_FEE_BPS")?.unwrap_or(0.0).max(0.0),
                extra_usd: env_parsed::<f64>("EXTRA_USD")?.unwrap_or(0.0).max(0.0),
                flash_fee_bps: env_parsed::<f64>("FLASH_FEE_BPS")?.unwrap_or(0.0).max(0.0),
                flash_fixed_usd: env_parsed::<f64>("FLASH_FIXED_USD")?.unwrap_or(0.0).max(0.0),
                referral_bps: env_parsed::<f64>("REFERRAL_BPS")?.unwrap_or(0.0).max(0.0),
                executor_fee_usd: env_parsed::<f64>("EXECUTOR_FEE_USD")?.unwrap_or(0.0).max(0.0),
            },
            fail_prob: clamp_probability(env_parsed("FAIL_PROB")?.unwrap_or(0.0)),
            slip_cap_bps: env_parsed("SLIP_CAP_BPS")?.unwrap_or(50.0),
            notional_cap_usd: env_parsed("NOTIONAL_CAP_USD")?.unwrap_or(50_000.0),
            max_pool_fraction: env_parsed("MAX_POOL_FRACTION")?.unwrap_or(0.25),
            weights: ScoreWeights {
                net: env_parsed("WEIGHT_NET")?.unwrap_or(1.0),
                profit_per_gas: env_parsed("WEIGHT_PROFIT_PER_GAS")?.unwrap_or(0.6),
                profit_per_second: env_parsed("WEIGHT_PROFIT_PER_SECOND")?.unwrap_or(0.6),
            },
            gas_budget_usd: env_parsed("GAS_BUDGET_USD")?.unwrap_or(25.0),
            backtest: BacktestParams {
                min_spread_bps: env_parsed("BACKTEST_MIN_SPREAD_BPS")?.unwrap_or(10.0),
                min_liquidity_usd: env_parsed("BACKTEST_MIN_LIQUIDITY_USD")?.unwrap_or(10_000.0),
                gas_multiplier: env_parsed::<f64>("BACKTEST_GAS_MULTIPLIER")?
                    .unwrap_or(1.0)
                    .max(0.0),
                ..BacktestParams::default()
            },
            monte_carlo: MonteCarloConfig {
                runs: env_parsed("MONTE_CARLO_RUNS")?.unwrap_or(200),
                edge_jitter: env_parsed::<f64>("EDGE_JITTER")?.unwrap_or(0.10).max(0.0),
                notional_jitter: env_parsed::<f64>("NOTIONAL_JITTER")?.unwrap_or(0.20).max(0.0),
                seed: env_parsed("MONTE_CARLO_SEED")?.unwrap_or(42),
            },
            opportunities_file: env::var("OPPORTUNITIES_FILE")
                .unwrap_or_else(|_| "data/opportunities.jsonl".to_string()),
            backtest_records_file: env::var("BACKTEST_RECORDS_FILE")
                .unwrap_or_else(|_| "data/backtest_records.jsonl".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Range checks that clamping cannot repair without changing meaning.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.slip_cap_bps > 0.0 && self.slip_cap_bps < BPS_SCALE) {
            return Err(EngineError::InvalidConfig {
                name: "SLIP_CAP_BPS",
                reason: format!("{} is outside (0, {BPS_SCALE})", self.slip_cap_bps),
            });
        }
        if !(self.max_pool_fraction > 0.0 && self.max_pool_fraction <= MAX_POOL_FRACTION_CEILING)
        {
            return Err(EngineError::InvalidConfig {
                name: "MAX_POOL_FRACTION",
                reason: format!(
                    "{} is outside (0, {MAX_POOL_FRACTION_CEILING}]",
                    self.max_pool_fraction
                ),
            });
        }
        if self.gas.native_usd_price <= 0.0 {
            return Err(EngineError::InvalidConfig {
                name: "NATIVE_USD_PRICE",
                reason: format!("{} must be positive", self.gas.native_usd_price),
            });
        }
        if self.gas_budget_usd < 0.0 {
            return Err(EngineError::InvalidConfig {
                name: "GAS_BUDGET_USD",
                reason: format!("{} must not be negative", self.gas_budget_usd),
            });
        }
        Ok(())
    }

    /// Cost model assembled from the loaded parameter bundles.
    pub fn cost_model(&self) -> CostModel {
        CostModel {
            gas: self.gas.clone(),
            latency: self.latency.clone(),
            friction: self.friction.clone(),
            fail_prob: self.fail_prob,
        }
    }

    pub fn sizing_limits(&self) -> SizingLimits {
        SizingLimits {
            slip_cap_bps: self.slip_cap_bps,
            notional_cap_usd: self.notional_cap_usd,
        }
    }

    pub fn optimizer(&self) -> SizeOptimizer {
        SizeOptimizer {
            max_pool_fraction: self.max_pool_fraction,
            ..SizeOptimizer::default()
        }
    }
}

/// Parses an environment variable when present. Unset is fine; a set but
/// unparseable value is a hard error.
fn env_parsed<T: FromStr>(name: &'static str) -> EngineResult<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(err) => Err(EngineError::ConfigParse {
                name,
                value: raw,
                source: anyhow::Error::new(err),
            }),
        },
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, PoisonError};

    use super::*;

    // Config::load reads the whole environment, so tests that set
    // variables serialize on this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn base_config() -> Config {
        Config {
            gas: GasParameters::default(),
            latency: LatencyParameters::default(),
            friction: FrictionParameters::default(),
            fail_prob: 0.0,
            slip_cap_bps: 50.0,
            notional_cap_usd: 50_000.0,
            max_pool_fraction: 0.25,
            weights: ScoreWeights::default(),
            gas_budget_usd: 25.0,
            backtest: BacktestParams::default(),
            monte_carlo: MonteCarloConfig::default(),
            opportunities_file: "data/opportunities.jsonl".to_string(),
            backtest_records_file: "data/backtest_records.jsonl".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_ranges() {
        let mut config = base_config();
        config.slip_cap_bps = 0.0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.slip_cap_bps = 10_000.0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.max_pool_fraction = 0.9;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.gas.native_usd_price = 0.0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.gas_budget_usd = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_views_mirror_fields() {
        let mut config = base_config();
        config.fail_prob = 0.08;
        config.slip_cap_bps = 35.0;
        config.max_pool_fraction = 0.1;

        let model = config.cost_model();
        assert_eq!(model.fail_prob, 0.08);
        assert_eq!(model.gas.gas_limit, config.gas.gas_limit);

        let limits = config.sizing_limits();
        assert_eq!(limits.slip_cap_bps, 35.0);
        assert_eq!(limits.notional_cap_usd, 50_000.0);

        assert_eq!(config.optimizer().max_pool_fraction, 0.1);
    }

    #[test]
    fn test_malformed_value_fails_loudly() {
        let _env = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        // SAFETY: mutation is serialized by ENV_LOCK.
        unsafe { env::set_var("SLIP_CAP_BPS", "not-a-number") };
        let result = Config::load();
        unsafe { env::remove_var("SLIP_CAP_BPS") };

        match result {
            Err(EngineError::ConfigParse { name, .. }) => assert_eq!(name, "SLIP_CAP_BPS"),
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_values_clamp_on_load() {
        let _env = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        // SAFETY: mutation is serialized by ENV_LOCK.
        unsafe {
            env::set_var("BASE_FEE_GWEI", "-3.5");
            env::set_var("PRIORITY_TIP_GWEI", "9999");
            env::set_var("EDGE_JITTER", "-0.4");
        }
        let result = Config::load();
        unsafe {
            env::remove_var("BASE_FEE_GWEI");
            env::remove_var("PRIORITY_TIP_GWEI");
            env::remove_var("EDGE_JITTER");
        }

        let config = result.expect("out-of-range values clamp instead of failing");
        assert_eq!(config.gas.base_fee_gwei, 0.0);
        assert_eq!(config.gas.priority_tip_gwei, MAX_FEE_GWEI);
        assert_eq!(config.monte_carlo.edge_jitter, 0.0);
    }
}
