//! Engine configuration
//!
//! Flat set of named thresholds and weights, supplied once when the engine is
//! built and read-only afterwards. Loaded from JSON; any key left out of the
//! file keeps its default.

use crate::error::ConfigError;
use crate::metrics::FersWeights;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Allowed distance of `fers_w1 + fers_w2 + fers_w3` from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Thresholds and weights for scoring and anomaly detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// LowChildRatio fires when the latest C/(C+A) falls below this
    pub min_child_ratio: f64,
    /// DecliningGrowth: each growth step in a run must be below this (negative)
    pub growth_threshold: f64,
    /// HighVolatility fires when the trailing coefficient of variation exceeds this
    pub volatility_threshold: f64,
    /// Stagnation: |growth| below this counts as "no growth"
    pub stagnation_epsilon: f64,
    /// SeasonalDeviation: z-score above this fires
    pub seasonal_stddev_multiplier: f64,
    /// FERS weight on (1 - CEPS/100)
    pub fers_w1: f64,
    /// FERS weight on IGI
    pub fers_w2: f64,
    /// FERS weight on volatility
    pub fers_w3: f64,

    /// Consecutive below-threshold growth steps needed for DecliningGrowth
    pub declining_run_length: usize,
    /// Consecutive near-zero growth steps needed for Stagnation
    pub stagnation_run_length: usize,
    /// Trailing periods used for volatility (FERS input and HighVolatility)
    pub volatility_window: usize,
    /// Distinct years of the same calendar month needed for SeasonalDeviation
    pub seasonal_min_years: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_child_ratio: 0.2,
            growth_threshold: -0.1,
            volatility_threshold: 0.3,
            stagnation_epsilon: 0.01,
            seasonal_stddev_multiplier: 2.0,
            fers_w1: 0.40,
            fers_w2: 0.35,
            fers_w3: 0.25,
            declining_run_length: 3,
            stagnation_run_length: 6,
            volatility_window: 3,
            seasonal_min_years: 2,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config: {:?}", path))?;

        let config: EngineConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse engine config JSON")?;

        config
            .validate()
            .with_context(|| format!("Invalid engine config: {:?}", path))?;

        Ok(config)
    }

    /// Check every parameter against its valid range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("min_child_ratio", self.min_child_ratio, |v| v > 0.0 && v < 1.0, "0 < value < 1")?;
        check_range("growth_threshold", self.growth_threshold, |v| v > -1.0 && v < 0.0, "-1 < value < 0")?;
        check_range("volatility_threshold", self.volatility_threshold, |v| v > 0.0, "value > 0")?;
        check_range("stagnation_epsilon", self.stagnation_epsilon, |v| v > 0.0 && v < 1.0, "0 < value < 1")?;
        check_range("seasonal_stddev_multiplier", self.seasonal_stddev_multiplier, |v| v > 0.0, "value > 0")?;
        check_range("fers_w1", self.fers_w1, |v| v >= 0.0, "value >= 0")?;
        check_range("fers_w2", self.fers_w2, |v| v >= 0.0, "value >= 0")?;
        check_range("fers_w3", self.fers_w3, |v| v >= 0.0, "value >= 0")?;

        let sum = self.fers_w1 + self.fers_w2 + self.fers_w3;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum {
                sum,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }

        check_min("declining_run_length", self.declining_run_length, 1)?;
        check_min("stagnation_run_length", self.stagnation_run_length, 1)?;
        check_min("volatility_window", self.volatility_window, 2)?;
        check_min("seasonal_min_years", self.seasonal_min_years, 2)?;

        Ok(())
    }

    /// FERS weights as a single value
    pub fn fers_weights(&self) -> FersWeights {
        FersWeights {
            w1: self.fers_w1,
            w2: self.fers_w2,
            w3: self.fers_w3,
        }
    }
}

fn check_range(
    name: &'static str,
    value: f64,
    valid: impl Fn(f64) -> bool,
    expected: &'static str,
) -> Result<(), ConfigError> {
    if value.is_finite() && valid(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value, expected })
    }
}

fn check_min(name: &'static str, value: usize, min: usize) -> Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::WindowTooShort { name, value, min })
    }
}
