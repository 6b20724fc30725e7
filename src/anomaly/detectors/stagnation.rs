//! Stagnation: near-zero growth for a long run of periods

use super::run_records;
use crate::aggregation::ScoredTimeSeries;
use crate::anomaly::types::{AnomalyType, Detection};
use crate::config::EngineConfig;
use crate::utils::growth_rates;

pub fn required_history(config: &EngineConfig) -> usize {
    config.stagnation_run_length + 1
}

/// Severity is the run length in growth steps, threshold the configured minimum
pub fn detect_stagnation(series: &ScoredTimeSeries, config: &EngineConfig) -> Detection {
    let required = required_history(config);
    if series.len() < required {
        return Detection::InsufficientHistory {
            required,
            available: series.len(),
        };
    }

    let flags: Vec<bool> = growth_rates(&series.totals())
        .iter()
        .map(|g| g.map_or(false, |g| g.abs() < config.stagnation_epsilon))
        .collect();

    let records = run_records(
        series,
        AnomalyType::Stagnation,
        &flags,
        config.stagnation_run_length,
        config.stagnation_run_length as f64,
        |_, len| len as f64,
    );

    Detection::from_records(records)
}
