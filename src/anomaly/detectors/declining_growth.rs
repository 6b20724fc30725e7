//! DecliningGrowth: total enrolment falling steeply for consecutive periods
//!
//! A growth step counts only if it is below `growth_threshold` on its own;
//! a run of merely negative steps does not fire. Growth out of a zero total is
//! undefined and ends a run.

use super::run_records;
use crate::aggregation::ScoredTimeSeries;
use crate::anomaly::types::{AnomalyType, Detection};
use crate::config::EngineConfig;
use crate::utils::growth_rates;

/// Periods needed to observe `run_length` growth steps
pub fn required_history(config: &EngineConfig) -> usize {
    config.declining_run_length + 1
}

pub fn detect_declining_growth(series: &ScoredTimeSeries, config: &EngineConfig) -> Detection {
    let required = required_history(config);
    if series.len() < required {
        return Detection::InsufficientHistory {
            required,
            available: series.len(),
        };
    }

    let growth = growth_rates(&series.totals());
    let flags: Vec<bool> = growth
        .iter()
        .map(|g| g.map_or(false, |g| g < config.growth_threshold))
        .collect();

    // Severity is the steepest fall in the run
    let records = run_records(
        series,
        AnomalyType::DecliningGrowth,
        &flags,
        config.declining_run_length,
        config.growth_threshold,
        |start, len| {
            growth[start..start + len]
                .iter()
                .flatten()
                .copied()
                .fold(f64::INFINITY, f64::min)
        },
    );

    Detection::from_records(records)
}
