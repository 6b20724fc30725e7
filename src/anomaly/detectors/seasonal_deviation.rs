//! SeasonalDeviation: a month's CEPS far from that calendar month's norm
//!
//! Each calendar month is compared only with the same month in other years.
//! The baseline for a value is the population mean and standard deviation of
//! that month's defined CEPS in every other year. A value with fewer than two
//! other years, or whose other years are all equal, is not scored.

use crate::aggregation::ScoredTimeSeries;
use crate::anomaly::types::{AnomalyRecord, AnomalyType, Detection, PeriodSpan};
use crate::config::EngineConfig;
use crate::data::Period;
use crate::utils::{mean, population_stddev};
use std::collections::BTreeMap;

const MIN_STDDEV: f64 = 1e-9;
const MIN_BASELINE_YEARS: usize = 2;

pub fn detect_seasonal_deviation(series: &ScoredTimeSeries, config: &EngineConfig) -> Detection {
    let mut by_month: BTreeMap<u32, Vec<(Period, f64)>> = BTreeMap::new();
    for point in &series.points {
        if let Some(ceps) = point.ceps.value() {
            by_month
                .entry(point.period().month)
                .or_default()
                .push((point.period(), ceps));
        }
    }

    let available = by_month.values().map(Vec::len).max().unwrap_or(0);
    if available < config.seasonal_min_years {
        return Detection::InsufficientHistory {
            required: config.seasonal_min_years,
            available,
        };
    }

    let mut records = Vec::new();
    for observations in by_month.values() {
        if observations.len() < config.seasonal_min_years {
            continue;
        }

        for (i, &(period, value)) in observations.iter().enumerate() {
            let others: Vec<f64> = observations
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &(_, v))| v)
                .collect();
            if others.len() < MIN_BASELINE_YEARS {
                continue;
            }
            let (Some(m), Some(sd)) = (mean(&others), population_stddev(&others)) else {
                continue;
            };
            if sd < MIN_STDDEV {
                continue;
            }

            let z = (value - m).abs() / sd;
            if z > config.seasonal_stddev_multiplier {
                records.push(AnomalyRecord {
                    region: series.region.clone(),
                    anomaly_type: AnomalyType::SeasonalDeviation,
                    span: PeriodSpan::single(period),
                    severity: z,
                    threshold: config.seasonal_stddev_multiplier,
                });
            }
        }
    }

    records.sort_by_key(|r| r.span);
    Detection::from_records(records)
}
