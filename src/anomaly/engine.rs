//! AnomalyEngine: runs every detector over every region series
//!
//! Includes both sequential and parallel (Rayon) implementations; both return
//! records in the same order.

use super::detectors::*;
use super::types::{AnomalyRecord, AnomalyType, Detection};
use crate::aggregation::ScoredTimeSeries;
use crate::config::EngineConfig;
use rayon::prelude::*;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Records of one region; most regions fire a handful at most
pub type RegionAnomalies = SmallVec<[AnomalyRecord; 8]>;

pub struct AnomalyEngine {
    config: EngineConfig,
}

impl AnomalyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one detector
    pub fn run_detector(&self, anomaly_type: AnomalyType, series: &ScoredTimeSeries) -> Detection {
        match anomaly_type {
            AnomalyType::LowChildRatio => detect_low_child_ratio(series, &self.config),
            AnomalyType::DecliningGrowth => detect_declining_growth(series, &self.config),
            AnomalyType::HighVolatility => detect_high_volatility(series, &self.config),
            AnomalyType::Stagnation => detect_stagnation(series, &self.config),
            AnomalyType::SeasonalDeviation => detect_seasonal_deviation(series, &self.config),
        }
    }

    /// Every detector's outcome for one series, in `AnomalyType::ALL` order
    pub fn evaluate(&self, series: &ScoredTimeSeries) -> Vec<(AnomalyType, Detection)> {
        AnomalyType::ALL
            .iter()
            .map(|&t| (t, self.run_detector(t, series)))
            .collect()
    }

    /// All records for one series
    pub fn detect(&self, series: &ScoredTimeSeries) -> RegionAnomalies {
        let mut records = RegionAnomalies::new();
        for anomaly_type in AnomalyType::ALL {
            records.extend(self.run_detector(anomaly_type, series).into_records());
        }
        records
    }

    /// All records for every series, sorted by (region, type, span)
    pub fn detect_all(&self, series: &[ScoredTimeSeries]) -> Vec<AnomalyRecord> {
        let mut records: Vec<AnomalyRecord> = series.iter().flat_map(|s| self.detect(s)).collect();
        sort_records(&mut records);
        log_counts(&records);
        records
    }

    /// Parallel version of `detect_all`
    pub fn detect_all_parallel(&self, series: &[ScoredTimeSeries]) -> Vec<AnomalyRecord> {
        let mut records: Vec<AnomalyRecord> = series
            .par_iter()
            .map(|s| self.detect(s))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();
        sort_records(&mut records);
        log_counts(&records);
        records
    }
}

fn sort_records(records: &mut [AnomalyRecord]) {
    records.sort_by(|a, b| {
        a.region
            .cmp(&b.region)
            .then(a.anomaly_type.cmp(&b.anomaly_type))
            .then(a.span.cmp(&b.span))
    });
}

fn log_counts(records: &[AnomalyRecord]) {
    let mut counts: BTreeMap<AnomalyType, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.anomaly_type).or_insert(0) += 1;
    }
    for (anomaly_type, count) in &counts {
        tracing::debug!("{}: {} records", anomaly_type, count);
    }
    tracing::info!("Detected {} anomalies", records.len());
}
