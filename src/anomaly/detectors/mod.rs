//! The five anomaly detectors
//!
//! Each detector is a pure function of one region's scored series and the
//! engine configuration. None reads another region's data.

pub mod low_child_ratio;
pub mod declining_growth;
pub mod high_volatility;
pub mod stagnation;
pub mod seasonal_deviation;

pub use low_child_ratio::detect_low_child_ratio;
pub use declining_growth::detect_declining_growth;
pub use high_volatility::detect_high_volatility;
pub use stagnation::detect_stagnation;
pub use seasonal_deviation::detect_seasonal_deviation;

use super::types::{AnomalyRecord, AnomalyType, PeriodSpan};
use crate::aggregation::ScoredTimeSeries;
use crate::utils::consecutive_runs;

/// One record per maximal run of flagged growth steps at least `min_len` long
///
/// Growth step `i` runs from point `i` to point `i + 1`, so a run of `len`
/// steps starting at `i` spans points `i..=i + len`.
pub(crate) fn run_records(
    series: &ScoredTimeSeries,
    anomaly_type: AnomalyType,
    flags: &[bool],
    min_len: usize,
    threshold: f64,
    severity: impl Fn(usize, usize) -> f64,
) -> Vec<AnomalyRecord> {
    consecutive_runs(flags)
        .into_iter()
        .filter(|&(_, len)| len >= min_len)
        .map(|(start, len)| AnomalyRecord {
            region: series.region.clone(),
            anomaly_type,
            span: PeriodSpan::new(series.points[start].period(), series.points[start + len].period()),
            severity: severity(start, len),
            threshold,
        })
        .collect()
}
