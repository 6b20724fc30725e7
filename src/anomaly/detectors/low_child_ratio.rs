//! LowChildRatio: latest child share below `min_child_ratio`

use crate::aggregation::ScoredTimeSeries;
use crate::anomaly::types::{AnomalyRecord, AnomalyType, Detection, PeriodSpan};
use crate::config::EngineConfig;

pub const REQUIRED_HISTORY: usize = 1;

pub fn detect_low_child_ratio(series: &ScoredTimeSeries, config: &EngineConfig) -> Detection {
    let Some(latest) = series.latest() else {
        return Detection::InsufficientHistory {
            required: REQUIRED_HISTORY,
            available: 0,
        };
    };

    let total = latest.aggregate.total();
    if total == 0 {
        // No enrolment at all has no ratio
        return Detection::Clear;
    }

    let ratio = latest.aggregate.child_count as f64 / total as f64;
    if ratio < config.min_child_ratio {
        Detection::Fired(vec![AnomalyRecord {
            region: series.region.clone(),
            anomaly_type: AnomalyType::LowChildRatio,
            span: PeriodSpan::single(latest.period()),
            severity: ratio,
            threshold: config.min_child_ratio,
        }])
    } else {
        Detection::Clear
    }
}
