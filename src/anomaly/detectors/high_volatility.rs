//! HighVolatility: trailing coefficient of variation above threshold

use crate::aggregation::ScoredTimeSeries;
use crate::anomaly::types::{AnomalyRecord, AnomalyType, Detection, PeriodSpan};
use crate::config::EngineConfig;
use crate::metrics::volatility;

pub const REQUIRED_HISTORY: usize = 3;

pub fn detect_high_volatility(series: &ScoredTimeSeries, config: &EngineConfig) -> Detection {
    let n = series.len();
    if n < REQUIRED_HISTORY {
        return Detection::InsufficientHistory {
            required: REQUIRED_HISTORY,
            available: n,
        };
    }

    let start = n - config.volatility_window.min(n);
    let totals = series.totals();

    // Zero mean has no coefficient of variation
    let Ok(value) = volatility(&totals[start..]) else {
        return Detection::Clear;
    };

    if value > config.volatility_threshold {
        Detection::Fired(vec![AnomalyRecord {
            region: series.region.clone(),
            anomaly_type: AnomalyType::HighVolatility,
            span: PeriodSpan::new(series.points[start].period(), series.points[n - 1].period()),
            severity: value,
            threshold: config.volatility_threshold,
        }])
    } else {
        Detection::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::detectors::test_support::totals_series;
    use approx::assert_relative_eq;

    #[test]
    fn test_erratic_window_fires() {
        // Window [100, 500, 100]: mean 233.3, stddev 188.6
        let series = totals_series(&[300, 300, 100, 500, 100]);
        let detection = detect_high_volatility(&series, &EngineConfig::default());

        let records = detection.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].span.start, series.points[2].period());
        assert_eq!(records[0].span.end, series.points[4].period());
        assert_relative_eq!(records[0].severity, (320000.0f64 / 9.0).sqrt() / (700.0 / 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_only_trailing_window_counts() {
        let series = totals_series(&[100, 900, 100, 500, 500, 500]);
        assert_eq!(detect_high_volatility(&series, &EngineConfig::default()), Detection::Clear);
    }

    #[test]
    fn test_two_periods_insufficient() {
        let series = totals_series(&[100, 900]);
        assert_eq!(
            detect_high_volatility(&series, &EngineConfig::default()),
            Detection::InsufficientHistory { required: 3, available: 2 }
        );
    }

    #[test]
    fn test_all_zero_window_clear() {
        let series = totals_series(&[0, 0, 0]);
        assert_eq!(detect_high_volatility(&series, &EngineConfig::default()), Detection::Clear);
    }
}
