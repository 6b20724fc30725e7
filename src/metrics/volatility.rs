//! Enrolment volatility
//!
//! Coefficient of variation of total enrolment: `stddev / mean` (population).
//! Used as the third FERS component and by the HighVolatility detector.

use crate::error::{MetricError, MetricKind, MetricResult};
use crate::utils::{mean, population_stddev};

/// Calculate volatility of a total-enrolment series
pub fn volatility(total_series: &[u64]) -> MetricResult {
    let values: Vec<f64> = total_series.iter().map(|&t| t as f64).collect();

    let m = mean(&values).ok_or(MetricError::InsufficientData {
        metric: MetricKind::Volatility,
        required: 1,
        available: 0,
    })?;

    if m == 0.0 {
        return Err(MetricError::UndefinedMetric {
            metric: MetricKind::Volatility,
            reason: "mean enrolment is zero",
        });
    }

    let sd = population_stddev(&values).unwrap_or(0.0);
    Ok(sd / m)
}
