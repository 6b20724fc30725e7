//! LISS: Long-Term Inclusion Stability Score
//!
//! `LISS = 1 - Var(CEPS series) / LISS_VARIANCE_MAX`
//!
//! `Var` is the population variance over every period in the series. The
//! normalization constant is fixed rather than taken from the data, so a
//! region's score does not depend on which other regions are in the batch.
//!
//! The result is NOT clamped. A series that swings harder than the reference
//! variance scores below zero, and more negative still means less stable.

use crate::error::{MetricError, MetricKind, MetricResult};
use crate::utils::population_variance;
use serde::{Deserialize, Serialize};

/// Reference CEPS variance: `(100 / 2)^2`
///
/// CEPS lives in [0, 100]; the largest population variance a bounded series
/// can reach is half the range, squared (values split evenly between 0 and 100).
pub const LISS_VARIANCE_MAX: f64 = 2500.0;

/// Minimum number of periods for a stability score
pub const LISS_MIN_PERIODS: usize = 2;

/// Calculate LISS from an ordered CEPS series
pub fn liss(ceps_series: &[f64]) -> MetricResult {
    if ceps_series.len() < LISS_MIN_PERIODS {
        return Err(MetricError::InsufficientData {
            metric: MetricKind::Liss,
            required: LISS_MIN_PERIODS,
            available: ceps_series.len(),
        });
    }

    let variance = population_variance(ceps_series).ok_or(MetricError::InsufficientData {
        metric: MetricKind::Liss,
        required: LISS_MIN_PERIODS,
        available: 0,
    })?;

    Ok(1.0 - variance / LISS_VARIANCE_MAX)
}

/// Stability band derived from LISS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityLevel {
    HighlyUnstable,
    Unstable,
    Stable,
    HighlyStable,
}

impl StabilityLevel {
    pub fn from_liss(liss: f64) -> Self {
        match liss {
            s if s > 0.8 => StabilityLevel::HighlyStable,
            s if s > 0.6 => StabilityLevel::Stable,
            s if s > 0.4 => StabilityLevel::Unstable,
            _ => StabilityLevel::HighlyUnstable,
        }
    }
}
