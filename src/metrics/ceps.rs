//! CEPS: Child Enrolment Penetration Score
//!
//! `CEPS = C / (C + A) * 100`, the child share of all enrolments in a
//! region-period. Range 0-100.
//!
//! Bands:
//!   - < 30: Critical inclusion gap
//!   - 30-60: Moderate inclusion
//!   - >= 60: Healthy inclusion

use crate::error::{MetricError, MetricKind, MetricResult};
use serde::{Deserialize, Serialize};

/// Calculate CEPS from child and adult counts
///
/// Undefined when there are no enrolments at all (`C + A == 0`).
pub fn ceps(child: u64, adult: u64) -> MetricResult {
    if child == 0 && adult == 0 {
        return Err(MetricError::UndefinedMetric {
            metric: MetricKind::Ceps,
            reason: "no enrolments in period",
        });
    }
    Ok(child as f64 / (child as f64 + adult as f64) * 100.0)
}

/// Inclusion band derived from CEPS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InclusionLevel {
    Critical,
    Moderate,
    Healthy,
}

impl InclusionLevel {
    pub fn from_ceps(ceps: f64) -> Self {
        match ceps {
            c if c < 30.0 => InclusionLevel::Critical,
            c if c < 60.0 => InclusionLevel::Moderate,
            _ => InclusionLevel::Healthy,
        }
    }
}
