//! IGI: Inclusion Gap Index
//!
//! `IGI = 1 - C / A`. Positive when adults outnumber children, zero at parity,
//! negative when children outnumber adults. Unbounded in both directions;
//! no clamping is applied.

use crate::error::{MetricError, MetricKind, MetricResult};
use serde::{Deserialize, Serialize};

/// Calculate IGI from child and adult counts
///
/// Undefined when the adult count is zero.
pub fn igi(child: u64, adult: u64) -> MetricResult {
    if adult == 0 {
        return Err(MetricError::UndefinedMetric {
            metric: MetricKind::Igi,
            reason: "adult count is zero",
        });
    }
    Ok(1.0 - child as f64 / adult as f64)
}

/// Gap risk band derived from IGI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapRiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl GapRiskLevel {
    pub fn from_igi(igi: f64) -> Self {
        match igi {
            g if g > 0.7 => GapRiskLevel::Critical,
            g if g > 0.4 => GapRiskLevel::High,
            g if g > 0.1 => GapRiskLevel::Moderate,
            _ => GapRiskLevel::Low,
        }
    }
}
