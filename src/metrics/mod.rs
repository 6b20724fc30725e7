//! Metric modules for inclusion scoring
//!
//! Each metric is a pure function over explicit numeric inputs, in its own module:
//! - CEPS: child share of total enrolment (0-100)
//! - IGI: structural child/adult imbalance
//! - LISS: stability of CEPS over time
//! - FERS: weighted composite risk
//! - Volatility: coefficient of variation of total enrolment (FERS input)

pub mod ceps;
pub mod igi;
pub mod liss;
pub mod fers;
pub mod volatility;

// Re-export metric functions
pub use ceps::{ceps, InclusionLevel};
pub use igi::{igi, GapRiskLevel};
pub use liss::{liss, StabilityLevel, LISS_VARIANCE_MAX};
pub use fers::{fers, ExclusionRiskLevel, FersWeights};
pub use volatility::volatility;

use crate::error::{MetricError, MetricResult};
use serde::{Deserialize, Serialize};

/// A metric slot on a scored aggregate
///
/// `Undefined` and `NotYetComputable` are distinct from any number: a metric
/// of 0 means "balanced", not "cannot compute".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Defined(f64),
    /// Formula denominator was zero for this period
    Undefined,
    /// Not enough periods in the region's series yet
    NotYetComputable,
}

impl MetricValue {
    /// The number, if one was computed
    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Defined(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, MetricValue::Defined(_))
    }
}

impl From<MetricResult> for MetricValue {
    fn from(result: MetricResult) -> Self {
        match result {
            Ok(v) => MetricValue::Defined(v),
            Err(MetricError::UndefinedMetric { .. }) => MetricValue::Undefined,
            Err(MetricError::InsufficientData { .. }) => MetricValue::NotYetComputable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricKind;

    #[test]
    fn test_metric_value_from_result() {
        assert_eq!(MetricValue::from(Ok(0.0)), MetricValue::Defined(0.0));

        let undefined: MetricResult = Err(MetricError::UndefinedMetric {
            metric: MetricKind::Igi,
            reason: "adult count is zero",
        });
        assert_eq!(MetricValue::from(undefined), MetricValue::Undefined);

        let insufficient: MetricResult = Err(MetricError::InsufficientData {
            metric: MetricKind::Liss,
            required: 2,
            available: 1,
        });
        assert_eq!(MetricValue::from(insufficient), MetricValue::NotYetComputable);
    }

    #[test]
    fn test_metric_value_serializes_status() {
        let json = serde_json::to_string(&MetricValue::Defined(26.5)).unwrap();
        assert_eq!(json, r#"{"status":"defined","value":26.5}"#);

        let json = serde_json::to_string(&MetricValue::NotYetComputable).unwrap();
        assert_eq!(json, r#"{"status":"not_yet_computable"}"#);
    }
}
