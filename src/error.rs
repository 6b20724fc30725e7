//! Error taxonomy for the scoring core
//!
//! Two kinds of outcome live here:
//! - `MetricError`: local, per-call outcomes (undefined formula, not enough periods).
//!   Callers branch on these; they are never coerced to 0.
//! - `ConfigError`: raised once when an engine is constructed, never while scoring.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which metric produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Ceps,
    Igi,
    Liss,
    Fers,
    Volatility,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Ceps => "CEPS",
            MetricKind::Igi => "IGI",
            MetricKind::Liss => "LISS",
            MetricKind::Fers => "FERS",
            MetricKind::Volatility => "volatility",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a metric formula that could not produce a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricError {
    /// Denominator is zero or the input is otherwise mathematically undefined
    #[error("{metric} is undefined: {reason}")]
    UndefinedMetric {
        metric: MetricKind,
        reason: &'static str,
    },

    /// Fewer periods than the metric needs ("not yet scoreable")
    #[error("{metric} needs at least {required} periods, got {available}")]
    InsufficientData {
        metric: MetricKind,
        required: usize,
        available: usize,
    },
}

/// Result of a single metric formula
pub type MetricResult = Result<f64, MetricError>;

/// Invalid thresholds or weights supplied at engine construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} = {value} is out of range (expected {expected})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("FERS weights must sum to 1.0 (±{tolerance}), got {sum}")]
    WeightSum { sum: f64, tolerance: f64 },

    #[error("{name} must be at least {min}, got {value}")]
    WindowTooShort {
        name: &'static str,
        value: usize,
        min: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_metric() {
        let err = MetricError::UndefinedMetric {
            metric: MetricKind::Igi,
            reason: "adult count is zero",
        };
        assert_eq!(err.to_string(), "IGI is undefined: adult count is zero");

        let err = MetricError::InsufficientData {
            metric: MetricKind::Liss,
            required: 2,
            available: 1,
        };
        assert_eq!(err.to_string(), "LISS needs at least 2 periods, got 1");
    }
}
