//! Anomaly record types

use crate::aggregation::RegionId;
use crate::data::Period;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of its threshold a value must fall to count as a breach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Below,
    Above,
}

impl Direction {
    /// Distance past the threshold; positive means breached
    pub fn exceedance(self, value: f64, threshold: f64) -> f64 {
        match self {
            Direction::Below => threshold - value,
            Direction::Above => value - threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnomalyType {
    LowChildRatio,
    DecliningGrowth,
    HighVolatility,
    Stagnation,
    SeasonalDeviation,
}

impl AnomalyType {
    pub const ALL: [AnomalyType; 5] = [
        AnomalyType::LowChildRatio,
        AnomalyType::DecliningGrowth,
        AnomalyType::HighVolatility,
        AnomalyType::Stagnation,
        AnomalyType::SeasonalDeviation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyType::LowChildRatio => "LowChildRatio",
            AnomalyType::DecliningGrowth => "DecliningGrowth",
            AnomalyType::HighVolatility => "HighVolatility",
            AnomalyType::Stagnation => "Stagnation",
            AnomalyType::SeasonalDeviation => "SeasonalDeviation",
        }
    }

    /// Side of the threshold the severity value crosses
    pub fn direction(&self) -> Direction {
        match self {
            AnomalyType::LowChildRatio | AnomalyType::DecliningGrowth => Direction::Below,
            AnomalyType::HighVolatility
            | AnomalyType::Stagnation
            | AnomalyType::SeasonalDeviation => Direction::Above,
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive period range; `start == end` for single-period findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodSpan {
    pub start: Period,
    pub end: Period,
}

impl PeriodSpan {
    pub fn new(start: Period, end: Period) -> Self {
        Self { start, end }
    }

    pub fn single(period: Period) -> Self {
        Self { start: period, end: period }
    }
}

impl fmt::Display for PeriodSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

/// One detector finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub region: RegionId,
    pub anomaly_type: AnomalyType,
    pub span: PeriodSpan,
    /// Measured value that crossed the threshold
    pub severity: f64,
    pub threshold: f64,
}

impl AnomalyRecord {
    pub fn exceedance(&self) -> f64 {
        self.anomaly_type.direction().exceedance(self.severity, self.threshold)
    }
}

/// Outcome of one detector over one series
///
/// `Clear` means the detector ran and found nothing; `InsufficientHistory`
/// means it could not run.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    Fired(Vec<AnomalyRecord>),
    Clear,
    InsufficientHistory { required: usize, available: usize },
}

impl Detection {
    pub fn from_records(records: Vec<AnomalyRecord>) -> Self {
        if records.is_empty() {
            Detection::Clear
        } else {
            Detection::Fired(records)
        }
    }

    pub fn fired(&self) -> bool {
        matches!(self, Detection::Fired(_))
    }

    pub fn records(&self) -> &[AnomalyRecord] {
        match self {
            Detection::Fired(records) => records,
            _ => &[],
        }
    }

    pub fn into_records(self) -> Vec<AnomalyRecord> {
        match self {
            Detection::Fired(records) => records,
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceedance_sign() {
        assert!(Direction::Below.exceedance(0.1, 0.2) > 0.0);
        assert!(Direction::Above.exceedance(0.5, 0.3) > 0.0);
        assert!(Direction::Above.exceedance(0.2, 0.3) < 0.0);
    }

    #[test]
    fn test_span_display() {
        let jan = Period::new(2025, 1);
        assert_eq!(PeriodSpan::single(jan).to_string(), "2025-01");
        assert_eq!(PeriodSpan::new(jan, Period::new(2025, 4)).to_string(), "2025-01 to 2025-04");
    }

    #[test]
    fn test_detection_states() {
        assert_eq!(Detection::from_records(Vec::new()), Detection::Clear);
        let insufficient = Detection::InsufficientHistory { required: 4, available: 2 };
        assert!(!insufficient.fired());
        assert!(insufficient.records().is_empty());
    }
}
