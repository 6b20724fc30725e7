//! Policy alert types

use crate::aggregation::RegionId;
use crate::anomaly::{AnomalyType, Direction, PeriodSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert priority; P0 is most urgent and sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    // Direct metric breaches
    CriticalInclusionGap,
    HighExclusionRisk,
    UnstableEnrolment,
    // Detector findings
    LowChildRatio,
    DecliningGrowth,
    HighVolatility,
    Stagnation,
    SeasonalDeviation,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::CriticalInclusionGap => "CRITICAL_INCLUSION_GAP",
            AlertType::HighExclusionRisk => "HIGH_EXCLUSION_RISK",
            AlertType::UnstableEnrolment => "UNSTABLE_ENROLMENT",
            AlertType::LowChildRatio => "LOW_CHILD_RATIO",
            AlertType::DecliningGrowth => "DECLINING_GROWTH",
            AlertType::HighVolatility => "HIGH_VOLATILITY",
            AlertType::Stagnation => "STAGNATION",
            AlertType::SeasonalDeviation => "SEASONAL_DEVIATION",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            AlertType::CriticalInclusionGap | AlertType::UnstableEnrolment => Direction::Below,
            AlertType::HighExclusionRisk => Direction::Above,
            AlertType::LowChildRatio => AnomalyType::LowChildRatio.direction(),
            AlertType::DecliningGrowth => AnomalyType::DecliningGrowth.direction(),
            AlertType::HighVolatility => AnomalyType::HighVolatility.direction(),
            AlertType::Stagnation => AnomalyType::Stagnation.direction(),
            AlertType::SeasonalDeviation => AnomalyType::SeasonalDeviation.direction(),
        }
    }
}

impl From<AnomalyType> for AlertType {
    fn from(anomaly_type: AnomalyType) -> Self {
        match anomaly_type {
            AnomalyType::LowChildRatio => AlertType::LowChildRatio,
            AnomalyType::DecliningGrowth => AlertType::DecliningGrowth,
            AnomalyType::HighVolatility => AlertType::HighVolatility,
            AnomalyType::Stagnation => AlertType::Stagnation,
            AnomalyType::SeasonalDeviation => AlertType::SeasonalDeviation,
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One actionable alert per (region, alert type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAlert {
    pub alert_type: AlertType,
    pub region: RegionId,
    pub span: PeriodSpan,
    pub message: String,
    pub recommended_action: String,
    pub priority: Priority,
    /// Value of the defining metric
    pub severity: f64,
    pub threshold: f64,
    /// Region's most recent defined FERS
    pub fers: Option<f64>,
}

impl PolicyAlert {
    /// Distance of `severity` past `threshold`
    pub fn exceedance(&self) -> f64 {
        self.alert_type.direction().exceedance(self.severity, self.threshold)
    }
}
