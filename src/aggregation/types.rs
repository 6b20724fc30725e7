//! Aggregate value types shared by the aggregation, anomaly and alert stages

use crate::data::Period;
use crate::metrics::{
    ExclusionRiskLevel, GapRiskLevel, InclusionLevel, MetricValue, StabilityLevel,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic unit a score belongs to
///
/// Orders National < State < District, then lexicographically by name, which is
/// the deterministic tie-breaker for every ranking in the crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum RegionId {
    National,
    State { state: String },
    District { state: String, district: String },
}

impl RegionId {
    pub fn state(name: &str) -> Self {
        RegionId::State {
            state: name.to_string(),
        }
    }

    pub fn district(state: &str, district: &str) -> Self {
        RegionId::District {
            state: state.to_string(),
            district: district.to_string(),
        }
    }

    /// State name, `None` at national level
    pub fn state_name(&self) -> Option<&str> {
        match self {
            RegionId::National => None,
            RegionId::State { state } | RegionId::District { state, .. } => Some(state),
        }
    }

    /// District name, `None` above district level
    pub fn district_name(&self) -> Option<&str> {
        match self {
            RegionId::District { district, .. } => Some(district),
            _ => None,
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionId::National => f.write_str("National"),
            RegionId::State { state } => f.write_str(state),
            RegionId::District { state, district } => write!(f, "{}, {}", state, district),
        }
    }
}

/// Child/adult counts of one region in one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPeriodAggregate {
    pub region: RegionId,
    pub period: Period,
    pub child_count: u64,
    pub adult_count: u64,
}

impl RegionPeriodAggregate {
    pub fn new(region: RegionId, period: Period, child_count: u64, adult_count: u64) -> Self {
        Self {
            region,
            period,
            child_count,
            adult_count,
        }
    }

    /// `T = C + A`, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.child_count.saturating_add(self.adult_count)
    }
}

/// An aggregate with its computed metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAggregate {
    #[serde(flatten)]
    pub aggregate: RegionPeriodAggregate,
    pub ceps: MetricValue,
    pub igi: MetricValue,
    pub liss: MetricValue,
    pub fers: MetricValue,
    /// Trailing-window volatility used as the FERS input
    pub volatility: MetricValue,
}

impl ScoredAggregate {
    pub fn region(&self) -> &RegionId {
        &self.aggregate.region
    }

    pub fn period(&self) -> Period {
        self.aggregate.period
    }

    pub fn inclusion_level(&self) -> Option<InclusionLevel> {
        self.ceps.value().map(InclusionLevel::from_ceps)
    }

    pub fn gap_risk_level(&self) -> Option<GapRiskLevel> {
        self.igi.value().map(GapRiskLevel::from_igi)
    }

    pub fn stability_level(&self) -> Option<StabilityLevel> {
        self.liss.value().map(StabilityLevel::from_liss)
    }

    pub fn exclusion_risk_level(&self) -> Option<ExclusionRiskLevel> {
        self.fers.value().map(ExclusionRiskLevel::from_fers)
    }
}

/// One region's aggregates, ascending by period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTimeSeries {
    pub region: RegionId,
    pub points: Vec<RegionPeriodAggregate>,
}

impl RegionTimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of a period in the series
    pub fn position(&self, period: Period) -> Option<usize> {
        self.points.binary_search_by_key(&period, |p| p.period).ok()
    }

    pub fn totals(&self) -> Vec<u64> {
        self.points.iter().map(RegionPeriodAggregate::total).collect()
    }
}

/// One region's scored aggregates, ascending by period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTimeSeries {
    pub region: RegionId,
    pub points: Vec<ScoredAggregate>,
}

impl ScoredTimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&ScoredAggregate> {
        self.points.last()
    }

    pub fn at(&self, period: Period) -> Option<&ScoredAggregate> {
        self.points
            .binary_search_by_key(&period, |p| p.period())
            .ok()
            .map(|i| &self.points[i])
    }

    pub fn totals(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.aggregate.total()).collect()
    }

    /// FERS of the newest period; `None` when that period has no defined FERS
    pub fn latest_fers(&self) -> Option<f64> {
        self.latest().and_then(|p| p.fers.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_ordering() {
        let mut regions = vec![
            RegionId::district("Kerala", "Kochi"),
            RegionId::state("Assam"),
            RegionId::district("Assam", "Kamrup"),
            RegionId::National,
            RegionId::district("Assam", "Barpeta"),
        ];
        regions.sort();
        assert_eq!(
            regions,
            vec![
                RegionId::National,
                RegionId::state("Assam"),
                RegionId::district("Assam", "Barpeta"),
                RegionId::district("Assam", "Kamrup"),
                RegionId::district("Kerala", "Kochi"),
            ]
        );
    }

    #[test]
    fn test_region_display() {
        assert_eq!(RegionId::district("Maharashtra", "Mumbai").to_string(), "Maharashtra, Mumbai");
        assert_eq!(RegionId::state("Kerala").to_string(), "Kerala");
        assert_eq!(RegionId::National.to_string(), "National");
    }

    #[test]
    fn test_series_position() {
        let region = RegionId::district("Kerala", "Kochi");
        let series = RegionTimeSeries {
            region: region.clone(),
            points: vec![
                RegionPeriodAggregate::new(region.clone(), Period::new(2025, 1), 10, 20),
                RegionPeriodAggregate::new(region.clone(), Period::new(2025, 2), 12, 20),
            ],
        };
        assert_eq!(series.position(Period::new(2025, 2)), Some(1));
        assert_eq!(series.position(Period::new(2025, 3)), None);
        assert_eq!(series.totals(), vec![30, 32]);
    }
}
