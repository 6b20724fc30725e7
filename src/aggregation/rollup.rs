//! State and national rollups
//!
//! Child and adult counts are summed per period first, then every metric is
//! recomputed from the summed counts and the rolled-up series. Metrics are never
//! averaged across districts: that would weight a small district the same as a
//! large one.

use super::region::score_series;
use super::types::{RegionId, RegionPeriodAggregate, RegionTimeSeries, ScoredTimeSeries};
use crate::config::EngineConfig;
use crate::data::Period;
use std::collections::{BTreeMap, BTreeSet};

/// Sum counts per period across series into one series for `region`
fn sum_series<'a>(
    region: RegionId,
    members: impl Iterator<Item = &'a ScoredTimeSeries>,
) -> RegionTimeSeries {
    let mut sums: BTreeMap<Period, (u64, u64)> = BTreeMap::new();

    for series in members {
        for point in &series.points {
            let entry = sums.entry(point.period()).or_insert((0, 0));
            entry.0 = entry.0.saturating_add(point.aggregate.child_count);
            entry.1 = entry.1.saturating_add(point.aggregate.adult_count);
        }
    }

    let points = sums
        .into_iter()
        .map(|(period, (child, adult))| RegionPeriodAggregate::new(region.clone(), period, child, adult))
        .collect();

    RegionTimeSeries { region, points }
}

/// Roll one state's districts up into a state-level scored series
///
/// Series belonging to other states are ignored. A period in which the whole
/// state has no adult enrolment gets an undefined IGI and FERS, as any region
/// would.
pub fn rollup_state(state: &str, districts: &[ScoredTimeSeries], config: &EngineConfig) -> ScoredTimeSeries {
    let members = districts
        .iter()
        .filter(|s| matches!(&s.region, RegionId::District { state: st, .. } if st == state));

    let series = sum_series(RegionId::state(state), members);
    score_series(&series, config)
}

/// Roll every state up, in state-name order
pub fn rollup_all_states(districts: &[ScoredTimeSeries], config: &EngineConfig) -> Vec<ScoredTimeSeries> {
    let states: BTreeSet<&str> = districts
        .iter()
        .filter_map(|s| s.region.state_name())
        .collect();

    states
        .into_iter()
        .map(|state| rollup_state(state, districts, config))
        .collect()
}

/// Roll a set of series up into the national series
///
/// Summing state series or summing every district series directly gives the
/// same counts.
pub fn rollup_national(series: &[ScoredTimeSeries], config: &EngineConfig) -> ScoredTimeSeries {
    let national = sum_series(RegionId::National, series.iter());
    score_series(&national, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::region::{aggregate_by_region, build_all_time_series};
    use crate::data::{AgeClass, EnrolmentRecord};
    use crate::metrics::{ceps, MetricValue};
    use approx::assert_relative_eq;

    fn scored_districts(records: &[EnrolmentRecord]) -> Vec<ScoredTimeSeries> {
        let config = EngineConfig::default();
        build_all_time_series(&aggregate_by_region(records))
            .iter()
            .map(|s| score_series(s, &config))
            .collect()
    }

    fn records() -> Vec<EnrolmentRecord> {
        vec![
            // Small district with a high child share
            EnrolmentRecord::new(2025, 1, "Kerala", "Idukki", AgeClass::Child, 90),
            EnrolmentRecord::new(2025, 1, "Kerala", "Idukki", AgeClass::Adult, 10),
            EnrolmentRecord::new(2025, 2, "Kerala", "Idukki", AgeClass::Child, 80),
            EnrolmentRecord::new(2025, 2, "Kerala", "Idukki", AgeClass::Adult, 20),
            // Large district with a low child share
            EnrolmentRecord::new(2025, 1, "Kerala", "Kochi", AgeClass::Child, 1000),
            EnrolmentRecord::new(2025, 1, "Kerala", "Kochi", AgeClass::Adult, 9000),
            EnrolmentRecord::new(2025, 2, "Kerala", "Kochi", AgeClass::Child, 1100),
            EnrolmentRecord::new(2025, 2, "Kerala", "Kochi", AgeClass::Adult, 8900),
            EnrolmentRecord::new(2025, 1, "Assam", "Kamrup", AgeClass::Child, 400),
            EnrolmentRecord::new(2025, 1, "Assam", "Kamrup", AgeClass::Adult, 600),
        ]
    }

    #[test]
    fn test_state_counts_are_district_sums() {
        let districts = scored_districts(&records());
        let kerala = rollup_state("Kerala", &districts, &EngineConfig::default());

        assert_eq!(kerala.region, RegionId::state("Kerala"));
        assert_eq!(kerala.points.len(), 2);
        assert_eq!(kerala.points[0].aggregate.child_count, 1090);
        assert_eq!(kerala.points[0].aggregate.adult_count, 9010);
        assert_eq!(kerala.points[1].aggregate.child_count, 1180);
        assert_eq!(kerala.points[1].aggregate.adult_count, 8920);
    }

    #[test]
    fn test_state_ceps_is_count_weighted() {
        let districts = scored_districts(&records());
        let kerala = rollup_state("Kerala", &districts, &EngineConfig::default());

        let weighted = ceps(1090, 9010).unwrap();
        assert_relative_eq!(kerala.points[0].ceps.value().unwrap(), weighted);
        // Averaging the district scores would give (90 + 10) / 2
        assert!((kerala.points[0].ceps.value().unwrap() - 50.0).abs() > 30.0);
    }

    #[test]
    fn test_rollup_all_states_ordered() {
        let districts = scored_districts(&records());
        let states = rollup_all_states(&districts, &EngineConfig::default());

        let names: Vec<String> = states.iter().map(|s| s.region.to_string()).collect();
        assert_eq!(names, vec!["Assam", "Kerala"]);
        // Single-period state
        assert_eq!(states[0].points[0].liss, MetricValue::NotYetComputable);
    }

    #[test]
    fn test_national_same_from_states_or_districts() {
        let config = EngineConfig::default();
        let districts = scored_districts(&records());
        let states = rollup_all_states(&districts, &config);

        let from_states = rollup_national(&states, &config);
        let from_districts = rollup_national(&districts, &config);

        assert_eq!(from_states, from_districts);
        assert_eq!(from_states.region, RegionId::National);
        assert_eq!(from_states.points[0].aggregate.total(), 11100);
    }

    #[test]
    fn test_state_without_adults_is_undefined() {
        let records = vec![
            EnrolmentRecord::new(2025, 1, "Goa", "North Goa", AgeClass::Child, 50),
            EnrolmentRecord::new(2025, 1, "Goa", "South Goa", AgeClass::Child, 70),
            EnrolmentRecord::new(2025, 2, "Goa", "North Goa", AgeClass::Child, 40),
            EnrolmentRecord::new(2025, 2, "Goa", "North Goa", AgeClass::Adult, 40),
        ];
        let districts = scored_districts(&records);
        let goa = rollup_state("Goa", &districts, &EngineConfig::default());

        assert_eq!(goa.points[0].igi, MetricValue::Undefined);
        assert_eq!(goa.points[0].fers, MetricValue::Undefined);
        assert_eq!(goa.points[0].ceps, MetricValue::Defined(100.0));
        assert_eq!(goa.points[1].igi, MetricValue::Defined(0.0));
    }
}
