//! Alert and region rankings
//!
//! Every ordering here is total: ties fall through to region name, then alert
//! type, so repeated calls on the same input give the same order.
//!
//! Risk and low-inclusion rankings read each region's newest period only; a
//! region whose newest value is undefined is left out. The intervention
//! ranking needs CEPS, FERS and LISS together and reads the newest period that
//! has all three, which may be older than the region's newest period.

use super::types::PolicyAlert;
use crate::aggregation::{RegionId, ScoredAggregate};
use crate::data::Period;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A region with the score it was ranked by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRegion {
    pub region: RegionId,
    /// Period the score was taken from
    pub period: Period,
    pub score: f64,
}

/// Order alerts by priority, then FERS (descending, regions without FERS
/// last), then distance past threshold (descending), then region and type
pub fn rank_by_priority(mut alerts: Vec<PolicyAlert>) -> Vec<PolicyAlert> {
    alerts.sort_by(compare_alerts);
    alerts
}

fn compare_alerts(a: &PolicyAlert, b: &PolicyAlert) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| match (a.fers, b.fers) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.exceedance().total_cmp(&a.exceedance()))
        .then_with(|| a.region.cmp(&b.region))
        .then_with(|| a.alert_type.cmp(&b.alert_type))
}

/// Per region, the score of its newest period or, with `skip_undefined`, of
/// its newest period where `value` is defined
fn latest_per_region(
    scored: &[ScoredAggregate],
    value: impl Fn(&ScoredAggregate) -> Option<f64>,
    skip_undefined: bool,
) -> Vec<RankedRegion> {
    let mut latest: BTreeMap<&RegionId, (Period, Option<f64>)> = BTreeMap::new();

    for aggregate in scored {
        let score = value(aggregate);
        if skip_undefined && score.is_none() {
            continue;
        }
        let period = aggregate.period();
        latest
            .entry(aggregate.region())
            .and_modify(|entry| {
                if period > entry.0 {
                    *entry = (period, score);
                }
            })
            .or_insert((period, score));
    }

    latest
        .into_iter()
        .filter_map(|(region, (period, score))| {
            Some(RankedRegion {
                region: region.clone(),
                period,
                score: score?,
            })
        })
        .collect()
}

fn take_top(mut ranked: Vec<RankedRegion>, n: usize, descending: bool) -> Vec<RankedRegion> {
    ranked.sort_by(|a, b| {
        let by_score = if descending {
            b.score.total_cmp(&a.score)
        } else {
            a.score.total_cmp(&b.score)
        };
        by_score.then_with(|| a.region.cmp(&b.region))
    });
    ranked.truncate(n);
    ranked
}

/// `n` regions with the highest latest FERS
pub fn top_risk_regions(scored: &[ScoredAggregate], n: usize) -> Vec<RankedRegion> {
    take_top(latest_per_region(scored, |s| s.fers.value(), false), n, true)
}

/// `n` regions most in need of intervention
///
/// Score `0.3 * (1 - CEPS/100) + 0.4 * FERS + 0.3 * (1 - LISS)`, taken from
/// each region's latest period with all three metrics defined.
pub fn priority_intervention_regions(scored: &[ScoredAggregate], n: usize) -> Vec<RankedRegion> {
    let ranked = latest_per_region(scored, |s| {
        let ceps = s.ceps.value()?;
        let fers = s.fers.value()?;
        let liss = s.liss.value()?;
        Some(0.3 * (1.0 - ceps / 100.0) + 0.4 * fers + 0.3 * (1.0 - liss))
    }, true);
    take_top(ranked, n, true)
}

/// `n` regions with the lowest latest CEPS
pub fn top_low_inclusion_regions(scored: &[ScoredAggregate], n: usize) -> Vec<RankedRegion> {
    take_top(latest_per_region(scored, |s| s.ceps.value(), false), n, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::RegionPeriodAggregate;
    use crate::alerts::types::{AlertType, Priority};
    use crate::anomaly::PeriodSpan;
    use crate::metrics::MetricValue;
    use approx::assert_relative_eq;

    fn scored(district: &str, month: u32, ceps: f64, liss: MetricValue, fers: MetricValue) -> ScoredAggregate {
        ScoredAggregate {
            aggregate: RegionPeriodAggregate::new(
                RegionId::district("Odisha", district),
                Period::new(2025, month),
                0,
                0,
            ),
            ceps: MetricValue::Defined(ceps),
            igi: MetricValue::Defined(0.5),
            liss,
            fers,
            volatility: MetricValue::Defined(0.1),
        }
    }

    fn alert(district: &str, alert_type: AlertType, priority: Priority, fers: Option<f64>, severity: f64) -> PolicyAlert {
        PolicyAlert {
            alert_type,
            region: RegionId::district("Odisha", district),
            span: PeriodSpan::single(Period::new(2025, 1)),
            message: String::new(),
            recommended_action: String::new(),
            priority,
            severity,
            threshold: 30.0,
            fers,
        }
    }

    #[test]
    fn test_rank_by_priority_order() {
        let alerts = vec![
            alert("Puri", AlertType::CriticalInclusionGap, Priority::P1, None, 25.0),
            alert("Cuttack", AlertType::CriticalInclusionGap, Priority::P1, Some(0.5), 25.0),
            alert("Ganjam", AlertType::CriticalInclusionGap, Priority::P0, Some(0.2), 15.0),
            alert("Khurda", AlertType::CriticalInclusionGap, Priority::P1, Some(0.7), 28.0),
            alert("Balasore", AlertType::CriticalInclusionGap, Priority::P1, None, 22.0),
        ];
        let ranked = rank_by_priority(alerts);
        let order: Vec<String> = ranked.iter().map(|a| a.region.to_string()).collect();
        assert_eq!(
            order,
            vec![
                "Odisha, Ganjam",
                "Odisha, Khurda",
                "Odisha, Cuttack",
                "Odisha, Balasore",
                "Odisha, Puri",
            ]
        );
    }

    #[test]
    fn test_rank_ties_break_on_region_then_type() {
        let alerts = vec![
            alert("Puri", AlertType::Stagnation, Priority::P2, None, 31.0),
            alert("Puri", AlertType::HighVolatility, Priority::P2, None, 31.0),
            alert("Cuttack", AlertType::Stagnation, Priority::P2, None, 31.0),
        ];
        let ranked = rank_by_priority(alerts.clone());
        assert_eq!(ranked[0].region, RegionId::district("Odisha", "Cuttack"));
        assert_eq!(ranked[1].alert_type, AlertType::HighVolatility);
        assert_eq!(ranked, rank_by_priority(ranked.clone()));
    }

    #[test]
    fn test_top_risk_uses_latest_fers() {
        let scored = vec![
            scored("Puri", 1, 20.0, MetricValue::Defined(0.9), MetricValue::Defined(0.9)),
            scored("Puri", 2, 20.0, MetricValue::Defined(0.9), MetricValue::Defined(0.4)),
            scored("Khurda", 1, 20.0, MetricValue::Defined(0.9), MetricValue::Defined(0.4)),
            scored("Angul", 1, 20.0, MetricValue::Defined(0.9), MetricValue::Defined(0.6)),
        ];
        let top = top_risk_regions(&scored, 3);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].region, RegionId::district("Odisha", "Angul"));
        // Puri ranks on February, tying Khurda; the earlier name goes first
        assert_eq!(top[1].region, RegionId::district("Odisha", "Khurda"));
        assert_eq!(top[2].region, RegionId::district("Odisha", "Puri"));
        assert_eq!(top[2].period, Period::new(2025, 2));
        assert_eq!(top_risk_regions(&scored, 3), top);
    }

    #[test]
    fn test_undefined_latest_fers_not_ranked_on_older_value() {
        let scored = vec![
            scored("Cuttack", 1, 20.0, MetricValue::Defined(0.9), MetricValue::Defined(0.9)),
            scored("Cuttack", 2, 20.0, MetricValue::Defined(0.9), MetricValue::Undefined),
            scored("Angul", 1, 20.0, MetricValue::Defined(0.9), MetricValue::Defined(0.6)),
        ];
        let top = top_risk_regions(&scored, 5);

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].region, RegionId::district("Odisha", "Angul"));
    }

    #[test]
    fn test_priority_intervention_score() {
        let scored = vec![
            scored("Puri", 1, 20.0, MetricValue::Defined(0.5), MetricValue::Defined(0.8)),
            scored("Cuttack", 1, 60.0, MetricValue::Defined(0.9), MetricValue::Defined(0.3)),
            scored("Angul", 1, 10.0, MetricValue::NotYetComputable, MetricValue::NotYetComputable),
        ];
        let top = priority_intervention_regions(&scored, 10);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].region, RegionId::district("Odisha", "Puri"));
        assert_relative_eq!(top[0].score, 0.3 * 0.8 + 0.4 * 0.8 + 0.3 * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_low_inclusion_ascending() {
        let scored = vec![
            scored("Puri", 1, 35.0, MetricValue::NotYetComputable, MetricValue::NotYetComputable),
            scored("Cuttack", 1, 12.0, MetricValue::NotYetComputable, MetricValue::NotYetComputable),
            scored("Angul", 1, 48.0, MetricValue::NotYetComputable, MetricValue::NotYetComputable),
        ];
        let top = top_low_inclusion_regions(&scored, 2);
        let names: Vec<String> = top.iter().map(|r| r.region.to_string()).collect();
        assert_eq!(names, vec!["Odisha, Cuttack", "Odisha, Puri"]);
    }
}
