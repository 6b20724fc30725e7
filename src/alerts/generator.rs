//! AlertGenerator: anomalies and metric breaches → ranked policy alerts
//!
//! Candidates come from two sources: every anomaly record, and every period
//! whose CEPS, FERS or LISS crosses its fixed alert threshold. Candidates are
//! then reduced to one per (region, alert type), escalated, given the
//! region's latest FERS, and ranked.

use super::ranking::rank_by_priority;
use super::rules::{
    base_priority, message, recommended_action, CEPS_GAP_THRESHOLD, FERS_RISK_THRESHOLD,
    LISS_UNSTABLE_THRESHOLD,
};
use super::types::{AlertType, PolicyAlert, Priority};
use crate::aggregation::{RegionId, ScoredTimeSeries};
use crate::anomaly::{AnomalyRecord, PeriodSpan};
use crate::data::Period;
use ahash::{AHashMap, AHashSet};

/// Alert before deduplication
#[derive(Debug, Clone)]
struct Candidate {
    alert_type: AlertType,
    region: RegionId,
    span: PeriodSpan,
    severity: f64,
    threshold: f64,
}

impl Candidate {
    fn exceedance(&self) -> f64 {
        self.alert_type.direction().exceedance(self.severity, self.threshold)
    }

    /// More severe wins; equal severity goes to the more recent finding
    fn outranks(&self, other: &Candidate) -> bool {
        match self.exceedance().total_cmp(&other.exceedance()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self.span.end > other.span.end,
        }
    }

    fn into_alert(self, fers: Option<f64>) -> PolicyAlert {
        PolicyAlert {
            message: message(self.alert_type, self.severity, self.threshold, &self.span),
            recommended_action: recommended_action(self.alert_type).to_string(),
            priority: base_priority(self.alert_type, self.severity, self.threshold),
            alert_type: self.alert_type,
            region: self.region,
            span: self.span,
            severity: self.severity,
            threshold: self.threshold,
            fers,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlertGenerator;

impl AlertGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the ranked alert list
    ///
    /// `scored` supplies both the metric breaches and each region's FERS for
    /// ranking; anomalies of regions absent from `scored` rank without FERS.
    pub fn generate(&self, anomalies: &[AnomalyRecord], scored: &[ScoredTimeSeries]) -> Vec<PolicyAlert> {
        let mut candidates: Vec<Candidate> = anomalies.iter().map(anomaly_candidate).collect();
        for series in scored {
            metric_candidates(series, &mut candidates);
        }
        let candidate_count = candidates.len();

        let declining_now = current_declines(&candidates, scored);
        let best = deduplicate(candidates);

        let fers_by_region: AHashMap<&RegionId, f64> = scored
            .iter()
            .filter_map(|s| s.latest_fers().map(|f| (&s.region, f)))
            .collect();

        let mut alerts: Vec<PolicyAlert> = best
            .into_iter()
            .map(|candidate| {
                let fers = fers_by_region.get(&candidate.region).copied();
                candidate.into_alert(fers)
            })
            .collect();

        escalate(&mut alerts, &declining_now);

        tracing::info!(
            "Generated {} policy alerts from {} candidates",
            alerts.len(),
            candidate_count
        );

        rank_by_priority(alerts)
    }
}

fn anomaly_candidate(record: &AnomalyRecord) -> Candidate {
    Candidate {
        alert_type: record.anomaly_type.into(),
        region: record.region.clone(),
        span: record.span,
        severity: record.severity,
        threshold: record.threshold,
    }
}

fn metric_candidates(series: &ScoredTimeSeries, out: &mut Vec<Candidate>) {
    for point in &series.points {
        let span = PeriodSpan::single(point.period());

        if let Some(ceps) = point.ceps.value().filter(|&c| c < CEPS_GAP_THRESHOLD) {
            out.push(Candidate {
                alert_type: AlertType::CriticalInclusionGap,
                region: series.region.clone(),
                span,
                severity: ceps,
                threshold: CEPS_GAP_THRESHOLD,
            });
        }

        if let Some(fers) = point.fers.value().filter(|&f| f > FERS_RISK_THRESHOLD) {
            out.push(Candidate {
                alert_type: AlertType::HighExclusionRisk,
                region: series.region.clone(),
                span,
                severity: fers,
                threshold: FERS_RISK_THRESHOLD,
            });
        }
    }

    // LISS describes the whole series, so it is checked once
    let (Some(first), Some(last)) = (series.points.first(), series.points.last()) else {
        return;
    };
    if let Some(liss) = last.liss.value().filter(|&l| l < LISS_UNSTABLE_THRESHOLD) {
        out.push(Candidate {
            alert_type: AlertType::UnstableEnrolment,
            region: series.region.clone(),
            span: PeriodSpan::new(first.period(), last.period()),
            severity: liss,
            threshold: LISS_UNSTABLE_THRESHOLD,
        });
    }
}

/// Keep the most severe candidate per (region, alert type)
fn deduplicate(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut best: AHashMap<(RegionId, AlertType), Candidate> = AHashMap::new();

    for candidate in candidates {
        let key = (candidate.region.clone(), candidate.alert_type);
        match best.get_mut(&key) {
            Some(current) => {
                if candidate.outranks(current) {
                    *current = candidate;
                }
            }
            None => {
                best.insert(key, candidate);
            }
        }
    }

    best.into_values().collect()
}

/// Regions with a DecliningGrowth run that ends at the region's newest period
///
/// The newest period comes from the region's scored series, or from its
/// candidates when the region has no series.
fn current_declines(candidates: &[Candidate], scored: &[ScoredTimeSeries]) -> AHashSet<RegionId> {
    let mut newest: AHashMap<&RegionId, Period> = scored
        .iter()
        .filter_map(|s| s.latest().map(|p| (&s.region, p.period())))
        .collect();
    for candidate in candidates {
        newest
            .entry(&candidate.region)
            .and_modify(|p| *p = (*p).max(candidate.span.end))
            .or_insert(candidate.span.end);
    }

    candidates
        .iter()
        .filter(|c| c.alert_type == AlertType::DecliningGrowth)
        .filter(|c| newest.get(&c.region) == Some(&c.span.end))
        .map(|c| c.region.clone())
        .collect()
}

/// Raise LowChildRatio and DecliningGrowth to P0 where a region's child share
/// is low and its enrolment is still falling
fn escalate(alerts: &mut [PolicyAlert], declining_now: &AHashSet<RegionId>) {
    let low_ratio: AHashSet<RegionId> = alerts
        .iter()
        .filter(|a| a.alert_type == AlertType::LowChildRatio)
        .map(|a| a.region.clone())
        .collect();

    for alert in alerts.iter_mut() {
        let paired = matches!(alert.alert_type, AlertType::LowChildRatio | AlertType::DecliningGrowth)
            && low_ratio.contains(&alert.region)
            && declining_now.contains(&alert.region);
        if paired {
            alert.priority = Priority::P0;
        }
    }
}
