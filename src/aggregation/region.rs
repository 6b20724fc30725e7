//! District-level grouping and scoring
//!
//! Records are grouped into one aggregate per (state, district, period), then
//! each district's aggregates are ordered into a time series and scored.
//! LISS and FERS read the whole series; CEPS and IGI read only the period.

use super::types::{
    RegionId, RegionPeriodAggregate, RegionTimeSeries, ScoredAggregate, ScoredTimeSeries,
};
use crate::config::EngineConfig;
use crate::data::{AgeClass, EnrolmentRecord, Period};
use crate::error::MetricResult;
use crate::metrics::{ceps, fers, igi, liss, volatility, FersWeights, MetricValue};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Aggregates keyed by region then period
pub type AggregateMap = BTreeMap<(RegionId, Period), RegionPeriodAggregate>;

/// Sum record counts by age class into one aggregate per (state, district, period)
///
/// Output order is fixed by the map key, so input order has no effect.
pub fn aggregate_by_region(records: &[EnrolmentRecord]) -> AggregateMap {
    let mut counts: FxHashMap<(RegionId, Period), (u64, u64)> = FxHashMap::default();

    for record in records {
        let key = (
            RegionId::district(&record.state, &record.district),
            record.period,
        );
        let entry = counts.entry(key).or_insert((0, 0));
        match record.age_class {
            AgeClass::Child => entry.0 = entry.0.saturating_add(record.count),
            AgeClass::Adult => entry.1 = entry.1.saturating_add(record.count),
        }
    }

    counts
        .into_iter()
        .map(|((region, period), (child, adult))| {
            let aggregate = RegionPeriodAggregate::new(region.clone(), period, child, adult);
            ((region, period), aggregate)
        })
        .collect()
}

/// Ordered series of one district's aggregates
///
/// Empty when the district has no records.
pub fn build_time_series(aggregates: &AggregateMap, state: &str, district: &str) -> RegionTimeSeries {
    let region = RegionId::district(state, district);
    let points = aggregates
        .range((region.clone(), Period::new(i32::MIN, 0))..=(region.clone(), Period::new(i32::MAX, u32::MAX)))
        .map(|(_, aggregate)| aggregate.clone())
        .collect();

    RegionTimeSeries { region, points }
}

/// Every region's series, in region order
pub fn build_all_time_series(aggregates: &AggregateMap) -> Vec<RegionTimeSeries> {
    let mut series: Vec<RegionTimeSeries> = Vec::new();

    // Map iteration is already sorted by (region, period)
    for ((region, _), aggregate) in aggregates {
        match series.last_mut() {
            Some(current) if &current.region == region => current.points.push(aggregate.clone()),
            _ => series.push(RegionTimeSeries {
                region: region.clone(),
                points: vec![aggregate.clone()],
            }),
        }
    }

    series
}

/// Score one aggregate against its region's series
///
/// An aggregate whose period is absent from `context` is scored for CEPS and
/// IGI only.
pub fn score(
    aggregate: &RegionPeriodAggregate,
    context: &RegionTimeSeries,
    config: &EngineConfig,
) -> ScoredAggregate {
    let scorer = SeriesScorer::new(context, config);
    match context.position(aggregate.period) {
        Some(index) => scorer.score_at(index),
        None => scorer.score_detached(aggregate),
    }
}

/// Score every period of a series
pub fn score_series(series: &RegionTimeSeries, config: &EngineConfig) -> ScoredTimeSeries {
    let scorer = SeriesScorer::new(series, config);
    let points = (0..series.len()).map(|i| scorer.score_at(i)).collect();

    ScoredTimeSeries {
        region: series.region.clone(),
        points,
    }
}

/// Series-wide inputs computed once per series
struct SeriesScorer<'a> {
    series: &'a RegionTimeSeries,
    totals: Vec<u64>,
    liss: MetricValue,
    weights: FersWeights,
    window: usize,
}

impl<'a> SeriesScorer<'a> {
    fn new(series: &'a RegionTimeSeries, config: &EngineConfig) -> Self {
        // Periods without any enrolment have no CEPS and drop out of the variance
        let ceps_series: Vec<f64> = series
            .points
            .iter()
            .filter_map(|p| ceps(p.child_count, p.adult_count).ok())
            .collect();

        Self {
            series,
            totals: series.totals(),
            liss: MetricValue::from(liss(&ceps_series)),
            weights: config.fers_weights(),
            window: config.volatility_window,
        }
    }

    fn score_at(&self, index: usize) -> ScoredAggregate {
        let aggregate = &self.series.points[index];
        let ceps_value = ceps(aggregate.child_count, aggregate.adult_count);
        let igi_value = igi(aggregate.child_count, aggregate.adult_count);

        if self.series.len() < 2 {
            return ScoredAggregate {
                aggregate: aggregate.clone(),
                ceps: ceps_value.into(),
                igi: igi_value.into(),
                liss: MetricValue::NotYetComputable,
                fers: MetricValue::NotYetComputable,
                volatility: MetricValue::NotYetComputable,
            };
        }

        let volatility_value = volatility(self.window_totals(index));
        let fers_value = self.fers(ceps_value, igi_value, volatility_value);

        ScoredAggregate {
            aggregate: aggregate.clone(),
            ceps: ceps_value.into(),
            igi: igi_value.into(),
            liss: self.liss,
            fers: fers_value,
            volatility: volatility_value.into(),
        }
    }

    fn score_detached(&self, aggregate: &RegionPeriodAggregate) -> ScoredAggregate {
        ScoredAggregate {
            aggregate: aggregate.clone(),
            ceps: ceps(aggregate.child_count, aggregate.adult_count).into(),
            igi: igi(aggregate.child_count, aggregate.adult_count).into(),
            liss: MetricValue::NotYetComputable,
            fers: MetricValue::NotYetComputable,
            volatility: MetricValue::NotYetComputable,
        }
    }

    /// Totals of the trailing volatility window ending at `index`
    ///
    /// The first period has no trailing history, so its window runs forward
    /// over the earliest `window` periods instead.
    fn window_totals(&self, index: usize) -> &[u64] {
        let mut end = index + 1;
        if end < 2 {
            end = self.window.min(self.totals.len());
        }
        let start = end.saturating_sub(self.window);
        &self.totals[start..end]
    }

    fn fers(&self, ceps_value: MetricResult, igi_value: MetricResult, vol: MetricResult) -> MetricValue {
        match (ceps_value, igi_value, vol) {
            (Ok(c), Ok(g), Ok(v)) => MetricValue::Defined(fers(c, g, v, &self.weights)),
            _ => MetricValue::Undefined,
        }
    }
}
