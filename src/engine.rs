//! Inclusion Engine - main coordinator for the scoring pipeline
//!
//! records → district aggregates → scored district series → state and national
//! rollups → anomalies → ranked alerts.
//!
//! Includes both sequential and parallel (Rayon) implementations. Regions have
//! no data dependency on each other, so the parallel path maps over region
//! series and returns exactly what the sequential path returns.

use crate::aggregation::{
    aggregate_by_region, build_all_time_series, rollup_national, rollup_state, score_series,
    RegionId, ScoredAggregate, ScoredTimeSeries,
};
use crate::alerts::{self, AlertGenerator, PolicyAlert, RankedRegion};
use crate::anomaly::{AnomalyEngine, AnomalyRecord};
use crate::config::EngineConfig;
use crate::data::{summarize, DatasetSummary, EnrolmentRecord, Period};
use crate::error::ConfigError;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Instant;

/// Main scoring engine; configuration is fixed at construction
pub struct InclusionEngine {
    config: EngineConfig,
    anomaly_engine: AnomalyEngine,
    alert_generator: AlertGenerator,
}

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub generated_at: DateTime<Utc>,
    pub summary: DatasetSummary,
    pub national: ScoredTimeSeries,
    /// In state-name order
    pub states: Vec<ScoredTimeSeries>,
    /// In (state, district) order
    pub districts: Vec<ScoredTimeSeries>,
    pub anomalies: Vec<AnomalyRecord>,
    /// Ranked, most urgent first
    pub alerts: Vec<PolicyAlert>,
}

/// Filter for region-level reads
#[derive(Debug, Clone, Default)]
pub struct RegionQuery {
    /// Only districts of this state
    pub state: Option<String>,
    /// This period instead of each district's latest
    pub period: Option<Period>,
    /// Keep the `n` highest-FERS districts
    pub top_n: Option<usize>,
}

impl InclusionEngine {
    /// Validate configuration and build the engine
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!("Engine configuration: {:?}", config);

        Ok(Self {
            anomaly_engine: AnomalyEngine::new(config.clone()),
            alert_generator: AlertGenerator::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline (sequential)
    pub fn run(&self, records: &[EnrolmentRecord]) -> Analysis {
        let start = Instant::now();
        tracing::info!("Scoring {} enrolment records", records.len());

        let aggregates = aggregate_by_region(records);
        let series = build_all_time_series(&aggregates);
        tracing::info!("Aggregated {} region-periods across {} districts", aggregates.len(), series.len());

        let districts: Vec<ScoredTimeSeries> = series
            .iter()
            .map(|s| score_series(s, &self.config))
            .collect();

        let states: Vec<ScoredTimeSeries> = state_names(&districts)
            .into_iter()
            .map(|state| rollup_state(state, &districts, &self.config))
            .collect();
        let national = rollup_national(&states, &self.config);

        let anomalies = self.anomaly_engine.detect_all(&districts);
        let alerts = self.alert_generator.generate(&anomalies, &districts);

        tracing::info!("Pipeline finished in {:.2?}", start.elapsed());
        self.analysis(records, national, states, districts, anomalies, alerts)
    }

    /// Run the full pipeline with Rayon
    pub fn run_parallel(&self, records: &[EnrolmentRecord]) -> Analysis {
        let start = Instant::now();
        tracing::info!("Scoring {} enrolment records (parallel)", records.len());

        let aggregates = aggregate_by_region(records);
        let series = build_all_time_series(&aggregates);
        tracing::info!("Aggregated {} region-periods across {} districts", aggregates.len(), series.len());

        // par_iter + collect keeps input order
        let districts: Vec<ScoredTimeSeries> = series
            .par_iter()
            .map(|s| score_series(s, &self.config))
            .collect();

        let states: Vec<ScoredTimeSeries> = state_names(&districts)
            .into_par_iter()
            .map(|state| rollup_state(state, &districts, &self.config))
            .collect();
        let national = rollup_national(&states, &self.config);

        let anomalies = self.anomaly_engine.detect_all_parallel(&districts);
        let alerts = self.alert_generator.generate(&anomalies, &districts);

        tracing::info!("Pipeline finished in {:.2?}", start.elapsed());
        self.analysis(records, national, states, districts, anomalies, alerts)
    }

    fn analysis(
        &self,
        records: &[EnrolmentRecord],
        national: ScoredTimeSeries,
        states: Vec<ScoredTimeSeries>,
        districts: Vec<ScoredTimeSeries>,
        anomalies: Vec<AnomalyRecord>,
        alerts: Vec<PolicyAlert>,
    ) -> Analysis {
        Analysis {
            generated_at: Utc::now(),
            summary: summarize(records),
            national,
            states,
            districts,
            anomalies,
            alerts,
        }
    }
}

fn state_names(districts: &[ScoredTimeSeries]) -> Vec<&str> {
    let names: BTreeSet<&str> = districts
        .iter()
        .filter_map(|s| s.region.state_name())
        .collect();
    names.into_iter().collect()
}

/// A series' point for `period`, or its latest point
fn select(series: &ScoredTimeSeries, period: Option<Period>) -> Option<&ScoredAggregate> {
    match period {
        Some(p) => series.at(p),
        None => series.latest(),
    }
}

impl Analysis {
    /// National aggregate for a period, or the latest one
    pub fn national(&self, period: Option<Period>) -> Option<&ScoredAggregate> {
        select(&self.national, period)
    }

    /// One aggregate per state for a period (states without data for it are
    /// skipped), or each state's latest
    pub fn states(&self, period: Option<Period>) -> Vec<&ScoredAggregate> {
        self.states.iter().filter_map(|s| select(s, period)).collect()
    }

    /// District aggregates matching `query`
    ///
    /// Region order unless `top_n` is set, in which case FERS descending with
    /// undefined FERS last and ties broken by region.
    pub fn regions(&self, query: &RegionQuery) -> Vec<&ScoredAggregate> {
        let mut selected: Vec<&ScoredAggregate> = self
            .districts
            .iter()
            .filter(|s| match &query.state {
                Some(state) => s.region.state_name() == Some(state.as_str()),
                None => true,
            })
            .filter_map(|s| select(s, query.period))
            .collect();

        if let Some(n) = query.top_n {
            selected.sort_by(|a, b| match (a.fers.value(), b.fers.value()) {
                (Some(x), Some(y)) => y.total_cmp(&x).then_with(|| a.region().cmp(b.region())),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.region().cmp(b.region()),
            });
            selected.truncate(n);
        }

        selected
    }

    /// Ranked alerts, most urgent first
    pub fn alerts(&self) -> &[PolicyAlert] {
        &self.alerts
    }

    pub fn anomalies(&self) -> &[AnomalyRecord] {
        &self.anomalies
    }

    /// Scored series of one district
    pub fn district(&self, state: &str, district: &str) -> Option<&ScoredTimeSeries> {
        let region = RegionId::district(state, district);
        self.districts
            .binary_search_by(|s| s.region.cmp(&region))
            .ok()
            .map(|i| &self.districts[i])
    }

    fn district_points(&self) -> Vec<ScoredAggregate> {
        self.districts
            .iter()
            .flat_map(|s| s.points.iter().cloned())
            .collect()
    }

    pub fn top_risk_regions(&self, n: usize) -> Vec<RankedRegion> {
        alerts::top_risk_regions(&self.district_points(), n)
    }

    pub fn priority_intervention_regions(&self, n: usize) -> Vec<RankedRegion> {
        alerts::priority_intervention_regions(&self.district_points(), n)
    }

    pub fn top_low_inclusion_regions(&self, n: usize) -> Vec<RankedRegion> {
        alerts::top_low_inclusion_regions(&self.district_points(), n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AgeClass;

    fn records() -> Vec<EnrolmentRecord> {
        let mut records = Vec::new();
        for month in 1..=4u32 {
            let m = month as u64;
            records.push(EnrolmentRecord::new(2025, month, "Maharashtra", "Mumbai", AgeClass::Child, 1500 + 50 * m));
            records.push(EnrolmentRecord::new(2025, month, "Maharashtra", "Mumbai", AgeClass::Adult, 4200 + 50 * m));
            records.push(EnrolmentRecord::new(2025, month, "Maharashtra", "Pune", AgeClass::Child, 300));
            records.push(EnrolmentRecord::new(2025, month, "Maharashtra", "Pune", AgeClass::Adult, 2700));
            records.push(EnrolmentRecord::new(2025, month, "Kerala", "Kochi", AgeClass::Child, 900));
            records.push(EnrolmentRecord::new(2025, month, "Kerala", "Kochi", AgeClass::Adult, 1100));
        }
        records
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            fers_w1: 0.9,
            ..EngineConfig::default()
        };
        assert!(matches!(InclusionEngine::new(config), Err(ConfigError::WeightSum { .. })));
    }

    #[test]
    fn test_read_operations() {
        let engine = InclusionEngine::new(EngineConfig::default()).unwrap();
        let analysis = engine.run(&records());

        assert_eq!(analysis.districts.len(), 3);
        assert_eq!(analysis.states(None).len(), 2);
        assert_eq!(analysis.national(None).unwrap().period(), Period::new(2025, 4));
        assert_eq!(
            analysis.national(Some(Period::new(2025, 1))).unwrap().aggregate.child_count,
            1550 + 300 + 900
        );
        assert!(analysis.national(Some(Period::new(2024, 1))).is_none());

        let maharashtra = analysis.regions(&RegionQuery {
            state: Some("Maharashtra".to_string()),
            ..RegionQuery::default()
        });
        assert_eq!(maharashtra.len(), 2);

        // Pune has a 10% child share and the highest FERS
        let top = analysis.regions(&RegionQuery {
            top_n: Some(1),
            ..RegionQuery::default()
        });
        assert_eq!(top[0].region(), &RegionId::district("Maharashtra", "Pune"));
        assert_eq!(analysis.top_risk_regions(1)[0].region, RegionId::district("Maharashtra", "Pune"));

        assert!(analysis.district("Kerala", "Kochi").is_some());
        assert!(analysis.district("Kerala", "Idukki").is_none());
    }

    #[test]
    fn test_parallel_run_matches_sequential() {
        let engine = InclusionEngine::new(EngineConfig::default()).unwrap();
        let records = records();
        let sequential = engine.run(&records);
        let parallel = engine.run_parallel(&records);

        assert_eq!(sequential.national, parallel.national);
        assert_eq!(sequential.states, parallel.states);
        assert_eq!(sequential.districts, parallel.districts);
        assert_eq!(sequential.anomalies, parallel.anomalies);
        assert_eq!(sequential.alerts, parallel.alerts);
    }
}
