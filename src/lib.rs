//! Inclusion Scorer
//!
//! Scoring and anomaly engine for periodic child/adult enrolment counts.
//!
//! - `data`: typed enrolment records and the Polars table adapter
//! - `metrics`: CEPS, IGI, LISS, FERS and volatility as pure functions
//! - `aggregation`: district aggregates, scored series, state/national rollups
//! - `anomaly`: the five detectors and the engine that runs them
//! - `alerts`: deduplicated, prioritised policy alerts and region rankings
//! - `engine`: the pipeline coordinator (sequential and Rayon)
//!
//! Input is assumed clean: period year in [2010, 2026], month in [1, 12],
//! non-negative counts, no duplicate (year, month, state, district, age class)
//! keys. Nothing here re-validates it. Summed counts saturate at `u64::MAX`.

pub mod error;
pub mod config;
pub mod utils;
pub mod data;
pub mod metrics;
pub mod aggregation;
pub mod anomaly;
pub mod alerts;
pub mod engine;
pub mod sample;

// Re-export commonly used types
pub use error::{ConfigError, MetricError, MetricKind};
pub use config::EngineConfig;
pub use data::{load_records, AgeClass, DatasetSummary, EnrolmentRecord, Period};
pub use metrics::MetricValue;
pub use aggregation::{RegionId, RegionPeriodAggregate, RegionTimeSeries, ScoredAggregate, ScoredTimeSeries};
pub use anomaly::{AnomalyEngine, AnomalyRecord, AnomalyType, Detection, PeriodSpan};
pub use alerts::{AlertGenerator, AlertType, PolicyAlert, Priority, RankedRegion};
pub use engine::{Analysis, InclusionEngine, RegionQuery};
