//! Aggregation: records → district aggregates → scored series → rollups

pub mod types;
pub mod region;
pub mod rollup;

pub use types::{RegionId, RegionPeriodAggregate, RegionTimeSeries, ScoredAggregate, ScoredTimeSeries};
pub use region::{aggregate_by_region, build_all_time_series, build_time_series, score, score_series, AggregateMap};
pub use rollup::{rollup_all_states, rollup_national, rollup_state};
