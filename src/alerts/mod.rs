//! Policy alerts and region rankings

pub mod types;
pub mod rules;
pub mod generator;
pub mod ranking;

pub use types::{AlertType, PolicyAlert, Priority};
pub use generator::AlertGenerator;
pub use ranking::{
    priority_intervention_regions, rank_by_priority, top_low_inclusion_regions, top_risk_regions,
    RankedRegion,
};
