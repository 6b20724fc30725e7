//! Anomaly detection over scored region series

pub mod types;
pub mod detectors;
pub mod engine;

pub use types::{AnomalyRecord, AnomalyType, Detection, Direction, PeriodSpan};
pub use engine::{AnomalyEngine, RegionAnomalies};
