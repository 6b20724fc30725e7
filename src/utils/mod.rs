//! Utility modules shared across metrics and detectors
//!
//! - Statistics: population moments, growth rates, run detection

pub mod statistics;

// Re-export commonly used functions
pub use statistics::{consecutive_runs, growth_rates, mean, population_stddev, population_variance};
