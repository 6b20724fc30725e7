//! Synthetic enrolment data for demos and benchmarks
//!
//! Each state gets 3-5 districts and one child and one adult record per
//! district per month. Counts are a random base plus an upward trend and noise,
//! with adults outnumbering children. Seeded, so a given config always yields
//! the same records.

use crate::data::{AgeClass, EnrolmentRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const VALID_STATES: &[&str] = &[
    "Andhra Pradesh", "Arunachal Pradesh", "Assam", "Bihar", "Chhattisgarh",
    "Goa", "Gujarat", "Haryana", "Himachal Pradesh", "Jharkhand",
    "Karnataka", "Kerala", "Madhya Pradesh", "Maharashtra", "Manipur",
    "Meghalaya", "Mizoram", "Nagaland", "Odisha", "Punjab", "Rajasthan",
    "Sikkim", "Tamil Nadu", "Telangana", "Tripura", "Uttar Pradesh",
    "Uttarakhand", "West Bengal",
];

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    /// Number of states, taken from the front of `VALID_STATES`
    pub states: usize,
    pub start_year: i32,
    pub end_year: i32,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            states: 15,
            start_year: 2023,
            end_year: 2025,
        }
    }
}

pub fn generate_sample_records(config: &SampleConfig) -> Vec<EnrolmentRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = Vec::new();

    for &state in VALID_STATES.iter().take(config.states) {
        let district_count = rng.gen_range(3..=5);
        let prefix = state.split_whitespace().next().unwrap_or(state);

        for d in 1..=district_count {
            let district = format!("{} District {}", prefix, d);

            for year in config.start_year..=config.end_year {
                let years_in = (year - config.start_year) as f64;
                for month in 1..=12u32 {
                    let child_trend = years_in * 2000.0 + month as f64 * 100.0;
                    let child = rng.gen_range(5_000.0..50_000.0) + child_trend + rng.gen_range(-1_000.0..1_000.0);

                    let adult_trend = years_in * 5000.0 + month as f64 * 200.0;
                    let adult = rng.gen_range(20_000.0..150_000.0) + adult_trend + rng.gen_range(-3_000.0..3_000.0);

                    records.push(EnrolmentRecord::new(year, month, state, &district, AgeClass::Child, child.max(100.0) as u64));
                    records.push(EnrolmentRecord::new(year, month, state, &district, AgeClass::Adult, adult.max(500.0) as u64));
                }
            }
        }
    }

    tracing::info!("Generated {} sample enrolment records", records.len());
    records
}
