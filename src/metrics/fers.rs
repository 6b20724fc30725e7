//! FERS: Future Exclusion Risk Score
//!
//! `FERS = w1 * (1 - CEPS/100) + w2 * IGI + w3 * volatility`
//!
//! Weights come from engine configuration and are checked once there
//! (non-negative, summing to ~1.0). This function is called per region-period
//! and does not re-check them.
//!
//! Bands:
//!   - > 0.8: Critical
//!   - > 0.6: High
//!   - > 0.4: Medium
//!   - otherwise Low

use serde::{Deserialize, Serialize};

/// FERS component weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FersWeights {
    pub w1: f64,
    pub w2: f64,
    pub w3: f64,
}

impl Default for FersWeights {
    fn default() -> Self {
        Self {
            w1: 0.40,
            w2: 0.35,
            w3: 0.25,
        }
    }
}

/// Calculate FERS from already-defined components
///
/// `volatility` is the coefficient of variation of total enrolment over the
/// trailing window; it is an input here, not computed.
pub fn fers(ceps: f64, igi: f64, volatility: f64, weights: &FersWeights) -> f64 {
    weights.w1 * (1.0 - ceps / 100.0) + weights.w2 * igi + weights.w3 * volatility
}

/// Exclusion risk band derived from FERS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionRiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ExclusionRiskLevel {
    pub fn from_fers(fers: f64) -> Self {
        match fers {
            f if f > 0.8 => ExclusionRiskLevel::Critical,
            f if f > 0.6 => ExclusionRiskLevel::High,
            f if f > 0.4 => ExclusionRiskLevel::Medium,
            _ => ExclusionRiskLevel::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_inclusion_is_zero_risk() {
        assert_eq!(fers(100.0, 0.0, 0.0, &FersWeights::default()), 0.0);
    }

    #[test]
    fn test_weighted_components() {
        let w = FersWeights::default();
        // Mumbai Jan 2025: CEPS 26.3158, IGI 0.642857, volatility 0.01
        let value = fers(26.315789, 0.642857, 0.01, &w);
        let expected = 0.40 * (1.0 - 0.26315789) + 0.35 * 0.642857 + 0.25 * 0.01;
        assert_relative_eq!(value, expected, epsilon = 1e-9);
        assert_eq!(ExclusionRiskLevel::from_fers(value), ExclusionRiskLevel::Medium);
    }

    #[test]
    fn test_weights_not_enforced_per_call() {
        let w = FersWeights { w1: 1.0, w2: 1.0, w3: 1.0 };
        assert_relative_eq!(fers(0.0, 1.0, 1.0, &w), 3.0);
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(ExclusionRiskLevel::from_fers(0.85), ExclusionRiskLevel::Critical);
        assert_eq!(ExclusionRiskLevel::from_fers(0.7), ExclusionRiskLevel::High);
        assert_eq!(ExclusionRiskLevel::from_fers(0.41), ExclusionRiskLevel::Medium);
        assert_eq!(ExclusionRiskLevel::from_fers(0.4), ExclusionRiskLevel::Low);
    }
}
