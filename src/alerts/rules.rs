//! Fixed alert table: thresholds, priorities, messages, actions
//!
//! Priority cutoffs:
//!   - CriticalInclusionGap: CEPS < 20 → P0, 20 ≤ CEPS < 30 → P1
//!   - HighExclusionRisk: FERS ≥ 0.85 → P0, 0.75 < FERS < 0.85 → P1
//!   - UnstableEnrolment: LISS < 0 → P1, 0 ≤ LISS < 0.4 → P2
//!   - LowChildRatio: below half the minimum ratio → P0, else P1
//!   - DecliningGrowth: P1
//!   - HighVolatility: above twice the threshold → P1, else P2
//!   - Stagnation: P2
//!   - SeasonalDeviation: z above 1.5x the multiplier → P1, else P2
//!
//! A region with a LowChildRatio alert and a DecliningGrowth run ending at its
//! newest period has both alerts raised to P0 by the generator. A run that
//! ended earlier does not escalate.

use super::types::{AlertType, Priority};
use crate::anomaly::PeriodSpan;

/// CEPS below this raises CriticalInclusionGap
pub const CEPS_GAP_THRESHOLD: f64 = 30.0;
/// CEPS below this is a P0 gap
pub const CEPS_SEVERE_THRESHOLD: f64 = 20.0;
/// FERS above this raises HighExclusionRisk
pub const FERS_RISK_THRESHOLD: f64 = 0.75;
/// FERS at or above this is a P0 risk
pub const FERS_CRITICAL_THRESHOLD: f64 = 0.85;
/// LISS below this raises UnstableEnrolment
pub const LISS_UNSTABLE_THRESHOLD: f64 = 0.4;

/// Priority before co-occurrence escalation
pub fn base_priority(alert_type: AlertType, severity: f64, threshold: f64) -> Priority {
    match alert_type {
        AlertType::CriticalInclusionGap => {
            if severity < CEPS_SEVERE_THRESHOLD {
                Priority::P0
            } else {
                Priority::P1
            }
        }
        AlertType::HighExclusionRisk => {
            if severity >= FERS_CRITICAL_THRESHOLD {
                Priority::P0
            } else {
                Priority::P1
            }
        }
        AlertType::UnstableEnrolment => {
            if severity < 0.0 {
                Priority::P1
            } else {
                Priority::P2
            }
        }
        AlertType::LowChildRatio => {
            if severity < threshold / 2.0 {
                Priority::P0
            } else {
                Priority::P1
            }
        }
        AlertType::DecliningGrowth => Priority::P1,
        AlertType::HighVolatility => {
            if severity > 2.0 * threshold {
                Priority::P1
            } else {
                Priority::P2
            }
        }
        AlertType::Stagnation => Priority::P2,
        AlertType::SeasonalDeviation => {
            if severity > 1.5 * threshold {
                Priority::P1
            } else {
                Priority::P2
            }
        }
    }
}

pub fn message(alert_type: AlertType, severity: f64, threshold: f64, span: &PeriodSpan) -> String {
    match alert_type {
        AlertType::CriticalInclusionGap => {
            format!("Critical child enrolment gap ({:.1}% penetration in {})", severity, span)
        }
        AlertType::HighExclusionRisk => {
            format!("High future exclusion risk (FERS: {:.2} in {})", severity, span)
        }
        AlertType::UnstableEnrolment => {
            format!("Unstable enrolment pattern (LISS: {:.2} over {})", severity, span)
        }
        AlertType::LowChildRatio => format!(
            "Low child enrolment share ({:.1}% against a minimum of {:.1}% in {})",
            severity * 100.0,
            threshold * 100.0,
            span
        ),
        AlertType::DecliningGrowth => format!(
            "Total enrolment falling over {} (steepest fall {:.1}% per period)",
            span,
            -severity * 100.0
        ),
        AlertType::HighVolatility => format!(
            "Erratic enrolment volumes over {} (volatility {:.2}, threshold {:.2})",
            span, severity, threshold
        ),
        AlertType::Stagnation => format!(
            "Enrolment stagnant for {} consecutive periods over {}",
            severity as u64, span
        ),
        AlertType::SeasonalDeviation => format!(
            "Child share in {} is {:.1} standard deviations from its seasonal norm",
            span, severity
        ),
    }
}

pub fn recommended_action(alert_type: AlertType) -> &'static str {
    match alert_type {
        AlertType::CriticalInclusionGap => "Deploy intensive child enrolment drive",
        AlertType::HighExclusionRisk => "Initiate policy review and capacity assessment",
        AlertType::UnstableEnrolment => "Investigate root cause and stabilize processes",
        AlertType::LowChildRatio => "Run targeted child enrolment camps through schools",
        AlertType::DecliningGrowth => "Audit enrolment centre capacity and outreach",
        AlertType::HighVolatility => "Review enrolment centre operations for disruptions",
        AlertType::Stagnation => "Refresh awareness campaigns and mobile enrolment coverage",
        AlertType::SeasonalDeviation => "Check for seasonal access barriers and reschedule camps",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Period;

    #[test]
    fn test_ceps_cutoffs() {
        assert_eq!(base_priority(AlertType::CriticalInclusionGap, 19.9, 30.0), Priority::P0);
        assert_eq!(base_priority(AlertType::CriticalInclusionGap, 20.0, 30.0), Priority::P1);
        assert_eq!(base_priority(AlertType::CriticalInclusionGap, 29.9, 30.0), Priority::P1);
    }

    #[test]
    fn test_fers_and_liss_cutoffs() {
        assert_eq!(base_priority(AlertType::HighExclusionRisk, 0.85, 0.75), Priority::P0);
        assert_eq!(base_priority(AlertType::HighExclusionRisk, 0.8, 0.75), Priority::P1);
        assert_eq!(base_priority(AlertType::UnstableEnrolment, -0.2, 0.4), Priority::P1);
        assert_eq!(base_priority(AlertType::UnstableEnrolment, 0.3, 0.4), Priority::P2);
    }

    #[test]
    fn test_detector_cutoffs() {
        assert_eq!(base_priority(AlertType::LowChildRatio, 0.05, 0.2), Priority::P0);
        assert_eq!(base_priority(AlertType::LowChildRatio, 0.15, 0.2), Priority::P1);
        assert_eq!(base_priority(AlertType::DecliningGrowth, -0.5, -0.1), Priority::P1);
        assert_eq!(base_priority(AlertType::HighVolatility, 0.7, 0.3), Priority::P1);
        assert_eq!(base_priority(AlertType::HighVolatility, 0.4, 0.3), Priority::P2);
        assert_eq!(base_priority(AlertType::Stagnation, 12.0, 6.0), Priority::P2);
        assert_eq!(base_priority(AlertType::SeasonalDeviation, 3.5, 2.0), Priority::P1);
        assert_eq!(base_priority(AlertType::SeasonalDeviation, 2.2, 2.0), Priority::P2);
    }

    #[test]
    fn test_message_templates() {
        let span = PeriodSpan::single(Period::new(2025, 1));
        assert_eq!(
            message(AlertType::CriticalInclusionGap, 18.24, 30.0, &span),
            "Critical child enrolment gap (18.2% penetration in 2025-01)"
        );
        assert_eq!(
            message(AlertType::Stagnation, 7.0, 6.0, &span),
            "Enrolment stagnant for 7 consecutive periods over 2025-01"
        );
    }
}
