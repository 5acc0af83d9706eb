//! Risk Scorer.
//!
//! Combines remaining part health (60%) with time to replacement (40%) into a
//! maintenance-probability score. Only the lower side of the time factor is
//! clamped: parts with more than a year left contribute nothing, while
//! overdue parts (negative days) push the factor past 1 and the score past
//! 100. That uncapped behavior is kept as-is.

use crate::Reading;

// ---

/// Scores strictly above this are high risk.
pub const HIGH_RISK_THRESHOLD: i32 = 70;

const HEALTH_WEIGHT: f64 = 0.6;
const TIME_WEIGHT: f64 = 0.4;
const DAYS_PER_YEAR: f64 = 365.0;

/// Score from a part's health percentage and days until replacement.
pub fn score(health_percentage: f64, days_until_replacement: i64) -> i32 {
    // ---
    let health_factor = (100.0 - health_percentage) / 100.0;
    let time_factor = ((DAYS_PER_YEAR - days_until_replacement as f64) / DAYS_PER_YEAR).max(0.0);
    let raw = (health_factor * HEALTH_WEIGHT + time_factor * TIME_WEIGHT) * 100.0;

    // half-up rounding, ties toward +inf
    (raw + 0.5).floor() as i32
}

/// Score for the latest reading of one equipment id.
///
/// No reading, or a reading lacking either input figure, scores 0.
pub fn risk_score(latest: Option<&Reading>) -> i32 {
    // ---
    let Some(reading) = latest else {
        return 0;
    };
    match (reading.part_health_percentage, reading.days_until_replacement) {
        (Some(health), Some(days)) => score(health, days),
        _ => {
            tracing::debug!(
                "No health/replacement figures for {}, scoring 0",
                reading.equipment_id
            );
            0
        }
    }
}

/// High-risk classification consumed by the presentation layer.
pub fn is_high_risk(score: i32) -> bool {
    score > HIGH_RISK_THRESHOLD
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::pipeline::test_support::create_test_reading;

    fn create_scored_reading(health: f64, days: i64) -> Reading {
        // ---
        let mut r = create_test_reading("EQ2", "2024-01-01 00:00:00", 70.0);
        r.part_health_percentage = Some(health);
        r.days_until_replacement = Some(days);
        r
    }

    #[test]
    fn test_worked_example_is_high_risk() {
        // ---
        // 0.6 * 0.6 + (335 / 365) * 0.4 = 0.7271
        let reading = create_scored_reading(40.0, 30);
        let s = risk_score(Some(&reading));

        assert_eq!(s, 73);
        assert!(is_high_risk(s));
    }

    #[test]
    fn test_threshold_is_strict() {
        // ---
        assert!(!is_high_risk(70));
        assert!(is_high_risk(71));
    }

    #[test]
    fn test_far_horizon_clamps_time_factor_to_zero() {
        // ---
        assert_eq!(score(100.0, 365), 0);
        assert_eq!(score(100.0, 1000), 0);
        assert_eq!(score(50.0, 5000), 30);
    }

    #[test]
    fn test_bounds_for_in_range_inputs() {
        // ---
        assert_eq!(score(0.0, 0), 100);
        for health in (0..=100).step_by(5) {
            for days in (0..=800).step_by(37) {
                let s = score(health as f64, days);
                assert!((0..=100).contains(&s), "health={health} days={days} -> {s}");
            }
        }
    }

    #[test]
    fn test_overdue_part_exceeds_100_uncapped() {
        // ---
        // time_factor = (365 + 365) / 365 = 2.0 -> 60 + 80
        assert_eq!(score(0.0, -365), 140);
    }

    #[test]
    fn test_no_data_scores_zero() {
        // ---
        assert_eq!(risk_score(None), 0);

        let mut reading = create_scored_reading(40.0, 30);
        reading.part_health_percentage = None;
        assert_eq!(risk_score(Some(&reading)), 0);
    }
}
