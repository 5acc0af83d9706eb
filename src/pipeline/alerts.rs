//! Alert Extractor.

use std::collections::HashSet;

use crate::Reading;

// ---

/// Readings flagged for maintenance, in input order.
///
/// The same equipment id appears once per flagged row.
pub fn maintenance_alerts(readings: &[Reading]) -> Vec<Reading> {
    readings
        .iter()
        .filter(|r| r.maintenance_required)
        .cloned()
        .collect()
}

/// Distinct equipment ids that have at least one alert, first-seen order.
pub fn alert_equipment_ids(alerts: &[Reading]) -> Vec<String> {
    // ---
    let mut seen: HashSet<&str> = HashSet::new();
    alerts
        .iter()
        .filter(|alert| seen.insert(alert.equipment_id.as_str()))
        .map(|alert| alert.equipment_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::pipeline::test_support::create_test_reading;

    fn flagged(id: &str, ts: &str, temp: f64) -> Reading {
        // ---
        let mut r = create_test_reading(id, ts, temp);
        r.maintenance_required = true;
        r
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        // ---
        let readings = vec![
            flagged("EQ2", "2024-01-01 03:00:00", 1.0),
            create_test_reading("EQ1", "2024-01-01 00:00:00", 2.0),
            flagged("EQ1", "2024-01-01 01:00:00", 3.0),
            flagged("EQ2", "2024-01-01 00:00:00", 4.0),
        ];
        let alerts = maintenance_alerts(&readings);

        let temps: Vec<_> = alerts.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![Some(1.0), Some(3.0), Some(4.0)]);
        assert!(alerts.len() <= readings.len());

        assert_eq!(alert_equipment_ids(&alerts), vec!["EQ2", "EQ1"]);
    }

    #[test]
    fn test_no_alerts() {
        // ---
        let readings = vec![create_test_reading("EQ1", "2024-01-01 00:00:00", 2.0)];
        assert!(maintenance_alerts(&readings).is_empty());
        assert!(maintenance_alerts(&[]).is_empty());
    }
}
