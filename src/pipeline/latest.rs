//! Latest-Reading Reducer.

use crate::{LatestReadings, Reading};

// ---

/// Fold readings into the most recent one per equipment id.
///
/// Single left-to-right pass. A reading replaces the incumbent for its id
/// when its parsed timestamp is at least as late, so on an exact tie the
/// later row in input order wins. A reading whose timestamp does not parse
/// never replaces anything; it is only installed when its id has no entry
/// yet, and any parseable reading for that id supersedes it.
pub fn latest_readings(readings: &[Reading]) -> LatestReadings {
    // ---
    let mut latest = LatestReadings::new();

    for reading in readings {
        let replace = match latest.get(&reading.equipment_id) {
            None => true,
            Some(incumbent) => supersedes(reading, incumbent),
        };
        if replace {
            latest.insert(reading.equipment_id.clone(), reading.clone());
        }
    }

    latest
}

fn supersedes(candidate: &Reading, incumbent: &Reading) -> bool {
    // ---
    match (candidate.parsed_timestamp, incumbent.parsed_timestamp) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(new), Some(old)) => new >= old,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::pipeline::test_support::create_test_reading;

    #[test]
    fn test_empty_input() {
        // ---
        assert!(latest_readings(&[]).is_empty());
    }

    #[test]
    fn test_picks_max_timestamp_regardless_of_order() {
        // ---
        let readings = vec![
            create_test_reading("EQ1", "2024-01-01 02:00:00", 72.0),
            create_test_reading("EQ1", "2024-01-01 05:00:00", 75.0),
            create_test_reading("EQ2", "2024-01-01 01:00:00", 60.0),
            create_test_reading("EQ1", "2024-01-01 03:00:00", 73.0),
        ];
        let latest = latest_readings(&readings);

        assert_eq!(latest.len(), 2);
        assert_eq!(latest["EQ1"].temperature, Some(75.0));
        assert_eq!(latest["EQ2"].temperature, Some(60.0));
    }

    #[test]
    fn test_equal_timestamp_later_row_wins() {
        // ---
        let readings = vec![
            create_test_reading("EQ3", "2023-12-31 23:00:00", 10.0),
            create_test_reading("EQ3", "2024-01-01 00:00:00", 20.0),
            create_test_reading("EQ3", "2024-01-01 00:00:00", 30.0),
        ];
        let latest = latest_readings(&readings);

        assert_eq!(latest["EQ3"].temperature, Some(30.0));
    }

    #[test]
    fn test_unparseable_timestamp_never_replaces() {
        // ---
        let readings = vec![
            create_test_reading("EQ1", "2024-01-01 00:00:00", 70.0),
            create_test_reading("EQ1", "garbage", 99.0),
        ];
        assert_eq!(latest_readings(&readings)["EQ1"].temperature, Some(70.0));
    }

    #[test]
    fn test_unparseable_incumbent_is_superseded() {
        // ---
        let readings = vec![
            create_test_reading("EQ1", "garbage", 99.0),
            create_test_reading("EQ1", "2024-01-01 00:00:00", 70.0),
        ];
        assert_eq!(latest_readings(&readings)["EQ1"].temperature, Some(70.0));

        let only_bad = vec![create_test_reading("EQ9", "garbage", 1.0)];
        assert_eq!(latest_readings(&only_bad)["EQ9"].timestamp, "garbage");
    }

    #[test]
    fn test_result_holds_max_for_every_id() {
        // ---
        let stamps = ["05", "01", "09", "09", "03", "07"];
        let readings: Vec<Reading> = stamps
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let id = if i % 2 == 0 { "A" } else { "B" };
                create_test_reading(id, &format!("2024-01-01 {h}:00:00"), i as f64)
            })
            .collect();
        let latest = latest_readings(&readings);

        for (id, chosen) in &latest {
            let max = readings
                .iter()
                .filter(|r| &r.equipment_id == id)
                .filter_map(|r| r.parsed_timestamp)
                .max();
            assert_eq!(chosen.parsed_timestamp, max, "id {id}");
        }
    }
}
