//! Record Normalizer: raw rows in, typed [`Reading`]s out.

use tracing::{debug, info};

use crate::ingest::RawBatch;
use crate::models::parse_timestamp;
use crate::{RawRecord, Reading, RowRejection};

// ---

/// Readings retained from one batch plus the count of dropped rows.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    // ---
    pub readings: Vec<Reading>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// Coerce one raw row into a [`Reading`].
///
/// Text fields are trimmed. Numeric fields that are empty or fail to parse
/// become `None`. The row is rejected only when `equipment_id` or `timestamp`
/// is empty after trimming; an unparseable timestamp is kept as text.
pub fn normalize_record(raw: &RawRecord) -> Result<Reading, RowRejection> {
    // ---
    let equipment_id = text_field(raw, "equipment_id");
    if equipment_id.is_empty() {
        return Err(RowRejection::MissingEquipmentId);
    }

    let timestamp = text_field(raw, "timestamp");
    if timestamp.is_empty() {
        return Err(RowRejection::MissingTimestamp);
    }

    Ok(Reading {
        parsed_timestamp: parse_timestamp(&timestamp),
        equipment_id,
        timestamp,
        temperature: number_field(raw, "temperature"),
        vibration_level: number_field(raw, "vibration_level"),
        pressure: number_field(raw, "pressure"),
        operating_hours: number_field(raw, "operating_hours"),
        maintenance_required: text_field(raw, "maintenance_required") == "Yes",
        part_id: text_field(raw, "part_id"),
        part_name: text_field(raw, "part_name"),
        unit_name: text_field(raw, "unit_name"),
        wear_cause: text_field(raw, "wear_cause"),
        part_health_percentage: number_field(raw, "part_health_percentage"),
        days_until_replacement: integer_field(raw, "days_until_replacement"),
        last_maintenance_date: text_field(raw, "last_maintenance_date"),
    })
}

/// Normalize every record of a batch, dropping rejected rows.
pub fn normalize_batch(batch: &RawBatch) -> NormalizedBatch {
    // ---
    let mut readings = Vec::with_capacity(batch.records.len());
    let mut rows_skipped = 0;

    for (idx, raw) in batch.records.iter().enumerate() {
        match normalize_record(raw) {
            Ok(reading) => readings.push(reading),
            Err(reason) => {
                rows_skipped += 1;
                debug!("Skipping row {}: {}", idx + 1, reason);
            }
        }
    }

    if rows_skipped > 0 {
        info!(
            "Normalized {} readings, skipped {} rows",
            readings.len(),
            rows_skipped
        );
    }

    NormalizedBatch {
        readings,
        rows_read: batch.records.len(),
        rows_skipped,
    }
}

// ---

fn text_field(raw: &RawRecord, key: &str) -> String {
    raw.get(key).map(|v| v.trim().to_string()).unwrap_or_default()
}

fn number_field(raw: &RawRecord, key: &str) -> Option<f64> {
    // ---
    raw.get(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn integer_field(raw: &RawRecord, key: &str) -> Option<i64> {
    // ---
    let text = raw.get(key)?.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }
    // integral decimals such as "30.0"
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i64)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_record(pairs: &[(&str, &str)]) -> RawRecord {
        // ---
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn create_full_record(equipment_id: &str) -> RawRecord {
        // ---
        create_test_record(&[
            ("equipment_id", equipment_id),
            ("timestamp", "2024-01-01 00:00:00"),
            ("temperature", "72.5"),
            ("vibration_level", " 0.31 "),
            ("pressure", "101.2"),
            ("operating_hours", "1200"),
            ("maintenance_required", "Yes"),
            ("part_id", " P-9 "),
            ("part_name", "Bearing"),
            ("unit_name", "Pump A"),
            ("wear_cause", "Friction"),
            ("part_health_percentage", "40"),
            ("days_until_replacement", "30"),
            ("last_maintenance_date", "2023-12-01"),
        ])
    }

    #[test]
    fn test_full_record() {
        // ---
        let reading = normalize_record(&create_full_record("EQ1")).unwrap();

        assert_eq!(reading.equipment_id, "EQ1");
        assert_eq!(
            reading.parsed_timestamp,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(reading.temperature, Some(72.5));
        assert_eq!(reading.vibration_level, Some(0.31));
        assert_eq!(reading.operating_hours, Some(1200.0));
        assert!(reading.maintenance_required);
        assert_eq!(reading.part_id, "P-9");
        assert_eq!(reading.part_health_percentage, Some(40.0));
        assert_eq!(reading.days_until_replacement, Some(30));
        assert_eq!(reading.last_maintenance_date, "2023-12-01");
    }

    #[test]
    fn test_missing_identifier_rejected() {
        // ---
        let mut raw = create_full_record("  ");
        assert_eq!(
            normalize_record(&raw),
            Err(RowRejection::MissingEquipmentId)
        );

        raw.remove("equipment_id");
        assert_eq!(
            normalize_record(&raw),
            Err(RowRejection::MissingEquipmentId)
        );
    }

    #[test]
    fn test_missing_timestamp_rejected() {
        // ---
        let mut raw = create_full_record("EQ1");
        raw.insert("timestamp".to_string(), "   ".to_string());
        assert_eq!(normalize_record(&raw), Err(RowRejection::MissingTimestamp));
    }

    #[test]
    fn test_unparseable_timestamp_is_retained() {
        // ---
        let mut raw = create_full_record("EQ1");
        raw.insert("timestamp".to_string(), "not a date".to_string());

        let reading = normalize_record(&raw).unwrap();
        assert_eq!(reading.timestamp, "not a date");
        assert_eq!(reading.parsed_timestamp, None);
    }

    #[test]
    fn test_bad_numbers_are_absent_not_zero() {
        // ---
        let raw = create_test_record(&[
            ("equipment_id", "EQ1"),
            ("timestamp", "2024-01-01 00:00:00"),
            ("temperature", "n/a"),
            ("vibration_level", ""),
            ("pressure", "0"),
            ("days_until_replacement", "12.5"),
        ]);
        let reading = normalize_record(&raw).unwrap();

        assert_eq!(reading.temperature, None);
        assert_eq!(reading.vibration_level, None);
        assert_eq!(reading.pressure, Some(0.0));
        assert_eq!(reading.operating_hours, None);
        assert_eq!(reading.days_until_replacement, None);
    }

    #[test]
    fn test_days_accepts_negative_and_integral_decimal() {
        // ---
        let mut raw = create_full_record("EQ1");
        raw.insert("days_until_replacement".to_string(), "-14".to_string());
        assert_eq!(normalize_record(&raw).unwrap().days_until_replacement, Some(-14));

        raw.insert("days_until_replacement".to_string(), "30.0".to_string());
        assert_eq!(normalize_record(&raw).unwrap().days_until_replacement, Some(30));
    }

    #[test]
    fn test_maintenance_flag_only_exact_yes() {
        // ---
        let cases = [
            ("Yes", true),
            (" Yes ", true),
            ("No", false),
            ("yes", false),
            ("", false),
        ];
        for (value, expected) in cases {
            let mut raw = create_full_record("EQ1");
            raw.insert("maintenance_required".to_string(), value.to_string());
            assert_eq!(
                normalize_record(&raw).unwrap().maintenance_required,
                expected,
                "maintenance_required={value:?}"
            );
        }
    }

    #[test]
    fn test_batch_drops_one_of_ten() {
        // ---
        let mut records: Vec<RawRecord> = (0..10)
            .map(|i| create_full_record(&format!("EQ{i}")))
            .collect();
        records[4].insert("equipment_id".to_string(), String::new());

        let batch = RawBatch {
            headers: Vec::new(),
            records,
        };
        let normalized = normalize_batch(&batch);

        assert_eq!(normalized.readings.len(), 9);
        assert_eq!(normalized.rows_read, 10);
        assert_eq!(normalized.rows_skipped, 1);
        assert!(normalized.readings.iter().all(|r| r.equipment_id != "EQ4"));
    }
}
