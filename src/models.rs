//! Data models for the equipment maintenance pipeline.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

// ---

/// One loosely-typed row as produced by the record source.
///
/// Keys are normalized header names, values are the untrimmed cell text.
pub type RawRecord = HashMap<String, String>;

/// A normalized equipment sensor reading.
///
/// Numeric fields are `None` when the cell was empty or failed to parse, so
/// callers can tell an absent value apart from a zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    // ---
    pub equipment_id: String,
    /// Timestamp text exactly as received (trimmed).
    pub timestamp: String,
    /// Parsed form of `timestamp`; `None` when the text is not a date-time.
    #[serde(skip)]
    pub parsed_timestamp: Option<DateTime<Utc>>,
    pub temperature: Option<f64>,
    pub vibration_level: Option<f64>,
    pub pressure: Option<f64>,
    pub operating_hours: Option<f64>,
    pub maintenance_required: bool,
    pub part_id: String,
    pub part_name: String,
    pub unit_name: String,
    pub wear_cause: String,
    pub part_health_percentage: Option<f64>,
    pub days_until_replacement: Option<i64>,
    pub last_maintenance_date: String,
}

/// Most recent reading per equipment id.
pub type LatestReadings = BTreeMap<String, Reading>;

/// One projected step of the trend forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    // ---
    pub timestamp: Option<DateTime<Utc>>,
    pub predicted_temperature: Option<f64>,
    pub predicted_vibration: Option<f64>,
    pub upper_bound_temperature: Option<f64>,
    pub lower_bound_temperature: Option<f64>,
    pub equipment_id: String,
}

/// One row of the wide chart table.
///
/// Serializes flat: `{"timestamp": "...", "EQ1_temperature": 70.0, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    // ---
    pub timestamp: String,
    #[serde(flatten)]
    pub columns: BTreeMap<String, f64>,
}

/// Risk report for a single piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskReport {
    // ---
    pub equipment_id: String,
    pub score: i32,
    pub high_risk: bool,
}

/// Outcome of loading one batch, reported back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    // ---
    pub batch_id: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub rows_read: usize,
    pub rows_retained: usize,
    pub rows_skipped: usize,
    pub equipment_count: usize,
    pub alert_equipment_ids: Vec<String>,
}

// ---

/// Parse a timestamp in any of the accepted layouts.
///
/// RFC 3339 values are converted to UTC; naive values are taken as UTC.
/// A bare date means midnight.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    // ---
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
