//! Chart Data Shaper: pivots readings into a wide, time-indexed table.

use std::collections::HashMap;

use crate::{ChartRow, Reading};

// ---

/// Column name for an equipment's temperature.
pub fn temperature_column(equipment_id: &str) -> String {
    format!("{equipment_id}_temperature")
}

/// Column name for an equipment's vibration level.
pub fn vibration_column(equipment_id: &str) -> String {
    format!("{equipment_id}_vibration")
}

/// One row per distinct timestamp text, in order of first occurrence.
///
/// Rows group on exact timestamp text; nothing is bucketed or sorted. Each
/// row carries the temperature and vibration columns of every equipment id
/// seen at that timestamp. Ids not present at a timestamp, and metrics that
/// are absent, leave their columns out of the row. When an id repeats at the
/// same timestamp, the later row's values win.
pub fn chart_rows(readings: &[Reading]) -> Vec<ChartRow> {
    // ---
    let mut rows: Vec<ChartRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for reading in readings {
        let pos = *index.entry(reading.timestamp.as_str()).or_insert_with(|| {
            rows.push(ChartRow {
                timestamp: reading.timestamp.clone(),
                columns: Default::default(),
            });
            rows.len() - 1
        });

        let row = &mut rows[pos];
        if let Some(t) = reading.temperature {
            row.columns.insert(temperature_column(&reading.equipment_id), t);
        }
        if let Some(v) = reading.vibration_level {
            row.columns.insert(vibration_column(&reading.equipment_id), v);
        }
    }

    rows
}
