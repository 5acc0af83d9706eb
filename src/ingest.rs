//! Record source: turns delimited text into loosely-typed [`RawRecord`]s.
//!
//! This module knows nothing about readings. It only splits the input into
//! header-keyed rows and decides whether the input is tabular at all. Row
//! validation and typing belong to `normalize`.

use csv::StringRecord;
use tracing::{debug, info};

use crate::{PipelineError, RawRecord};

// ---

/// Parsed batch prior to normalization.
#[derive(Debug, Default)]
pub struct RawBatch {
    // ---
    /// Normalized header names, in column order.
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

/// Split delimited text into header-keyed records.
///
/// Rows with fewer cells than headers are kept; the missing cells are simply
/// absent from the record. Any structural failure (no header row, unreadable
/// record) invalidates the whole batch.
pub fn parse_batch(text: &str) -> Result<RawBatch, PipelineError> {
    // ---
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| PipelineError::BatchInvalid(format!("failed to read header row: {e}")))?;

    let headers: Vec<String> = headers.iter().map(normalize_header_name).collect();
    if headers.iter().all(String::is_empty) {
        return Err(PipelineError::BatchInvalid("missing header row".to_string()));
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records() is zero-based
        let line = idx + 2;
        let record = result
            .map_err(|e| PipelineError::BatchInvalid(format!("line {line}: {e}")))?;
        records.push(to_raw_record(&headers, &record));
    }

    debug!(
        "Parsed {} records with {} columns",
        records.len(),
        headers.len()
    );
    Ok(RawBatch { headers, records })
}

/// Fetch batch text from a file path or an `http(s)://` URL.
pub async fn load_source(source: &str) -> Result<String, PipelineError> {
    // ---
    let source_error = |message: String| PipelineError::Source {
        source_name: source.to_string(),
        message,
    };

    if source.starts_with("http://") || source.starts_with("https://") {
        info!("Fetching batch from {}", source);
        let response = reqwest::get(source)
            .await
            .map_err(|e| source_error(e.to_string()))?
            .error_for_status()
            .map_err(|e| source_error(e.to_string()))?;
        return response.text().await.map_err(|e| source_error(e.to_string()));
    }

    info!("Reading batch from {}", source);
    tokio::fs::read_to_string(source)
        .await
        .map_err(|e| source_error(e.to_string()))
}

// ---

/// Header matching is case-insensitive and ignores surrounding whitespace.
/// Interior whitespace runs become `_`, so `Equipment ID` maps to
/// `equipment_id`.
pub fn normalize_header_name(name: &str) -> String {
    // ---
    // Spreadsheet exports often prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}').trim();
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

fn to_raw_record(headers: &[String], record: &StringRecord) -> RawRecord {
    // ---
    headers
        .iter()
        .zip(record.iter())
        .filter(|(header, _)| !header.is_empty())
        .map(|(header, value)| (header.clone(), value.to_string()))
        .collect()
}
