//! Data reduction and forecasting engine.
//!
//! Every view is a pure function of one immutable batch of readings. An
//! [`Analysis`] bundles the views computed for a batch; the [`BatchStore`]
//! holds the current one and swaps it whole when a new batch loads, so a
//! failed load never leaves partially updated state behind.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ingest::parse_batch;
use crate::normalize::{normalize_batch, NormalizedBatch};
use crate::{
    BatchSummary, ChartRow, ForecastPoint, LatestReadings, PipelineError, Reading, RiskReport,
};

mod alerts;
mod chart;
mod forecast;
mod latest;
mod risk;

pub use alerts::{alert_equipment_ids, maintenance_alerts};
pub use chart::{chart_rows, temperature_column, vibration_column};
pub use forecast::{forecast, MetricTrend, DEFAULT_HORIZON, MAX_HORIZON, TEMPERATURE_BAND};
pub use latest::latest_readings;
pub use risk::{is_high_risk, risk_score, score, HIGH_RISK_THRESHOLD};

// ---

/// All derived views for one batch.
#[derive(Debug)]
pub struct Analysis {
    // ---
    summary: BatchSummary,
    latest: LatestReadings,
    alerts: Vec<Reading>,
    chart: Vec<ChartRow>,
    /// Readings per equipment id, in batch order.
    series: HashMap<String, Vec<Reading>>,
    /// Distinct equipment ids, first-seen order.
    equipment_ids: Vec<String>,
}

impl Analysis {
    // ---
    /// Parse, normalize and reduce a batch of delimited text.
    pub fn from_text(text: &str) -> Result<Self, PipelineError> {
        // ---
        let raw = parse_batch(text)?;
        Ok(Self::from_normalized(normalize_batch(&raw)))
    }

    /// Compute every view over already-normalized readings.
    pub fn from_normalized(batch: NormalizedBatch) -> Self {
        // ---
        let NormalizedBatch {
            readings,
            rows_read,
            rows_skipped,
        } = batch;

        let latest = latest_readings(&readings);
        let alerts = maintenance_alerts(&readings);
        let chart = chart_rows(&readings);

        let mut series: HashMap<String, Vec<Reading>> = HashMap::new();
        let mut equipment_ids = Vec::new();
        for reading in &readings {
            series
                .entry(reading.equipment_id.clone())
                .or_insert_with(|| {
                    equipment_ids.push(reading.equipment_id.clone());
                    Vec::new()
                })
                .push(reading.clone());
        }

        let summary = BatchSummary {
            batch_id: Uuid::new_v4(),
            loaded_at: Utc::now(),
            rows_read,
            rows_retained: readings.len(),
            rows_skipped,
            equipment_count: equipment_ids.len(),
            alert_equipment_ids: alert_equipment_ids(&alerts),
        };

        Self {
            summary,
            latest,
            alerts,
            chart,
            series,
            equipment_ids,
        }
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    pub fn latest(&self) -> &LatestReadings {
        &self.latest
    }

    pub fn alerts(&self) -> &[Reading] {
        &self.alerts
    }

    pub fn chart(&self) -> &[ChartRow] {
        &self.chart
    }

    pub fn equipment_ids(&self) -> &[String] {
        &self.equipment_ids
    }

    /// Every reading for one equipment id, in batch order.
    pub fn series(&self, equipment_id: &str) -> &[Reading] {
        self.series
            .get(equipment_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Forecast for one equipment id; empty when the id has no readings.
    pub fn forecast(&self, equipment_id: &str, horizon: usize) -> Vec<ForecastPoint> {
        forecast(self.series(equipment_id), horizon)
    }

    /// Risk score from the id's latest reading; 0 when the id has none.
    pub fn risk_score(&self, equipment_id: &str) -> i32 {
        risk_score(self.latest.get(equipment_id))
    }

    pub fn risk_report(&self, equipment_id: &str) -> RiskReport {
        // ---
        let score = self.risk_score(equipment_id);
        RiskReport {
            equipment_id: equipment_id.to_string(),
            score,
            high_risk: is_high_risk(score),
        }
    }

    /// Risk reports for every equipment id, highest score first.
    pub fn risk_reports(&self) -> Vec<RiskReport> {
        // ---
        let mut reports: Vec<RiskReport> = self
            .equipment_ids
            .iter()
            .map(|id| self.risk_report(id))
            .collect();
        reports.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.equipment_id.cmp(&b.equipment_id))
        });
        reports
    }
}

// ---

/// Holder of the current batch's views, shared by request handlers.
#[derive(Debug, Clone, Default)]
pub struct BatchStore {
    current: Arc<RwLock<Option<Arc<Analysis>>>>,
}

impl BatchStore {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// The current batch's views, if any batch has loaded.
    pub async fn current(&self) -> Option<Arc<Analysis>> {
        self.current.read().await.clone()
    }

    /// Build views for `text` and make them current.
    ///
    /// On error the previously loaded batch is left untouched.
    pub async fn load_text(&self, text: &str) -> Result<BatchSummary, PipelineError> {
        // ---
        let analysis = match Analysis::from_text(text) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Rejected batch: {}", e);
                return Err(e);
            }
        };

        let summary = analysis.summary().clone();
        *self.current.write().await = Some(Arc::new(analysis));

        info!(
            "Loaded batch {}: {} rows read, {} retained, {} skipped, {} with alerts",
            summary.batch_id,
            summary.rows_read,
            summary.rows_retained,
            summary.rows_skipped,
            summary.alert_equipment_ids.len()
        );
        Ok(summary)
    }
}

// ---
