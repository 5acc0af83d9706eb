//! Trend Forecaster.
//!
//! Naive linear extrapolation from the first and last observed values of a
//! series. The slope is the endpoint difference divided by the number of
//! readings in the series (not by the number of intervals), and the band
//! is a fixed ±2 around the prediction. Downstream expectations depend on
//! both exactly; this is not a least-squares fit.

use chrono::Duration;

use crate::{ForecastPoint, Reading};

// ---

/// Default number of projected steps.
pub const DEFAULT_HORIZON: usize = 6;

/// Spacing between projected steps.
pub const STEP_HOURS: i64 = 1;

/// Largest horizon a caller may ask for (30 days of hourly steps).
pub const MAX_HORIZON: usize = 24 * 30;

/// Half-width of the temperature confidence band.
pub const TEMPERATURE_BAND: f64 = 2.0;

/// Endpoint-difference trend and anchor for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricTrend {
    // ---
    /// Last observed value.
    pub anchor: f64,
    /// Change per step.
    pub slope: f64,
}

impl MetricTrend {
    /// Compute the trend over the observed values, in series order.
    ///
    /// `count` is the number of readings in the whole series, including
    /// those where this metric is absent; it is the slope's denominator.
    /// Returns `None` when no value was observed. Fewer than two values
    /// means a flat trend.
    pub fn from_values(values: &[f64], count: usize) -> Option<Self> {
        // ---
        let (first, last) = (values.first()?, values.last()?);
        let slope = if values.len() < 2 || count == 0 {
            0.0
        } else {
            (last - first) / count as f64
        };
        Some(Self {
            anchor: *last,
            slope,
        })
    }

    /// Projected value `step` steps past the anchor.
    pub fn project(&self, step: usize) -> f64 {
        self.anchor + self.slope * step as f64
    }
}

/// Project `horizon` hourly points for one equipment's readings.
///
/// `series` holds every reading for a single equipment id in batch order; it
/// is not re-sorted. Each metric's endpoints are its first and last present
/// values; the slope divides by the full series length. Timestamps continue
/// hourly from the last reading's timestamp and are `None` when that
/// timestamp did not parse or the step would leave chrono's date range.
///
/// An empty series yields an empty forecast.
pub fn forecast(series: &[Reading], horizon: usize) -> Vec<ForecastPoint> {
    // ---
    let Some(last) = series.last() else {
        return Vec::new();
    };

    let temperatures: Vec<f64> = series.iter().filter_map(|r| r.temperature).collect();
    let vibrations: Vec<f64> = series.iter().filter_map(|r| r.vibration_level).collect();
    let temperature = MetricTrend::from_values(&temperatures, series.len());
    let vibration = MetricTrend::from_values(&vibrations, series.len());

    tracing::debug!(
        "Forecasting {} for {} steps: temperature {:?}, vibration {:?}",
        last.equipment_id,
        horizon,
        temperature,
        vibration
    );

    (1..=horizon)
        .map(|step| {
            let predicted_temperature = temperature.map(|t| t.project(step));
            let offset = Duration::hours(STEP_HOURS * step as i64);
            ForecastPoint {
                timestamp: last
                    .parsed_timestamp
                    .and_then(|ts| ts.checked_add_signed(offset)),
                predicted_temperature,
                predicted_vibration: vibration.map(|v| v.project(step)),
                upper_bound_temperature: predicted_temperature.map(|t| t + TEMPERATURE_BAND),
                lower_bound_temperature: predicted_temperature.map(|t| t - TEMPERATURE_BAND),
                equipment_id: last.equipment_id.clone(),
            }
        })
        .collect()
}
