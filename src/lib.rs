//! Equipment maintenance pipeline: reduction, alerting and trend forecasting
//! over batches of equipment sensor readings, served over HTTP.
//!
//! This crate root is the module gateway (EMBP): siblings import shared types
//! from `crate::` rather than from each other's files.
//! - `ingest` turns delimited text into raw rows
//! - `normalize` types and validates rows into readings
//! - `pipeline` derives latest readings, alerts, chart rows, forecasts and
//!   risk scores
//! - `routes` exposes the current batch's views

pub mod config;
mod error;
pub mod ingest;
mod models;
pub mod normalize;
pub mod pipeline;
pub mod routes;

pub use config::Config;
pub use error::{PipelineError, RowRejection};
pub use models::{
    parse_timestamp, BatchSummary, ChartRow, ForecastPoint, LatestReadings, RawRecord, Reading,
    RiskReport,
};
pub use pipeline::{Analysis, BatchStore};
