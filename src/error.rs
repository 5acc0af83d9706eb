//! Error taxonomy for the equipment pipeline.
//!
//! Only batch-level problems are errors. Per-row problems are represented by
//! [`RowRejection`] values, counted and logged by the normalizer, and never
//! abort a batch. An equipment id with no readings is not an error either:
//! forecasts come back empty and risk scores come back as zero.

use thiserror::Error;

/// Failures that terminate processing of a whole batch.
///
/// When one of these is returned, any previously loaded batch stays in place.
#[derive(Debug, Error)]
pub enum PipelineError {
    // ---
    /// The input cannot be read as tabular data at all.
    #[error("batch is not valid tabular data: {0}")]
    BatchInvalid(String),

    /// The batch could not be acquired from its source.
    #[error("failed to acquire batch from '{source_name}': {message}")]
    Source {
        source_name: String,
        message: String,
    },
}

/// Why a single row was dropped by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowRejection {
    // ---
    #[error("missing equipment_id")]
    MissingEquipmentId,

    #[error("missing timestamp")]
    MissingTimestamp,
}
