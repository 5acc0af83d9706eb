//! Configuration loader for the `codemetal-equipflow` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Nothing else in the crate reads `env::var` for
//! settings.
//!
use std::{env, net::SocketAddr};

use anyhow::{anyhow, bail, Result};

use crate::pipeline::{DEFAULT_HORIZON, MAX_HORIZON};

/// Parse an optional environment variable with a default value.
macro_rules! parse_env_or {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Default request body limit for batch uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Forecast steps used when a request does not ask for a horizon.
    pub forecast_horizon: usize,

    /// Maximum accepted size of an uploaded batch.
    pub max_upload_bytes: usize,

    /// File path or URL of a batch to load at startup.
    pub csv_source: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        // ---
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            forecast_horizon: DEFAULT_HORIZON,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            csv_source: None,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – server socket address (default: `0.0.0.0:8080`)
/// - `FORECAST_HORIZON` – default forecast steps, 1 to 720 (default: 6)
/// - `MAX_UPLOAD_BYTES` – batch upload size limit (default: 10 MiB)
/// - `SENSOR_CSV_SOURCE` – file path or URL of a batch to preload
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let bind_addr = parse_env_or!("BIND_ADDR", SocketAddr, defaults.bind_addr);
    let forecast_horizon = parse_env_or!("FORECAST_HORIZON", usize, defaults.forecast_horizon);
    let max_upload_bytes = parse_env_or!("MAX_UPLOAD_BYTES", usize, defaults.max_upload_bytes);
    let csv_source = env::var("SENSOR_CSV_SOURCE")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let config = Config {
        bind_addr,
        forecast_horizon,
        max_upload_bytes,
        csv_source,
    };
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Reject values that would make requests fail later on.
    pub fn validate(&self) -> Result<()> {
        // ---
        if self.forecast_horizon == 0 || self.forecast_horizon > MAX_HORIZON {
            bail!(
                "Invalid FORECAST_HORIZON {}: must be between 1 and {}",
                self.forecast_horizon,
                MAX_HORIZON
            );
        }
        Ok(())
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// Strips any query string from the source URL, since it may carry a
    /// token.
    pub fn log_config(&self) {
        // ---
        let source = match &self.csv_source {
            Some(src) => match src.split_once('?') {
                Some((base, _)) => format!("{base}?****"),
                None => src.clone(),
            },
            None => "(none)".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR         : {}", self.bind_addr);
        tracing::info!("  FORECAST_HORIZON  : {}", self.forecast_horizon);
        tracing::info!("  MAX_UPLOAD_BYTES  : {}", self.max_upload_bytes);
        tracing::info!("  SENSOR_CSV_SOURCE : {}", source);
    }
}
