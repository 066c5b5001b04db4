//! Logging and trace export settings.

use serde::Deserialize;

/// Telemetry configuration settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// Service name reported to the trace collector.
    pub service_name: String,
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default = "default_json")]
    pub json: bool,
    /// OTLP endpoint for traces; export is off when absent.
    pub otlp_endpoint: Option<String>,
    /// Sampling ratio for traces.
    #[serde(default = "default_sampling")]
    pub sampling_ratio: f64,
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_json() -> bool {
    true
}

pub(super) const fn default_sampling() -> f64 {
    1.0
}
