//! # Shift-Exchange Telemetry
//!
//! Structured logging and Prometheus metrics shared by the authority, the
//! adapters and the simulator binary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sx_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // Logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `shift-exchange` | Service name in logs |
//! | `SX_LOG_LEVEL` | `info` | Log level filter |
//! | `SX_JSON_LOGS` | `false` | JSON log lines |
//! | `SX_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `SX_DUMP_METRICS` | `false` | Print metrics on exit |
//! | `SX_NETWORK` | `devnet` | Network name |

mod config;
mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, CALLS_COMMITTED, CALLS_REVERTED, CALL_DURATION,
    NONCES_CONSUMED, NONCE_REPLAYS, RELAY_FEES_PAID, SHIFT_INS, SHIFT_OUTS, SIGNATURE_FAILURES,
    SIGNATURE_VERIFICATIONS,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    if config.service_name.trim().is_empty() {
        return Err(TelemetryError::Config("service name must not be empty".into()));
    }
    register_metrics()?;
    init_tracing(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
