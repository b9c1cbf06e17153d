//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Print the Prometheus text exposition when the process finishes
    pub dump_metrics: bool,

    /// Network identifier (devnet, testnet, mainnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "shift-exchange".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            dump_metrics: false,
            network: "devnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: shift-exchange)
    /// - `SX_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SX_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SX_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `SX_DUMP_METRICS`: Print metrics on exit (default: false)
    /// - `SX_NETWORK`: Network name (default: devnet)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();
        let defaults = Self::default();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: env::var("SX_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: env::var("SX_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.console_output),

            json_logs: env::var("SX_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            dump_metrics: env::var("SX_DUMP_METRICS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.dump_metrics),

            network: env::var("SX_NETWORK").unwrap_or(defaults.network),
        }
    }

    /// Service name qualified by network, e.g. `shift-exchange-devnet`.
    pub fn full_service_name(&self) -> String {
        format!("{}-{}", self.service_name, self.network)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
