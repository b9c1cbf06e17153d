//! # Shift-Exchange Node
//!
//! Simulator runtime for the mint authority and the AMM adapters.
//!
//! ## Modular Structure
//!
//! - `config` - `SimulatorConfig` from defaults, `SX_CONFIG` JSON and environment
//! - `simulator` - host wiring and the demonstration sequence

pub mod config;
pub mod simulator;

pub use config::{AssetConfig, ConfigError, DemoConfig, SimulatorConfig};
pub use simulator::{DemoReport, Simulator};
