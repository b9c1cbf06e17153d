//! # Shift-Exchange Node
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (`SX_CONFIG` file or defaults plus environment)
//! 2. Initialize telemetry (metrics registry, tracing subscriber)
//! 3. Build the host, the mint authority and the adapter pair
//! 4. Run the demonstration sequence
//! 5. Log balances and the event log
//! 6. Print the metrics exposition when `SX_DUMP_METRICS` is set
//!
//! Any failure exits non-zero.

use anyhow::{Context, Result};
use sx_node::{Simulator, SimulatorConfig};
use tracing::{debug, info};

fn main() -> Result<()> {
    let config = SimulatorConfig::from_env().context("Failed to load configuration")?;
    sx_telemetry::init_telemetry(&config.telemetry).context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Shift-Exchange Simulator v{}", env!("CARGO_PKG_VERSION"));
    info!("  Network: {}", config.telemetry.network);
    info!("===========================================");

    let dump_metrics = config.telemetry.dump_metrics;
    let mut simulator = Simulator::new(config).context("Failed to build simulator")?;
    let report = simulator.run()?;

    info!(
        shares = %report.added.shares,
        bought = %report.bought.asset_out,
        sold_for = %report.sold.native_out,
        withdrawn_native = %report.removed.native_out,
        withdrawn_asset = %report.removed.asset_out,
        "Demonstration complete"
    );
    simulator.log_balances()?;
    simulator.log_events()?;

    let metrics = sx_telemetry::encode_metrics()?;
    if dump_metrics {
        println!("{metrics}");
    } else {
        debug!(%metrics, "Metrics snapshot");
    }
    Ok(())
}
