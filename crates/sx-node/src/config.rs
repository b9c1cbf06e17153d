//! # Simulator Configuration
//!
//! Defaults, optionally replaced by a JSON file named in `SX_CONFIG`.
//! Without a file, telemetry settings come from the environment.

use serde::{Deserialize, Serialize};
use shared_types::{serde_address, Address, U256};
use std::path::{Path, PathBuf};
use sx_02_amm_adapters::{GenesisAllocation, HostConfig, PoolConfig};
use sx_telemetry::TelemetryConfig;
use thiserror::Error;

/// Path of the optional JSON configuration file.
pub const CONFIG_ENV: &str = "SX_CONFIG";

pub const PROVIDER: Address = [0x01; 20];
pub const TRADER: Address = [0x02; 20];
pub const RELAYER: Address = [0x03; 20];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Bridged asset set up by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub symbol: String,
    #[serde(with = "serde_address")]
    pub asset: Address,
    /// Ledger address of the mint authority.
    #[serde(with = "serde_address")]
    pub authority: Address,
    #[serde(with = "serde_address")]
    pub fee_recipient: Address,
    pub mint_fee_bps: u16,
    pub burn_fee_bps: u16,
    /// Hex secret of the demonstration custodian key. A random key when absent.
    pub custodian_secret: Option<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            symbol: "zBTC".to_string(),
            asset: [0xB7; 20],
            authority: [0xA0; 20],
            fee_recipient: [0xFE; 20],
            mint_fee_bps: 0,
            burn_fee_bps: 0,
            custodian_secret: None,
        }
    }
}

/// Amounts used by the demonstration sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Native currency and asset deposited by the provider.
    pub liquidity: U256,
    /// Native currency spent on the buy, asset minted for the sell.
    pub trade: U256,
    pub relay_fee: U256,
    /// Seconds from start until call deadlines.
    pub deadline_offset: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            liquidity: U256::from(200_000_000_000_000u64),
            trade: U256::from(50_000u64),
            relay_fee: U256::from(1_000u64),
            deadline_offset: 3_600,
        }
    }
}

/// Complete simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub telemetry: TelemetryConfig,
    #[serde(with = "serde_address")]
    pub registry_owner: Address,
    pub asset: AssetConfig,
    pub pool: PoolConfig,
    pub host: HostConfig,
    pub demo: DemoConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        let funding = U256::from(1_000_000_000_000_000_000u64);
        let genesis = [PROVIDER, TRADER, RELAYER]
            .into_iter()
            .map(|address| GenesisAllocation {
                address,
                amount: funding,
            })
            .collect();

        Self {
            telemetry: TelemetryConfig::default(),
            registry_owner: [0xAD; 20],
            asset: AssetConfig::default(),
            pool: PoolConfig::default(),
            host: HostConfig {
                genesis,
                ..HostConfig::default()
            },
            demo: DemoConfig::default(),
        }
    }
}

impl SimulatorConfig {
    /// Load from `SX_CONFIG` if set, otherwise defaults plus telemetry
    /// settings from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let config = Self {
                    telemetry: TelemetryConfig::from_env(),
                    ..Self::default()
                };
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reject settings the demonstration cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.fee_denominator == 0 || self.pool.fee_numerator > self.pool.fee_denominator {
            return Err(ConfigError::Invalid(format!(
                "pool fee {}/{} is not a fraction",
                self.pool.fee_numerator, self.pool.fee_denominator
            )));
        }
        if self.demo.liquidity < U256::from(self.pool.min_initial_native) {
            return Err(ConfigError::Invalid(format!(
                "liquidity {} below pool minimum {}",
                self.demo.liquidity, self.pool.min_initial_native
            )));
        }
        if self.demo.trade.is_zero() {
            return Err(ConfigError::Invalid("trade amount must be non-zero".into()));
        }
        Ok(())
    }
}
