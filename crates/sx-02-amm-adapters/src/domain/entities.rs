//! # Domain Entities
//!
//! Calls, settlement records, ledger events and host configuration.

use serde::{Deserialize, Serialize};
use shared_types::{hashing::keccak256_many, serde_address, Address, ForeignAddress, Hash, Timestamp, U256};
use sx_01_mint_authority::{ShiftIn, ShiftOut};

/// Address-derivation tag for reserve adapters.
pub const RESERVE_ADAPTER_TAG: &[u8] = b"sx.reserve-adapter";

/// Address-derivation tag for exchange adapters.
pub const EXCHANGE_ADAPTER_TAG: &[u8] = b"sx.exchange-adapter";

/// Address-derivation tag for pools created by the factory.
pub const POOL_TAG: &[u8] = b"sx.pool";

/// Deterministic address for a component bound to `asset`:
/// the last 20 bytes of `keccak256(tag ‖ asset)`.
pub fn derive_address(tag: &[u8], asset: &Address) -> Address {
    let hash = keccak256_many(&[tag, asset]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

// =============================================================================
// Calls
// =============================================================================

/// Who is calling and how much native currency they attach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub caller: Address,
    pub value: U256,
}

impl Call {
    pub fn new(caller: Address) -> Self {
        Self {
            caller,
            value: U256::zero(),
        }
    }

    /// Attach native currency.
    pub fn with_value(mut self, value: impl Into<U256>) -> Self {
        self.value = value.into();
        self
    }
}

/// The custodian-issued part of a minting call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintRequest {
    /// Amount the custodian authorized.
    pub value: U256,
    pub nonce_hash: Hash,
    /// 65-byte `r ‖ s ‖ v`.
    pub signature: Vec<u8>,
}

/// Adapter addresses created for one asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterPair {
    pub pool: Address,
    pub reserve: Address,
    pub exchange: Address,
}

// =============================================================================
// Pool results
// =============================================================================

/// Pool reserves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserves {
    pub native: U256,
    pub asset: U256,
}

/// Result of a pool deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityMinted {
    pub shares: U256,
    pub asset_used: U256,
}

/// Result of a pool withdrawal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityBurned {
    pub native_out: U256,
    pub asset_out: U256,
}

// =============================================================================
// Settlement records
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityAdded {
    #[serde(with = "serde_address")]
    pub asset: Address,
    #[serde(with = "serde_address")]
    pub provider: Address,
    pub shares: U256,
    pub native_in: U256,
    pub asset_in: U256,
    /// Minted units the pool did not take.
    pub leftover: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRemoved {
    #[serde(with = "serde_address")]
    pub asset: Address,
    #[serde(with = "serde_address")]
    pub provider: Address,
    pub shares: U256,
    pub native_out: U256,
    pub asset_out: U256,
    pub recipient: ForeignAddress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBought {
    #[serde(with = "serde_address")]
    pub asset: Address,
    #[serde(with = "serde_address")]
    pub buyer: Address,
    pub recipient: ForeignAddress,
    pub native_in: U256,
    pub asset_out: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSold {
    #[serde(with = "serde_address")]
    pub asset: Address,
    #[serde(with = "serde_address")]
    pub submitter: Address,
    #[serde(with = "serde_address")]
    pub beneficiary: Address,
    pub asset_in: U256,
    /// Pool output before the relay fee.
    pub native_out: U256,
    /// Fee paid to the submitter; zero when the beneficiary submitted.
    pub relay_fee: U256,
}

/// What a committed call produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    Added(LiquidityAdded),
    Removed(LiquidityRemoved),
    Bought(AssetBought),
    Sold(AssetSold),
}

/// Entry in the host's event log. Only committed calls append events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    ShiftIn {
        #[serde(with = "serde_address")]
        asset: Address,
        record: ShiftIn,
    },
    ShiftOut {
        #[serde(with = "serde_address")]
        asset: Address,
        record: ShiftOut,
    },
    LiquidityAdded(LiquidityAdded),
    LiquidityRemoved(LiquidityRemoved),
    AssetBought(AssetBought),
    AssetSold(AssetSold),
    RelayFeePaid {
        #[serde(with = "serde_address")]
        asset: Address,
        #[serde(with = "serde_address")]
        relayer: Address,
        amount: U256,
    },
}

// =============================================================================
// Configuration
// =============================================================================

/// Native currency credited at host creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAllocation {
    #[serde(with = "serde_address")]
    pub address: Address,
    pub amount: U256,
}

/// Host configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Clock value at creation (unix seconds).
    #[serde(default = "default_timestamp")]
    pub initial_timestamp: Timestamp,
    #[serde(default)]
    pub genesis: Vec<GenesisAllocation>,
}

fn default_timestamp() -> Timestamp {
    1_700_000_000
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            initial_timestamp: default_timestamp(),
            genesis: Vec::new(),
        }
    }
}
