//! # AMM Shift Adapters
//!
//! Atomic "mint and provide" / "mint and swap" composites over a
//! constant-product pool.
//!
//! ## Operations
//!
//! | Adapter | Operation | Mints | Payable |
//! |---------|-----------|-------|---------|
//! | [`ReserveAdapter`] | `add_liquidity` | yes | yes |
//! | [`ReserveAdapter`] | `remove_liquidity` | no | no |
//! | [`ExchangeAdapter`] | `buy` | no | yes |
//! | [`ExchangeAdapter`] | `sell` | yes | no |
//!
//! Every call runs through [`run_call`] inside [`Host::execute`]: either the
//! whole call commits or the world is left exactly as it was.
//!
//! ## Layout
//!
//! - `domain/` entities, errors, payload commitments, native ledger
//! - `ports/` the [`LiquidityPool`] contract
//! - `adapters/` the in-process [`ReferencePool`]
//! - `capability`, `reserve`, `exchange` the adapter state machine
//! - `host`, `factory` execution environment and exchange creation

pub mod adapters;
pub mod capability;
pub mod domain;
pub mod exchange;
pub mod factory;
pub mod host;
pub mod ports;
pub mod reserve;

#[cfg(test)]
mod test_support;

pub use adapters::{PoolConfig, ReferencePool};
pub use capability::{run_call, PoolAction, PoolOutcome, ShiftCapability};
pub use domain::entities::{
    derive_address, AdapterPair, AssetBought, AssetSold, Call, GenesisAllocation, HostConfig,
    LedgerEvent, LiquidityAdded, LiquidityBurned, LiquidityMinted, LiquidityRemoved, MintRequest,
    Reserves, Settlement, EXCHANGE_ADAPTER_TAG, POOL_TAG, RESERVE_ADAPTER_TAG,
};
pub use domain::errors::{AdapterError, ErrorKind, PoolError};
pub use domain::native::NativeLedger;
pub use domain::payload::{PayloadVersion, ReservePayload, SellPayload};
pub use exchange::ExchangeAdapter;
pub use host::{CallContext, Host, WorldState};
pub use ports::LiquidityPool;
pub use reserve::ReserveAdapter;
