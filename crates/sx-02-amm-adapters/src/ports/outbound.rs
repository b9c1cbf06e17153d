//! # Outbound Ports
//!
//! The AMM pool the adapters drive. Pricing is the pool's business; the
//! adapters only rely on the contract below.
//!
//! The pool owns its share ledger and allowances. It does NOT move native
//! currency or bridged asset: it reports how much it took or released and
//! the adapter settles those amounts against `address()` in the same call.

use crate::domain::entities::{LiquidityBurned, LiquidityMinted, Reserves};
use crate::domain::errors::PoolError;
use shared_types::{Address, Timestamp, U256};

/// AMM pool for one bridged asset paired with native currency.
///
/// Every mutating method either succeeds completely or leaves the pool
/// unchanged. Deadlines follow `now > deadline ⇒ Expired`.
pub trait LiquidityPool: Send + Sync {
    /// Ledger address holding the pool's reserves.
    fn address(&self) -> Address;

    fn reserves(&self) -> Reserves;

    fn total_shares(&self) -> U256;

    fn share_balance(&self, holder: &Address) -> U256;

    fn allowance(&self, owner: &Address, spender: &Address) -> U256;

    /// Let `spender` move up to `amount` of `owner`'s shares. Overwrites any
    /// previous approval.
    fn approve(&mut self, owner: &Address, spender: &Address, amount: U256);

    fn transfer_shares(&mut self, from: &Address, to: &Address, amount: U256)
        -> Result<(), PoolError>;

    /// Move shares on `from`'s behalf, spending `spender`'s allowance.
    ///
    /// # Errors
    /// `InsufficientAllowance` if the approval is smaller than `amount`.
    fn transfer_shares_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), PoolError>;

    /// Deposit `native_in` plus at most `max_asset`; shares go to `provider`.
    fn add_liquidity(
        &mut self,
        provider: &Address,
        min_liquidity: U256,
        max_asset: U256,
        native_in: U256,
        deadline: U256,
        now: Timestamp,
    ) -> Result<LiquidityMinted, PoolError>;

    /// Burn `shares` held by `provider` for a proportional slice of both reserves.
    fn remove_liquidity(
        &mut self,
        provider: &Address,
        shares: U256,
        min_native: U256,
        min_asset: U256,
        deadline: U256,
        now: Timestamp,
    ) -> Result<LiquidityBurned, PoolError>;

    /// Swap exactly `native_in` for asset. Returns the asset bought.
    fn native_to_asset_input(
        &mut self,
        native_in: U256,
        min_asset_out: U256,
        deadline: U256,
        now: Timestamp,
    ) -> Result<U256, PoolError>;

    /// Swap exactly `asset_in` for native currency. Returns the native bought.
    fn asset_to_native_input(
        &mut self,
        asset_in: U256,
        min_native_out: U256,
        deadline: U256,
        now: Timestamp,
    ) -> Result<U256, PoolError>;

    /// Asset received for `native_in` at current reserves.
    fn quote_native_to_asset_input(&self, native_in: U256) -> Result<U256, PoolError>;

    /// Native received for `asset_in` at current reserves.
    fn quote_asset_to_native_input(&self, asset_in: U256) -> Result<U256, PoolError>;
}
