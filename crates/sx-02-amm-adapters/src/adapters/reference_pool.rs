//! # Reference Pool
//!
//! In-memory constant-product pool with a fee on the input side, used by
//! tests and the simulator to exercise the adapters end to end.
//!
//! ```text
//! out = in·fee_num·R_out / (R_in·fee_den + in·fee_num)
//! ```

use crate::domain::entities::{LiquidityBurned, LiquidityMinted, Reserves};
use crate::domain::errors::PoolError;
use crate::ports::outbound::LiquidityPool;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp, U256};
use std::collections::BTreeMap;

/// Pool parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub fee_numerator: u64,
    pub fee_denominator: u64,
    /// Smallest native deposit accepted when the pool is empty.
    pub min_initial_native: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fee_numerator: 997,
            fee_denominator: 1000,
            min_initial_native: 1_000_000_000,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReferencePool {
    address: Address,
    config: PoolConfig,
    reserves: Reserves,
    total_shares: U256,
    shares: BTreeMap<Address, U256>,
    allowances: BTreeMap<(Address, Address), U256>,
}

impl ReferencePool {
    pub fn new(address: Address, config: PoolConfig) -> Self {
        Self {
            address,
            config,
            reserves: Reserves::default(),
            total_shares: U256::zero(),
            shares: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    fn input_price(&self, input: U256, reserve_in: U256, reserve_out: U256) -> Result<U256, PoolError> {
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(PoolError::InsufficientLiquidity);
        }
        let input_with_fee = mul(input, U256::from(self.config.fee_numerator))?;
        let numerator = mul(input_with_fee, reserve_out)?;
        let denominator = add(
            mul(reserve_in, U256::from(self.config.fee_denominator))?,
            input_with_fee,
        )?;
        Ok(numerator / denominator)
    }

    fn credit_shares(&mut self, holder: &Address, amount: U256) -> Result<(), PoolError> {
        let balance = add(self.share_balance(holder), amount)?;
        self.shares.insert(*holder, balance);
        Ok(())
    }

    fn debit_shares(&mut self, holder: &Address, amount: U256) -> Result<(), PoolError> {
        let available = self.share_balance(holder);
        if available < amount {
            return Err(PoolError::InsufficientShares {
                required: amount,
                available,
            });
        }
        let remaining = available - amount;
        if remaining.is_zero() {
            self.shares.remove(holder);
        } else {
            self.shares.insert(*holder, remaining);
        }
        Ok(())
    }
}

fn mul(a: U256, b: U256) -> Result<U256, PoolError> {
    a.checked_mul(b).ok_or(PoolError::ArithmeticOverflow)
}

fn add(a: U256, b: U256) -> Result<U256, PoolError> {
    a.checked_add(b).ok_or(PoolError::ArithmeticOverflow)
}

fn ensure_live(deadline: U256, now: Timestamp) -> Result<(), PoolError> {
    if U256::from(now) > deadline {
        return Err(PoolError::Expired { deadline, now });
    }
    Ok(())
}

fn ensure_floor(what: &'static str, minimum: U256, actual: U256) -> Result<(), PoolError> {
    if actual < minimum {
        return Err(PoolError::SlippageExceeded {
            what,
            minimum,
            actual,
        });
    }
    Ok(())
}

impl LiquidityPool for ReferencePool {
    fn address(&self) -> Address {
        self.address
    }

    fn reserves(&self) -> Reserves {
        self.reserves
    }

    fn total_shares(&self) -> U256 {
        self.total_shares
    }

    fn share_balance(&self, holder: &Address) -> U256 {
        self.shares.get(holder).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn approve(&mut self, owner: &Address, spender: &Address, amount: U256) {
        if amount.is_zero() {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
    }

    fn transfer_shares(
        &mut self,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), PoolError> {
        self.debit_shares(from, amount)?;
        self.credit_shares(to, amount)
    }

    fn transfer_shares_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), PoolError> {
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(PoolError::InsufficientAllowance {
                required: amount,
                available: approved,
            });
        }
        self.transfer_shares(from, to, amount)?;
        self.approve(from, spender, approved - amount);
        Ok(())
    }

    fn add_liquidity(
        &mut self,
        provider: &Address,
        min_liquidity: U256,
        max_asset: U256,
        native_in: U256,
        deadline: U256,
        now: Timestamp,
    ) -> Result<LiquidityMinted, PoolError> {
        ensure_live(deadline, now)?;
        if native_in.is_zero() || max_asset.is_zero() {
            return Err(PoolError::ZeroAmount);
        }

        let minted = if self.total_shares.is_zero() {
            let minimum = U256::from(self.config.min_initial_native);
            if native_in < minimum {
                return Err(PoolError::DepositTooSmall {
                    minimum,
                    actual: native_in,
                });
            }
            LiquidityMinted {
                shares: native_in,
                asset_used: max_asset,
            }
        } else {
            let Reserves { native, asset } = self.reserves;
            if native.is_zero() {
                return Err(PoolError::InsufficientLiquidity);
            }
            let asset_used = add(mul(native_in, asset)? / native, U256::one())?;
            let shares = mul(native_in, self.total_shares)? / native;
            if asset_used > max_asset {
                return Err(PoolError::SlippageExceeded {
                    what: "asset deposit cap",
                    minimum: asset_used,
                    actual: max_asset,
                });
            }
            LiquidityMinted { shares, asset_used }
        };
        ensure_floor("liquidity shares", min_liquidity, minted.shares)?;

        let reserves = Reserves {
            native: add(self.reserves.native, native_in)?,
            asset: add(self.reserves.asset, minted.asset_used)?,
        };
        let total_shares = add(self.total_shares, minted.shares)?;
        self.credit_shares(provider, minted.shares)?;
        self.reserves = reserves;
        self.total_shares = total_shares;
        Ok(minted)
    }

    fn remove_liquidity(
        &mut self,
        provider: &Address,
        shares: U256,
        min_native: U256,
        min_asset: U256,
        deadline: U256,
        now: Timestamp,
    ) -> Result<LiquidityBurned, PoolError> {
        ensure_live(deadline, now)?;
        if shares.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        if self.total_shares.is_zero() {
            return Err(PoolError::InsufficientLiquidity);
        }

        let native_out = mul(shares, self.reserves.native)? / self.total_shares;
        let asset_out = mul(shares, self.reserves.asset)? / self.total_shares;
        ensure_floor("native withdrawal", min_native, native_out)?;
        ensure_floor("asset withdrawal", min_asset, asset_out)?;

        self.debit_shares(provider, shares)?;
        self.total_shares -= shares;
        self.reserves.native -= native_out;
        self.reserves.asset -= asset_out;
        Ok(LiquidityBurned {
            native_out,
            asset_out,
        })
    }

    fn native_to_asset_input(
        &mut self,
        native_in: U256,
        min_asset_out: U256,
        deadline: U256,
        now: Timestamp,
    ) -> Result<U256, PoolError> {
        ensure_live(deadline, now)?;
        if native_in.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        let asset_out = self.quote_native_to_asset_input(native_in)?;
        ensure_floor("asset bought", min_asset_out, asset_out)?;

        self.reserves.native = add(self.reserves.native, native_in)?;
        self.reserves.asset -= asset_out;
        Ok(asset_out)
    }

    fn asset_to_native_input(
        &mut self,
        asset_in: U256,
        min_native_out: U256,
        deadline: U256,
        now: Timestamp,
    ) -> Result<U256, PoolError> {
        ensure_live(deadline, now)?;
        if asset_in.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        let native_out = self.quote_asset_to_native_input(asset_in)?;
        ensure_floor("native bought", min_native_out, native_out)?;

        self.reserves.asset = add(self.reserves.asset, asset_in)?;
        self.reserves.native -= native_out;
        Ok(native_out)
    }

    fn quote_native_to_asset_input(&self, native_in: U256) -> Result<U256, PoolError> {
        self.input_price(native_in, self.reserves.native, self.reserves.asset)
    }

    fn quote_asset_to_native_input(&self, asset_in: U256) -> Result<U256, PoolError> {
        self.input_price(asset_in, self.reserves.asset, self.reserves.native)
    }
}
