//! # Reserve Adapter
//!
//! Mints a custodian-authorized amount and deposits it, together with the
//! attached native currency, as pool liquidity in one call. Withdrawal burns
//! the released asset back to the foreign chain.

use crate::capability::{minted_amount, run_call, PoolAction, PoolOutcome, ShiftCapability};
use crate::domain::entities::{
    Call, LedgerEvent, LiquidityAdded, LiquidityRemoved, MintRequest, Settlement,
};
use crate::domain::errors::AdapterError;
use crate::domain::payload::ReservePayload;
use crate::host::{CallContext, Host};
use crate::ports::outbound::LiquidityPool;
use shared_types::{Address, ForeignAddress, Hash, U256};
use sx_01_mint_authority::{MintAuthorityApi, ShiftIn};

/// Liquidity adapter for one asset.
pub struct ReserveAdapter<'h, P: LiquidityPool + Clone> {
    host: &'h Host<P>,
    asset: Address,
    address: Address,
}

impl<'h, P: LiquidityPool + Clone> ReserveAdapter<'h, P> {
    pub(crate) fn new(host: &'h Host<P>, asset: Address, address: Address) -> Self {
        Self {
            host,
            asset,
            address,
        }
    }

    /// Mint `value` and deposit it with the attached native currency.
    ///
    /// The custodian signs over
    /// `keccak256(abi.encode(min_liquidity, refund, deadline))` with this
    /// adapter as beneficiary. Shares go to the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        &self,
        call: Call,
        min_liquidity: U256,
        refund: &[u8],
        deadline: U256,
        value: U256,
        nonce_hash: Hash,
        sig: &[u8],
    ) -> Result<LiquidityAdded, AdapterError> {
        let action = PoolAction::AddLiquidity(ReservePayload {
            min_liquidity,
            refund: ForeignAddress::new(refund),
            deadline,
        });
        let mint = MintRequest {
            value,
            nonce_hash,
            signature: sig.to_vec(),
        };

        match run_call(self.host, self, &call, action, Some(mint))? {
            Settlement::Added(added) => Ok(added),
            _ => Err(AdapterError::UnsupportedAction("add_liquidity")),
        }
    }

    /// Withdraw `shares` the caller approved to this adapter.
    ///
    /// The asset share is burned to `recipient` on the foreign chain; the
    /// native share goes to the caller.
    pub fn remove_liquidity(
        &self,
        call: Call,
        shares: U256,
        min_asset: U256,
        min_native: U256,
        recipient: &[u8],
        deadline: U256,
    ) -> Result<LiquidityRemoved, AdapterError> {
        let action = PoolAction::RemoveLiquidity {
            shares,
            min_asset,
            min_native,
            recipient: ForeignAddress::new(recipient),
            deadline,
        };

        match run_call(self.host, self, &call, action, None)? {
            Settlement::Removed(removed) => Ok(removed),
            _ => Err(AdapterError::UnsupportedAction("remove_liquidity")),
        }
    }
}

impl<P: LiquidityPool + Clone> ShiftCapability<P> for ReserveAdapter<'_, P> {
    fn address(&self) -> Address {
        self.address
    }

    fn asset(&self) -> Address {
        self.asset
    }

    fn execute_pool_action(
        &self,
        cx: &mut CallContext<'_, P>,
        action: &PoolAction,
        minted: Option<&ShiftIn>,
    ) -> Result<PoolOutcome, AdapterError> {
        let now = cx.now;
        let native_in = cx.call.value;
        let pool_address = cx.state.pool(&self.asset)?.address();

        match action {
            PoolAction::AddLiquidity(payload) => {
                let available = minted_amount(minted)?;
                let deposit = cx.state.pool_mut(&self.asset)?.add_liquidity(
                    &self.address,
                    payload.min_liquidity,
                    available,
                    native_in,
                    payload.deadline,
                    now,
                )?;

                cx.state
                    .transfer_asset(&self.asset, &self.address, &pool_address, deposit.asset_used)?;
                cx.state.transfer_native(&self.address, &pool_address, native_in)?;

                Ok(PoolOutcome::Added {
                    shares: deposit.shares,
                    asset_used: deposit.asset_used,
                })
            }
            PoolAction::RemoveLiquidity {
                shares,
                min_asset,
                min_native,
                deadline,
                ..
            } => {
                let caller = cx.call.caller;
                let pool = cx.state.pool_mut(&self.asset)?;
                pool.transfer_shares_from(&self.address, &caller, &self.address, *shares)?;
                let released = pool.remove_liquidity(
                    &self.address,
                    *shares,
                    *min_native,
                    *min_asset,
                    *deadline,
                    now,
                )?;

                cx.state.transfer_asset(
                    &self.asset,
                    &pool_address,
                    &self.address,
                    released.asset_out,
                )?;
                cx.state.transfer_native(&pool_address, &self.address, released.native_out)?;

                Ok(PoolOutcome::Removed {
                    native_out: released.native_out,
                    asset_out: released.asset_out,
                })
            }
            _ => Err(AdapterError::UnsupportedAction(action.operation())),
        }
    }

    fn distribute_proceeds(
        &self,
        cx: &mut CallContext<'_, P>,
        action: &PoolAction,
        minted: Option<&ShiftIn>,
        outcome: PoolOutcome,
    ) -> Result<Settlement, AdapterError> {
        let caller = cx.call.caller;

        match (action, outcome) {
            (PoolAction::AddLiquidity(payload), PoolOutcome::Added { shares, asset_used }) => {
                cx.state
                    .pool_mut(&self.asset)?
                    .transfer_shares(&self.address, &caller, shares)?;

                let leftover = minted_amount(minted)?
                    .checked_sub(asset_used)
                    .ok_or(AdapterError::ArithmeticOverflow)?;
                if !leftover.is_zero() {
                    if payload.refund.is_empty() {
                        cx.state
                            .transfer_asset(&self.asset, &self.address, &caller, leftover)?;
                    } else {
                        let record = cx.state.authority_mut(&self.asset)?.burn(
                            &self.address,
                            &payload.refund,
                            leftover,
                        )?;
                        cx.emit(LedgerEvent::ShiftOut {
                            asset: self.asset,
                            record,
                        });
                    }
                }

                let added = LiquidityAdded {
                    asset: self.asset,
                    provider: caller,
                    shares,
                    native_in: cx.call.value,
                    asset_in: asset_used,
                    leftover,
                };
                cx.emit(LedgerEvent::LiquidityAdded(added.clone()));
                Ok(Settlement::Added(added))
            }
            (
                PoolAction::RemoveLiquidity {
                    shares, recipient, ..
                },
                PoolOutcome::Removed {
                    native_out,
                    asset_out,
                },
            ) => {
                if !asset_out.is_zero() {
                    let record = cx.state.authority_mut(&self.asset)?.burn(
                        &self.address,
                        recipient,
                        asset_out,
                    )?;
                    cx.emit(LedgerEvent::ShiftOut {
                        asset: self.asset,
                        record,
                    });
                }
                cx.state.transfer_native(&self.address, &caller, native_out)?;

                let removed = LiquidityRemoved {
                    asset: self.asset,
                    provider: caller,
                    shares: *shares,
                    native_out,
                    asset_out,
                    recipient: recipient.clone(),
                };
                cx.emit(LedgerEvent::LiquidityRemoved(removed.clone()));
                Ok(Settlement::Removed(removed))
            }
            _ => Err(AdapterError::UnsupportedAction(action.operation())),
        }
    }
}
