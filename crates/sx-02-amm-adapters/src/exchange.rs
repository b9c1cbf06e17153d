//! # Exchange Adapter
//!
//! Buy: native currency in, bridged asset bought and burned straight to a
//! foreign recipient. Sell: custodian-authorized mint swapped for native
//! currency, optionally paying a relay fee to whoever submitted the call.

use crate::capability::{minted_amount, run_call, PoolAction, PoolOutcome, ShiftCapability};
use crate::domain::entities::{AssetBought, AssetSold, Call, LedgerEvent, MintRequest, Settlement};
use crate::domain::errors::AdapterError;
use crate::domain::payload::SellPayload;
use crate::host::{CallContext, Host};
use crate::ports::outbound::LiquidityPool;
use shared_types::{address_hex, Address, ForeignAddress, Hash, U256};
use sx_01_mint_authority::{MintAuthorityApi, ShiftIn};
use sx_telemetry::log_event;

/// Swap adapter for one asset.
pub struct ExchangeAdapter<'h, P: LiquidityPool + Clone> {
    host: &'h Host<P>,
    asset: Address,
    address: Address,
}

impl<'h, P: LiquidityPool + Clone> ExchangeAdapter<'h, P> {
    pub(crate) fn new(host: &'h Host<P>, asset: Address, address: Address) -> Self {
        Self {
            host,
            asset,
            address,
        }
    }

    /// Spend the attached native currency on the asset and release it to
    /// `recipient` on the foreign chain.
    pub fn buy(
        &self,
        call: Call,
        recipient: &[u8],
        min_asset_out: U256,
        deadline: U256,
    ) -> Result<AssetBought, AdapterError> {
        let action = PoolAction::Buy {
            recipient: ForeignAddress::new(recipient),
            min_asset_out,
            deadline,
        };

        match run_call(self.host, self, &call, action, None)? {
            Settlement::Bought(bought) => Ok(bought),
            _ => Err(AdapterError::UnsupportedAction("buy")),
        }
    }

    /// Mint `value` and sell it for native currency paid to `beneficiary`.
    ///
    /// When someone other than the beneficiary submits, `relay_fee` of the
    /// proceeds goes to the submitter.
    #[allow(clippy::too_many_arguments)]
    pub fn sell(
        &self,
        call: Call,
        relay_fee: U256,
        beneficiary: Address,
        min_native_out: U256,
        refund: &[u8],
        deadline: U256,
        value: U256,
        nonce_hash: Hash,
        sig: &[u8],
    ) -> Result<AssetSold, AdapterError> {
        let action = PoolAction::Sell(SellPayload {
            relay_fee,
            beneficiary,
            min_native_out,
            refund: ForeignAddress::new(refund),
            deadline,
        });
        let mint = MintRequest {
            value,
            nonce_hash,
            signature: sig.to_vec(),
        };

        match run_call(self.host, self, &call, action, Some(mint))? {
            Settlement::Sold(sold) => Ok(sold),
            _ => Err(AdapterError::UnsupportedAction("sell")),
        }
    }
}

impl<P: LiquidityPool + Clone> ShiftCapability<P> for ExchangeAdapter<'_, P> {
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
        let pool_address = cx.state.pool(&self.asset)?.address();

        match action {
            PoolAction::Buy {
                min_asset_out,
                deadline,
                ..
            } => {
                let native_in = cx.call.value;
                let asset_out = cx.state.pool_mut(&self.asset)?.native_to_asset_input(
                    native_in,
                    *min_asset_out,
                    *deadline,
                    now,
                )?;

                cx.state.transfer_native(&self.address, &pool_address, native_in)?;
                cx.state
                    .transfer_asset(&self.asset, &pool_address, &self.address, asset_out)?;

                Ok(PoolOutcome::Bought {
                    asset_out,
                    native_spent: native_in,
                })
            }
            PoolAction::Sell(payload) => {
                let asset_in = minted_amount(minted)?;
                let native_out = cx.state.pool_mut(&self.asset)?.asset_to_native_input(
                    asset_in,
                    payload.min_native_out,
                    payload.deadline,
                    now,
                )?;

                cx.state
                    .transfer_asset(&self.asset, &self.address, &pool_address, asset_in)?;
                cx.state.transfer_native(&pool_address, &self.address, native_out)?;

                Ok(PoolOutcome::Sold { native_out })
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
            (
                PoolAction::Buy { recipient, .. },
                PoolOutcome::Bought {
                    asset_out,
                    native_spent,
                },
            ) => {
                let record = cx.state.authority_mut(&self.asset)?.burn(
                    &self.address,
                    recipient,
                    asset_out,
                )?;
                cx.emit(LedgerEvent::ShiftOut {
                    asset: self.asset,
                    record,
                });

                let unspent = cx
                    .call
                    .value
                    .checked_sub(native_spent)
                    .ok_or(AdapterError::ArithmeticOverflow)?;
                cx.state.transfer_native(&self.address, &caller, unspent)?;

                let bought = AssetBought {
                    asset: self.asset,
                    buyer: caller,
                    recipient: recipient.clone(),
                    native_in: native_spent,
                    asset_out,
                };
                cx.emit(LedgerEvent::AssetBought(bought.clone()));
                Ok(Settlement::Bought(bought))
            }
            (PoolAction::Sell(payload), PoolOutcome::Sold { native_out }) => {
                if native_out < payload.min_native_out {
                    return Err(AdapterError::SlippageExceeded {
                        minimum: payload.min_native_out,
                        actual: native_out,
                    });
                }

                let relayed = caller != payload.beneficiary;
                let relay_fee = if relayed {
                    payload.relay_fee
                } else {
                    U256::zero()
                };
                let proceeds = native_out
                    .checked_sub(relay_fee)
                    .ok_or(AdapterError::ArithmeticOverflow)?;

                cx.state.transfer_native(&self.address, &payload.beneficiary, proceeds)?;
                if !relay_fee.is_zero() {
                    cx.state.transfer_native(&self.address, &caller, relay_fee)?;
                    log_event!(
                        debug,
                        "exchange",
                        "Relay fee paid",
                        relayer = %address_hex(&caller),
                        amount = %relay_fee
                    );
                    cx.emit(LedgerEvent::RelayFeePaid {
                        asset: self.asset,
                        relayer: caller,
                        amount: relay_fee,
                    });
                }

                let sold = AssetSold {
                    asset: self.asset,
                    submitter: caller,
                    beneficiary: payload.beneficiary,
                    asset_in: minted_amount(minted)?,
                    native_out,
                    relay_fee,
                };
                cx.emit(LedgerEvent::AssetSold(sold.clone()));
                Ok(Settlement::Sold(sold))
            }
            _ => Err(AdapterError::UnsupportedAction(action.operation())),
        }
    }
}
