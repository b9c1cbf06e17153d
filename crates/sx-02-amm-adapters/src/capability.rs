//! # Shift Capability
//!
//! The state machine every adapter call walks:
//!
//! ```text
//! INIT → deadline → payable → CHECK_NONCE → VERIFY_SIGNATURE → MARK_NONCE
//!      → MINT → POOL_ACTION → DISTRIBUTE → COMMIT
//! ```
//!
//! The nonce is checked before the signature, so a replay fails with
//! `NonceReused` whatever payload it is paired with. Calls without a mint
//! (remove liquidity, buy) skip the nonce and signature steps.
//! Any failing step aborts the call and the host restores the world.

use crate::domain::entities::{MintRequest, Settlement};
use crate::domain::errors::AdapterError;
use crate::domain::payload::{PayloadVersion, ReservePayload, SellPayload};
use crate::host::{CallContext, Host};
use crate::ports::outbound::LiquidityPool;
use shared_types::{short_hex, Address, ForeignAddress, Hash, U256};
use sx_01_mint_authority::{
    AuthorityError, EcdsaSignature, MintAuthorityApi, MintAuthorization, ShiftIn,
};
use sx_telemetry::log_event;

/// Downstream action of one adapter call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolAction {
    AddLiquidity(ReservePayload),
    RemoveLiquidity {
        shares: U256,
        min_asset: U256,
        min_native: U256,
        recipient: ForeignAddress,
        deadline: U256,
    },
    Buy {
        recipient: ForeignAddress,
        min_asset_out: U256,
        deadline: U256,
    },
    Sell(SellPayload),
}

impl PoolAction {
    pub fn operation(&self) -> &'static str {
        match self {
            PoolAction::AddLiquidity(_) => "add_liquidity",
            PoolAction::RemoveLiquidity { .. } => "remove_liquidity",
            PoolAction::Buy { .. } => "buy",
            PoolAction::Sell(_) => "sell",
        }
    }

    pub fn deadline(&self) -> U256 {
        match self {
            PoolAction::AddLiquidity(payload) => payload.deadline,
            PoolAction::RemoveLiquidity { deadline, .. } => *deadline,
            PoolAction::Buy { deadline, .. } => *deadline,
            PoolAction::Sell(payload) => payload.deadline,
        }
    }

    /// Whether the call may carry native currency.
    pub fn is_payable(&self) -> bool {
        matches!(self, PoolAction::AddLiquidity(_) | PoolAction::Buy { .. })
    }

    /// Commitment a mint authorization for this action must carry. `None`
    /// for actions that never mint.
    pub fn payload_hash(&self, version: PayloadVersion) -> Option<Hash> {
        match self {
            PoolAction::AddLiquidity(payload) => Some(payload.commitment(version)),
            PoolAction::Sell(payload) => Some(payload.commitment(version)),
            PoolAction::RemoveLiquidity { .. } | PoolAction::Buy { .. } => None,
        }
    }
}

/// Pool-side result handed from `execute_pool_action` to `distribute_proceeds`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolOutcome {
    Added { shares: U256, asset_used: U256 },
    Removed { native_out: U256, asset_out: U256 },
    Bought { asset_out: U256, native_spent: U256 },
    Sold { native_out: U256 },
}

/// An adapter bound to one asset.
pub trait ShiftCapability<P: LiquidityPool + Clone> {
    /// Ledger address of the adapter contract.
    fn address(&self) -> Address;

    fn asset(&self) -> Address;

    /// Redeem the custodian authorization, minting to the adapter itself.
    fn verify_and_mint(
        &self,
        cx: &mut CallContext<'_, P>,
        action: &PoolAction,
        request: &MintRequest,
    ) -> Result<ShiftIn, AdapterError> {
        let payload_hash = action
            .payload_hash(PayloadVersion::V1)
            .ok_or(AdapterError::UnsupportedAction(action.operation()))?;
        let signature =
            EcdsaSignature::from_bytes(&request.signature).map_err(AuthorityError::from)?;

        let authorization = MintAuthorization {
            beneficiary: self.address(),
            value: request.value,
            nonce_hash: request.nonce_hash,
            payload_hash,
            signature,
        };

        let asset = self.asset();
        let record = cx.state.authority_mut(&asset)?.mint(&authorization)?;
        cx.emit(crate::LedgerEvent::ShiftIn {
            asset,
            record: record.clone(),
        });
        Ok(record)
    }

    /// Run the pool primitive and settle balances with the pool.
    fn execute_pool_action(
        &self,
        cx: &mut CallContext<'_, P>,
        action: &PoolAction,
        minted: Option<&ShiftIn>,
    ) -> Result<PoolOutcome, AdapterError>;

    /// Pay out shares, currency, refunds and fees.
    fn distribute_proceeds(
        &self,
        cx: &mut CallContext<'_, P>,
        action: &PoolAction,
        minted: Option<&ShiftIn>,
        outcome: PoolOutcome,
    ) -> Result<Settlement, AdapterError>;
}

/// Drive one adapter call through the state machine inside `host`.
pub fn run_call<P, A>(
    host: &Host<P>,
    adapter: &A,
    call: &crate::Call,
    action: PoolAction,
    mint: Option<MintRequest>,
) -> Result<Settlement, AdapterError>
where
    P: LiquidityPool + Clone,
    A: ShiftCapability<P>,
{
    let operation = action.operation();
    host.execute(operation, adapter.address(), call, |cx| {
        let deadline = action.deadline();
        if U256::from(cx.now) > deadline {
            return Err(AdapterError::Expired {
                deadline,
                now: cx.now,
            });
        }
        if !action.is_payable() && !cx.call.value.is_zero() {
            return Err(AdapterError::NonPayable {
                operation,
                value: cx.call.value,
            });
        }

        let minted = match &mint {
            Some(request) => {
                log_event!(
                    debug,
                    "adapter",
                    "Redeeming mint authorization",
                    operation = operation,
                    value = %request.value,
                    nonce = %short_hex(&request.nonce_hash)
                );
                Some(adapter.verify_and_mint(cx, &action, request)?)
            }
            None => None,
        };

        let outcome = adapter.execute_pool_action(cx, &action, minted.as_ref())?;
        log_event!(debug, "adapter", "Pool action done", operation = operation, outcome = ?outcome);
        adapter.distribute_proceeds(cx, &action, minted.as_ref(), outcome)
    })
}

/// Net amount the adapter holds after a mint.
pub(crate) fn minted_amount(minted: Option<&ShiftIn>) -> Result<U256, AdapterError> {
    minted
        .map(|record| record.amount)
        .ok_or(AdapterError::UnsupportedAction("pool action without a mint"))
}
