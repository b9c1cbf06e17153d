//! # Mint Authority
//!
//! One authority per bridged asset. It owns the asset's token ledger and its
//! consumed-nonce set, and is the only component able to grow the supply.
//!
//! ## Mint pipeline
//!
//! ```text
//! value > 0 → nonce unused → signer == custodian → fee / overflow checks
//!           → consume nonce (receipt) → credit beneficiary
//! ```
//!
//! The nonce is checked before the signature so that resubmitting a
//! redeemed nonce reports `NonceReused` even when the payload (and therefore
//! the digest) was altered.

use crate::domain::digest::{calculate_fee, hash_for_signature};
use crate::domain::ecdsa::recover_signer;
use crate::domain::entities::{
    AuthorityConfig, EcdsaSignature, MintAuthorization, ShiftIn, ShiftOut, MAX_FEE_BPS,
};
use crate::domain::errors::AuthorityError;
use crate::domain::nonce_ledger::ConsumedNonceSet;
use crate::domain::token::BridgedToken;
use crate::ports::inbound::MintAuthorityApi;
use shared_types::{address_hex, short_hex, Address, ForeignAddress, Hash, U256};
use sx_telemetry::{log_event, log_shift_event, metric_inc};
use sx_telemetry::{NONCE_REPLAYS, SIGNATURE_FAILURES, SIGNATURE_VERIFICATIONS};

/// Custodian mint authority for one bridged asset.
#[derive(Clone, Debug)]
pub struct MintAuthority {
    address: Address,
    asset: Address,
    config: AuthorityConfig,
    nonces: ConsumedNonceSet,
    token: BridgedToken,
    next_shift_id: u64,
    /// Shift id at the open checkpoint.
    checkpoint_shift_id: Option<u64>,
}

impl MintAuthority {
    /// Create an authority at `address` governing the token at `asset`.
    pub fn new(
        address: Address,
        asset: Address,
        config: AuthorityConfig,
    ) -> Result<Self, AuthorityError> {
        for bps in [config.mint_fee_bps, config.burn_fee_bps] {
            if bps > MAX_FEE_BPS {
                return Err(AuthorityError::InvalidFee {
                    bps,
                    max: MAX_FEE_BPS,
                });
            }
        }

        Ok(Self {
            address,
            asset,
            config,
            nonces: ConsumedNonceSet::new(),
            token: BridgedToken::new(),
            next_shift_id: 0,
            checkpoint_shift_id: None,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn asset(&self) -> Address {
        self.asset
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }

    pub fn total_supply(&self) -> U256 {
        self.token.total_supply()
    }

    pub fn balance_of(&self, holder: &Address) -> U256 {
        self.token.balance_of(holder)
    }

    pub fn is_nonce_consumed(&self, nonce_hash: &Hash) -> bool {
        self.nonces.is_consumed(nonce_hash)
    }

    /// Move bridged asset between ledger accounts. Supply is unchanged.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AuthorityError> {
        self.token.transfer(from, to, amount)
    }

    /// Open an undo scope for one host call.
    ///
    /// Until [`commit`](Self::commit) or [`revert`](Self::revert), nonce
    /// consumption, balance writes and shift ids are recorded so the call can
    /// be undone at the cost of what it touched.
    pub fn checkpoint(&mut self) {
        self.nonces.begin();
        self.token.begin();
        self.checkpoint_shift_id = Some(self.next_shift_id);
    }

    pub fn commit(&mut self) {
        self.nonces.commit();
        self.token.commit();
        self.checkpoint_shift_id = None;
    }

    /// Undo everything since [`checkpoint`](Self::checkpoint).
    pub fn revert(&mut self) {
        self.nonces.rollback();
        self.token.rollback();
        if let Some(id) = self.checkpoint_shift_id.take() {
            self.next_shift_id = id;
        }
    }

    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Result<(), AuthorityError> {
        let result = recover_signer(digest, signature)
            .map_err(AuthorityError::from)
            .and_then(|recovered| {
                if recovered == self.config.signer {
                    Ok(())
                } else {
                    Err(AuthorityError::InvalidSignature { recovered })
                }
            });

        match &result {
            Ok(()) => metric_inc!(SIGNATURE_VERIFICATIONS, &["valid"]),
            Err(_) => {
                metric_inc!(SIGNATURE_VERIFICATIONS, &["invalid"]);
                metric_inc!(SIGNATURE_FAILURES);
            }
        }
        result
    }

    fn next_shift_id(&mut self) -> u64 {
        let id = self.next_shift_id;
        self.next_shift_id += 1;
        id
    }
}

impl MintAuthorityApi for MintAuthority {
    fn hash_for_signature(
        &self,
        beneficiary: &Address,
        value: U256,
        nonce_hash: &Hash,
        payload_hash: &Hash,
    ) -> Hash {
        hash_for_signature(&self.address, beneficiary, value, nonce_hash, payload_hash)
    }

    fn verify_signature(&self, digest: &Hash, signature: &[u8]) -> bool {
        EcdsaSignature::from_bytes(signature)
            .map_err(AuthorityError::from)
            .and_then(|sig| self.recover(digest, &sig))
            .is_ok()
    }

    fn mint(&mut self, authorization: &MintAuthorization) -> Result<ShiftIn, AuthorityError> {
        let MintAuthorization {
            beneficiary,
            value,
            nonce_hash,
            payload_hash,
            signature,
        } = authorization;

        if value.is_zero() {
            return Err(AuthorityError::ZeroAmount);
        }

        if let Err(e) = self.nonces.ensure_unused(nonce_hash) {
            metric_inc!(NONCE_REPLAYS);
            log_event!(
                warn,
                "authority",
                "Rejected replayed mint nonce",
                asset = %self.config.symbol,
                nonce = %short_hex(nonce_hash)
            );
            return Err(e);
        }

        let digest = self.hash_for_signature(beneficiary, *value, nonce_hash, payload_hash);
        if let Err(e) = self.recover(&digest, signature) {
            log_event!(
                warn,
                "authority",
                "Rejected mint signature",
                asset = %self.config.symbol,
                error = %e
            );
            return Err(e);
        }

        let fee = calculate_fee(*value, self.config.mint_fee_bps)?;
        let net = value
            .checked_sub(fee)
            .ok_or(AuthorityError::ArithmeticOverflow)?;
        self.token.ensure_mintable(*value)?;

        let receipt = self.nonces.consume(*nonce_hash)?;
        let fee_credit = (!fee.is_zero()).then_some((self.config.fee_recipient, fee));
        self.token
            .mint_authorized(receipt, beneficiary, net, fee_credit)?;

        let shift_in = ShiftIn {
            shift_id: self.next_shift_id(),
            beneficiary: *beneficiary,
            amount: net,
            fee,
            nonce_hash: *nonce_hash,
        };

        log_shift_event!(
            debug,
            "authority",
            "Minted bridged asset",
            self.config.symbol,
            net,
            beneficiary = %address_hex(beneficiary),
            fee = %fee,
            shift_id = shift_in.shift_id
        );

        Ok(shift_in)
    }

    fn burn(
        &mut self,
        holder: &Address,
        to: &ForeignAddress,
        amount: U256,
    ) -> Result<ShiftOut, AuthorityError> {
        if to.is_empty() {
            return Err(AuthorityError::EmptyRecipient);
        }
        if amount.is_zero() {
            return Err(AuthorityError::ZeroAmount);
        }

        let available = self.token.balance_of(holder);
        if available < amount {
            return Err(AuthorityError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        let fee = calculate_fee(amount, self.config.burn_fee_bps)?;
        let released = amount
            .checked_sub(fee)
            .ok_or(AuthorityError::ArithmeticOverflow)?;

        self.token
            .transfer(holder, &self.config.fee_recipient, fee)?;
        self.token.burn(holder, released)?;

        let shift_out = ShiftOut {
            shift_id: self.next_shift_id(),
            holder: *holder,
            to: to.clone(),
            amount: released,
            fee,
        };

        log_shift_event!(
            debug,
            "authority",
            "Burned bridged asset",
            self.config.symbol,
            released,
            holder = %address_hex(holder),
            to = %to,
            shift_id = shift_out.shift_id
        );

        Ok(shift_out)
    }
}
