//! # Inbound Ports (Driving Ports / API)
//!
//! The operations adapters invoke on a mint authority.

use crate::domain::entities::{MintAuthorization, ShiftIn, ShiftOut};
use crate::domain::errors::AuthorityError;
use shared_types::{Address, ForeignAddress, Hash, U256};

/// Custodian-authorized mint and burn-to-redeem.
///
/// Implementations must be thread-safe (`Send + Sync`); mutation happens only
/// through `&mut self`, i.e. under the host lock.
pub trait MintAuthorityApi: Send + Sync {
    /// Digest the custodian signs for a mint.
    ///
    /// Deterministic and order-sensitive; includes the authority's own
    /// address so a signature cannot be replayed against another authority.
    fn hash_for_signature(
        &self,
        beneficiary: &Address,
        value: U256,
        nonce_hash: &Hash,
        payload_hash: &Hash,
    ) -> Hash;

    /// True iff `signature` (65 bytes, `r ‖ s ‖ v`) over `digest` recovers to
    /// the trusted custodian. Pure check.
    fn verify_signature(&self, digest: &Hash, signature: &[u8]) -> bool;

    /// Redeem an authorization: consume its nonce, then credit the beneficiary.
    ///
    /// # Errors
    /// - `ZeroAmount` for a zero value
    /// - `NonceReused` if the nonce was already redeemed
    /// - `InvalidSignature` / `MalformedSignature` if the custodian did not sign it
    fn mint(&mut self, authorization: &MintAuthorization) -> Result<ShiftIn, AuthorityError>;

    /// Burn `amount` from `holder` and record a release to `to` on the
    /// foreign chain.
    fn burn(
        &mut self,
        holder: &Address,
        to: &ForeignAddress,
        amount: U256,
    ) -> Result<ShiftOut, AuthorityError>;
}
