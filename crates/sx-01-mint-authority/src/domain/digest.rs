//! # Authority Digest and Fee Math
//!
//! The digest a custodian signs binds the authority's own address, so a
//! signature for one bridged asset can never mint another.
//!
//! ```text
//! digest = keccak256( authority ‖ beneficiary ‖ value ‖ nonce_hash ‖ payload_hash )
//!          each field one 32-byte ABI word
//! ```

use super::entities::BPS_DENOMINATOR;
use super::errors::AuthorityError;
use shared_types::abi::{address_word, uint_word};
use shared_types::{hashing::keccak256_many, Address, Hash, U256};

/// Digest the custodian signs for a mint of `value` to `beneficiary`.
pub fn hash_for_signature(
    authority: &Address,
    beneficiary: &Address,
    value: U256,
    nonce_hash: &Hash,
    payload_hash: &Hash,
) -> Hash {
    keccak256_many(&[
        &address_word(authority),
        &address_word(beneficiary),
        &uint_word(value),
        nonce_hash,
        payload_hash,
    ])
}

/// `amount * bps / 10_000`, rounded down. Fails closed on overflow.
pub fn calculate_fee(amount: U256, bps: u16) -> Result<U256, AuthorityError> {
    amount
        .checked_mul(U256::from(bps))
        .map(|scaled| scaled / U256::from(BPS_DENOMINATOR))
        .ok_or(AuthorityError::ArithmeticOverflow)
}
