//! # Authority Errors
//!
//! Error types for signature recovery, minting and burning.

use shared_types::{Address, Hash, U256};
use thiserror::Error;

/// Errors that can occur while decoding or recovering a signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature is not 65 bytes (r ‖ s ‖ v).
    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    /// R or S is zero or not below the curve order.
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,
}

/// Errors raised by the mint authority and its bridged token ledger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorityError {
    /// The signature could not be decoded or recovered.
    #[error("Malformed signature: {0}")]
    MalformedSignature(#[from] SignatureError),

    /// The recovered signer is not the trusted custodian.
    #[error("Invalid signature: recovered signer {recovered:?} is not the trusted authority")]
    InvalidSignature { recovered: Address },

    /// The nonce hash was already redeemed.
    #[error("Nonce reused: {0:?}")]
    NonceReused(Hash),

    /// Mint or burn of zero units.
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    /// Burn-to-redeem with no foreign recipient.
    #[error("Burn recipient must not be empty")]
    EmptyRecipient,

    /// Holder does not own enough bridged asset.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Amount or fee computation would overflow.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Fee exceeds the configured cap.
    #[error("Invalid fee: {bps} bps exceeds {max} bps")]
    InvalidFee { bps: u16, max: u16 },

    /// Caller may not administer the registry.
    #[error("Unauthorized: {caller:?} is not the registry owner")]
    Unauthorized { caller: Address },

    /// Asset already mapped to an authority.
    #[error("Asset already registered: {0:?}")]
    AlreadyRegistered(Address),

    /// No authority is registered for the asset.
    #[error("Unknown asset: {0:?}")]
    UnknownAsset(Address),
}
