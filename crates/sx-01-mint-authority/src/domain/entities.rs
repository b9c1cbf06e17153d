//! # Domain Entities
//!
//! Core data structures for custodian-authorized minting.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use shared_types::{serde_address, Address, ForeignAddress, Hash, U256, ZERO_ADDRESS};

/// Upper bound for mint and burn fees (100%).
pub const MAX_FEE_BPS: u16 = 10_000;

/// Basis-point denominator.
pub const BPS_DENOMINATOR: u64 = 10_000;

// =============================================================================
// ECDSA Types (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
///
/// Wire form is 65 bytes: `r (32) ‖ s (32) ‖ v (1)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Wire length.
    pub const LEN: usize = 65;

    /// Decode `r ‖ s ‖ v`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != Self::LEN {
            return Err(SignatureError::InvalidLength(bytes.len()));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Encode as `r ‖ s ‖ v`.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

// =============================================================================
// Mint Authorization
// =============================================================================

/// A custodian's authorization to mint `value` to `beneficiary`.
///
/// `payload_hash` commits to the downstream action; `nonce_hash` makes the
/// authorization single-use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintAuthorization {
    /// Address credited by the mint (the adapter contract in composed calls).
    pub beneficiary: Address,
    /// Amount to mint. Must be non-zero.
    pub value: U256,
    /// Single-use nonce hash.
    pub nonce_hash: Hash,
    /// Commitment to the downstream action.
    pub payload_hash: Hash,
    /// Custodian signature over the authority digest.
    pub signature: EcdsaSignature,
}

/// Result of a successful mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftIn {
    /// Monotonic shift identifier within the authority.
    pub shift_id: u64,
    /// Credited address.
    pub beneficiary: Address,
    /// Amount credited to the beneficiary (after the mint fee).
    pub amount: U256,
    /// Fee credited to the fee recipient.
    pub fee: U256,
    /// Redeemed nonce.
    pub nonce_hash: Hash,
}

/// Burn-to-redeem record. The custodian releases `amount` to `to` on the
/// foreign chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftOut {
    /// Monotonic shift identifier within the authority.
    pub shift_id: u64,
    /// Holder whose balance was burned.
    pub holder: Address,
    /// Foreign-chain recipient.
    pub to: ForeignAddress,
    /// Amount released on the foreign chain (after the burn fee).
    pub amount: U256,
    /// Fee credited to the fee recipient.
    pub fee: U256,
}

// =============================================================================
// Configuration
// =============================================================================

/// Mint authority configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityConfig {
    /// Ticker of the bridged asset (e.g. `zBTC`).
    pub symbol: String,
    /// Address of the trusted custodian signer.
    #[serde(with = "serde_address")]
    pub signer: Address,
    /// Recipient of mint and burn fees.
    #[serde(with = "serde_address")]
    pub fee_recipient: Address,
    /// Fee taken on mint, in basis points.
    #[serde(default)]
    pub mint_fee_bps: u16,
    /// Fee taken on burn, in basis points.
    #[serde(default)]
    pub burn_fee_bps: u16,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            symbol: "zBTC".to_string(),
            signer: ZERO_ADDRESS,
            fee_recipient: ZERO_ADDRESS,
            mint_fee_bps: 0,
            burn_fee_bps: 0,
        }
    }
}
