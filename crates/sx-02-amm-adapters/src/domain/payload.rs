//! # Payload Commitments
//!
//! A mint authorization is bound to exactly one downstream action through
//! `payload_hash = keccak256(abi.encode(params...))`.
//!
//! | Action | V1 parameter order |
//! |--------|--------------------|
//! | add liquidity | `(uint256 min_liquidity, bytes refund, uint256 deadline)` |
//! | sell | `(uint256 relay_fee, address beneficiary, uint256 min_native_out, bytes refund, uint256 deadline)` |
//!
//! Any other order produces a different commitment, so a signature issued
//! over it never verifies.

use serde::{Deserialize, Serialize};
use shared_types::{abi_encode, keccak256, AbiToken, Address, ForeignAddress, Hash, U256};

/// Commitment encoding version. V1 is the only accepted encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadVersion {
    #[default]
    V1,
}

/// Parameters of a minting add-liquidity call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservePayload {
    pub min_liquidity: U256,
    /// Foreign address for minted units the pool does not take. Empty keeps
    /// them on-ledger with the caller.
    pub refund: ForeignAddress,
    pub deadline: U256,
}

impl ReservePayload {
    pub fn encode(&self, version: PayloadVersion) -> Vec<u8> {
        match version {
            PayloadVersion::V1 => abi_encode(&[
                AbiToken::Uint(self.min_liquidity),
                AbiToken::Bytes(self.refund.as_bytes().to_vec()),
                AbiToken::Uint(self.deadline),
            ]),
        }
    }

    pub fn commitment(&self, version: PayloadVersion) -> Hash {
        keccak256(&self.encode(version))
    }
}

/// Parameters of a minting sell call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SellPayload {
    pub relay_fee: U256,
    pub beneficiary: Address,
    pub min_native_out: U256,
    pub refund: ForeignAddress,
    pub deadline: U256,
}

impl SellPayload {
    pub fn encode(&self, version: PayloadVersion) -> Vec<u8> {
        match version {
            PayloadVersion::V1 => abi_encode(&[
                AbiToken::Uint(self.relay_fee),
                AbiToken::Address(self.beneficiary),
                AbiToken::Uint(self.min_native_out),
                AbiToken::Bytes(self.refund.as_bytes().to_vec()),
                AbiToken::Uint(self.deadline),
            ]),
        }
    }

    pub fn commitment(&self, version: PayloadVersion) -> Hash {
        keccak256(&self.encode(version))
    }
}
