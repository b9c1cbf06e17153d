//! # Keccak-256 Hashing
//!
//! The ledger's collision-resistant 256-bit hash. Used for signature digests,
//! payload commitments and derived addresses.

use crate::entities::Hash;
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Keccak-256 over several inputs, concatenated.
pub fn keccak256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for input in inputs {
        hasher.update(input);
    }
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}
