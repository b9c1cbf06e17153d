//! # Contract-ABI Parameter Encoding
//!
//! Payload commitments are computed over the Ethereum contract-ABI encoding of
//! the downstream action's parameters, so that off-chain signers built against
//! Solidity contracts produce identical digests.
//!
//! ## Layout
//!
//! ```text
//! head: one 32-byte word per parameter
//!       static  (uint256, address, bytes32) -> the value, left-padded
//!       dynamic (bytes)                     -> byte offset of its tail entry
//! tail: per dynamic parameter, a length word then the data right-padded to 32
//! ```

use crate::entities::{Address, Hash, U256};

/// Size of one ABI word.
pub const WORD: usize = 32;

/// One ABI-encodable parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiToken {
    /// `uint256`
    Uint(U256),
    /// `address`
    Address(Address),
    /// `bytes32`
    FixedBytes(Hash),
    /// `bytes` (dynamic)
    Bytes(Vec<u8>),
}

/// Encode a parameter list (`abi.encode(...)`).
pub fn encode(tokens: &[AbiToken]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            AbiToken::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            AbiToken::Address(address) => head.extend_from_slice(&address_word(address)),
            AbiToken::FixedBytes(bytes) => head.extend_from_slice(bytes),
            AbiToken::Bytes(bytes) => {
                let offset = head_len + tail.len();
                head.extend_from_slice(&uint_word(U256::from(offset)));
                tail.extend_from_slice(&uint_word(U256::from(bytes.len())));
                tail.extend_from_slice(bytes);
                let padding = (WORD - bytes.len() % WORD) % WORD;
                tail.resize(tail.len() + padding, 0);
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// A `uint256` as a big-endian word.
pub fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

/// An `address` left-padded to a word.
pub fn address_word(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address);
    word
}
