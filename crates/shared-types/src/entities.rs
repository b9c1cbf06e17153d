//! # Core Domain Entities
//!
//! Primitive identifiers and amounts used across the authority and adapter
//! crates.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `ForeignAddress`
//! - **Digests**: `Hash`
//! - **Amounts**: `U256`, `Timestamp`

use crate::errors::EncodingError;
use serde::{Deserialize, Serialize};

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 32-byte digest (Keccak-256).
pub type Hash = [u8; 32];

/// A 20-byte ledger address.
pub type Address = [u8; 20];

/// The all-zero address. Never a valid beneficiary.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// An address on the foreign chain the bridged asset originates from.
///
/// Opaque bytes: the ledger never interprets them, it only forwards them to
/// the custodian through burn-to-redeem records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignAddress(pub Vec<u8>);

impl ForeignAddress {
    /// Wrap raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a `0x`-prefixed (or bare) hex string. `"0x"` yields an empty address.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        hex::decode(trimmed)
            .map(Self)
            .map_err(|e| EncodingError::InvalidHex(e.to_string()))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True when no address was supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ForeignAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

/// Render an address as `0x`-prefixed lowercase hex.
pub fn address_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse a `0x`-prefixed 20-byte address.
pub fn parse_address(s: &str) -> Result<Address, EncodingError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(trimmed).map_err(|e| EncodingError::InvalidHex(e.to_string()))?;
    if bytes.len() != 20 {
        return Err(EncodingError::InvalidLength {
            expected: 20,
            actual: bytes.len(),
        });
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&bytes);
    Ok(address)
}

/// Short `0xabcd…` form for log fields.
pub fn short_hex(bytes: &[u8]) -> String {
    let head = &bytes[..bytes.len().min(4)];
    format!("0x{}…", hex::encode(head))
}

/// Serde helper: addresses as hex strings in configuration files.
pub mod serde_address {
    use super::{address_hex, parse_address, Address};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&address_hex(address))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).map_err(D::Error::custom)
    }
}
