//! # Development Signer
//!
//! Holds a secp256k1 key in memory and signs authority digests the way the
//! custodian does. Used by tests and the simulator only; it is not a key
//! management facility.

use crate::domain::ecdsa::{address_from_pubkey, invert_s, is_low_s};
use crate::domain::entities::EcdsaSignature;
use crate::domain::errors::SignatureError;
use k256::ecdsa::SigningKey;
use shared_types::{Address, Hash};

/// In-memory custodian key.
#[derive(Clone)]
pub struct DevSigner {
    key: SigningKey,
}

impl DevSigner {
    /// Build from a 32-byte secret scalar.
    pub fn from_secret(secret: &[u8; 32]) -> Result<Self, SignatureError> {
        SigningKey::from_slice(secret)
            .map(|key| Self { key })
            .map_err(|_| SignatureError::InvalidFormat)
    }

    /// Fresh random key.
    pub fn random() -> Self {
        Self {
            key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Ledger address of the key.
    pub fn address(&self) -> Address {
        address_from_pubkey(self.key.verifying_key())
    }

    /// Sign a prehashed digest, normalized to low S with v in {27, 28}.
    pub fn sign_digest(&self, digest: &Hash) -> Result<EcdsaSignature, SignatureError> {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(digest)
            .map_err(|_| SignatureError::InvalidFormat)?;

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        // Flipping S to the low half flips the parity of R's y coordinate.
        let (s, parity) = if is_low_s(&s) {
            (s, recid.to_byte() & 1)
        } else {
            (invert_s(&s), (recid.to_byte() & 1) ^ 1)
        };

        Ok(EcdsaSignature { r, s, v: 27 + parity })
    }

    /// Sign and return the 65-byte `r ‖ s ‖ v` wire form.
    pub fn sign_digest_bytes(&self, digest: &Hash) -> Result<[u8; 65], SignatureError> {
        self.sign_digest(digest).map(|sig| sig.to_bytes())
    }
}

impl std::fmt::Debug for DevSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevSigner")
            .field("address", &shared_types::address_hex(&self.address()))
            .finish_non_exhaustive()
    }
}
