//! # Consumed-Nonce Ledger
//!
//! Records every nonce hash an authority has redeemed. Committed entries are
//! never removed, so a redeemed authorization can never mint again. Only a
//! reverted host call drops the entries it added itself.
//!
//! Consuming a nonce yields a [`ConsumedNonce`] receipt. The bridged token
//! only mints against a receipt, which makes "mint before the nonce is
//! recorded" unrepresentable.

use super::errors::AuthorityError;
use shared_types::Hash;
use std::collections::HashSet;

/// Proof that a nonce hash was recorded by [`ConsumedNonceSet::consume`].
///
/// Not `Clone`: one receipt backs exactly one mint.
#[derive(Debug, PartialEq, Eq)]
pub struct ConsumedNonce {
    nonce_hash: Hash,
}

impl ConsumedNonce {
    /// The redeemed nonce hash.
    pub fn nonce_hash(&self) -> Hash {
        self.nonce_hash
    }
}

/// Append-only set of redeemed nonce hashes.
#[derive(Clone, Debug, Default)]
pub struct ConsumedNonceSet {
    consumed: HashSet<Hash>,
    /// Consumed since `begin`, while a call is open.
    pending: Option<Vec<Hash>>,
}

impl ConsumedNonceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `nonce_hash` has been consumed.
    pub fn is_consumed(&self, nonce_hash: &Hash) -> bool {
        self.consumed.contains(nonce_hash)
    }

    /// Fail with `NonceReused` if the nonce was already redeemed.
    pub fn ensure_unused(&self, nonce_hash: &Hash) -> Result<(), AuthorityError> {
        if self.is_consumed(nonce_hash) {
            return Err(AuthorityError::NonceReused(*nonce_hash));
        }
        Ok(())
    }

    /// Record `nonce_hash` and hand back the receipt.
    pub fn consume(&mut self, nonce_hash: Hash) -> Result<ConsumedNonce, AuthorityError> {
        if !self.consumed.insert(nonce_hash) {
            return Err(AuthorityError::NonceReused(nonce_hash));
        }
        if let Some(pending) = self.pending.as_mut() {
            pending.push(nonce_hash);
        }
        Ok(ConsumedNonce { nonce_hash })
    }

    pub(crate) fn begin(&mut self) {
        self.pending = Some(Vec::new());
    }

    pub(crate) fn commit(&mut self) {
        self.pending = None;
    }

    /// Forget the nonces consumed since `begin`.
    pub(crate) fn rollback(&mut self) {
        for nonce_hash in self.pending.take().unwrap_or_default() {
            self.consumed.remove(&nonce_hash);
        }
    }

    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}
