//! # Mint Authority (SX-01)
//!
//! Custodian-authorized minting of a bridged asset.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): signature recovery, digest and fee math,
//!   the consumed-nonce set and the token ledger
//! - **Ports Layer** (`ports/`): the `MintAuthorityApi` trait adapters drive
//! - **Authority** (`authority.rs`): wires the domain into one authority per asset
//! - **Registry** (`registry.rs`): asset → authority lookup
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are rejected
//! - **Domain Separation**: digests include the authority's own address
//! - **Replay**: a nonce hash is redeemable exactly once; the token only mints
//!   against a `ConsumedNonce` receipt

pub mod authority;
pub mod domain;
pub mod ports;
pub mod registry;

#[cfg(any(test, feature = "dev-signer"))]
pub mod signing;

// Re-export public API
pub use authority::MintAuthority;
pub use domain::digest::{calculate_fee, hash_for_signature};
pub use domain::ecdsa::{address_from_pubkey, recover_signer};
pub use domain::entities::{
    AuthorityConfig, EcdsaSignature, MintAuthorization, ShiftIn, ShiftOut, MAX_FEE_BPS,
};
pub use domain::errors::{AuthorityError, SignatureError};
pub use domain::nonce_ledger::{ConsumedNonce, ConsumedNonceSet};
pub use ports::inbound::MintAuthorityApi;
pub use registry::AuthorityRegistry;

#[cfg(any(test, feature = "dev-signer"))]
pub use signing::DevSigner;
