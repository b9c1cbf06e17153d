//! # Shared Types Crate
//!
//! This crate contains the primitive types and wire encodings shared by every
//! Shift-Exchange crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: address, hash and amount types are defined here.
//! - **Byte-Exact Encodings**: the ABI parameter encoding used for payload
//!   commitments must match independently built callers byte for byte.
//! - **Fail Closed**: amount helpers never wrap.

pub mod abi;
pub mod entities;
pub mod errors;
pub mod hashing;

pub use abi::{encode as abi_encode, AbiToken};
pub use entities::*;
pub use errors::*;
pub use hashing::keccak256;
