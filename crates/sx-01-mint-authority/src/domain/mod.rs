//! Domain layer: pure mint-authority logic, no I/O.

pub mod digest;
pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod nonce_ledger;
pub mod token;
