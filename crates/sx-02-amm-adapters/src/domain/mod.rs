//! Domain layer: adapter entities, payload commitments and the native ledger.

pub mod entities;
pub mod errors;
pub mod native;
pub mod payload;
