//! Adapters layer: in-process implementations of the outbound ports.

pub mod reference_pool;

pub use reference_pool::{PoolConfig, ReferencePool};
