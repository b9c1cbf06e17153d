//! End-to-end scenarios driving both adapters through a host with a
//! reference pool.

pub mod fixtures;
mod liquidity;
mod security;
mod swaps;
