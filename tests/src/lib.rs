//! # Shift-Exchange Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end adapter scenarios
//!     ├── fixtures.rs   # Host, custodian and signing helpers
//!     ├── liquidity.rs  # Add / remove liquidity
//!     ├── swaps.rs      # Buy / sell, relay fees
//!     └── security.rs   # Replay, expiry, payload binding, atomicity
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sx-tests
//!
//! # By category
//! cargo test -p sx-tests integration::swaps::
//!
//! # Benchmarks
//! cargo bench -p sx-tests
//! ```

pub mod integration;
