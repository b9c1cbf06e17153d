//! # Adapter Errors
//!
//! `PoolError` is raised by the pool port, `AdapterError` is what callers
//! see. `AdapterError::kind()` folds every variant, wrapped ones included,
//! onto the flat `ErrorKind` taxonomy.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp, U256};
use sx_01_mint_authority::AuthorityError;
use thiserror::Error;

/// Errors raised by a liquidity pool.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    /// The pool's own deadline check failed.
    #[error("Pool deadline {deadline} passed (now {now})")]
    Expired { deadline: U256, now: Timestamp },

    /// An output fell below the caller's floor.
    #[error("Slippage on {what}: minimum {minimum}, got {actual}")]
    SlippageExceeded {
        what: &'static str,
        minimum: U256,
        actual: U256,
    },

    /// Spender's share allowance is too small.
    #[error("Insufficient share allowance: required {required}, approved {available}")]
    InsufficientAllowance { required: U256, available: U256 },

    /// Holder owns too few shares.
    #[error("Insufficient shares: required {required}, available {available}")]
    InsufficientShares { required: U256, available: U256 },

    /// A reserve is empty.
    #[error("Pool has no liquidity")]
    InsufficientLiquidity,

    /// The first deposit must seed at least this much native currency.
    #[error("Initial deposit too small: minimum {minimum}, got {actual}")]
    DepositTooSmall { minimum: U256, actual: U256 },

    /// Zero input or a zero floor where the pool requires a positive one.
    #[error("Pool amount must be greater than zero")]
    ZeroAmount,

    #[error("Pool arithmetic overflow")]
    ArithmeticOverflow,
}

/// Flat failure taxonomy reported to callers and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidSignature,
    NonceReused,
    Expired,
    SlippageExceeded,
    InsufficientAllowance,
    ArithmeticOverflow,
    InsufficientBalance,
    InvalidInput,
    UnknownAsset,
    Unauthorized,
}

impl ErrorKind {
    /// Stable label, used for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidSignature => "invalid_signature",
            ErrorKind::NonceReused => "nonce_reused",
            ErrorKind::Expired => "expired",
            ErrorKind::SlippageExceeded => "slippage_exceeded",
            ErrorKind::InsufficientAllowance => "insufficient_allowance",
            ErrorKind::ArithmeticOverflow => "arithmetic_overflow",
            ErrorKind::InsufficientBalance => "insufficient_balance",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::UnknownAsset => "unknown_asset",
            ErrorKind::Unauthorized => "unauthorized",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by adapter calls. Any of them aborts the whole call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Authority: {0}")]
    Authority(#[from] AuthorityError),

    #[error("Pool: {0}")]
    Pool(#[from] PoolError),

    /// `now > deadline`.
    #[error("Deadline {deadline} passed (now {now})")]
    Expired { deadline: U256, now: Timestamp },

    /// Pool output below the caller's floor.
    #[error("Slippage exceeded: minimum {minimum}, got {actual}")]
    SlippageExceeded { minimum: U256, actual: U256 },

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Not enough native currency.
    #[error("Insufficient native balance for {holder:?}: required {required}, available {available}")]
    InsufficientBalance {
        holder: Address,
        required: U256,
        available: U256,
    },

    /// Native currency attached to an operation that does not accept it.
    #[error("Operation {operation} does not accept attached value {value}")]
    NonPayable {
        operation: &'static str,
        value: U256,
    },

    /// No pool or adapter exists for the asset.
    #[error("No exchange for asset {0:?}")]
    UnknownAsset(Address),

    #[error("Exchange already exists for asset {0:?}")]
    AdapterAlreadyExists(Address),

    /// The pool action does not match the adapter operation.
    #[error("Adapter cannot run {0}")]
    UnsupportedAction(&'static str),
}

impl AdapterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdapterError::Authority(e) => authority_kind(e),
            AdapterError::Pool(e) => pool_kind(e),
            AdapterError::Expired { .. } => ErrorKind::Expired,
            AdapterError::SlippageExceeded { .. } => ErrorKind::SlippageExceeded,
            AdapterError::ArithmeticOverflow => ErrorKind::ArithmeticOverflow,
            AdapterError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            AdapterError::NonPayable { .. } => ErrorKind::InvalidInput,
            AdapterError::UnknownAsset(_) => ErrorKind::UnknownAsset,
            AdapterError::AdapterAlreadyExists(_) => ErrorKind::InvalidInput,
            AdapterError::UnsupportedAction(_) => ErrorKind::InvalidInput,
        }
    }
}

fn authority_kind(error: &AuthorityError) -> ErrorKind {
    match error {
        AuthorityError::MalformedSignature(_) | AuthorityError::InvalidSignature { .. } => {
            ErrorKind::InvalidSignature
        }
        AuthorityError::NonceReused(_) => ErrorKind::NonceReused,
        AuthorityError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
        AuthorityError::ArithmeticOverflow => ErrorKind::ArithmeticOverflow,
        AuthorityError::Unauthorized { .. } => ErrorKind::Unauthorized,
        AuthorityError::UnknownAsset(_) => ErrorKind::UnknownAsset,
        AuthorityError::ZeroAmount
        | AuthorityError::EmptyRecipient
        | AuthorityError::InvalidFee { .. }
        | AuthorityError::AlreadyRegistered(_) => ErrorKind::InvalidInput,
    }
}

fn pool_kind(error: &PoolError) -> ErrorKind {
    match error {
        PoolError::Expired { .. } => ErrorKind::Expired,
        PoolError::SlippageExceeded { .. } => ErrorKind::SlippageExceeded,
        PoolError::InsufficientAllowance { .. } => ErrorKind::InsufficientAllowance,
        PoolError::InsufficientShares { .. } => ErrorKind::InsufficientBalance,
        PoolError::ArithmeticOverflow => ErrorKind::ArithmeticOverflow,
        PoolError::InsufficientLiquidity
        | PoolError::DepositTooSmall { .. }
        | PoolError::ZeroAmount => ErrorKind::InvalidInput,
    }
}
