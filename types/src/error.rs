//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while parsing or converting core types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("invalid gender code: {0}")]
    InvalidGender(u8),

    #[error("invalid election status code: {0}")]
    InvalidStatus(u8),

    #[error("unknown chain: {0}")]
    UnknownChain(String),
}
