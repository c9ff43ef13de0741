//! Contract-layer error type.
//!
//! Replaces the toast-only error channel with a structured value. Every
//! failure still flows through one type; the kind only separates the cases a
//! caller can act on differently (retry after a rejected signature, or give up
//! after a revert).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The wallet owner declined to sign.
    UserRejected,
    /// The contract reverted or refused the call.
    Reverted,
    /// The gateway or node could not be reached or answered garbage.
    Transport,
    /// The call succeeded but its result did not have the expected shape.
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UserRejected => "user rejected",
            Self::Reverted => "reverted",
            Self::Transport => "transport",
            Self::Decode => "decode",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ContractError {
    pub kind: ErrorKind,
    /// Short, user-presentable message.
    pub message: String,
}

impl ContractError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn user_rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserRejected, message)
    }

    pub fn reverted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Reverted, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Classify a wallet/contract error message: rejections are recognised by
    /// the wording wallets use, everything else counts as a revert.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("user rejected") || lower.contains("user denied") {
            Self::user_rejected(message)
        } else {
            Self::reverted(message)
        }
    }

    pub fn is_user_rejected(&self) -> bool {
        self.kind == ErrorKind::UserRejected
    }

    /// Whether repeating the same call could succeed without changing anything.
    pub fn retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::UserRejected | ErrorKind::Transport)
    }

    pub fn short_message(&self) -> &str {
        &self.message
    }
}
