//! User-facing progress notices for write calls.

use std::fmt;
use tracing::{error, info};

/// Progress stage of a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    /// Waiting for the wallet to sign.
    Loading,
    /// Broadcast, not yet mined.
    Submitted,
    Confirmed,
    Failed,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Loading => "loading",
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Sink for write progress. The dashboard showed these as toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Emits notices as log events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Failed => error!(level = %notice.level, "{}", notice.message),
            _ => info!(level = %notice.level, "{}", notice.message),
        }
    }
}

pub const DEFAULT_LOADING: &str = "Waiting for wallet confirmation...";
pub const DEFAULT_SUBMITTED: &str = "Transaction submitted! Waiting for confirmation...";
pub const DEFAULT_FAILED: &str = "Transaction failed.";
pub const DEFAULT_CONFIRMED: &str = "Transaction confirmed on the blockchain";

/// Per-operation notice texts. `None` falls back to the defaults above.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastMessages {
    pub loading: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
    pub confirmed: Option<String>,
}

impl ToastMessages {
    pub fn new(loading: &str, success: &str, error: &str, confirmed: &str) -> Self {
        Self {
            loading: Some(loading.to_string()),
            success: Some(success.to_string()),
            error: Some(error.to_string()),
            confirmed: Some(confirmed.to_string()),
        }
    }

    pub fn loading(&self) -> &str {
        self.loading.as_deref().unwrap_or(DEFAULT_LOADING)
    }

    pub fn success(&self) -> &str {
        self.success.as_deref().unwrap_or(DEFAULT_SUBMITTED)
    }

    pub fn error(&self) -> &str {
        self.error.as_deref().unwrap_or(DEFAULT_FAILED)
    }

    pub fn confirmed(&self) -> &str {
        self.confirmed.as_deref().unwrap_or(DEFAULT_CONFIRMED)
    }
}
