//! Tracked contract writes.
//!
//! A write moves through `pending` (waiting for the wallet), `confirming`
//! (broadcast, waiting for a receipt) and `confirmed`. Each step is reported
//! through the handle's [`Notifier`](crate::notify::Notifier). Failures never
//! escape as errors: they are logged, notified and kept in
//! [`WriteCall::last_error`] so the caller can offer a retry.

use chainvote_types::{Address, TxHash};
use chainvote_utils::stats;
use serde_json::Value;
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::{error, info, warn};

use crate::call::TxReceipt;
use crate::error::ContractError;
use crate::handle::ContractHandle;
use crate::notify::{Notice, NoticeLevel, ToastMessages};

/// One state-changing contract function with its arguments.
pub trait WriteOperation: Send + Sync + Debug {
    fn function_name(&self) -> &'static str;

    fn args(&self) -> Vec<Value>;

    /// Notice texts for this operation.
    fn messages(&self) -> ToastMessages {
        ToastMessages::default()
    }
}

pub struct WriteCall<Op: WriteOperation> {
    handle: ContractHandle,
    is_pending: bool,
    is_confirming: bool,
    is_confirmed: bool,
    hash: Option<TxHash>,
    last_error: Option<ContractError>,
    messages: ToastMessages,
    _op: PhantomData<fn(Op)>,
}

/// Clears the pending flag when dropped, including when the `execute`
/// future is dropped mid-await.
struct PendingGuard<'a>(&'a mut bool);

impl<'a> PendingGuard<'a> {
    fn set(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl<Op: WriteOperation> WriteCall<Op> {
    pub(crate) fn new(handle: ContractHandle) -> Self {
        Self {
            handle,
            is_pending: false,
            is_confirming: false,
            is_confirmed: false,
            hash: None,
            last_error: None,
            messages: ToastMessages::default(),
            _op: PhantomData,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.is_pending
    }

    pub fn is_confirming(&self) -> bool {
        self.is_confirming
    }

    pub fn is_confirmed(&self) -> bool {
        self.is_confirmed
    }

    /// Pending or confirming. Controls that would submit again should be disabled.
    pub fn is_busy(&self) -> bool {
        self.is_pending || self.is_confirming
    }

    pub fn hash(&self) -> Option<&TxHash> {
        self.hash.as_ref()
    }

    pub fn last_error(&self) -> Option<&ContractError> {
        self.last_error.as_ref()
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        self.handle.notifier.notify(Notice::new(level, message));
    }

    /// Ask the wallet to sign and broadcast `op`.
    ///
    /// Returns the transaction hash once broadcast, or `None` on rejection or
    /// failure (see [`last_error`](Self::last_error)).
    pub async fn execute(&mut self, caller: &Address, op: Op) -> Option<TxHash> {
        let call = self.handle.call(op.function_name(), op.args(), caller);
        self.messages = op.messages();
        self.is_confirming = false;
        self.is_confirmed = false;
        self.hash = None;
        self.last_error = None;
        self.notify(NoticeLevel::Loading, self.messages.loading());

        self.handle.stats.increment(stats::WRITES);
        let result = {
            let _pending = PendingGuard::set(&mut self.is_pending);
            self.handle.transport.write(&call).await
        };

        match result {
            Ok(hash) => {
                info!(
                    contract = %call.kind,
                    function = call.function,
                    hash = %hash,
                    "transaction submitted"
                );
                self.hash = Some(hash);
                self.is_confirming = true;
                self.notify(NoticeLevel::Submitted, self.messages.success());
                Some(hash)
            }
            Err(err) if err.is_user_rejected() => {
                warn!(function = call.function, error = %err, "transaction rejected by wallet");
                self.handle.stats.increment(stats::REJECTED);
                self.notify(NoticeLevel::Failed, self.messages.error());
                self.last_error = Some(err);
                None
            }
            Err(err) => {
                error!(function = call.function, error = %err, "transaction failed");
                self.handle.stats.increment(stats::FAILED);
                self.notify(NoticeLevel::Failed, err.short_message());
                self.last_error = Some(err);
                None
            }
        }
    }

    /// Poll for the receipt of the last broadcast transaction.
    ///
    /// Keeps polling through transient transport errors; there is no timeout.
    pub async fn wait_for_confirmation(&mut self) -> Option<TxReceipt> {
        let hash = self.hash?;
        self.is_confirming = true;

        let receipt = loop {
            match self.handle.transport.receipt(&hash).await {
                Ok(Some(receipt)) => break Ok(receipt),
                Ok(None) => {}
                Err(err) if err.retryable() => {
                    warn!(hash = %hash, error = %err, "receipt poll failed, retrying");
                }
                Err(err) => break Err(err),
            }
            tokio::time::sleep(self.handle.confirmation_poll).await;
        };
        self.is_confirming = false;

        let receipt = match receipt {
            Ok(r) if r.success => r,
            Ok(_) => {
                self.fail(ContractError::reverted(format!(
                    "transaction {hash} reverted"
                )));
                return None;
            }
            Err(err) => {
                self.fail(err);
                return None;
            }
        };

        info!(hash = %hash, block = receipt.block_number, "transaction confirmed");
        self.is_confirmed = true;
        self.handle.stats.increment(stats::CONFIRMED);
        self.notify(NoticeLevel::Confirmed, self.messages.confirmed());
        Some(receipt)
    }

    fn fail(&mut self, err: ContractError) {
        error!(error = %err, "transaction failed after broadcast");
        self.handle.stats.increment(stats::FAILED);
        self.notify(NoticeLevel::Failed, err.short_message());
        self.last_error = Some(err);
    }

    /// [`execute`](Self::execute) then [`wait_for_confirmation`](Self::wait_for_confirmation).
    pub async fn submit(&mut self, caller: &Address, op: Op) -> Option<TxReceipt> {
        self.execute(caller, op).await?;
        self.wait_for_confirmation().await
    }

    /// Clear a confirmed result so the same confirmation is not acted on twice.
    pub fn reset_confirmation(&mut self) {
        if self.is_confirmed {
            self.is_confirmed = false;
            self.hash = None;
        }
    }

    /// `true` exactly once per confirmation.
    pub fn take_confirmation(&mut self) -> bool {
        let confirmed = self.is_confirmed;
        self.reset_confirmation();
        confirmed
    }

    pub fn reset(&mut self) {
        self.is_pending = false;
        self.is_confirming = false;
        self.is_confirmed = false;
        self.hash = None;
        self.last_error = None;
        self.messages = ToastMessages::default();
    }
}
