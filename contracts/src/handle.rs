//! Shared plumbing every contract wrapper holds.

use chainvote_types::Address;
use chainvote_utils::StatsCounter;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::QueryCache;
use crate::call::{ContractCall, ContractKind};
use crate::decode::Decode;
use crate::notify::Notifier;
use crate::read::ReadCall;
use crate::transport::ContractTransport;
use crate::write::{WriteCall, WriteOperation};

/// One deployed contract plus the transport, cache, notifier and counters
/// used to talk to it. Cheap to clone.
#[derive(Clone)]
pub struct ContractHandle {
    pub kind: ContractKind,
    pub address: Address,
    pub(crate) transport: Arc<dyn ContractTransport>,
    pub(crate) cache: Arc<QueryCache>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) stats: Arc<StatsCounter>,
    pub(crate) confirmation_poll: Duration,
}

impl ContractHandle {
    pub fn new(
        kind: ContractKind,
        address: Address,
        transport: Arc<dyn ContractTransport>,
        cache: Arc<QueryCache>,
        notifier: Arc<dyn Notifier>,
        stats: Arc<StatsCounter>,
        confirmation_poll: Duration,
    ) -> Self {
        Self {
            kind,
            address,
            transport,
            cache,
            notifier,
            stats,
            confirmation_poll,
        }
    }

    pub fn call(&self, function: &'static str, args: Vec<Value>, caller: &Address) -> ContractCall {
        ContractCall {
            contract: self.address,
            kind: self.kind,
            function,
            args,
            caller: *caller,
        }
    }

    /// A read of `function` decoded as `T`. Nothing is fetched until
    /// [`ReadCall::fetch`] or [`ReadCall::load`].
    pub fn read<T: Decode>(
        &self,
        function: &'static str,
        args: Vec<Value>,
        caller: &Address,
    ) -> ReadCall<T> {
        ReadCall::new(self.clone(), self.call(function, args, caller))
    }

    /// A fresh write tracker for this contract.
    pub fn writer<Op: WriteOperation>(&self) -> WriteCall<Op> {
        WriteCall::new(self.clone())
    }

    /// Drop every cached read of `function`, for all args and callers.
    pub async fn invalidate(&self, function: &str) {
        self.cache.invalidate_function(&self.address, function).await;
    }

    pub fn stats(&self) -> &StatsCounter {
        &self.stats
    }
}

impl std::fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractHandle")
            .field("kind", &self.kind)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
