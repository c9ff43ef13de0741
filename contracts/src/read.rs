//! Typed, cache-backed contract reads.

use chainvote_utils::stats;
use std::marker::PhantomData;
use tracing::{debug, warn};

use crate::call::ContractCall;
use crate::decode::Decode;
use crate::error::ContractError;
use crate::handle::ContractHandle;

/// Result state of a read: data, loading flag, error flag and error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<ContractError>,
}

impl<T> Query<T> {
    pub fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            is_error: false,
            error: None,
        }
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::loading()
    }
}

/// One read of one contract function with fixed args and caller.
///
/// Starts in the loading state. [`fetch`](Self::fetch) fills it from the
/// shared cache; [`refetch`](Self::refetch) bypasses the cache. A failed
/// refetch keeps the previous data and raises the error flag.
pub struct ReadCall<T: Decode> {
    handle: ContractHandle,
    call: ContractCall,
    state: Query<T>,
    _decoded: PhantomData<fn() -> T>,
}

impl<T: Decode> ReadCall<T> {
    pub(crate) fn new(handle: ContractHandle, call: ContractCall) -> Self {
        Self {
            handle,
            call,
            state: Query::loading(),
            _decoded: PhantomData,
        }
    }

    pub fn call(&self) -> &ContractCall {
        &self.call
    }

    pub fn query(&self) -> &Query<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn is_error(&self) -> bool {
        self.state.is_error
    }

    pub fn error(&self) -> Option<&ContractError> {
        self.state.error.as_ref()
    }

    async fn resolve(&self) -> Result<T, ContractError> {
        let key = self.call.cache_key();
        let transport = &self.handle.transport;
        let call = &self.call;
        let (value, hit) = self
            .handle
            .cache
            .get_or_fetch(&key, || transport.read(call))
            .await?;

        self.handle.stats.increment(stats::READS);
        if hit {
            self.handle.stats.increment(stats::CACHE_HITS);
        }
        debug!(
            contract = %self.call.kind,
            function = self.call.function,
            args = ?self.call.args,
            cache_hit = hit,
            "contract read"
        );

        T::decode(&value).map_err(|e| {
            ContractError::decode(format!("{}: {e}", self.call.function))
        })
    }

    /// Populate from the cache, fetching on a miss.
    pub async fn fetch(&mut self) -> &Query<T> {
        self.state.is_loading = true;
        let result = self.resolve().await;
        self.settle(result);
        &self.state
    }

    /// Drop the cached value and fetch again.
    pub async fn refetch(&mut self) -> &Query<T> {
        self.handle.cache.invalidate(&self.call.cache_key()).await;
        self.fetch().await
    }

    fn settle(&mut self, result: Result<T, ContractError>) {
        self.state.is_loading = false;
        match result {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.is_error = false;
                self.state.error = None;
            }
            Err(err) => {
                warn!(function = self.call.function, error = %err, "contract read failed");
                self.state.is_error = true;
                self.state.error = Some(err);
            }
        }
    }

    /// Fetch once and return the decoded value.
    pub async fn load(mut self) -> Result<T, ContractError> {
        self.fetch().await;
        match (self.state.data, self.state.error) {
            (_, Some(err)) => Err(err),
            (Some(data), None) => Ok(data),
            (None, None) => Err(ContractError::decode(format!(
                "{}: no data",
                self.call.function
            ))),
        }
    }
}
