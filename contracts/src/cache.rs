//! Keyed read cache with in-flight deduplication.
//!
//! Concurrent fetches of the same key share one request: the first caller
//! runs the fetch while the others wait on the same cell. Failed fetches are
//! not cached, so the next caller retries.

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

use crate::call::ContractCall;
use crate::error::ContractError;
use chainvote_types::Address;

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<Value>>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn cell(&self, key: &str) -> Arc<OnceCell<Value>> {
        let mut entries = self.entries.lock().await;
        entries
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Return the cached value for `key`, running `fetch` if there is none.
    ///
    /// The flag is `true` when the value came from the cache (including when
    /// another caller's in-flight fetch produced it).
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        fetch: F,
    ) -> Result<(Value, bool), ContractError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ContractError>>,
    {
        let cell = self.cell(key).await;
        let fetched = AtomicBool::new(false);
        let value = cell
            .get_or_try_init(|| async {
                fetched.store(true, Ordering::Relaxed);
                fetch().await
            })
            .await?
            .clone();
        Ok((value, !fetched.load(Ordering::Relaxed)))
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.lock().await;
        entries.get(key).and_then(|cell| cell.get().cloned())
    }

    pub async fn invalidate(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }

    /// Drop every entry whose key starts with `prefix`.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        self.entries
            .lock()
            .await
            .retain(|key, _| !key.starts_with(prefix));
    }

    /// Drop every cached read of `function` on `contract`.
    pub async fn invalidate_function(&self, contract: &Address, function: &str) {
        self.invalidate_prefix(&ContractCall::function_prefix(contract, function))
            .await;
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Number of keys holding a value.
    pub async fn len(&self) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicU64;
    use std::time::Duration;

    #[tokio::test]
    async fn second_fetch_is_a_hit() {
        let cache = QueryCache::new();
        let (v, hit) = cache
            .get_or_fetch("k", || async { Ok(json!(1)) })
            .await
            .unwrap();
        assert_eq!((v, hit), (json!(1), false));

        let (v, hit) = cache
            .get_or_fetch("k", || async { Ok(json!(2)) })
            .await
            .unwrap();
        assert_eq!((v, hit), (json!(1), true));
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = QueryCache::new();
        let err = cache
            .get_or_fetch("k", || async { Err(ContractError::transport("down")) })
            .await
            .unwrap_err();
        assert!(err.retryable());
        assert!(cache.is_empty().await);

        let (v, hit) = cache
            .get_or_fetch("k", || async { Ok(json!("ok")) })
            .await
            .unwrap();
        assert_eq!((v, hit), (json!("ok"), false));
    }

    #[tokio::test]
    async fn concurrent_fetches_share_one_request() {
        let cache = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicU64::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch("shared", || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(json!(42))
                    })
                    .await
                    .unwrap()
                    .0
            }));
        }
        for h in handles {
            assert_eq!(h.await.unwrap(), json!(42));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_by_key_and_prefix() {
        let cache = QueryCache::new();
        for key in ["c:getWinner:[1]:a", "c:getWinner:[2]:a", "c:hasVoted:[1]:a"] {
            cache
                .get_or_fetch(key, || async { Ok(json!(true)) })
                .await
                .unwrap();
        }
        assert_eq!(cache.len().await, 3);

        cache.invalidate_prefix("c:getWinner:").await;
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("c:hasVoted:[1]:a").await.is_some());

        cache.invalidate("c:hasVoted:[1]:a").await;
        assert!(cache.is_empty().await);
    }
}
