//! Counters for contract traffic.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub const READS: &str = "reads";
pub const CACHE_HITS: &str = "cache_hits";
pub const WRITES: &str = "writes";
pub const REJECTED: &str = "rejected";
pub const FAILED: &str = "failed";
pub const CONFIRMED: &str = "confirmed";

/// Every counter the contract layer reports.
pub const CONTRACT_COUNTERS: &[&str] = &[READS, CACHE_HITS, WRITES, REJECTED, FAILED, CONFIRMED];

/// A thread-safe set of named counters. Names outside the registered set are ignored.
#[derive(Debug)]
pub struct StatsCounter {
    counters: BTreeMap<&'static str, AtomicU64>,
}

impl StatsCounter {
    pub fn new(names: &[&'static str]) -> Self {
        let counters = names.iter().map(|&n| (n, AtomicU64::new(0))).collect();
        Self { counters }
    }

    /// Counters for the contract layer.
    pub fn for_contracts() -> Self {
        Self::new(CONTRACT_COUNTERS)
    }

    pub fn increment(&self, name: &str) {
        self.add(name, 1);
    }

    pub fn add(&self, name: &str, value: u64) {
        if let Some(counter) = self.counters.get(name) {
            counter.fetch_add(value, Ordering::Relaxed);
        }
    }

    pub fn get(&self, name: &str) -> u64 {
        self.counters
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> BTreeMap<&'static str, u64> {
        self.counters
            .iter()
            .map(|(&k, v)| (k, v.load(Ordering::Relaxed)))
            .collect()
    }
}

impl Default for StatsCounter {
    fn default() -> Self {
        Self::for_contracts()
    }
}

impl fmt::Display for StatsCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .snapshot()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
