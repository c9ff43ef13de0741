//! Nullable clock: deterministic time for testing.

use chainvote_utils::dates::string_to_date;
use chainvote_utils::Clock;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
#[derive(Debug)]
pub struct NullClock {
    current: AtomicI64,
}

impl NullClock {
    pub fn new(initial_secs: i64) -> Self {
        Self {
            current: AtomicI64::new(initial_secs),
        }
    }

    /// Midnight UTC on a `YYYY-MM-DD` date. Panics on a malformed date.
    pub fn at_date(date: &str) -> Self {
        let secs = string_to_date(date)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_else(|| panic!("NullClock::at_date: invalid date {date:?}"));
        Self::new(secs)
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: i64) {
        self.current.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: i64) {
        self.current.store(secs, Ordering::SeqCst);
    }
}

impl Clock for NullClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.current.load(Ordering::SeqCst), 0).unwrap_or_default()
    }
}
