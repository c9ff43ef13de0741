//! Shared utilities for chainvote.

pub mod clock;
pub mod dates;
pub mod logging;
pub mod stats;

pub use clock::{Clock, SystemClock};
pub use dates::DateError;
pub use logging::{init_logging, init_tracing, LogFormat};
pub use stats::StatsCounter;
