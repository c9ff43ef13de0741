//! Nullable infrastructure for deterministic testing.
//!
//! Everything outside the process (wall clock, contract gateway, user-facing
//! notices) sits behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be scripted programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod notifier;
pub mod transport;

pub use clock::NullClock;
pub use notifier::NullNotifier;
pub use transport::{CallKind, NullTransport, RecordedCall};
