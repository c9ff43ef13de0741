//! Contract interface layer for chainvote.
//!
//! Wraps the three external contracts (voter, candidate, election databases)
//! behind typed read calls and tracked write calls:
//! - [`ReadCall`] fetches and decodes a positional tuple into a record, backed
//!   by a keyed [`QueryCache`] with in-flight deduplication and explicit refetch.
//! - [`WriteCall`] submits a transaction and tracks the pending → confirming →
//!   confirmed phases, reporting progress through a [`Notifier`].
//! - [`ContractTransport`] is the seam to the outside world; [`HttpTransport`]
//!   talks to a JSON-RPC contract gateway.
//!
//! The connected wallet address is passed explicitly to every call.

pub mod admin;
pub mod cache;
pub mod call;
pub mod candidate;
pub mod client;
pub mod decode;
pub mod election;
pub mod error;
pub mod handle;
pub mod notify;
pub mod read;
pub mod transport;
pub mod voter;
pub mod write;

pub use admin::{is_privileged, AdminControlled, AdminWrite};
pub use cache::QueryCache;
pub use call::{ContractCall, ContractKind, TxReceipt};
pub use candidate::{CandidateDatabase, CandidateWrite};
pub use client::{ChainvoteClient, ClientOptions, ContractAddresses};
pub use decode::Decode;
pub use election::{ContractDatabases, ElectionDatabase, ElectionWrite};
pub use error::{ContractError, ErrorKind};
pub use handle::ContractHandle;
pub use notify::{Notice, NoticeLevel, Notifier, ToastMessages, TracingNotifier};
pub use read::{Query, ReadCall};
pub use transport::{ContractTransport, HttpTransport};
pub use voter::{VoterDatabase, VoterWrite};
pub use write::{WriteCall, WriteOperation};
