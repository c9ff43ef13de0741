//! Fundamental types for chainvote.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, transaction hashes, timestamps, chains, the election status
//! enum and the Voter / Candidate / Election records as read back from the contracts.

pub mod address;
pub mod candidate;
pub mod election;
pub mod error;
pub mod hash;
pub mod network;
pub mod state;
pub mod time;
pub mod voter;

pub use address::{is_valid_address, Address};
pub use candidate::{CandidateDetails, CandidateParams};
pub use election::{ElectionDetails, ElectionId};
pub use error::TypesError;
pub use hash::TxHash;
pub use network::Chain;
pub use state::{
    get_election_status_display, is_election_active, is_election_archived,
    is_election_completed, is_election_new, ElectionStatus, Gender,
};
pub use time::Timestamp;
pub use voter::{VoterDetails, VoterParams};
