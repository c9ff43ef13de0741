//! Voting flow for chainvote.
//!
//! - [`VotingSession`]: the pure state machine of one voter in one election.
//! - [`VotingBooth`]: drives a session from contract reads and the vote write.
//! - [`ElectionTally`]: per-candidate results for display.

pub mod booth;
pub mod error;
pub mod session;
pub mod tally;

pub use booth::VotingBooth;
pub use error::SessionError;
pub use session::{SessionSnapshot, VotingSession, VotingStep};
pub use tally::{CandidateResult, ElectionTally};
