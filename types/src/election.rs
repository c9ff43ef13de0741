//! Election records.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::state::{self, ElectionStatus};
use crate::time::Timestamp;

/// Elections are numbered by the contract, monotonically.
pub type ElectionId = u64;

/// An election as read back from the election contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionDetails {
    pub name: String,
    pub description: String,
    /// Raw status code; see [`ElectionStatus`]. Kept raw so an unexpected
    /// code from the contract still renders as "Unknown" instead of failing.
    pub status: u8,
    /// Enrolled candidates, in enrollment order.
    pub candidates: Vec<Address>,
    pub total_votes: u64,
    pub registration_timestamp: Timestamp,
}

impl ElectionDetails {
    pub fn status(&self) -> Option<ElectionStatus> {
        ElectionStatus::from_code(self.status)
    }

    pub fn status_display(&self) -> &'static str {
        state::get_election_status_display(self.status)
    }

    pub fn is_new(&self) -> bool {
        state::is_election_new(self.status)
    }

    pub fn is_active(&self) -> bool {
        state::is_election_active(self.status)
    }

    pub fn is_completed(&self) -> bool {
        state::is_election_completed(self.status)
    }

    pub fn is_archived(&self) -> bool {
        state::is_election_archived(self.status)
    }

    pub fn has_candidate(&self, candidate: &Address) -> bool {
        self.candidates.contains(candidate)
    }
}
