//! Client-side gating of destructive and lifecycle actions.
//!
//! These mirror the contract's own guards so controls can be disabled up
//! front. The contract stays authoritative and may still reject.

use chainvote_types::{ElectionDetails, VoterDetails};
use serde::Serialize;

/// A voter who has voted can no longer be removed.
pub fn can_remove_voter(voter: &VoterDetails) -> bool {
    voter.times_voted == 0
}

/// Delete is only possible for a NEW election with no votes.
pub fn can_delete_election(election: &ElectionDetails) -> bool {
    election.is_new() && election.total_votes == 0
}

/// Candidates can be enrolled or withdrawn only while NEW.
pub fn can_modify_candidates(election: &ElectionDetails) -> bool {
    election.is_new()
}

pub fn can_open_election(election: &ElectionDetails) -> bool {
    election.is_new()
}

/// Completing an election requires it to be ACTIVE with at least one vote.
pub fn can_complete_election(election: &ElectionDetails) -> bool {
    election.is_active() && election.total_votes > 0
}

pub fn can_archive_election(election: &ElectionDetails) -> bool {
    !election.is_archived()
}

/// Which row actions are enabled for one election.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ElectionActions {
    pub edit: bool,
    pub delete: bool,
    pub manage_candidates: bool,
    pub open: bool,
    pub complete: bool,
    pub archive: bool,
}

impl ElectionActions {
    /// Everything is disabled while a write from this row is in flight.
    pub fn for_election(election: &ElectionDetails, busy: bool) -> Self {
        if busy {
            return Self::default();
        }
        Self {
            edit: !election.is_archived(),
            delete: can_delete_election(election),
            manage_candidates: can_modify_candidates(election),
            open: can_open_election(election),
            complete: can_complete_election(election),
            archive: can_archive_election(election),
        }
    }
}
