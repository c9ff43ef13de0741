//! Election contract client.

use chainvote_types::{Address, ElectionDetails, ElectionId, Timestamp};
use serde_json::Value;

use crate::admin::AdminControlled;
use crate::call::args;
use crate::decode::Decode;
use crate::handle::ContractHandle;
use crate::notify::ToastMessages;
use crate::read::ReadCall;
use crate::write::{WriteCall, WriteOperation};

/// The voter and candidate contracts an election contract is wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractDatabases {
    pub voter_database: Address,
    pub candidate_database: Address,
}

impl Decode for ContractDatabases {
    fn decode(value: &Value) -> Result<Self, String> {
        let (voter_database, candidate_database) = <(Address, Address)>::decode(value)?;
        Ok(Self {
            voter_database,
            candidate_database,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ElectionDatabase {
    handle: ContractHandle,
}

impl ElectionDatabase {
    pub fn new(handle: ContractHandle) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> &Address {
        &self.handle.address
    }

    /// Raw status code; see `ElectionStatus`.
    pub fn get_election_status(&self, caller: &Address, id: ElectionId) -> ReadCall<u8> {
        self.handle
            .read("getElectionStatus", vec![args::uint(id)], caller)
    }

    pub fn get_election_details(
        &self,
        caller: &Address,
        id: ElectionId,
    ) -> ReadCall<ElectionDetails> {
        self.handle
            .read("getElectionDetails", vec![args::uint(id)], caller)
    }

    pub fn get_election_count(&self, caller: &Address) -> ReadCall<u64> {
        self.handle.read("getElectionCount", vec![], caller)
    }

    pub fn get_all_election_ids(&self, caller: &Address) -> ReadCall<Vec<u64>> {
        self.handle.read("getAllElectionIds", vec![], caller)
    }

    pub fn get_registered_candidates(
        &self,
        caller: &Address,
        id: ElectionId,
    ) -> ReadCall<Vec<Address>> {
        self.handle
            .read("getRegisteredCandidates", vec![args::uint(id)], caller)
    }

    pub fn get_votes_of_candidate(
        &self,
        caller: &Address,
        id: ElectionId,
        candidate: &Address,
    ) -> ReadCall<u64> {
        self.handle.read(
            "getVotesOfCandidate",
            vec![args::uint(id), args::address(candidate)],
            caller,
        )
    }

    pub fn get_total_vote_count(&self, caller: &Address, id: ElectionId) -> ReadCall<u64> {
        self.handle
            .read("getTotalVoteCount", vec![args::uint(id)], caller)
    }

    /// Leading candidate. The zero address when nobody has votes yet.
    pub fn get_winner(&self, caller: &Address, id: ElectionId) -> ReadCall<Address> {
        self.handle.read("getWinner", vec![args::uint(id)], caller)
    }

    pub fn has_voted(&self, caller: &Address, id: ElectionId, voter: &Address) -> ReadCall<bool> {
        self.handle.read(
            "hasVoted",
            vec![args::uint(id), args::address(voter)],
            caller,
        )
    }

    pub fn get_vote_timestamp(
        &self,
        caller: &Address,
        id: ElectionId,
        voter: &Address,
    ) -> ReadCall<Timestamp> {
        self.handle.read(
            "getVoteTimestamp",
            vec![args::uint(id), args::address(voter)],
            caller,
        )
    }

    pub fn get_voter_choice(
        &self,
        caller: &Address,
        id: ElectionId,
        voter: &Address,
    ) -> ReadCall<Address> {
        self.handle.read(
            "getVoterChoice",
            vec![args::uint(id), args::address(voter)],
            caller,
        )
    }

    pub fn get_databases(&self, caller: &Address) -> ReadCall<ContractDatabases> {
        self.handle.read("getDatabases", vec![], caller)
    }

    pub fn writer(&self) -> WriteCall<ElectionWrite> {
        self.handle.writer()
    }
}

impl AdminControlled for ElectionDatabase {
    fn handle(&self) -> &ContractHandle {
        &self.handle
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElectionWrite {
    AdminCreateElection {
        name: String,
        description: String,
    },
    AdminUpdateElection {
        id: ElectionId,
        name: String,
        description: String,
    },
    /// Only accepted by the contract while NEW with no votes.
    AdminDeleteElection(ElectionId),
    /// NEW → ACTIVE.
    AdminOpenElection(ElectionId),
    /// ACTIVE → COMPLETED.
    AdminCompleteElection(ElectionId),
    AdminArchiveElection(ElectionId),
    /// The caller enrolls themselves as a candidate.
    EnrollCandidate(ElectionId),
    WithdrawCandidate(ElectionId),
    AdminEnrollCandidate {
        id: ElectionId,
        candidate: Address,
    },
    AdminWithdrawCandidate {
        id: ElectionId,
        candidate: Address,
    },
    Vote {
        election_id: ElectionId,
        candidate: Address,
    },
}

impl WriteOperation for ElectionWrite {
    fn function_name(&self) -> &'static str {
        match self {
            Self::AdminCreateElection { .. } => "adminCreateElection",
            Self::AdminUpdateElection { .. } => "adminUpdateElection",
            Self::AdminDeleteElection(_) => "adminDeleteElection",
            Self::AdminOpenElection(_) => "adminOpenElection",
            Self::AdminCompleteElection(_) => "adminCompleteElection",
            Self::AdminArchiveElection(_) => "adminArchiveElection",
            Self::EnrollCandidate(_) => "enrollCandidate",
            Self::WithdrawCandidate(_) => "withdrawCandidate",
            Self::AdminEnrollCandidate { .. } => "adminEnrollCandidate",
            Self::AdminWithdrawCandidate { .. } => "adminWithdrawCandidate",
            Self::Vote { .. } => "vote",
        }
    }

    fn args(&self) -> Vec<Value> {
        match self {
            Self::AdminCreateElection { name, description } => {
                vec![args::text(name), args::text(description)]
            }
            Self::AdminUpdateElection {
                id,
                name,
                description,
            } => vec![args::uint(*id), args::text(name), args::text(description)],
            Self::AdminDeleteElection(id)
            | Self::AdminOpenElection(id)
            | Self::AdminCompleteElection(id)
            | Self::AdminArchiveElection(id)
            | Self::EnrollCandidate(id)
            | Self::WithdrawCandidate(id) => vec![args::uint(*id)],
            Self::AdminEnrollCandidate { id, candidate }
            | Self::AdminWithdrawCandidate { id, candidate }
            | Self::Vote {
                election_id: id,
                candidate,
            } => vec![args::uint(*id), args::address(candidate)],
        }
    }

    fn messages(&self) -> ToastMessages {
        match self {
            Self::AdminCreateElection { .. } => ToastMessages::new(
                "Creating election...",
                "Election created! Waiting for blockchain confirmation...",
                "Failed to create election",
                "Election has been created successfully!",
            ),
            Self::AdminUpdateElection { .. } => ToastMessages::new(
                "Updating election...",
                "Election updated! Waiting for blockchain confirmation...",
                "Failed to update election",
                "Election has been updated successfully!",
            ),
            Self::AdminDeleteElection(_) => ToastMessages::new(
                "Deleting election...",
                "Election deleted! Waiting for blockchain confirmation...",
                "Failed to delete election",
                "Election has been deleted successfully!",
            ),
            Self::AdminOpenElection(_) => ToastMessages::new(
                "Opening election for voting...",
                "Election opened! Waiting for blockchain confirmation...",
                "Failed to open election",
                "Election has been opened for voting successfully!",
            ),
            Self::AdminCompleteElection(_) => ToastMessages::new(
                "Completing election...",
                "Election completed! Waiting for blockchain confirmation...",
                "Failed to complete election",
                "Election has been completed successfully!",
            ),
            Self::AdminArchiveElection(_) => ToastMessages::new(
                "Archiving election...",
                "Election archived! Waiting for blockchain confirmation...",
                "Failed to archive election",
                "Election has been archived successfully!",
            ),
            Self::EnrollCandidate(_) => ToastMessages::new(
                "Enrolling as candidate...",
                "Enrollment submitted! Waiting for blockchain confirmation...",
                "Failed to enroll as candidate",
                "You have been enrolled as a candidate successfully!",
            ),
            Self::WithdrawCandidate(_) => ToastMessages::new(
                "Withdrawing candidacy...",
                "Withdrawal submitted! Waiting for blockchain confirmation...",
                "Failed to withdraw candidacy",
                "Your candidacy has been withdrawn successfully!",
            ),
            Self::AdminEnrollCandidate { .. } => ToastMessages::new(
                "Enrolling candidate...",
                "Candidate enrolled! Waiting for blockchain confirmation...",
                "Failed to enroll candidate",
                "Candidate has been enrolled successfully!",
            ),
            Self::AdminWithdrawCandidate { .. } => ToastMessages::new(
                "Removing candidate...",
                "Candidate removed! Waiting for blockchain confirmation...",
                "Failed to remove candidate",
                "Candidate has been removed successfully!",
            ),
            Self::Vote { .. } => ToastMessages::new(
                "Submitting your vote...",
                "Vote submitted! Waiting for blockchain confirmation...",
                "Failed to submit vote",
                "Your vote has been recorded successfully!",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vote_args_are_id_then_candidate() {
        let candidate = Address::new([0x33; 20]);
        let op = ElectionWrite::Vote {
            election_id: 4,
            candidate,
        };
        assert_eq!(op.function_name(), "vote");
        assert_eq!(op.args(), vec![json!("4"), json!(candidate.to_string())]);
    }

    #[test]
    fn lifecycle_writes_take_only_the_id() {
        for op in [
            ElectionWrite::AdminOpenElection(9),
            ElectionWrite::AdminCompleteElection(9),
            ElectionWrite::AdminArchiveElection(9),
            ElectionWrite::AdminDeleteElection(9),
        ] {
            assert_eq!(op.args(), vec![json!("9")], "{op:?}");
        }
    }

    #[test]
    fn databases_decode_from_pair() {
        let dbs = ContractDatabases::decode(&json!([
            "0x1111111111111111111111111111111111111111",
            "0x2222222222222222222222222222222222222222"
        ]))
        .unwrap();
        assert_eq!(dbs.voter_database, Address::new([0x11; 20]));
        assert_eq!(dbs.candidate_database, Address::new([0x22; 20]));
    }
}
