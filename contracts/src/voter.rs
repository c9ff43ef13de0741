//! Voter contract client.

use chainvote_types::{Address, VoterDetails, VoterParams};
use serde_json::Value;

use crate::admin::AdminControlled;
use crate::call::args;
use crate::handle::ContractHandle;
use crate::notify::ToastMessages;
use crate::read::ReadCall;
use crate::write::{WriteCall, WriteOperation};

#[derive(Clone, Debug)]
pub struct VoterDatabase {
    handle: ContractHandle,
}

impl VoterDatabase {
    pub fn new(handle: ContractHandle) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> &Address {
        &self.handle.address
    }

    pub fn get_my_details(&self, caller: &Address) -> ReadCall<VoterDetails> {
        self.handle.read("getMyDetails", vec![], caller)
    }

    pub fn get_my_registration_status(&self, caller: &Address) -> ReadCall<bool> {
        self.handle.read("getMyRegistrationStatus", vec![], caller)
    }

    pub fn get_my_voting_status(&self, caller: &Address) -> ReadCall<bool> {
        self.handle.read("getMyVotingStatus", vec![], caller)
    }

    /// Age in whole years as computed by the contract.
    pub fn get_my_age(&self, caller: &Address) -> ReadCall<u64> {
        self.handle.read("getMyAge", vec![], caller)
    }

    pub fn admin_get_voter_details(
        &self,
        caller: &Address,
        voter: &Address,
    ) -> ReadCall<VoterDetails> {
        self.handle
            .read("adminGetVoterDetails", vec![args::address(voter)], caller)
    }

    pub fn admin_get_voter_count(&self, caller: &Address) -> ReadCall<u64> {
        self.handle.read("adminGetVoterCount", vec![], caller)
    }

    pub fn admin_get_all_voters(&self, caller: &Address) -> ReadCall<Vec<Address>> {
        self.handle.read("adminGetAllVoters", vec![], caller)
    }

    pub fn admin_get_registration_status(
        &self,
        caller: &Address,
        voter: &Address,
    ) -> ReadCall<bool> {
        self.handle.read(
            "adminGetRegistrationStatus",
            vec![args::address(voter)],
            caller,
        )
    }

    pub fn writer(&self) -> WriteCall<VoterWrite> {
        self.handle.writer()
    }
}

impl AdminControlled for VoterDatabase {
    fn handle(&self) -> &ContractHandle {
        &self.handle
    }
}

/// State-changing voter contract calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoterWrite {
    /// Register the caller.
    AddVoter(VoterParams),
    UpdateVoter(VoterParams),
    /// Cancel the caller's own registration.
    DeleteVoter,
    MarkVoted,
    AdminAddVoter {
        voter: Address,
        params: VoterParams,
        times_voted: u64,
    },
    AdminUpdateVoter {
        voter: Address,
        params: VoterParams,
        times_voted: u64,
    },
    AdminRemoveVoter(Address),
    AdminMarkVoted(Address),
    /// Copy one voter from another voter contract.
    AdminImportVoter {
        source: Address,
        voter: Address,
    },
    AdminBatchImportVoters {
        source: Address,
        voters: Vec<Address>,
    },
    AdminImportAllVoters {
        source: Address,
    },
}

fn params_args(p: &VoterParams) -> Vec<Value> {
    vec![
        args::text(&p.name),
        args::uint(p.date_of_birth_epoch),
        args::small(p.gender.code()),
        args::text(&p.present_address),
        args::text(&p.email),
    ]
}

fn admin_params_args(voter: &Address, p: &VoterParams, times_voted: u64) -> Vec<Value> {
    let mut out = vec![args::address(voter)];
    out.extend(params_args(p));
    out.push(args::uint(times_voted));
    out
}

impl WriteOperation for VoterWrite {
    fn function_name(&self) -> &'static str {
        match self {
            Self::AddVoter(_) => "addVoter",
            Self::UpdateVoter(_) => "updateVoter",
            Self::DeleteVoter => "deleteVoter",
            Self::MarkVoted => "markVoted",
            Self::AdminAddVoter { .. } => "adminAddVoter",
            Self::AdminUpdateVoter { .. } => "adminUpdateVoter",
            Self::AdminRemoveVoter(_) => "adminRemoveVoter",
            Self::AdminMarkVoted(_) => "adminMarkVoted",
            Self::AdminImportVoter { .. } => "adminImportVoter",
            Self::AdminBatchImportVoters { .. } => "adminBatchImportVoters",
            Self::AdminImportAllVoters { .. } => "adminImportAllVoters",
        }
    }

    fn args(&self) -> Vec<Value> {
        match self {
            Self::AddVoter(p) | Self::UpdateVoter(p) => params_args(p),
            Self::DeleteVoter | Self::MarkVoted => vec![],
            Self::AdminAddVoter {
                voter,
                params,
                times_voted,
            }
            | Self::AdminUpdateVoter {
                voter,
                params,
                times_voted,
            } => admin_params_args(voter, params, *times_voted),
            Self::AdminRemoveVoter(v) | Self::AdminMarkVoted(v) => vec![args::address(v)],
            Self::AdminImportVoter { source, voter } => {
                vec![args::address(source), args::address(voter)]
            }
            Self::AdminBatchImportVoters { source, voters } => {
                vec![args::address(source), args::addresses(voters)]
            }
            Self::AdminImportAllVoters { source } => vec![args::address(source)],
        }
    }

    fn messages(&self) -> ToastMessages {
        match self {
            Self::AddVoter(_) => ToastMessages::new(
                "Submitting voter registration...",
                "Registration submitted! Waiting for blockchain confirmation...",
                "Failed to register as voter",
                "Your voter registration has been confirmed!",
            ),
            Self::UpdateVoter(_) => ToastMessages::new(
                "Updating voter information...",
                "Update submitted! Waiting for blockchain confirmation...",
                "Failed to update voter information",
                "Your voter information has been updated successfully!",
            ),
            Self::DeleteVoter => ToastMessages::new(
                "Cancelling voter registration...",
                "Cancellation submitted! Waiting for blockchain confirmation...",
                "Failed to cancel voter registration",
                "Your voter registration has been cancelled successfully!",
            ),
            Self::MarkVoted => ToastMessages::new(
                "Marking as voted...",
                "Vote status updated! Waiting for blockchain confirmation...",
                "Failed to mark as voted",
                "Vote status has been updated successfully!",
            ),
            Self::AdminAddVoter { .. } => ToastMessages::new(
                "Adding voter as admin...",
                "Voter addition submitted! Waiting for blockchain confirmation...",
                "Failed to add voter",
                "Voter has been added successfully!",
            ),
            Self::AdminUpdateVoter { .. } => ToastMessages::new(
                "Updating voter as admin...",
                "Voter update submitted! Waiting for blockchain confirmation...",
                "Failed to update voter",
                "Voter has been updated successfully!",
            ),
            Self::AdminRemoveVoter(_) => ToastMessages::new(
                "Removing voter as admin...",
                "Voter removal submitted! Waiting for blockchain confirmation...",
                "Failed to remove voter",
                "Voter has been removed successfully!",
            ),
            Self::AdminMarkVoted(_) => ToastMessages::new(
                "Marking voter as voted (admin)...",
                "Vote status update submitted! Waiting for blockchain confirmation...",
                "Failed to mark voter as voted",
                "Voter has been marked as voted successfully!",
            ),
            Self::AdminImportVoter { .. } => ToastMessages::new(
                "Importing voter...",
                "Voter import submitted! Waiting for blockchain confirmation...",
                "Failed to import voter",
                "Voter has been imported successfully!",
            ),
            Self::AdminBatchImportVoters { .. } => ToastMessages::new(
                "Batch importing voters...",
                "Batch import submitted! Waiting for blockchain confirmation...",
                "Failed to batch import voters",
                "Voters have been batch imported successfully!",
            ),
            Self::AdminImportAllVoters { .. } => ToastMessages::new(
                "Importing all voters...",
                "Import all submitted! Waiting for blockchain confirmation...",
                "Failed to import all voters",
                "All voters have been imported successfully!",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainvote_types::Gender;
    use serde_json::json;

    fn params() -> VoterParams {
        VoterParams {
            name: "Alice".into(),
            date_of_birth_epoch: 946_684_800,
            gender: Gender::Female,
            present_address: "12 Main St".into(),
            email: "alice@example.com".into(),
        }
    }

    #[test]
    fn self_registration_args_in_contract_order() {
        let op = VoterWrite::AddVoter(params());
        assert_eq!(op.function_name(), "addVoter");
        assert_eq!(
            op.args(),
            vec![
                json!("Alice"),
                json!("946684800"),
                json!(1),
                json!("12 Main St"),
                json!("alice@example.com")
            ]
        );
    }

    #[test]
    fn admin_add_wraps_address_and_times_voted() {
        let voter = Address::new([0x11; 20]);
        let op = VoterWrite::AdminAddVoter {
            voter,
            params: params(),
            times_voted: 0,
        };
        let a = op.args();
        assert_eq!(a.len(), 7);
        assert_eq!(a[0], json!(voter.to_string()));
        assert_eq!(a[6], json!("0"));
    }

    #[test]
    fn batch_import_passes_address_list() {
        let op = VoterWrite::AdminBatchImportVoters {
            source: Address::new([1; 20]),
            voters: vec![Address::new([2; 20]), Address::new([3; 20])],
        };
        assert_eq!(op.args()[1].as_array().map(Vec::len), Some(2));
        assert_eq!(op.messages().error(), "Failed to batch import voters");
    }
}
