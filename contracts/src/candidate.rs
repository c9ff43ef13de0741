//! Candidate contract client.

use chainvote_types::{Address, CandidateDetails, CandidateParams};
use serde_json::Value;

use crate::admin::AdminControlled;
use crate::call::args;
use crate::handle::ContractHandle;
use crate::notify::ToastMessages;
use crate::read::ReadCall;
use crate::write::{WriteCall, WriteOperation};

#[derive(Clone, Debug)]
pub struct CandidateDatabase {
    handle: ContractHandle,
}

impl CandidateDatabase {
    pub fn new(handle: ContractHandle) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> &Address {
        &self.handle.address
    }

    pub fn get_my_details(&self, caller: &Address) -> ReadCall<CandidateDetails> {
        self.handle.read("getMyDetails", vec![], caller)
    }

    /// Public details of any registered candidate.
    pub fn get_candidate_details(
        &self,
        caller: &Address,
        candidate: &Address,
    ) -> ReadCall<CandidateDetails> {
        self.handle
            .read("getCandidateDetails", vec![args::address(candidate)], caller)
    }

    pub fn get_my_registration_status(&self, caller: &Address) -> ReadCall<bool> {
        self.handle.read("getMyRegistrationStatus", vec![], caller)
    }

    pub fn get_candidate_registration_status(
        &self,
        caller: &Address,
        candidate: &Address,
    ) -> ReadCall<bool> {
        self.handle.read(
            "getCandidateRegistrationStatus",
            vec![args::address(candidate)],
            caller,
        )
    }

    pub fn get_candidate_count(&self, caller: &Address) -> ReadCall<u64> {
        self.handle.read("getCandidateCount", vec![], caller)
    }

    pub fn get_all_candidates(&self, caller: &Address) -> ReadCall<Vec<Address>> {
        self.handle.read("getAllCandidates", vec![], caller)
    }

    pub fn get_my_age(&self, caller: &Address) -> ReadCall<u64> {
        self.handle.read("getMyAge", vec![], caller)
    }

    pub fn writer(&self) -> WriteCall<CandidateWrite> {
        self.handle.writer()
    }
}

impl AdminControlled for CandidateDatabase {
    fn handle(&self) -> &ContractHandle {
        &self.handle
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CandidateWrite {
    AddCandidate(CandidateParams),
    UpdateCandidate(CandidateParams),
    DeleteCandidate,
    AdminAddCandidate {
        candidate: Address,
        params: CandidateParams,
    },
    AdminUpdateCandidate {
        candidate: Address,
        params: CandidateParams,
    },
    AdminRemoveCandidate(Address),
    AdminImportCandidate {
        source: Address,
        candidate: Address,
    },
    AdminBatchImportCandidates {
        source: Address,
        candidates: Vec<Address>,
    },
    AdminImportAllCandidates {
        source: Address,
    },
}

fn params_args(p: &CandidateParams) -> Vec<Value> {
    vec![
        args::text(&p.name),
        args::uint(p.date_of_birth_epoch),
        args::small(p.gender.code()),
        args::text(&p.present_address),
        args::text(&p.email),
        args::text(&p.qualifications),
        args::text(&p.manifesto),
    ]
}

impl WriteOperation for CandidateWrite {
    fn function_name(&self) -> &'static str {
        match self {
            Self::AddCandidate(_) => "addCandidate",
            Self::UpdateCandidate(_) => "updateCandidate",
            Self::DeleteCandidate => "deleteCandidate",
            Self::AdminAddCandidate { .. } => "adminAddCandidate",
            Self::AdminUpdateCandidate { .. } => "adminUpdateCandidate",
            Self::AdminRemoveCandidate(_) => "adminRemoveCandidate",
            Self::AdminImportCandidate { .. } => "adminImportCandidate",
            Self::AdminBatchImportCandidates { .. } => "adminBatchImportCandidates",
            Self::AdminImportAllCandidates { .. } => "adminImportAllCandidates",
        }
    }

    fn args(&self) -> Vec<Value> {
        match self {
            Self::AddCandidate(p) | Self::UpdateCandidate(p) => params_args(p),
            Self::DeleteCandidate => vec![],
            Self::AdminAddCandidate { candidate, params }
            | Self::AdminUpdateCandidate { candidate, params } => {
                let mut out = vec![args::address(candidate)];
                out.extend(params_args(params));
                out
            }
            Self::AdminRemoveCandidate(c) => vec![args::address(c)],
            Self::AdminImportCandidate { source, candidate } => {
                vec![args::address(source), args::address(candidate)]
            }
            Self::AdminBatchImportCandidates { source, candidates } => {
                vec![args::address(source), args::addresses(candidates)]
            }
            Self::AdminImportAllCandidates { source } => vec![args::address(source)],
        }
    }

    fn messages(&self) -> ToastMessages {
        match self {
            Self::AddCandidate(_) => ToastMessages::new(
                "Submitting candidate registration...",
                "Registration submitted! Waiting for blockchain confirmation...",
                "Failed to register as candidate",
                "Your candidate registration has been confirmed!",
            ),
            Self::UpdateCandidate(_) => ToastMessages::new(
                "Updating candidate information...",
                "Update submitted! Waiting for blockchain confirmation...",
                "Failed to update candidate information",
                "Your candidate information has been updated successfully!",
            ),
            Self::DeleteCandidate => ToastMessages::new(
                "Removing candidacy...",
                "Removal submitted! Waiting for blockchain confirmation...",
                "Failed to remove candidacy",
                "Your candidacy has been removed successfully!",
            ),
            Self::AdminAddCandidate { .. } => ToastMessages::new(
                "Adding candidate as admin...",
                "Candidate add submitted! Waiting for blockchain confirmation...",
                "Failed to add candidate",
                "Candidate has been added successfully!",
            ),
            Self::AdminUpdateCandidate { .. } => ToastMessages::new(
                "Updating candidate as admin...",
                "Candidate update submitted! Waiting for blockchain confirmation...",
                "Failed to update candidate",
                "Candidate has been updated successfully!",
            ),
            Self::AdminRemoveCandidate(_) => ToastMessages::new(
                "Removing candidate as admin...",
                "Candidate removal submitted! Waiting for blockchain confirmation...",
                "Failed to remove candidate",
                "Candidate has been removed successfully!",
            ),
            Self::AdminImportCandidate { .. } => ToastMessages::new(
                "Importing candidate...",
                "Candidate import submitted! Waiting for blockchain confirmation...",
                "Failed to import candidate",
                "Candidate has been imported successfully!",
            ),
            Self::AdminBatchImportCandidates { .. } => ToastMessages::new(
                "Batch importing candidates...",
                "Batch import submitted! Waiting for blockchain confirmation...",
                "Failed to batch import candidates",
                "Candidates have been batch imported successfully!",
            ),
            Self::AdminImportAllCandidates { .. } => ToastMessages::new(
                "Importing all candidates...",
                "Import all submitted! Waiting for blockchain confirmation...",
                "Failed to import all candidates",
                "All candidates have been imported successfully!",
            ),
        }
    }
}
