//! Candidate records.

use serde::{Deserialize, Serialize};

use crate::state::Gender;
use crate::time::Timestamp;

/// Fields a candidate (or an admin on their behalf) submits to the candidate contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateParams {
    pub name: String,
    pub date_of_birth_epoch: u64,
    pub gender: Gender,
    pub present_address: String,
    pub email: String,
    pub qualifications: String,
    pub manifesto: String,
}

/// A candidate as read back from the candidate contract.
///
/// Independent of any voter record held by the same address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDetails {
    pub name: String,
    pub date_of_birth_epoch: u64,
    pub gender: Gender,
    pub present_address: String,
    pub email: String,
    pub qualifications: String,
    pub manifesto: String,
    pub registration_timestamp: Timestamp,
}

impl CandidateDetails {
    pub fn params(&self) -> CandidateParams {
        CandidateParams {
            name: self.name.clone(),
            date_of_birth_epoch: self.date_of_birth_epoch,
            gender: self.gender,
            present_address: self.present_address.clone(),
            email: self.email.clone(),
            qualifications: self.qualifications.clone(),
            manifesto: self.manifesto.clone(),
        }
    }
}
