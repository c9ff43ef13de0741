//! Voter records.

use serde::{Deserialize, Serialize};

use crate::state::Gender;
use crate::time::Timestamp;

/// Fields a voter (or an admin on their behalf) submits to the voter contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterParams {
    pub name: String,
    /// Date of birth in epoch seconds (midnight UTC).
    pub date_of_birth_epoch: u64,
    pub gender: Gender,
    pub present_address: String,
    pub email: String,
}

/// A voter as read back from the voter contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterDetails {
    pub name: String,
    pub date_of_birth_epoch: u64,
    pub gender: Gender,
    pub present_address: String,
    pub email: String,
    /// Number of elections this voter has cast a ballot in.
    pub times_voted: u64,
    pub registration_timestamp: Timestamp,
}

impl VoterDetails {
    pub fn has_voted(&self) -> bool {
        self.times_voted > 0
    }

    /// The editable subset of this record.
    pub fn params(&self) -> VoterParams {
        VoterParams {
            name: self.name.clone(),
            date_of_birth_epoch: self.date_of_birth_epoch,
            gender: self.gender,
            present_address: self.present_address.clone(),
            email: self.email.clone(),
        }
    }
}
