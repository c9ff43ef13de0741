//! State enums for registrants and elections, plus the status classification helpers.

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Gender as encoded by the voter and candidate contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male = 0,
    Female = 1,
}

impl Gender {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl TryFrom<u8> for Gender {
    type Error = TypesError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Male),
            1 => Ok(Self::Female),
            other => Err(TypesError::InvalidGender(other)),
        }
    }
}

/// Lifecycle of an election as tracked by the election contract.
///
/// Transitions observed from the outside:
/// `New → Active` (open), `Active → Completed` (complete),
/// any non-archived status `→ Archived`, and deletion while `New`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectionStatus {
    /// Created; candidates may enroll or withdraw.
    New = 0,
    /// Open for voting.
    Active = 1,
    /// Voting closed; results final.
    Completed = 2,
    /// Hidden from active listings. Terminal.
    Archived = 3,
}

impl ElectionStatus {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Decode a raw status code, `None` for anything outside 0..=3.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::New),
            1 => Some(Self::Active),
            2 => Some(Self::Completed),
            3 => Some(Self::Archived),
            _ => None,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Archived => "Archived",
        }
    }

    /// Whether the election is past the point of accepting further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl TryFrom<u8> for ElectionStatus {
    type Error = TypesError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(TypesError::InvalidStatus(code))
    }
}

pub fn is_election_new(status: u8) -> bool {
    status == ElectionStatus::New as u8
}

pub fn is_election_active(status: u8) -> bool {
    status == ElectionStatus::Active as u8
}

pub fn is_election_completed(status: u8) -> bool {
    status == ElectionStatus::Completed as u8
}

pub fn is_election_archived(status: u8) -> bool {
    status == ElectionStatus::Archived as u8
}

/// Display label for a raw status code; "Unknown" outside 0..=3.
pub fn get_election_status_display(status: u8) -> &'static str {
    ElectionStatus::from_code(status)
        .map(|s| s.display())
        .unwrap_or("Unknown")
}
