//! The voting session state machine.
//!
//! ```text
//! Loading ─┬─ has voted ────────────────────────────────► Results
//!          ├─ inactive, not voted ──────────────────────► NotActive
//!          ├─ details missing ──────────────────────────► Unavailable
//!          └─ otherwise ─► CandidateSelection ◄─ back ─┐
//!                              │ select                 │
//!                              ▼                        │
//!                          VoteConfirmation ────────────┘
//!                              │ confirmed
//!                              ▼
//!                           Results
//! ```
//!
//! A rejected or failed vote leaves the session in `VoteConfirmation` so the
//! voter can retry or go back. `Results`, `NotActive` and `Unavailable` are
//! terminal within a session.

use chainvote_types::{Address, ElectionDetails, ElectionId};
use serde::Serialize;

use crate::error::SessionError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum VotingStep {
    Loading,
    CandidateSelection,
    VoteConfirmation { candidate: Address },
    Results,
    /// The election is not accepting votes and the caller has not voted.
    NotActive,
    /// Election details could not be loaded.
    Unavailable,
}

impl VotingStep {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::CandidateSelection => "candidate-selection",
            Self::VoteConfirmation { .. } => "vote-confirmation",
            Self::Results => "results",
            Self::NotActive => "not-active",
            Self::Unavailable => "unavailable",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Results | Self::NotActive | Self::Unavailable)
    }
}

/// What the session needs to leave `Loading`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub election: Option<ElectionDetails>,
    pub has_voted: bool,
    /// The caller's recorded choice. The contract reports the zero address
    /// for "none".
    pub prior_choice: Option<Address>,
}

#[derive(Clone, Debug)]
pub struct VotingSession {
    election_id: ElectionId,
    step: VotingStep,
    election: Option<ElectionDetails>,
    has_voted: bool,
    choice: Option<Address>,
}

impl VotingSession {
    pub fn new(election_id: ElectionId) -> Self {
        Self {
            election_id,
            step: VotingStep::Loading,
            election: None,
            has_voted: false,
            choice: None,
        }
    }

    pub fn election_id(&self) -> ElectionId {
        self.election_id
    }

    pub fn step(&self) -> &VotingStep {
        &self.step
    }

    pub fn election(&self) -> Option<&ElectionDetails> {
        self.election.as_ref()
    }

    pub fn has_voted(&self) -> bool {
        self.has_voted
    }

    /// The caller's choice: the prior vote, or the vote just confirmed.
    pub fn choice(&self) -> Option<&Address> {
        self.choice.as_ref()
    }

    /// Candidate held for confirmation, if any.
    pub fn selected_candidate(&self) -> Option<&Address> {
        match &self.step {
            VotingStep::VoteConfirmation { candidate } => Some(candidate),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            step: self.step.name(),
            action,
        }
    }

    /// Leave `Loading` once every input has resolved.
    pub fn resolve(&mut self, snapshot: SessionSnapshot) -> Result<&VotingStep, SessionError> {
        if self.step != VotingStep::Loading {
            return Err(self.invalid("resolve"));
        }
        self.has_voted = snapshot.has_voted;
        self.choice = snapshot.prior_choice.filter(|a| !a.is_zero());
        self.step = match &snapshot.election {
            _ if snapshot.has_voted => VotingStep::Results,
            None => VotingStep::Unavailable,
            Some(e) if !e.is_active() => VotingStep::NotActive,
            Some(_) => VotingStep::CandidateSelection,
        };
        self.election = snapshot.election;
        Ok(&self.step)
    }

    pub fn select_candidate(&mut self, candidate: Address) -> Result<(), SessionError> {
        if self.step != VotingStep::CandidateSelection {
            return Err(self.invalid("select a candidate"));
        }
        let enrolled = self
            .election
            .as_ref()
            .is_some_and(|e| e.has_candidate(&candidate));
        if !enrolled {
            return Err(SessionError::NotEnrolled(candidate));
        }
        self.step = VotingStep::VoteConfirmation { candidate };
        Ok(())
    }

    /// Return to selection, dropping the held candidate.
    pub fn back(&mut self) -> Result<(), SessionError> {
        if self.selected_candidate().is_none() {
            return Err(self.invalid("go back"));
        }
        self.step = VotingStep::CandidateSelection;
        Ok(())
    }

    pub fn vote_confirmed(&mut self) -> Result<(), SessionError> {
        let candidate = *self
            .selected_candidate()
            .ok_or_else(|| self.invalid("confirm a vote"))?;
        self.has_voted = true;
        self.choice = Some(candidate);
        self.step = VotingStep::Results;
        Ok(())
    }

    /// The wallet rejected or the vote failed: stay put so the voter can retry.
    pub fn vote_rejected(&mut self) -> Result<(), SessionError> {
        if self.selected_candidate().is_none() {
            return Err(self.invalid("reject a vote"));
        }
        Ok(())
    }
}
