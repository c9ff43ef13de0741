//! Async driver that feeds contract reads and the vote write into a
//! [`VotingSession`].

use chainvote_contracts::{
    AdminControlled, ContractError, ElectionDatabase, ElectionWrite, WriteCall,
};
use chainvote_types::{Address, ElectionId};
use futures_util::future::try_join_all;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::session::{SessionSnapshot, VotingSession, VotingStep};
use crate::tally::ElectionTally;

/// Reads a successful vote can change.
const VOTE_AFFECTED_READS: &[&str] = &[
    "hasVoted",
    "getVoterChoice",
    "getVoteTimestamp",
    "getTotalVoteCount",
    "getVotesOfCandidate",
    "getWinner",
    "getElectionDetails",
];

pub struct VotingBooth {
    elections: ElectionDatabase,
    caller: Address,
    session: VotingSession,
    vote: WriteCall<ElectionWrite>,
}

impl VotingBooth {
    pub fn new(elections: ElectionDatabase, caller: Address, election_id: ElectionId) -> Self {
        let vote = elections.writer();
        Self {
            elections,
            caller,
            session: VotingSession::new(election_id),
            vote,
        }
    }

    pub fn session(&self) -> &VotingSession {
        &self.session
    }

    pub fn step(&self) -> &VotingStep {
        self.session.step()
    }

    /// A vote is waiting for the wallet or for confirmation.
    pub fn is_busy(&self) -> bool {
        self.vote.is_busy()
    }

    pub fn last_error(&self) -> Option<&ContractError> {
        self.vote.last_error()
    }

    /// Load details, has-voted and prior choice together, then resolve the
    /// session. Details that fail to load resolve to `Unavailable`; a failed
    /// has-voted read counts as not voted.
    pub async fn load(&mut self) -> Result<&VotingStep, ContractError> {
        let id = self.session.election_id();
        let caller = self.caller;
        let (details, has_voted, choice) = tokio::join!(
            self.elections.get_election_details(&caller, id).load(),
            self.elections.has_voted(&caller, id, &caller).load(),
            self.elections.get_voter_choice(&caller, id, &caller).load(),
        );

        let election = match details {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(election = id, error = %err, "election details unavailable");
                None
            }
        };
        let has_voted = has_voted.unwrap_or_else(|err| {
            warn!(election = id, error = %err, "has-voted unavailable, assuming not voted");
            false
        });
        let snapshot = SessionSnapshot {
            election,
            has_voted,
            prior_choice: choice.ok(),
        };

        // A fresh booth is always in Loading; re-loading restarts the session.
        if *self.session.step() != VotingStep::Loading {
            self.session = VotingSession::new(id);
        }
        let step = self
            .session
            .resolve(snapshot)
            .map_err(|e| ContractError::decode(e.to_string()))?;
        debug!(election = id, step = step.name(), "voting session resolved");
        Ok(step)
    }

    pub fn select(&mut self, candidate: Address) -> Result<(), SessionError> {
        self.session.select_candidate(candidate)
    }

    pub fn back(&mut self) -> Result<(), SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        self.session.back()
    }

    /// Submit the held vote and wait for it to be mined.
    ///
    /// Moves to `Results` on confirmation. On rejection or failure the
    /// session stays in `VoteConfirmation`; see [`last_error`](Self::last_error).
    pub async fn confirm(&mut self) -> Result<&VotingStep, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        let candidate = *self.session.selected_candidate().ok_or(
            SessionError::InvalidTransition {
                step: self.session.step().name(),
                action: "confirm a vote",
            },
        )?;
        let election_id = self.session.election_id();

        self.vote
            .submit(
                &self.caller,
                ElectionWrite::Vote {
                    election_id,
                    candidate,
                },
            )
            .await;

        if self.vote.take_confirmation() {
            self.session.vote_confirmed()?;
            for function in VOTE_AFFECTED_READS {
                self.elections.handle().invalidate(function).await;
            }
            info!(election = election_id, candidate = %candidate, "vote recorded");
        } else {
            self.session.vote_rejected()?;
        }
        Ok(self.session.step())
    }

    /// Current results: details, per-candidate counts and the winner.
    ///
    /// A winner that cannot be read leaves the tally without one.
    pub async fn results(&self) -> Result<ElectionTally, ContractError> {
        let id = self.session.election_id();
        let caller = &self.caller;
        let (details, winner) = tokio::join!(
            self.elections.get_election_details(caller, id).load(),
            self.elections.get_winner(caller, id).load(),
        );
        let details = details?;
        let winner = winner.unwrap_or_else(|err| {
            warn!(election = id, error = %err, "winner unavailable");
            Address::ZERO
        });

        let counts = try_join_all(details.candidates.iter().map(|candidate| async move {
            let votes = self
                .elections
                .get_votes_of_candidate(caller, id, candidate)
                .load()
                .await?;
            Ok::<_, ContractError>((*candidate, votes))
        }))
        .await?;

        Ok(ElectionTally::new(
            id,
            &details,
            &counts,
            winner,
            self.session.choice().copied(),
        ))
    }
}
