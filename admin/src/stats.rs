//! Dashboard record counts.

use chainvote_contracts::{AdminControlled, ChainvoteClient, ContractError};
use chainvote_types::Address;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    pub voters: u64,
    pub candidates: u64,
    pub elections: u64,
}

impl DatabaseStats {
    /// Loads the three counts concurrently from the cache.
    pub async fn load(client: &ChainvoteClient, caller: &Address) -> Result<Self, ContractError> {
        let (voters, candidates, elections) = tokio::try_join!(
            client.voters.admin_get_voter_count(caller).load(),
            client.candidates.get_candidate_count(caller).load(),
            client.elections.get_election_count(caller).load(),
        )?;
        Ok(Self {
            voters,
            candidates,
            elections,
        })
    }

    /// Drops the cached counts first so all three come from the chain together.
    pub async fn refresh(client: &ChainvoteClient, caller: &Address) -> Result<Self, ContractError> {
        tokio::join!(
            client.voters.handle().invalidate("adminGetVoterCount"),
            client.candidates.handle().invalidate("getCandidateCount"),
            client.elections.handle().invalidate("getElectionCount"),
        );
        Self::load(client, caller).await
    }
}
