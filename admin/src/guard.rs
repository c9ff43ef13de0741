//! Admin page guard.

use chainvote_contracts::{AdminControlled, ChainvoteClient, ContractError};
use chainvote_types::Address;
use serde::Serialize;
use tracing::{debug, warn};

/// Per-contract admin flags for one caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AdminAccess {
    pub voter_database: bool,
    pub candidate_database: bool,
    pub election_database: bool,
}

impl AdminAccess {
    /// Admin on at least one contract is enough to enter the admin area.
    pub fn is_admin(&self) -> bool {
        self.voter_database || self.candidate_database || self.election_database
    }
}

/// Decides whether the connected wallet may see the admin area.
#[derive(Clone, Debug)]
pub struct AdminGuard {
    client: ChainvoteClient,
}

impl AdminGuard {
    pub fn new(client: ChainvoteClient) -> Self {
        Self { client }
    }

    /// Asks all three contracts at once. A failed read counts as "not admin"
    /// on that contract; the remaining answers still decide.
    pub async fn check(&self, caller: &Address) -> AdminAccess {
        let (voter, candidate, election) = tokio::join!(
            self.client.voters.am_i_admin(caller).load(),
            self.client.candidates.am_i_admin(caller).load(),
            self.client.elections.am_i_admin(caller).load(),
        );
        let access = AdminAccess {
            voter_database: granted("voter", voter),
            candidate_database: granted("candidate", candidate),
            election_database: granted("election", election),
        };
        debug!(%caller, admin = access.is_admin(), "admin check");
        access
    }

    pub async fn is_admin(&self, caller: &Address) -> bool {
        self.check(caller).await.is_admin()
    }
}

fn granted(contract: &str, result: Result<bool, ContractError>) -> bool {
    result.unwrap_or_else(|e| {
        warn!(contract, error = %e, "amIAdmin failed");
        false
    })
}
