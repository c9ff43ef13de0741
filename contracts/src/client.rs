//! The three contract clients bundled over one transport.

use chainvote_types::Address;
use chainvote_utils::StatsCounter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::QueryCache;
use crate::call::ContractKind;
use crate::candidate::CandidateDatabase;
use crate::election::ElectionDatabase;
use crate::handle::ContractHandle;
use crate::notify::{Notifier, TracingNotifier};
use crate::transport::ContractTransport;
use crate::voter::VoterDatabase;

/// Deployed addresses of the three contracts on one chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub voter_database: Address,
    pub candidate_database: Address,
    pub election_database: Address,
}

#[derive(Clone)]
pub struct ClientOptions {
    pub notifier: Arc<dyn Notifier>,
    /// Interval between receipt polls while a transaction is confirming.
    pub confirmation_poll: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            notifier: Arc::new(TracingNotifier),
            confirmation_poll: Duration::from_secs(1),
        }
    }
}

/// Voter, candidate and election clients sharing a transport, a read cache,
/// a notifier and call counters.
#[derive(Clone, Debug)]
pub struct ChainvoteClient {
    pub voters: VoterDatabase,
    pub candidates: CandidateDatabase,
    pub elections: ElectionDatabase,
    cache: Arc<QueryCache>,
    stats: Arc<StatsCounter>,
}

impl ChainvoteClient {
    pub fn new(transport: Arc<dyn ContractTransport>, addresses: &ContractAddresses) -> Self {
        Self::with_options(transport, addresses, ClientOptions::default())
    }

    pub fn with_options(
        transport: Arc<dyn ContractTransport>,
        addresses: &ContractAddresses,
        options: ClientOptions,
    ) -> Self {
        let cache = Arc::new(QueryCache::new());
        let stats = Arc::new(StatsCounter::for_contracts());
        let handle = |kind, address| {
            ContractHandle::new(
                kind,
                address,
                Arc::clone(&transport),
                Arc::clone(&cache),
                Arc::clone(&options.notifier),
                Arc::clone(&stats),
                options.confirmation_poll,
            )
        };

        Self {
            voters: VoterDatabase::new(handle(
                ContractKind::VoterDatabase,
                addresses.voter_database,
            )),
            candidates: CandidateDatabase::new(handle(
                ContractKind::CandidateDatabase,
                addresses.candidate_database,
            )),
            elections: ElectionDatabase::new(handle(
                ContractKind::ElectionDatabase,
                addresses.election_database,
            )),
            cache,
            stats,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn stats(&self) -> &StatsCounter {
        &self.stats
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("confirmation_poll", &self.confirmation_poll)
            .finish_non_exhaustive()
    }
}
