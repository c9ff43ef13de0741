use chainvote_contracts::{
    ChainvoteClient, ClientOptions, ContractAddresses, ContractError, ErrorKind,
};
use chainvote_nullables::{NullNotifier, NullTransport};
use chainvote_types::Address;
use chainvote_voting::{SessionError, VotingBooth, VotingStep};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const ME: Address = Address::new([0xaa; 20]);
const ALICE: Address = Address::new([0x11; 20]);
const BOB: Address = Address::new([0x22; 20]);

fn client(transport: &Arc<NullTransport>) -> ChainvoteClient {
    ChainvoteClient::with_options(
        transport.clone(),
        &ContractAddresses {
            voter_database: Address::new([1; 20]),
            candidate_database: Address::new([2; 20]),
            election_database: Address::new([3; 20]),
        },
        ClientOptions {
            notifier: Arc::new(NullNotifier::new()),
            confirmation_poll: Duration::from_millis(1),
        },
    )
}

fn details(status: u8, total: u64) -> Value {
    json!([
        "Board",
        "Annual board election",
        status,
        [ALICE.to_string(), BOB.to_string()],
        total.to_string(),
        "1700000000"
    ])
}

fn script(transport: &NullTransport, status: u8, has_voted: bool, choice: Address) {
    transport
        .on_read("getElectionDetails", details(status, 0))
        .on_read("hasVoted", json!(has_voted))
        .on_read("getVoterChoice", json!(choice.to_string()));
}

#[tokio::test]
async fn already_voted_lands_on_results() {
    let transport = Arc::new(NullTransport::new());
    script(&transport, 1, true, BOB);

    let mut booth = VotingBooth::new(client(&transport).elections, ME, 1);
    assert_eq!(booth.load().await.unwrap(), &VotingStep::Results);
    assert_eq!(booth.session().choice(), Some(&BOB));
}

#[tokio::test]
async fn inactive_election_blocks_voting() {
    let transport = Arc::new(NullTransport::new());
    script(&transport, 2, false, Address::ZERO);

    let mut booth = VotingBooth::new(client(&transport).elections, ME, 1);
    assert_eq!(booth.load().await.unwrap(), &VotingStep::NotActive);
    assert!(booth.select(ALICE).is_err());
}

#[tokio::test]
async fn missing_details_are_unavailable() {
    let transport = Arc::new(NullTransport::new());
    transport
        .fail_read("getElectionDetails", ContractError::reverted("Election does not exist"))
        .on_read("hasVoted", json!(false))
        .on_read("getVoterChoice", json!(Address::ZERO.to_string()));

    let mut booth = VotingBooth::new(client(&transport).elections, ME, 99);
    assert_eq!(booth.load().await.unwrap(), &VotingStep::Unavailable);
}

#[tokio::test]
async fn full_vote_flow() {
    let transport = Arc::new(NullTransport::new());
    script(&transport, 1, false, Address::ZERO);
    transport.pending_for(1);

    let mut booth = VotingBooth::new(client(&transport).elections, ME, 1);
    assert_eq!(booth.load().await.unwrap(), &VotingStep::CandidateSelection);

    booth.select(ALICE).unwrap();
    booth.back().unwrap();
    booth.select(BOB).unwrap();
    assert_eq!(booth.confirm().await.unwrap(), &VotingStep::Results);
    assert_eq!(booth.session().choice(), Some(&BOB));

    let vote = &transport.writes()[0];
    assert_eq!(vote.function, "vote");
    assert_eq!(vote.args, vec![json!("1"), json!(BOB.to_string())]);
    assert_eq!(vote.caller, ME);
}

#[tokio::test]
async fn rejected_vote_stays_in_confirmation_and_can_retry() {
    let transport = Arc::new(NullTransport::new());
    script(&transport, 1, false, Address::ZERO);
    transport.enqueue_write(Err(ContractError::classify("User denied transaction signature")));

    let mut booth = VotingBooth::new(client(&transport).elections, ME, 1);
    booth.load().await.unwrap();
    booth.select(ALICE).unwrap();

    assert_eq!(
        booth.confirm().await.unwrap(),
        &VotingStep::VoteConfirmation { candidate: ALICE }
    );
    assert_eq!(booth.last_error().map(|e| e.kind), Some(ErrorKind::UserRejected));
    assert!(!booth.is_busy());

    assert_eq!(booth.confirm().await.unwrap(), &VotingStep::Results);
    assert_eq!(transport.writes().len(), 2);
}

#[tokio::test]
async fn confirm_without_selection_is_refused() {
    let transport = Arc::new(NullTransport::new());
    script(&transport, 1, false, Address::ZERO);

    let mut booth = VotingBooth::new(client(&transport).elections, ME, 1);
    booth.load().await.unwrap();
    assert!(matches!(
        booth.confirm().await,
        Err(SessionError::InvalidTransition { .. })
    ));
    assert!(transport.writes().is_empty());
}

#[tokio::test]
async fn results_after_vote_are_refetched() {
    let transport = Arc::new(NullTransport::new());
    script(&transport, 1, false, Address::ZERO);
    transport
        .on_read("getWinner", json!(Address::ZERO.to_string()))
        .on_read("getVotesOfCandidate", json!("0"));

    let mut booth = VotingBooth::new(client(&transport).elections, ME, 1);
    booth.load().await.unwrap();
    let before = booth.results().await.unwrap();
    assert!(!before.has_votes());
    assert_eq!(before.winner, None);

    // the chain moves on once the vote is mined
    transport
        .on_read("getElectionDetails", details(1, 1))
        .on_read("getWinner", json!(ALICE.to_string()))
        .on_read_with(
            "getVotesOfCandidate",
            vec![json!("1"), json!(ALICE.to_string())],
            json!("1"),
        );
    booth.select(ALICE).unwrap();
    booth.confirm().await.unwrap();

    let after = booth.results().await.unwrap();
    assert_eq!(after.total_votes, 1);
    assert_eq!(after.winner, Some(ALICE));
    assert_eq!(after.results[0].candidate, ALICE);
    assert_eq!(after.results[0].percentage, 100.0);
    assert!(after.results[0].is_my_choice);
    assert!(after.provisional);
}

#[tokio::test]
async fn failed_has_voted_read_counts_as_not_voted() {
    let transport = Arc::new(NullTransport::new());
    transport
        .on_read("getElectionDetails", details(1, 0))
        .fail_read("hasVoted", ContractError::transport("connection reset"))
        .on_read("getVoterChoice", json!(Address::ZERO.to_string()));

    let mut booth = VotingBooth::new(client(&transport).elections, ME, 1);
    assert_eq!(booth.load().await.unwrap(), &VotingStep::CandidateSelection);
}

#[tokio::test]
async fn failed_winner_read_still_lists_candidates() {
    let transport = Arc::new(NullTransport::new());
    script(&transport, 0, false, Address::ZERO);
    transport
        .fail_read("getWinner", ContractError::reverted("No votes cast yet"))
        .on_read("getVotesOfCandidate", json!("0"));

    let booth = VotingBooth::new(client(&transport).elections, ME, 1);
    let tally = booth.results().await.unwrap();
    assert_eq!(tally.results.len(), 2);
    assert_eq!(tally.winner, None);
    assert!(tally.results.iter().all(|r| !r.is_winner));
}
