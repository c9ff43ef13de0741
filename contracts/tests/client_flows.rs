//! End-to-end read and write flows against a scripted gateway.

use chainvote_contracts::{
    is_privileged, AdminControlled, ChainvoteClient, ClientOptions, ContractAddresses,
    ContractError, ElectionWrite, ErrorKind, NoticeLevel, VoterWrite,
};
use chainvote_nullables::{NullNotifier, NullTransport};
use chainvote_types::Address;
use chainvote_utils::stats;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const ME: Address = Address::new([0xaa; 20]);

fn addresses() -> ContractAddresses {
    ContractAddresses {
        voter_database: Address::new([0x01; 20]),
        candidate_database: Address::new([0x02; 20]),
        election_database: Address::new([0x03; 20]),
    }
}

fn setup() -> (Arc<NullTransport>, Arc<NullNotifier>, ChainvoteClient) {
    let transport = Arc::new(NullTransport::new());
    let notifier = Arc::new(NullNotifier::new());
    let client = ChainvoteClient::with_options(
        transport.clone(),
        &addresses(),
        ClientOptions {
            notifier: notifier.clone(),
            confirmation_poll: Duration::from_millis(1),
        },
    );
    (transport, notifier, client)
}

fn election_tuple(status: u8, votes: u64) -> serde_json::Value {
    json!([
        "Board",
        "Annual board election",
        status,
        ["0x1111111111111111111111111111111111111111"],
        votes.to_string(),
        "1700000000"
    ])
}

// ── Reads ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn read_starts_loading_then_holds_data() {
    let (transport, _, client) = setup();
    transport.on_read("getElectionDetails", election_tuple(1, 3));

    let mut details = client.elections.get_election_details(&ME, 7);
    assert!(details.is_loading());
    assert!(details.data().is_none());

    let q = details.fetch().await;
    assert!(!q.is_loading);
    assert!(!q.is_error);
    let e = q.data.as_ref().unwrap();
    assert!(e.is_active());
    assert_eq!(e.total_votes, 3);

    let call = &transport.calls()[0].call;
    assert_eq!(call.args, vec![json!("7")]);
    assert_eq!(call.caller, ME);
    assert_eq!(call.contract, addresses().election_database);
}

#[tokio::test]
async fn identical_reads_hit_the_cache_until_refetch() {
    let (transport, _, client) = setup();
    transport.on_read("getTotalVoteCount", json!("4"));

    assert_eq!(
        client.elections.get_total_vote_count(&ME, 1).load().await.unwrap(),
        4
    );
    assert_eq!(
        client.elections.get_total_vote_count(&ME, 1).load().await.unwrap(),
        4
    );
    assert_eq!(transport.read_count("getTotalVoteCount"), 1);
    assert_eq!(client.stats().get(stats::CACHE_HITS), 1);

    transport.on_read("getTotalVoteCount", json!("5"));
    let mut read = client.elections.get_total_vote_count(&ME, 1);
    read.refetch().await;
    assert_eq!(read.data(), Some(&5));
    assert_eq!(transport.read_count("getTotalVoteCount"), 2);
}

#[tokio::test]
async fn different_callers_are_cached_separately() {
    let (transport, _, client) = setup();
    transport.on_read("getMyRegistrationStatus", json!(true));

    let other = Address::new([0xbb; 20]);
    client.voters.get_my_registration_status(&ME).load().await.unwrap();
    client.voters.get_my_registration_status(&other).load().await.unwrap();
    assert_eq!(transport.read_count("getMyRegistrationStatus"), 2);
}

#[tokio::test]
async fn failed_refetch_keeps_previous_data() {
    let (transport, _, client) = setup();
    transport.on_read("getElectionCount", json!("2"));

    let mut count = client.elections.get_election_count(&ME);
    count.fetch().await;
    assert_eq!(count.data(), Some(&2));

    transport.fail_read("getElectionCount", ContractError::transport("node down"));
    count.refetch().await;
    assert!(count.is_error());
    assert_eq!(count.data(), Some(&2));
    assert_eq!(count.error().map(|e| e.kind), Some(ErrorKind::Transport));
}

#[tokio::test]
async fn malformed_tuple_is_a_decode_error() {
    let (transport, _, client) = setup();
    transport.on_read("getMyDetails", json!(["only", "two"]));

    let err = client.voters.get_my_details(&ME).load().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
    assert!(err.message.starts_with("getMyDetails"));
}

#[tokio::test]
async fn handle_invalidation_drops_every_key_of_a_function() {
    let (transport, _, client) = setup();
    transport.on_read("getWinner", json!("0x0000000000000000000000000000000000000000"));

    client.elections.get_winner(&ME, 1).load().await.unwrap();
    client.elections.get_winner(&ME, 2).load().await.unwrap();
    client.elections.handle().invalidate("getWinner").await;
    client.elections.get_winner(&ME, 1).load().await.unwrap();
    assert_eq!(transport.read_count("getWinner"), 3);
}

// ── Writes ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn write_goes_pending_submitted_confirmed() {
    let (transport, notifier, client) = setup();
    transport.pending_for(2);

    let mut vote = client.elections.writer();
    let op = ElectionWrite::Vote {
        election_id: 3,
        candidate: Address::new([0x11; 20]),
    };
    let hash = vote.execute(&ME, op).await;
    assert!(hash.is_some());
    assert!(vote.is_confirming());
    assert!(vote.is_busy());

    let receipt = vote.wait_for_confirmation().await.unwrap();
    assert!(receipt.success);
    assert!(vote.is_confirmed());
    assert!(!vote.is_busy());
    assert_eq!(transport.receipt_polls(), 3);

    assert_eq!(
        notifier.levels(),
        vec![
            NoticeLevel::Loading,
            NoticeLevel::Submitted,
            NoticeLevel::Confirmed
        ]
    );
    assert_eq!(
        notifier.last().unwrap().message,
        "Your vote has been recorded successfully!"
    );

    let write = &transport.writes()[0];
    assert_eq!(write.function, "vote");
    assert_eq!(write.caller, ME);
    assert_eq!(client.stats().get(stats::CONFIRMED), 1);
}

#[tokio::test]
async fn rejected_signature_resolves_without_hash() {
    let (transport, notifier, client) = setup();
    transport.enqueue_write(Err(ContractError::classify(
        "User rejected the request.",
    )));

    let mut writer = client.voters.writer();
    let hash = writer.execute(&ME, VoterWrite::DeleteVoter).await;
    assert!(hash.is_none());
    assert!(!writer.is_busy());
    assert!(writer.last_error().unwrap().is_user_rejected());
    assert_eq!(
        notifier.last().unwrap().message,
        "Failed to cancel voter registration"
    );
    assert_eq!(client.stats().get(stats::REJECTED), 1);

    // retry succeeds
    assert!(writer.submit(&ME, VoterWrite::DeleteVoter).await.is_some());
    assert!(writer.last_error().is_none());
}

#[tokio::test]
async fn revert_surfaces_short_message() {
    let (transport, notifier, client) = setup();
    transport.enqueue_write(Err(ContractError::reverted("Election is not in NEW status")));

    let mut writer = client.elections.writer();
    assert!(writer
        .execute(&ME, ElectionWrite::AdminDeleteElection(1))
        .await
        .is_none());
    let last = notifier.last().unwrap();
    assert_eq!(last.level, NoticeLevel::Failed);
    assert_eq!(last.message, "Election is not in NEW status");
}

#[tokio::test]
async fn reverted_receipt_is_never_confirmed() {
    let (transport, notifier, client) = setup();
    transport.revert_receipts(true);

    let mut writer = client.elections.writer();
    let receipt = writer
        .submit(&ME, ElectionWrite::AdminOpenElection(1))
        .await;
    assert!(receipt.is_none());
    assert!(!writer.is_confirmed());
    assert_eq!(writer.last_error().map(|e| e.kind), Some(ErrorKind::Reverted));
    assert_eq!(notifier.last().unwrap().level, NoticeLevel::Failed);
}

#[tokio::test]
async fn confirmation_is_taken_once() {
    let (_, _, client) = setup();
    let mut writer = client.elections.writer();
    writer
        .submit(
            &ME,
            ElectionWrite::AdminCreateElection {
                name: "Board".into(),
                description: "Annual board election".into(),
            },
        )
        .await
        .unwrap();

    assert!(writer.take_confirmation());
    assert!(!writer.take_confirmation());
    assert!(writer.hash().is_none());
}

#[tokio::test]
async fn abandoned_wallet_prompt_does_not_leave_writer_busy() {
    let (transport, _, client) = setup();
    transport.hold_writes(true);

    let mut writer = client.elections.writer();
    let op = ElectionWrite::AdminOpenElection(1);
    let outcome = tokio::time::timeout(Duration::from_millis(5), writer.execute(&ME, op)).await;
    assert!(outcome.is_err());
    assert!(!writer.is_pending());
    assert!(!writer.is_busy());
    assert_eq!(transport.writes().len(), 1);

    transport.hold_writes(false);
    assert!(writer
        .submit(&ME, ElectionWrite::AdminOpenElection(1))
        .await
        .is_some());
    assert!(writer.is_confirmed());
}

// ── Admin surface ───────────────────────────────────────────────────────

#[tokio::test]
async fn owner_or_admin_is_privileged() {
    let (transport, _, client) = setup();
    let owner = Address::new([0x0f; 20]);
    let admin = Address::new([0x0a; 20]);
    let nobody = Address::new([0x0b; 20]);
    transport
        .on_read("getOwner", json!(owner.to_string()))
        .on_read("isAdmin", json!(false))
        .on_read_with("isAdmin", vec![json!(admin.to_string())], json!(true));

    assert!(is_privileged(&client.candidates, &ME, &owner).await.unwrap());
    assert!(is_privileged(&client.candidates, &ME, &admin).await.unwrap());
    assert!(!is_privileged(&client.candidates, &ME, &nobody).await.unwrap());
}

#[tokio::test]
async fn admin_writes_go_to_the_chosen_contract() {
    let (transport, _, client) = setup();
    let new_admin = Address::new([0x0c; 20]);

    let mut writer = client.voters.admin_writer();
    writer
        .submit(&ME, chainvote_contracts::AdminWrite::AddAdmin(new_admin))
        .await
        .unwrap();

    let w = &transport.writes()[0];
    assert_eq!(w.function, "addAdmin");
    assert_eq!(w.contract, addresses().voter_database);
    assert_eq!(w.args, vec![json!(new_admin.to_string())]);
}
