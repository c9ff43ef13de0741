//! Election result tallies.

use chainvote_types::{Address, ElectionDetails, ElectionId};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateResult {
    pub candidate: Address,
    pub votes: u64,
    /// Share of all votes, 0.0 to 100.0. Zero when nobody has voted.
    pub percentage: f64,
    pub is_winner: bool,
    pub is_my_choice: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElectionTally {
    pub election_id: ElectionId,
    pub total_votes: u64,
    /// Results may still change: the election is active.
    pub provisional: bool,
    /// Ordered by votes, highest first; ties keep enrollment order.
    pub results: Vec<CandidateResult>,
    /// Shown only when the contract names a non-zero winner and votes exist.
    pub winner: Option<Address>,
    pub my_choice: Option<Address>,
}

impl ElectionTally {
    /// Build a tally from per-candidate counts in enrollment order.
    pub fn new(
        election_id: ElectionId,
        election: &ElectionDetails,
        votes: &[(Address, u64)],
        winner: Address,
        my_choice: Option<Address>,
    ) -> Self {
        let total_votes = election.total_votes;
        let winner = (!winner.is_zero() && total_votes > 0).then_some(winner);
        let my_choice = my_choice.filter(|a| !a.is_zero());

        let mut results: Vec<CandidateResult> = votes
            .iter()
            .map(|&(candidate, votes)| CandidateResult {
                candidate,
                votes,
                percentage: percentage(votes, total_votes),
                is_winner: winner == Some(candidate),
                is_my_choice: my_choice == Some(candidate),
            })
            .collect();
        results.sort_by(|a, b| b.votes.cmp(&a.votes));

        Self {
            election_id,
            total_votes,
            provisional: election.is_active(),
            results,
            winner,
            my_choice,
        }
    }

    pub fn has_votes(&self) -> bool {
        self.total_votes > 0
    }

    /// Line describing the tally, as shown above the results.
    pub fn headline(&self) -> String {
        if self.provisional {
            format!(
                "Provisional results, may change as more votes are cast - {} total votes cast",
                self.total_votes
            )
        } else {
            format!("Current vote tally - {} total votes cast", self.total_votes)
        }
    }
}

pub fn percentage(votes: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        votes as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainvote_types::{ElectionStatus, Timestamp};
    use proptest::prelude::*;

    const A: Address = Address::new([0x0a; 20]);
    const B: Address = Address::new([0x0b; 20]);
    const C: Address = Address::new([0x0c; 20]);

    fn election(status: ElectionStatus, total: u64) -> ElectionDetails {
        ElectionDetails {
            name: "Board".into(),
            description: "Annual board election".into(),
            status: status.code(),
            candidates: vec![A, B, C],
            total_votes: total,
            registration_timestamp: Timestamp::EPOCH,
        }
    }

    #[test]
    fn sorted_with_percentages_and_flags() {
        let e = election(ElectionStatus::Completed, 4);
        let t = ElectionTally::new(1, &e, &[(A, 1), (B, 3), (C, 0)], B, Some(A));

        let order: Vec<_> = t.results.iter().map(|r| r.candidate).collect();
        assert_eq!(order, vec![B, A, C]);
        assert_eq!(t.results[0].percentage, 75.0);
        assert!(t.results[0].is_winner);
        assert!(t.results[1].is_my_choice);
        assert_eq!(t.winner, Some(B));
        assert!(!t.provisional);
    }

    #[test]
    fn no_votes_no_winner() {
        let e = election(ElectionStatus::Active, 0);
        let t = ElectionTally::new(1, &e, &[(A, 0), (B, 0)], A, None);
        assert_eq!(t.winner, None);
        assert!(t.results.iter().all(|r| r.percentage == 0.0));
        assert!(t.provisional);
        assert!(!t.has_votes());
    }

    #[test]
    fn zero_winner_is_hidden() {
        let e = election(ElectionStatus::Active, 2);
        let t = ElectionTally::new(1, &e, &[(A, 1), (B, 1)], Address::ZERO, None);
        assert_eq!(t.winner, None);
        // tie keeps enrollment order
        assert_eq!(t.results[0].candidate, A);
    }

    proptest! {
        #[test]
        fn percentages_sum_to_100_when_counts_match(counts in proptest::collection::vec(0u64..1000, 1..8)) {
            let total: u64 = counts.iter().sum();
            let sum: f64 = counts.iter().map(|&v| percentage(v, total)).sum();
            if total == 0 {
                prop_assert_eq!(sum, 0.0);
            } else {
                prop_assert!((sum - 100.0).abs() < 1e-6);
            }
        }
    }
}
