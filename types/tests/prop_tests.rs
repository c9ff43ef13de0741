use proptest::prelude::*;

use chainvote_types::{
    get_election_status_display, is_election_active, is_election_archived,
    is_election_completed, is_election_new, Address, ElectionStatus, Timestamp, TxHash,
};

proptest! {
    /// Exactly one status predicate holds for every defined code.
    #[test]
    fn status_predicates_are_exclusive(code in 0u8..=3) {
        let hits = [
            is_election_new(code),
            is_election_active(code),
            is_election_completed(code),
            is_election_archived(code),
        ]
        .iter()
        .filter(|&&b| b)
        .count();
        prop_assert_eq!(hits, 1);
    }

    /// No status predicate holds outside the defined range.
    #[test]
    fn status_predicates_reject_unknown_codes(code in 4u8..) {
        prop_assert!(!is_election_new(code));
        prop_assert!(!is_election_active(code));
        prop_assert!(!is_election_completed(code));
        prop_assert!(!is_election_archived(code));
        prop_assert_eq!(get_election_status_display(code), "Unknown");
    }

    /// Defined codes map to one of the four labels and agree with the enum.
    #[test]
    fn status_display_matches_enum(code in 0u8..=3) {
        let status = ElectionStatus::from_code(code).unwrap();
        prop_assert_eq!(status.code(), code);
        prop_assert_eq!(get_election_status_display(code), status.display());
        prop_assert!(["New", "Active", "Completed", "Archived"]
            .contains(&get_election_status_display(code)));
    }

    /// Address Display output parses back to the same address.
    #[test]
    fn address_display_parses_back(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let parsed: Address = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
        prop_assert_eq!(addr.is_zero(), bytes == [0u8; 20]);
    }

    /// TxHash Display output parses back to the same hash.
    #[test]
    fn tx_hash_display_parses_back(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        let parsed: TxHash = hash.to_string().parse().unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// Timestamp elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_saturates(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let t = Timestamp::new(a);
        prop_assert_eq!(t.elapsed_since(Timestamp::new(b)), b.saturating_sub(a));
    }
}
