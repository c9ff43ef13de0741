use chainvote_admin::{paginate, total_pages, PAGE_SIZE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pages_cover_every_item_once(len in 0usize..200) {
        let items: Vec<usize> = (0..len).collect();
        let pages = total_pages(len, PAGE_SIZE);
        let mut seen = Vec::new();
        for page in 1..=pages {
            let p = paginate(&items, page);
            prop_assert!(!p.items.is_empty());
            prop_assert!(p.items.len() <= PAGE_SIZE);
            seen.extend(p.items);
        }
        prop_assert_eq!(seen, items);
    }

    #[test]
    fn requested_page_is_clamped(len in 0usize..200, requested in 0usize..50) {
        let items: Vec<usize> = (0..len).collect();
        let p = paginate(&items, requested);
        prop_assert!(p.page >= 1);
        prop_assert!(p.page <= p.total_pages.max(1));
        prop_assert_eq!(p.has_next(), p.page < p.total_pages);
    }
}
