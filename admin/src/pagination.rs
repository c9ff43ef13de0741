//! Page-number pagination for admin tables.

use serde::Serialize;

/// Rows per admin table page.
pub const PAGE_SIZE: usize = 10;

/// One page of a list, with the metadata a table footer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 0-based index of the first row on this page, in the full list.
    pub fn offset(&self) -> usize {
        (self.page - 1) * PAGE_SIZE
    }
}

/// `ceil(len / size)`; zero items means zero pages.
pub fn total_pages(len: usize, size: usize) -> usize {
    if size == 0 {
        0
    } else {
        len.div_ceil(size)
    }
}

/// Clamp a requested 1-based page to `[1, total_pages]` (1 when empty).
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Slice `page` out of `items` at [`PAGE_SIZE`] rows per page.
pub fn paginate<T: Clone>(items: &[T], page: usize) -> Page<T> {
    paginate_by(items, page, PAGE_SIZE)
}

pub fn paginate_by<T: Clone>(items: &[T], page: usize, size: usize) -> Page<T> {
    let size = size.max(1);
    let total = total_pages(items.len(), size);
    let page = clamp_page(page, total);
    let start = ((page - 1) * size).min(items.len());
    let end = (start + size).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages: total,
        total_items: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_items() {
        let items: Vec<usize> = (0..25).collect();

        let first = paginate(&items, 1);
        assert_eq!(first.items, (0..10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paginate(&items, 3);
        assert_eq!(last.items, (20..25).collect::<Vec<_>>());
        assert!(!last.has_next());
        assert_eq!(last.offset(), 20);
    }

    #[test]
    fn out_of_range_pages_clamp() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(&items, 0).page, 1);
        assert_eq!(paginate(&items, 99).page, 3);
    }

    #[test]
    fn empty_list() {
        let page = paginate::<u8>(&[], 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }
}
