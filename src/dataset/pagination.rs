//! Page slicing for list results

use std::ops::RangeInclusive;

use serde::Serialize;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PER_PAGE: usize = 10;
/// Largest page a caller may request
pub const MAX_PER_PAGE: usize = 100;
/// Number of page links shown around the current page
pub const PAGE_WINDOW: usize = 5;

/// One page of results. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Slice `items` down to the requested page.
///
/// `page` below 1 is treated as 1 and `per_page` is clamped to
/// `1..=MAX_PER_PAGE`. A page past the end is returned empty.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.clamp(1, MAX_PER_PAGE);
    let page = page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}

/// Page numbers to offer as links: up to `max_pages` pages centred on
/// `current`, shifted so the window stays within `1..=total_pages`.
/// A `current` past the last page is treated as the last page.
pub fn page_window(
    current: usize,
    total_pages: usize,
    max_pages: usize,
) -> RangeInclusive<usize> {
    let max_pages = max_pages.max(1);
    let current = current.clamp(1, total_pages.max(1));
    let mut start = current.saturating_sub(max_pages / 2).max(1);
    let mut end = start.saturating_add(max_pages - 1);

    if end > total_pages {
        end = total_pages;
        start = (end + 1).saturating_sub(max_pages).max(1);
    }

    start..=end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_first_and_last_page() {
        let items: Vec<u32> = (1..=23).collect();

        let first = paginate(items.clone(), 1, 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total, 23);
        assert_eq!(first.total_pages, 3);

        let last = paginate(items, 3, 10);
        assert_eq!(last.items, vec![21, 22, 23]);
    }

    #[test]
    fn test_paginate_clamps_inputs() {
        let items: Vec<u32> = (1..=5).collect();

        let page = paginate(items.clone(), 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.items, vec![1]);

        let page = paginate(items, 1, 10_000);
        assert_eq!(page.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_paginate_past_end_and_empty() {
        let page = paginate(vec![1, 2, 3], 9, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);

        let empty: Page<u32> = paginate(Vec::new(), 1, 10);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.total_pages, 1);
    }

    #[test]
    fn test_page_map() {
        let page = paginate(vec![1, 2, 3], 1, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 10, 5), 1..=5);
        assert_eq!(page_window(6, 10, 5), 4..=8);
        assert_eq!(page_window(10, 10, 5), 6..=10);
        assert_eq!(page_window(2, 3, 5), 1..=3);
        assert_eq!(page_window(1, 1, 5), 1..=1);
    }

    #[test]
    fn test_page_window_huge_page_number() {
        assert_eq!(page_window(usize::MAX, 1, 5), 1..=1);
        assert_eq!(page_window(usize::MAX, 10, 5), 6..=10);

        let page = paginate(vec![1, 2, 3], usize::MAX, 10);
        assert!(page.items.is_empty());
        assert_eq!(page_window(page.page, page.total_pages, PAGE_WINDOW), 1..=1);
    }
}
