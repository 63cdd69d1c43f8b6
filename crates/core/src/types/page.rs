//! Client-side pagination over an in-memory list.

use serde::Serialize;

/// Rows per page on every list screen.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of an already-filtered list.
///
/// Page numbers are 1-based. Requests past the last page clamp to the last
/// page; an empty list always yields page 1 of 1 with no items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page, in list order.
    pub items: Vec<T>,
    /// Effective (clamped) page number.
    pub page: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total_items: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl<T: Clone> Page<T> {
    /// Slice `items` into the requested page.
    ///
    /// A `page_size` of zero is treated as [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn paginate(items: &[T], page: usize, page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        let total_items = items.len();
        let total_pages = total_items.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);

        let start = (page - 1) * page_size;
        let items = items
            .iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        Self {
            items,
            page,
            total_pages,
            total_items,
            page_size,
        }
    }
}

impl<T> Page<T> {
    /// Convert the items of this page, keeping its position.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            page_size: self.page_size,
        }
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first item on this page, 0 when empty.
    #[must_use]
    pub const fn first_index(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last item on this page, 0 when empty.
    #[must_use]
    pub const fn last_index(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }

    /// All page numbers, for rendering pager links.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page_of_25() {
        let page = Page::paginate(&numbers(25), 1, DEFAULT_PAGE_SIZE);
        assert_eq!(page.items, numbers(10));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);
        assert!(!page.has_prev());
        assert!(page.has_next());
    }

    #[test]
    fn test_last_partial_page() {
        let page = Page::paginate(&numbers(25), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.first_index(), 21);
        assert_eq!(page.last_index(), 25);
        assert!(!page.has_next());
    }

    #[test]
    fn test_out_of_range_clamps() {
        let page = Page::paginate(&numbers(25), 9, 10);
        assert_eq!(page.page, 3);

        let page = Page::paginate(&numbers(25), 0, 10);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_empty_list() {
        let page: Page<usize> = Page::paginate(&[], 4, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.first_index(), 0);
        assert_eq!(page.last_index(), 0);
    }

    #[test]
    fn test_map_keeps_position() {
        let page = Page::paginate(&numbers(25), 2, 10).map(|n| n * 2);
        assert_eq!(page.items.first(), Some(&22));
        assert_eq!(page.page, 2);
        assert_eq!(page.total_items, 25);
    }

    #[test]
    fn test_exact_multiple() {
        let page = Page::paginate(&numbers(20), 2, 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page_numbers(), vec![1, 2]);
    }
}
