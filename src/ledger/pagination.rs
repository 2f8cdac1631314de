use std::ops::Range;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

/// Page cursor over the history ledger. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    items_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Pagination {
    /// A cursor on page 1; a zero page size falls back to the default
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: if items_per_page == 0 { DEFAULT_ITEMS_PER_PAGE } else { items_per_page },
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.items_per_page)
    }

    pub fn has_next(&self, total_items: usize) -> bool {
        self.current_page < self.total_pages(total_items)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Move to `page`, clamped into `[1, total_pages]`
    pub fn set_page(&mut self, page: usize, total_items: usize) {
        let last = self.total_pages(total_items).max(1);
        self.current_page = page.clamp(1, last);
    }

    pub fn next(&mut self, total_items: usize) {
        if self.has_next(total_items) {
            self.current_page += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.current_page -= 1;
        }
    }

    /// Change the page size and return to page 1. Zero is ignored.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        if items_per_page == 0 {
            return;
        }
        self.items_per_page = items_per_page;
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Index range of the current page within `total_items`
    pub fn range(&self, total_items: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * self.items_per_page).min(total_items);
        let end = (start + self.items_per_page).min(total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}
