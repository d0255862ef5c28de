/// Default number of stories per page.
pub const PAGE_SIZE: usize = 30;

/// Offset bookkeeping for incremental page loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    offset: usize,
    page_size: usize,
    fetching_more: bool,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
            fetching_more: false,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_fetching_more(&self) -> bool {
        self.fetching_more
    }

    /// Claim the next page. Returns the offset to request, or `None` when a
    /// fetch is already in flight or a search is active.
    pub fn begin(&mut self, search_active: bool) -> Option<usize> {
        if self.fetching_more || search_active {
            return None;
        }
        self.fetching_more = true;
        Some(self.offset + self.page_size)
    }

    /// Release the in-flight claim. The offset only advances when the page
    /// delivered items.
    pub fn finish(&mut self, requested_offset: usize, delivered: usize) {
        self.fetching_more = false;
        if delivered > 0 {
            self.offset = requested_offset;
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
