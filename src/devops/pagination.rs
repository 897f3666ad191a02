//! Offset pagination state for the pull request listing.
//!
//! The listing is addressed by `$skip`/`$top` offsets rather than page links.
//! [`PageCursor`] tracks how many items have been collected and decides when
//! the listing is exhausted: an empty page ends it, and so does a running
//! total that is not an exact multiple of the page size (a partial page).

/// Fixed number of pull requests requested per page.
pub const PAGE_SIZE: u32 = 99;

/// Whether another page should be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The last page was full; another request is needed.
    Continue,
    /// The listing is exhausted.
    Exhausted,
}

/// Position within an offset-paginated listing.
///
/// # Example
///
/// ```
/// use prboard::devops::pagination::{PageCursor, PageOutcome};
///
/// let mut cursor = PageCursor::new(99);
/// assert_eq!(cursor.skip(), 0);
/// assert_eq!(cursor.record_page(99), PageOutcome::Continue);
/// assert_eq!(cursor.skip(), 99);
/// assert_eq!(cursor.record_page(51), PageOutcome::Exhausted);
/// assert_eq!(cursor.requests(), 2);
/// assert_eq!(cursor.total(), 150);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page_size: u32,
    total: u32,
    requests: u32,
}

impl PageCursor {
    /// Creates a cursor positioned before the first page.
    #[must_use]
    pub const fn new(page_size: u32) -> Self {
        Self {
            page_size,
            total: 0,
            requests: 0,
        }
    }

    /// Offset for the next request.
    #[must_use]
    pub const fn skip(&self) -> u32 {
        self.total
    }

    /// Items requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Items collected so far.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Page requests issued so far.
    #[must_use]
    pub const fn requests(&self) -> u32 {
        self.requests
    }

    /// Records a page of `len` items and reports whether to continue.
    pub fn record_page(&mut self, len: usize) -> PageOutcome {
        self.requests = self.requests.saturating_add(1);
        if len == 0 {
            return PageOutcome::Exhausted;
        }

        let len_u32 = u32::try_from(len).unwrap_or(u32::MAX);
        self.total = self.total.saturating_add(len_u32);

        if self.total.checked_rem(self.page_size) == Some(0) {
            PageOutcome::Continue
        } else {
            PageOutcome::Exhausted
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
