//! Page arithmetic for the task lists.
//!
//! Out-of-range requests never fail: anything that is not a positive
//! integer selects the first page and anything past the end is clamped to
//! the last page. An empty list still has one (empty) page.

use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: i64 = 4;

/// `?page=` as it arrives on the query string. Kept as text so that a
/// malformed value falls back to page 1 instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn requested(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }
}

/// Where a page sits inside a result set of `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: i64,
    pub num_pages: i64,
    pub total: i64,
}

impl PageWindow {
    pub fn new(requested: i64, total: i64) -> Self {
        let num_pages = ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
        Self {
            number: requested.clamp(1, num_pages),
            num_pages,
            total,
        }
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * PAGE_SIZE
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        let has_next = self.number < self.num_pages;
        let has_previous = self.number > 1;
        Page {
            items,
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
            has_next,
            has_previous,
            next_page_number: has_next.then_some(self.number + 1),
            previous_page_number: has_previous.then_some(self.number - 1),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub total: i64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<i64>,
    pub previous_page_number: Option<i64>,
}
