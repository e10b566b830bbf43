//! Pagination arithmetic and the paged list envelope.

use serde::Serialize;

/// Requested page window. `page` and `limit` are both at least 1 once they
/// have passed query validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Rows to skip before the first row of this page. Saturates, so an
    /// absurdly large page skips every row instead of wrapping.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Derive response metadata from the current total row count.
    /// The page is never clamped: past the end simply means no next page.
    /// An empty collection has no pages, so neither direction is available.
    pub fn meta(&self, total: i64) -> PageMeta {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        };
        PageMeta {
            page: self.page,
            limit: self.limit,
            total,
            total_pages,
            has_next: self.page < total_pages,
            has_prev: self.page > 1 && total_pages > 0,
        }
    }
}

/// Pagination metadata returned alongside every list.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Paged result envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(data: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        Self {
            data,
            pagination: pagination.meta(total),
        }
    }
}
