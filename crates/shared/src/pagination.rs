//! Offset pagination utilities for admin listings.

use serde::{Deserialize, Serialize};

/// Default page size for listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Hard ceiling on page size to bound query cost.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page/limit query parameters as they arrive on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    /// Page number, 1-based, clamped to at least 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for the current page. Widened before multiplying so
    /// extreme page numbers cannot overflow u32.
    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.limit() as i64
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total_count: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
}

impl PageInfo {
    /// Builds metadata from the effective params and the total row count.
    pub fn new(params: &PageParams, total_count: i64) -> Self {
        let page = params.page();
        let limit = params.limit();
        let total_pages = (total_count + limit as i64 - 1) / limit as i64;
        let has_next_page = params.offset() + (limit as i64) < total_count;

        Self {
            page,
            limit,
            total_count,
            total_pages,
            has_next_page,
        }
    }
}
