//! Pagination arithmetic for the list endpoint.
//!
//! Raw `page`/`limit` query values fall back to defaults when missing,
//! unparseable, or non-positive. No upper bound is enforced on either;
//! a caller asking for page 9999 gets an empty page, not an error.

use serde::Serialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Number of records to skip before the requested page.
    /// Saturates instead of overflowing on absurd page/limit pairs.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value >= 1)
}

/// Pagination envelope returned alongside list data
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(params: PageParams, total: u64) -> Self {
        let total_pages = total.div_ceil(params.limit);
        Self {
            current_page: params.page,
            total_pages,
            total_items: total,
            items_per_page: params.limit,
            has_next_page: params.page < total_pages,
            has_prev_page: params.page > 1,
        }
    }

    /// Zero-count envelope for the unknown-mention short circuit.
    /// Both cursor flags are pinned false regardless of the requested page.
    pub fn empty(params: PageParams) -> Self {
        Self {
            current_page: params.page,
            total_pages: 0,
            total_items: 0,
            items_per_page: params.limit,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}
