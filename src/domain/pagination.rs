//! Page request/result contract shared by the store and the list client.
//!
//! A [`PageRequest`] is always valid: out-of-range values are clamped when it
//! is built, never rejected. A [`Page`] carries the requested slice plus
//! [`PageMeta`] describing where it sits in the full ordering.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// A clamped page request (`page >= 1`, `limit` in `1..=100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Builds a request, flooring `page` to 1 and clamping `limit` into `1..=100`.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.clamp(1, u32::MAX as i64) as u32,
            limit: limit.clamp(1, MAX_LIMIT as i64) as u32,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Same limit, different page.
    pub fn with_page(&self, page: u32) -> Self {
        Self::new(page as i64, self.limit as i64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata for a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Computes metadata for `request` over a collection of `total_items`.
    ///
    /// `current_page` is clamped into `[1, total_pages]`, and is 1 for an
    /// empty collection.
    pub fn compute(request: PageRequest, total_items: u64) -> Self {
        let limit = request.limit();
        let total_pages = total_items.div_ceil(limit as u64) as u32;
        let current_page = request.page().min(total_pages).max(1);

        Self {
            current_page,
            items_per_page: limit,
            total_items,
            total_pages,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }

    /// Recomputes totals after the collection size changed, keeping the page.
    pub fn with_total_items(&self, total_items: u64) -> Self {
        let request = PageRequest::new(self.current_page as i64, self.items_per_page as i64);
        Self::compute(request, total_items)
    }

    /// Index of the first item of the current page in the full ordering.
    pub fn offset(&self) -> usize {
        (self.current_page as usize - 1) * self.items_per_page as usize
    }
}

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T: Clone> Page<T> {
    /// Slices `ordered` according to `request`.
    pub fn from_ordered(ordered: &[T], request: PageRequest) -> Self {
        let meta = PageMeta::compute(request, ordered.len() as u64);
        let start = meta.offset().min(ordered.len());
        let end = (start + meta.items_per_page as usize).min(ordered.len());

        Self {
            data: ordered[start..end].to_vec(),
            meta,
        }
    }
}
