//! Pagination query parameters.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use crate::domain::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest};

/// Query parameters for `GET /bookmarks`.
///
/// Values that are missing or not integers fall back to the defaults instead
/// of failing extraction, and out-of-range values are clamped later by
/// [`PageRequest::new`]. The list endpoint therefore never answers 400.
#[serde_as]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PaginationParams {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(DEFAULT_PAGE as i64),
            self.limit.unwrap_or(DEFAULT_LIMIT as i64),
        )
    }
}
