//! DTOs for the bookmark endpoints.
//!
//! Request types derive both directions of serde so the HTTP client can send
//! exactly what the handlers accept.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::BookmarkStats;
use crate::domain::entities::{BookmarkPatch, NewBookmark};

/// Request body for `POST /bookmarks`.
///
/// Length limits are checked here on the raw input. Trimming, the blank-title
/// rule and URL parsing happen in the service.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateBookmarkRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters long"))]
    pub title: String,

    #[validate(length(max = 2000, message = "URL is too long"))]
    pub url: String,

    #[validate(length(
        max = 500,
        message = "Description must be at most 500 characters long"
    ))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<CreateBookmarkRequest> for NewBookmark {
    fn from(request: CreateBookmarkRequest) -> Self {
        NewBookmark {
            title: request.title,
            url: request.url,
            description: request.description,
        }
    }
}

/// Request body for `PUT /bookmarks/{id}`.
///
/// All fields are optional and only provided fields are changed. An empty
/// `description` clears it.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateBookmarkRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters long"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "URL is too long"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[validate(length(
        max = 500,
        message = "Description must be at most 500 characters long"
    ))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<UpdateBookmarkRequest> for BookmarkPatch {
    fn from(request: UpdateBookmarkRequest) -> Self {
        BookmarkPatch {
            title: request.title,
            url: request.url,
            description: request.description,
        }
    }
}

/// Response body for `DELETE /bookmarks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeleteBookmarkResponse {
    pub message: String,
    pub id: String,
}

impl DeleteBookmarkResponse {
    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            message: "Bookmark deleted successfully".to_string(),
            id: id.into(),
        }
    }
}

/// Response body for `GET /bookmarks/meta/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkStatsResponse {
    pub total_bookmarks: usize,
}

impl From<BookmarkStats> for BookmarkStatsResponse {
    fn from(stats: BookmarkStats) -> Self {
        Self {
            total_bookmarks: stats.total_bookmarks,
        }
    }
}
