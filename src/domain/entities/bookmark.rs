//! Bookmark entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A saved bookmark.
///
/// `id` never changes once assigned and `created_at <= updated_at` always holds.
/// Serialized with camelCase keys, which is the wire format shared by the
/// server and the list client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bookmark {
    /// Creates a bookmark whose `updated_at` equals `created_at`.
    pub fn new(
        id: String,
        title: String,
        url: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            url,
            description,
            created_at,
            updated_at: created_at,
        }
    }

    /// Newest-first ordering on `updated_at`.
    ///
    /// Equal timestamps compare as equal, so stable sorts keep whatever
    /// tie-break order the caller established.
    pub fn cmp_recency(a: &Bookmark, b: &Bookmark) -> Ordering {
        b.updated_at.cmp(&a.updated_at)
    }

    /// Case-insensitive substring match on title, url and description.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.url.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Input for creating a bookmark, as received from the caller.
///
/// Values are raw; trimming and validation happen in
/// [`crate::application::services::BookmarkService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

/// Partial update for an existing bookmark.
///
/// `None` fields are left unchanged. A description that is blank after
/// trimming clears the stored description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.description.is_none()
    }
}
