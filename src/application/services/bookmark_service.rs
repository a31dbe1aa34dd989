//! Bookmark creation, retrieval and mutation service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Bookmark, BookmarkPatch, NewBookmark};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_absolute_url;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Aggregate numbers about the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookmarkStats {
    pub total_bookmarks: usize,
}

/// Service owning the rules around bookmark records.
///
/// Input is trimmed and validated here, ids and timestamps are assigned here,
/// and the repository only ever sees well-formed records.
pub struct BookmarkService<R: BookmarkRepository> {
    repository: Arc<R>,
}

impl<R: BookmarkRepository> BookmarkService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a bookmark at the head of the ordering.
    ///
    /// Title, url and description are trimmed. A description that is blank
    /// after trimming is stored as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - title is empty after trimming or longer than 200 characters
    /// - url is not a valid absolute URL
    /// - description is longer than 500 characters
    pub async fn create(&self, input: NewBookmark) -> Result<Bookmark, AppError> {
        let title = validate_title(&input.title)?;
        let url = validate_url(&input.url)?;
        let description = match input.description.as_deref() {
            Some(raw) => validate_description(raw)?,
            None => None,
        };

        let bookmark = Bookmark::new(
            Uuid::new_v4().to_string(),
            title,
            url,
            description,
            Utc::now(),
        );

        let saved = self.repository.save(bookmark).await?;
        tracing::info!(id = %saved.id, "Bookmark created");
        Ok(saved)
    }

    /// Returns one page of the collection, newest first.
    pub async fn list(&self, request: PageRequest) -> Result<Page<Bookmark>, AppError> {
        self.repository.find_page(request).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark has this id.
    pub async fn get(&self, id: &str) -> Result<Bookmark, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Applies a partial update.
    ///
    /// Only the supplied fields are validated and changed. `updated_at` is
    /// bumped even for an empty patch, which moves the record to the head.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for invalid fields (nothing is changed)
    /// and [`AppError::NotFound`] if the id is unknown.
    pub async fn update(&self, id: &str, patch: BookmarkPatch) -> Result<Bookmark, AppError> {
        let validated = BookmarkPatch {
            title: patch.title.as_deref().map(validate_title).transpose()?,
            url: patch.url.as_deref().map(validate_url).transpose()?,
            description: match patch.description.as_deref() {
                Some(raw) => Some(validate_description(raw)?.unwrap_or_default()),
                None => None,
            },
        };

        let updated = self
            .repository
            .update(id, validated)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(id, "Bookmark updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark has this id.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if self.repository.delete_by_id(id).await? {
            tracing::info!(id, "Bookmark deleted");
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.repository.count().await
    }

    pub async fn stats(&self) -> Result<BookmarkStats, AppError> {
        Ok(BookmarkStats {
            total_bookmarks: self.repository.count().await?,
        })
    }
}

fn not_found(id: &str) -> AppError {
    AppError::not_found(
        format!("Bookmark with ID {id} not found"),
        json!({ "id": id }),
    )
}

fn field_error(field: &str, message: &str) -> AppError {
    AppError::bad_request(
        "Validation failed",
        json!({ "fields": { field: [message] } }),
    )
}

fn validate_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(field_error("title", "Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(field_error(
            "title",
            "Title must be at most 200 characters long",
        ));
    }
    Ok(title.to_string())
}

fn validate_url(raw: &str) -> Result<String, AppError> {
    let url = raw.trim();
    validate_absolute_url(url).map_err(|e| field_error("url", &e.to_string()))?;
    Ok(url.to_string())
}

/// Blank descriptions become `None`.
fn validate_description(raw: &str) -> Result<Option<String>, AppError> {
    let description = raw.trim();
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(field_error(
            "description",
            "Description must be at most 500 characters long",
        ));
    }
    Ok((!description.is_empty()).then(|| description.to_string()))
}
