//! Repository trait for bookmark storage.

use crate::domain::entities::{Bookmark, BookmarkPatch};
use crate::domain::pagination::{Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for the bookmark collection.
///
/// Listings are ordered by `updated_at` descending, ties broken by insertion
/// order (most recently inserted first). The ordering is recomputed on every
/// call, so a listing always reflects the writes that completed before it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryBookmarkRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_bookmark.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Inserts a fully-formed bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a bookmark with the same id exists.
    async fn save(&self, bookmark: Bookmark) -> Result<Bookmark, AppError>;

    /// Returns one page of the canonical ordering.
    async fn find_page(&self, request: PageRequest) -> Result<Page<Bookmark>, AppError>;

    /// Finds a bookmark by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Bookmark))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: &str) -> Result<Option<Bookmark>, AppError>;

    /// Applies an already-validated patch and bumps `updated_at`.
    ///
    /// `created_at` is never touched. Returns `Ok(None)` if the id is unknown.
    async fn update(&self, id: &str, patch: BookmarkPatch) -> Result<Option<Bookmark>, AppError>;

    /// Removes a bookmark.
    ///
    /// Returns `Ok(true)` if it existed, `Ok(false)` otherwise.
    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError>;

    /// Number of stored bookmarks.
    async fn count(&self) -> Result<usize, AppError>;
}
