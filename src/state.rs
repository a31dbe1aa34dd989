//! Shared application state.

use std::sync::Arc;

use crate::application::services::BookmarkService;
use crate::infrastructure::persistence::InMemoryBookmarkRepository;

/// State handed to every handler.
///
/// Cloning is cheap: the service and the store behind it are shared by handle,
/// so every request sees the same collection.
#[derive(Clone)]
pub struct AppState {
    pub bookmark_service: Arc<BookmarkService<InMemoryBookmarkRepository>>,
}

impl AppState {
    pub fn new(repository: Arc<InMemoryBookmarkRepository>) -> Self {
        Self {
            bookmark_service: Arc::new(BookmarkService::new(repository)),
        }
    }
}
