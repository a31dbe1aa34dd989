//! API route configuration.

use crate::api::handlers::{
    bookmark_stats_handler, create_bookmark_handler, delete_bookmark_handler,
    get_bookmark_handler, list_bookmarks_handler, update_bookmark_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Bookmark routes, mounted under the API prefix.
///
/// # Endpoints
///
/// - `GET    /bookmarks`             - Paginated listing, newest first
/// - `POST   /bookmarks`             - Create a bookmark
/// - `GET    /bookmarks/meta/stats`  - Collection statistics
/// - `GET    /bookmarks/{id}`        - Fetch one bookmark
/// - `PUT    /bookmarks/{id}`        - Update a bookmark
/// - `DELETE /bookmarks/{id}`        - Delete a bookmark
pub fn bookmark_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookmarks",
            get(list_bookmarks_handler).post(create_bookmark_handler),
        )
        .route("/bookmarks/meta/stats", get(bookmark_stats_handler))
        .route(
            "/bookmarks/{id}",
            get(get_bookmark_handler)
                .put(update_bookmark_handler)
                .delete(delete_bookmark_handler),
        )
}
