//! Handlers for bookmark endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::bookmark::{
    BookmarkStatsResponse, CreateBookmarkRequest, DeleteBookmarkResponse, UpdateBookmarkRequest,
};
use crate::api::dto::pagination::PaginationParams;
use crate::domain::entities::Bookmark;
use crate::domain::pagination::Page;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a bookmark.
///
/// # Endpoint
///
/// `POST /bookmarks`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Rust Book",
///   "url": "https://doc.rust-lang.org/book/",
///   "description": "optional"
/// }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: the stored bookmark
/// - **400 Bad Request**: malformed body or invalid fields
pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookmarkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Bookmark>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let bookmark = state.bookmark_service.create(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// Lists bookmarks newest first.
///
/// # Endpoint
///
/// `GET /bookmarks?page=1&limit=20`
///
/// Out-of-range or non-numeric parameters are clamped or defaulted.
pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Page<Bookmark>>, AppError> {
    let params = query.map(|Query(p)| p).unwrap_or_default();
    let page = state
        .bookmark_service
        .list(params.to_page_request())
        .await?;

    Ok(Json(page))
}

/// `GET /bookmarks/{id}`
pub async fn get_bookmark_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bookmark>, AppError> {
    let id = checked_id(&id)?;
    let bookmark = state.bookmark_service.get(id).await?;
    Ok(Json(bookmark))
}

/// Replaces the supplied fields of a bookmark.
///
/// # Endpoint
///
/// `PUT /bookmarks/{id}`
///
/// # Response Codes
///
/// - **200 OK**: the updated bookmark
/// - **400 Bad Request**: invalid id, body or fields
/// - **404 Not Found**: unknown id
pub async fn update_bookmark_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookmarkRequest>, JsonRejection>,
) -> Result<Json<Bookmark>, AppError> {
    let id = checked_id(&id)?;
    let Json(payload) = payload?;
    payload.validate()?;

    let bookmark = state.bookmark_service.update(id, payload.into()).await?;
    Ok(Json(bookmark))
}

/// `DELETE /bookmarks/{id}`
pub async fn delete_bookmark_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteBookmarkResponse>, AppError> {
    let id = checked_id(&id)?;
    state.bookmark_service.delete(id).await?;
    Ok(Json(DeleteBookmarkResponse::deleted(id)))
}

/// `GET /bookmarks/meta/stats`
pub async fn bookmark_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<BookmarkStatsResponse>, AppError> {
    let stats = state.bookmark_service.stats().await?;
    Ok(Json(stats.into()))
}

/// Rejects ids that are empty or whitespace before they reach the store.
fn checked_id(id: &str) -> Result<&str, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::bad_request(
            "Invalid bookmark ID provided",
            json!({ "id": id }),
        ));
    }
    Ok(id)
}
