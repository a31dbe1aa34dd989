#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use bookmark_manager::api::dto::bookmark::{
    BookmarkStatsResponse, CreateBookmarkRequest, UpdateBookmarkRequest,
};
use bookmark_manager::api::handlers::health_handler;
use bookmark_manager::api::routes::bookmark_routes;
use bookmark_manager::application::services::BookmarkService;
use bookmark_manager::client::{BookmarkApi, ClientError};
use bookmark_manager::domain::entities::Bookmark;
use bookmark_manager::domain::pagination::{Page, PageRequest};
use bookmark_manager::error::AppError;
use bookmark_manager::infrastructure::persistence::InMemoryBookmarkRepository;
use bookmark_manager::routes::app_router;
use bookmark_manager::state::AppState;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const API_PREFIX: &str = "/api/v1";

pub fn create_test_bookmark(id: &str, title: &str, created_at: DateTime<Utc>) -> Bookmark {
    Bookmark::new(
        id.to_string(),
        title.to_string(),
        format!("https://example.com/{id}"),
        Some(format!("Description for {title}")),
        created_at,
    )
}

/// `n` bookmarks `id-0`..`id-{n-1}`, `id-0` newest.
pub fn create_test_bookmarks(n: usize) -> Vec<Bookmark> {
    let now = Utc::now();
    (0..n)
        .map(|i| {
            create_test_bookmark(
                &format!("id-{i}"),
                &format!("Bookmark {i}"),
                now - Duration::minutes(i as i64),
            )
        })
        .collect()
}

pub fn create_test_state(bookmarks: Vec<Bookmark>) -> (AppState, Arc<InMemoryBookmarkRepository>) {
    let repository = Arc::new(InMemoryBookmarkRepository::with_bookmarks(bookmarks));
    (AppState::new(repository.clone()), repository)
}

/// Bookmark routes under the API prefix plus `/health`, without middleware.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest(API_PREFIX, bookmark_routes())
        .with_state(state)
}

/// Serves the full application router on an ephemeral port and returns the
/// API base URL.
pub async fn spawn_server(state: AppState) -> String {
    use axum::ServiceExt;
    use axum::extract::Request;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app_router(state, API_PREFIX, &["http://localhost:3000".to_string()]);

    tokio::spawn(async move {
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .await
            .unwrap();
    });

    format!("http://{addr}{API_PREFIX}")
}

/// [`BookmarkApi`] calling the service directly, with switchable failures.
pub struct ServiceApi {
    service: Arc<BookmarkService<InMemoryBookmarkRepository>>,
    pub fail_deletes: AtomicBool,
    pub fail_pages: AtomicBool,
    pub page_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl ServiceApi {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.bookmark_service.clone(),
            fail_deletes: AtomicBool::new(false),
            fail_pages: AtomicBool::new(false),
            page_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }
}

fn simulated_500() -> ClientError {
    ClientError::Server {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

fn to_client_error(error: AppError) -> ClientError {
    let info = error.to_error_info();
    match error {
        AppError::NotFound { message, .. } => ClientError::NotFound { message },
        AppError::Validation { message, .. } => ClientError::Validation {
            message,
            fields: info.details["fields"]
                .as_object()
                .map(|f| f.keys().cloned().collect())
                .unwrap_or_default(),
        },
        other => ClientError::Server {
            status: other.status().as_u16(),
            message: info.message,
        },
    }
}

#[async_trait]
impl BookmarkApi for ServiceApi {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<Bookmark>, ClientError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_pages.load(Ordering::SeqCst) {
            return Err(simulated_500());
        }
        self.service.list(request).await.map_err(to_client_error)
    }

    async fn get(&self, id: &str) -> Result<Bookmark, ClientError> {
        self.service.get(id).await.map_err(to_client_error)
    }

    async fn create(&self, request: CreateBookmarkRequest) -> Result<Bookmark, ClientError> {
        self.service
            .create(request.into())
            .await
            .map_err(to_client_error)
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateBookmarkRequest,
    ) -> Result<Bookmark, ClientError> {
        self.service
            .update(id, request.into())
            .await
            .map_err(to_client_error)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(simulated_500());
        }
        self.service.delete(id).await.map_err(to_client_error)
    }

    async fn stats(&self) -> Result<BookmarkStatsResponse, ClientError> {
        self.service
            .stats()
            .await
            .map(Into::into)
            .map_err(to_client_error)
    }
}
