//! Transport between the list client and the bookmark service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::api::dto::bookmark::{
    BookmarkStatsResponse, CreateBookmarkRequest, DeleteBookmarkResponse, UpdateBookmarkRequest,
};
use crate::client::error::ClientError;
use crate::domain::entities::Bookmark;
use crate::domain::pagination::{Page, PageRequest};
use crate::error::ErrorBody;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote operations the list client depends on.
///
/// # Implementations
///
/// - [`HttpBookmarkApi`] - JSON over HTTP
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkApi: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<Bookmark>, ClientError>;

    async fn get(&self, id: &str) -> Result<Bookmark, ClientError>;

    async fn create(&self, request: CreateBookmarkRequest) -> Result<Bookmark, ClientError>;

    async fn update(
        &self,
        id: &str,
        request: UpdateBookmarkRequest,
    ) -> Result<Bookmark, ClientError>;

    async fn delete(&self, id: &str) -> Result<(), ClientError>;

    async fn stats(&self) -> Result<BookmarkStatsResponse, ClientError>;
}

/// [`BookmarkApi`] over HTTP using `reqwest`.
///
/// Every request carries the same timeout. Error responses are decoded from
/// the service's `{ "error": { ... } }` envelope when possible.
#[derive(Debug, Clone)]
pub struct HttpBookmarkApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBookmarkApi {
    /// Creates a client for `base_url`, e.g. `http://localhost:3001/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bookmark_url(&self, id: &str) -> String {
        format!("{}/bookmarks/{}", self.base_url, encode_segment(id))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BookmarkApi for HttpBookmarkApi {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<Bookmark>, ClientError> {
        let url = format!("{}/bookmarks", self.base_url);
        let query = [("page", request.page()), ("limit", request.limit())];
        tracing::debug!(page = request.page(), limit = request.limit(), "Fetching page");

        self.send_json(self.client.get(url).query(&query)).await
    }

    async fn get(&self, id: &str) -> Result<Bookmark, ClientError> {
        self.send_json(self.client.get(self.bookmark_url(id))).await
    }

    async fn create(&self, request: CreateBookmarkRequest) -> Result<Bookmark, ClientError> {
        let url = format!("{}/bookmarks", self.base_url);
        self.send_json(self.client.post(url).json(&request)).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateBookmarkRequest,
    ) -> Result<Bookmark, ClientError> {
        self.send_json(self.client.put(self.bookmark_url(id)).json(&request))
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let _: DeleteBookmarkResponse = self
            .send_json(self.client.delete(self.bookmark_url(id)))
            .await?;
        Ok(())
    }

    async fn stats(&self) -> Result<BookmarkStatsResponse, ClientError> {
        let url = format!("{}/bookmarks/meta/stats", self.base_url);
        self.send_json(self.client.get(url)).await
    }
}

/// Maps a non-success response to a [`ClientError`].
fn error_from_response(status: StatusCode, body: &str) -> ClientError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed
        .as_ref()
        .map(|b| b.error.message.clone())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound { message },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let fields = parsed
                .as_ref()
                .and_then(|b| b.error.details.get("fields"))
                .and_then(|f| f.as_object())
                .map(|f| f.keys().cloned().collect())
                .unwrap_or_default();
            ClientError::Validation { message, fields }
        }
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

/// Percent-encodes an id for use as a single path segment.
fn encode_segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
