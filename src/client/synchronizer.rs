//! Keeps a paginated, searchable, windowed bookmark list in sync with the server.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use crate::api::dto::bookmark::{CreateBookmarkRequest, UpdateBookmarkRequest};
use crate::client::aggregate::AggregateView;
use crate::client::api::BookmarkApi;
use crate::client::error::ClientError;
use crate::client::loader::PageLoader;
use crate::client::mutation::{DeleteCoordinator, DeleteOutcome, DeleteState, DeleteTicket};
use crate::client::notice::{self, Notice};
use crate::client::search::SearchInput;
use crate::client::window::{Row, Viewport, WindowedList};
use crate::domain::entities::Bookmark;
use crate::domain::pagination::{Page, PageMeta, PageRequest};

/// Owner of all client-side list state.
///
/// Every suspension point (page fetch, delete request, search debounce) is
/// split into a synchronous `begin_*` step and a synchronous `complete_*` or
/// `finish_*` step. The owner drives the I/O and may feed completions back in
/// any order. The `async` methods are shortcuts that run one operation to the
/// end against the configured [`BookmarkApi`].
///
/// After [`unmount`](Self::unmount) every completion is dropped without
/// touching state.
pub struct ListSynchronizer<A: BookmarkApi> {
    api: Arc<A>,
    view: AggregateView,
    loader: PageLoader,
    search: SearchInput,
    deletes: DeleteCoordinator,
    window: WindowedList,
    meta: Option<PageMeta>,
    notices: VecDeque<Notice>,
    mounted: bool,
}

impl<A: BookmarkApi> ListSynchronizer<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_loader(api, PageLoader::default())
    }

    pub fn with_loader(api: Arc<A>, loader: PageLoader) -> Self {
        Self {
            api,
            view: AggregateView::new(),
            loader,
            search: SearchInput::new(),
            deletes: DeleteCoordinator::new(),
            window: WindowedList::default(),
            meta: None,
            notices: VecDeque::new(),
            mounted: true,
        }
    }

    pub fn with_search(mut self, search: SearchInput) -> Self {
        self.search = search;
        self
    }

    pub fn with_window(mut self, window: WindowedList) -> Self {
        self.window = window;
        self
    }

    // ---- reads ----

    /// Every loaded record, unfiltered.
    pub fn items(&self) -> &[Bookmark] {
        self.view.items()
    }

    /// Loaded records matching the applied search.
    pub fn visible(&self) -> Vec<&Bookmark> {
        self.view.filter(self.search.applied())
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.view.get(id)
    }

    /// Pagination metadata from the last page ingested, adjusted for
    /// confirmed creates and deletes.
    pub fn meta(&self) -> Option<PageMeta> {
        self.meta
    }

    pub fn total_items(&self) -> Option<u64> {
        self.meta.map(|m| m.total_items)
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.loader.has_more()
    }

    /// Inline error state of the list after a failed page load.
    pub fn load_error(&self) -> Option<&ClientError> {
        self.loader.error()
    }

    pub fn search_query(&self) -> &str {
        self.search.applied()
    }

    pub fn search_text(&self) -> &str {
        self.search.typed()
    }

    pub fn delete_state(&self, id: &str) -> DeleteState {
        self.deletes.state(id)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ---- search ----

    /// Records a keystroke; the filter changes after the debounce delay.
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search.type_text(text, now);
    }

    /// Applies pending search text if due. Returns `true` if the filter changed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        self.search.poll(now)
    }

    /// Applies a search immediately.
    pub fn set_search(&mut self, text: impl Into<String>) -> bool {
        self.search.set(text)
    }

    pub fn clear_search(&mut self) -> bool {
        self.search.clear()
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    // ---- loading ----

    /// Starts the next page load. `None` while a load is in flight, after
    /// unmount, or once everything is loaded.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if !self.mounted {
            return None;
        }
        self.loader.begin()
    }

    /// Feeds a page response back and returns how many new records became
    /// visible in the aggregate.
    pub fn complete_load(
        &mut self,
        request: PageRequest,
        result: Result<Page<Bookmark>, ClientError>,
    ) -> usize {
        if !self.mounted {
            tracing::debug!(page = request.page(), "Dropping page after unmount");
            return 0;
        }

        match result {
            Ok(page) => {
                let mut added = 0;
                for ready in self.loader.complete(request, page) {
                    let data = self.deletes.screen(ready.data);
                    added += self.view.ingest_page(&data);
                    self.meta = Some(ready.meta);
                }
                added
            }
            Err(error) => {
                tracing::warn!(page = request.page(), error = %error, "Failed to load page");
                self.loader.fail(request, error);
                self.notices.push_back(Notice::error(notice::LOAD_FAILED));
                0
            }
        }
    }

    /// Loads the next page through the API.
    ///
    /// Returns `Ok(0)` when nothing was started.
    pub async fn load_more(&mut self) -> Result<usize, ClientError> {
        let Some(request) = self.begin_load_more() else {
            return Ok(0);
        };

        let result = self.api.fetch_page(request).await;
        let error = result.as_ref().err().cloned();
        let added = self.complete_load(request, result);

        match error {
            Some(error) => Err(error),
            None => Ok(added),
        }
    }

    /// Loads pages until `count` records are loaded, the server runs out, or
    /// a page adds nothing new.
    pub async fn load_until(&mut self, count: usize) -> Result<(), ClientError> {
        while self.view.len() < count && self.has_more() {
            if self.load_more().await? == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Called by the presenting layer whenever the viewport changes.
    ///
    /// Returns a page request to issue if the viewport is close enough to
    /// the end of the loaded data.
    pub fn on_items_rendered(&mut self, viewport: Viewport) -> Option<PageRequest> {
        let filtered_len = self.visible().len();
        let row_count = self.loader.row_count(filtered_len);
        let range = self.window.range(row_count, viewport);

        if self
            .loader
            .should_load_more(range.visible.end, filtered_len, self.view.len())
        {
            self.begin_load_more()
        } else {
            None
        }
    }

    // ---- rendering ----

    /// Rows to draw for `viewport`, keyed by bookmark id.
    pub fn rows(&self, viewport: Viewport) -> Vec<Row<'_>> {
        let visible = self.visible();
        self.window.rows(&visible, self.loader.has_more(), viewport)
    }

    pub fn row_count(&self) -> usize {
        self.loader.row_count(self.visible().len())
    }

    pub fn is_row_loaded(&self, index: usize) -> bool {
        self.loader.is_row_loaded(index, self.visible().len())
    }

    pub fn list_height(&self) -> u32 {
        self.window.list_height(self.row_count())
    }

    // ---- delete ----

    /// Removes `id` from the list and returns a ticket for the server call.
    ///
    /// `None` if a delete for `id` is already pending or after unmount.
    pub fn begin_delete(&mut self, id: &str) -> Option<DeleteTicket> {
        if !self.mounted {
            return None;
        }
        self.deletes.begin(&mut self.view, id)
    }

    /// Settles a delete with the server's answer.
    ///
    /// `None` after unmount, when the answer is dropped.
    pub fn finish_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), ClientError>,
    ) -> Option<DeleteOutcome> {
        if !self.mounted {
            tracing::debug!(id = ticket.id(), "Dropping delete result after unmount");
            self.deletes.abandon(ticket);
            return None;
        }

        let outcome = self.deletes.finish(&mut self.view, ticket, result);
        match &outcome {
            DeleteOutcome::Committed { .. } => {
                self.adjust_total(-1);
                self.notices
                    .push_back(Notice::success(notice::DELETE_SUCCEEDED));
            }
            DeleteOutcome::RolledBack { id, error } => {
                tracing::warn!(id = %id, error = %error, "Delete failed, rolled back");
                self.notices.push_back(Notice::error(notice::DELETE_FAILED));
            }
        }
        Some(outcome)
    }

    /// Deletes through the API. A repeated delete for a pending id is a no-op.
    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        let Some(ticket) = self.begin_delete(id) else {
            return Ok(());
        };

        let result = self.api.delete(id).await;
        match self.finish_delete(ticket, result) {
            Some(DeleteOutcome::RolledBack { error, .. }) => Err(error),
            _ => Ok(()),
        }
    }

    // ---- create / update ----

    /// Creates a bookmark and shows it without refetching.
    pub async fn create(&mut self, request: CreateBookmarkRequest) -> Result<Bookmark, ClientError> {
        match self.api.create(request).await {
            Ok(bookmark) => {
                self.view.upsert(bookmark.clone());
                self.adjust_total(1);
                self.notices
                    .push_back(Notice::success(notice::CREATE_SUCCEEDED));
                Ok(bookmark)
            }
            Err(error) => {
                tracing::warn!(error = %error, "Create failed");
                self.notices.push_back(Notice::error(notice::CREATE_FAILED));
                Err(error)
            }
        }
    }

    /// Updates a bookmark and refreshes it in place.
    pub async fn update(
        &mut self,
        id: &str,
        request: UpdateBookmarkRequest,
    ) -> Result<Bookmark, ClientError> {
        let bookmark = self.api.update(id, request).await?;
        self.view.upsert(bookmark.clone());
        Ok(bookmark)
    }

    // ---- lifecycle ----

    /// Stops accepting completions. Pending work is dropped as it arrives.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Takes every queued notice, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn adjust_total(&mut self, delta: i64) {
        if let Some(meta) = self.meta {
            let total = (meta.total_items as i64 + delta).max(0) as u64;
            self.meta = Some(meta.with_total_items(total));
        }
    }
}
