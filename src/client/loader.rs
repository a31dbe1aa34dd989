//! Incremental page loading for the infinite-scroll list.

use std::collections::{BTreeMap, BTreeSet};

use crate::client::error::ClientError;
use crate::domain::entities::Bookmark;
use crate::domain::pagination::{DEFAULT_LIMIT, Page, PageRequest};

/// Rows from the end of the loaded data at which the next page is requested.
pub const LOAD_THRESHOLD: usize = 5;

/// Decides which page to request next and hands pages back in order.
///
/// Responses may complete in any order; a page that arrives early is held
/// until every page before it has been handed out. A failed page is put
/// back at the front of the queue and requested again on the next
/// [`begin`](Self::begin).
#[derive(Debug, Clone)]
pub struct PageLoader {
    limit: u32,
    max_in_flight: usize,
    /// Next never-requested page number.
    next_page: u32,
    /// Page number that must be handed out next.
    next_to_ingest: u32,
    in_flight: BTreeSet<u32>,
    buffered: BTreeMap<u32, Page<Bookmark>>,
    failed: BTreeSet<u32>,
    has_next_page: bool,
    total_pages: Option<u32>,
    error: Option<ClientError>,
}

impl Default for PageLoader {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl PageLoader {
    /// A loader requesting `limit` records per page, one request at a time.
    pub fn new(limit: u32) -> Self {
        let limit = PageRequest::new(1, limit as i64).limit();
        Self {
            limit,
            max_in_flight: 1,
            next_page: 1,
            next_to_ingest: 1,
            in_flight: BTreeSet::new(),
            buffered: BTreeMap::new(),
            failed: BTreeSet::new(),
            has_next_page: true,
            total_pages: None,
            error: None,
        }
    }

    /// Allows up to `max` page requests outstanding at once (minimum 1).
    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Whether more pages may exist on the server.
    pub fn has_more(&self) -> bool {
        self.has_next_page || !self.failed.is_empty() || !self.buffered.is_empty()
    }

    /// Error from the most recent failed request, cleared once no page is
    /// left failed.
    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    /// Picks the next page to request and marks it in flight.
    ///
    /// Failed pages come first. Returns `None` while the in-flight limit is
    /// reached or when nothing is left to load.
    pub fn begin(&mut self) -> Option<PageRequest> {
        if self.in_flight.len() >= self.max_in_flight {
            return None;
        }

        let page = if let Some(page) = self.failed.pop_first() {
            page
        } else {
            if !self.has_next_page || self.beyond_last_page(self.next_page) {
                return None;
            }
            let page = self.next_page;
            self.next_page += 1;
            page
        };

        self.in_flight.insert(page);
        Some(PageRequest::new(page as i64, self.limit as i64))
    }

    /// Accepts a fetched page and returns every page now ready, in order.
    ///
    /// Pages that are not in flight (duplicates or already handed out) are
    /// ignored.
    pub fn complete(&mut self, request: PageRequest, page: Page<Bookmark>) -> Vec<Page<Bookmark>> {
        let number = request.page();
        if !self.in_flight.remove(&number) {
            tracing::debug!(page = number, "Ignoring page that is not in flight");
            return Vec::new();
        }

        self.buffered.insert(number, page);

        let mut ready = Vec::new();
        while let Some(page) = self.buffered.remove(&self.next_to_ingest) {
            self.has_next_page = page.meta.has_next_page;
            self.total_pages = Some(page.meta.total_pages);
            self.next_to_ingest += 1;
            ready.push(page);
        }

        if !ready.is_empty() && self.failed.is_empty() {
            self.error = None;
        }

        // Pages requested past the real end can no longer be handed out.
        if !self.has_next_page {
            let stale: Vec<u32> = self.buffered.keys().copied().collect();
            for number in stale {
                self.buffered.remove(&number);
            }
        }

        ready
    }

    /// Records a failed request so the page is retried first.
    pub fn fail(&mut self, request: PageRequest, error: ClientError) {
        let number = request.page();
        if !self.in_flight.remove(&number) {
            return;
        }
        self.failed.insert(number);
        self.error = Some(error);
    }

    /// Whether scrolling to `visible_end` should trigger the next request.
    ///
    /// `visible_end` is the exclusive end of the visible rows in the filtered
    /// list. Loading starts within [`LOAD_THRESHOLD`] rows of the end of the
    /// unfiltered data, or as soon as the loading row itself is visible, so an
    /// active search that hides most rows cannot stall loading. Nothing is
    /// triggered while a request is in flight or after a failure; a failed
    /// page needs an explicit retry.
    pub fn should_load_more(
        &self,
        visible_end: usize,
        filtered_len: usize,
        unfiltered_len: usize,
    ) -> bool {
        if self.is_loading() || self.error.is_some() || !self.has_more() {
            return false;
        }
        visible_end + LOAD_THRESHOLD >= unfiltered_len || visible_end > filtered_len
    }

    /// Row count the list should render: loaded rows plus a loading row while
    /// more data may exist.
    pub fn row_count(&self, filtered_len: usize) -> usize {
        filtered_len + usize::from(self.has_more())
    }

    pub fn is_row_loaded(&self, index: usize, filtered_len: usize) -> bool {
        index < filtered_len
    }

    fn beyond_last_page(&self, page: u32) -> bool {
        self.total_pages.is_some_and(|total| page > total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::PageMeta;

    fn page(request: PageRequest, total: u64) -> Page<Bookmark> {
        Page {
            data: Vec::new(),
            meta: PageMeta::compute(request, total),
        }
    }

    #[test]
    fn test_begin_is_idempotent_while_in_flight() {
        let mut loader = PageLoader::new(20);
        let first = loader.begin().unwrap();
        assert_eq!(first.page(), 1);
        assert!(loader.begin().is_none());
        assert!(loader.is_loading());
    }

    #[test]
    fn test_pages_advance_until_last() {
        let mut loader = PageLoader::new(10);

        let r1 = loader.begin().unwrap();
        assert_eq!(loader.complete(r1, page(r1, 15)).len(), 1);
        assert!(loader.has_more());

        let r2 = loader.begin().unwrap();
        assert_eq!(r2.page(), 2);
        loader.complete(r2, page(r2, 15));

        assert!(!loader.has_more());
        assert!(loader.begin().is_none());
    }

    #[test]
    fn test_out_of_order_pages_are_released_in_order() {
        let mut loader = PageLoader::new(10).with_max_in_flight(3);
        let r1 = loader.begin().unwrap();
        let r2 = loader.begin().unwrap();
        let r3 = loader.begin().unwrap();

        assert!(loader.complete(r3, page(r3, 50)).is_empty());
        assert!(loader.complete(r2, page(r2, 50)).is_empty());

        let ready = loader.complete(r1, page(r1, 50));
        let numbers: Vec<u32> = ready.iter().map(|p| p.meta.current_page).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_failed_page_is_retried_first() {
        let mut loader = PageLoader::new(10).with_max_in_flight(2);
        let r1 = loader.begin().unwrap();
        let r2 = loader.begin().unwrap();

        loader.fail(r1, ClientError::Network("timeout".to_string()));
        assert!(loader.error().is_some());
        assert!(loader.complete(r2, page(r2, 40)).is_empty());

        let retry = loader.begin().unwrap();
        assert_eq!(retry.page(), 1);

        let ready = loader.complete(retry, page(retry, 40));
        assert_eq!(ready.len(), 2);
        assert!(loader.error().is_none());
    }

    #[test]
    fn test_completion_for_unknown_request_is_ignored() {
        let mut loader = PageLoader::new(10);
        let stray = PageRequest::new(4, 10);
        assert!(loader.complete(stray, page(stray, 100)).is_empty());
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_should_load_more_near_unfiltered_end() {
        let loader = PageLoader::new(20);
        assert!(!loader.should_load_more(10, 20, 20));
        assert!(loader.should_load_more(15, 20, 20));
        assert!(loader.should_load_more(0, 0, 0));
    }

    #[test]
    fn test_should_load_more_when_loading_row_visible_during_search() {
        let loader = PageLoader::new(20);
        // 100 rows loaded, search leaves 2, the loading row at index 2 is visible.
        assert!(loader.should_load_more(3, 2, 100));
        assert!(!loader.should_load_more(2, 2, 100));
    }

    #[test]
    fn test_should_not_load_after_error_or_when_exhausted() {
        let mut loader = PageLoader::new(20);
        let r1 = loader.begin().unwrap();
        loader.fail(r1, ClientError::Network("down".to_string()));
        assert!(!loader.should_load_more(0, 0, 0));

        let retry = loader.begin().unwrap();
        loader.complete(retry, page(retry, 3));
        assert!(!loader.has_more());
        assert!(!loader.should_load_more(3, 3, 3));
    }

    #[test]
    fn test_row_count_includes_loading_row() {
        let mut loader = PageLoader::new(10);
        assert_eq!(loader.row_count(0), 1);
        assert!(!loader.is_row_loaded(0, 0));

        let r1 = loader.begin().unwrap();
        loader.complete(r1, page(r1, 5));
        assert_eq!(loader.row_count(5), 5);
        assert!(loader.is_row_loaded(4, 5));
    }
}
