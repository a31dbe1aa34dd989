//! The client's merged view over every page fetched so far.

use std::collections::HashSet;

use crate::domain::entities::Bookmark;

/// Snapshot taken when a record is removed optimistically.
///
/// Handing it back to [`AggregateView::restore`] undoes the removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEntry {
    pub record: Bookmark,
    /// Index the record had when it was removed. Advisory only: the view is
    /// re-sorted after restoring.
    pub position: usize,
}

/// Ordered, deduplicated sequence of bookmarks built from successive pages.
///
/// Items are kept sorted by `updated_at` descending. Sorting is stable, so
/// records with equal timestamps stay in the order the server sent them.
#[derive(Debug, Default, Clone)]
pub struct AggregateView {
    items: Vec<Bookmark>,
    ids: HashSet<String>,
}

impl AggregateView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.items.iter().find(|b| b.id == id)
    }

    /// Merges one page into the view and returns how many records were new.
    ///
    /// A record whose id is already present keeps its place in the merge but
    /// takes the incoming field values.
    pub fn ingest_page(&mut self, page: &[Bookmark]) -> usize {
        let mut added = 0;
        for incoming in page {
            if self.ids.contains(&incoming.id) {
                if let Some(existing) = self.items.iter_mut().find(|b| b.id == incoming.id) {
                    *existing = incoming.clone();
                }
            } else {
                self.ids.insert(incoming.id.clone());
                self.items.push(incoming.clone());
                added += 1;
            }
        }
        self.sort();
        added
    }

    /// Inserts or replaces a single record the client created or edited itself.
    pub fn upsert(&mut self, record: Bookmark) {
        if self.ids.contains(&record.id) {
            if let Some(existing) = self.items.iter_mut().find(|b| b.id == record.id) {
                *existing = record;
            }
        } else {
            self.ids.insert(record.id.clone());
            self.items.insert(0, record);
        }
        self.sort();
    }

    /// Removes `id` from the view, returning what is needed to undo it.
    ///
    /// Returns `None` if the id is not in the view.
    pub fn remove_optimistically(&mut self, id: &str) -> Option<RemovedEntry> {
        let position = self.items.iter().position(|b| b.id == id)?;
        let record = self.items.remove(position);
        self.ids.remove(id);
        Some(RemovedEntry { record, position })
    }

    /// Puts a removed record back.
    ///
    /// If a record with the same id arrived in the meantime (a later page
    /// ingest), that fresher copy wins and the snapshot is dropped.
    pub fn restore(&mut self, entry: RemovedEntry) {
        if self.ids.contains(&entry.record.id) {
            return;
        }
        let position = entry.position.min(self.items.len());
        self.ids.insert(entry.record.id.clone());
        self.items.insert(position, entry.record);
        self.sort();
    }

    /// The subsequence matching `query`. See [`filter_bookmarks`].
    pub fn filter(&self, query: &str) -> Vec<&Bookmark> {
        filter_bookmarks(&self.items, query)
    }

    fn sort(&mut self) {
        self.items.sort_by(Bookmark::cmp_recency);
    }
}

/// Case-insensitive substring filter over title, url and description.
///
/// A blank query matches everything. Otherwise the query is lowercased but
/// not trimmed, so surrounding spaces are part of what is searched for.
/// Order is preserved.
pub fn filter_bookmarks<'a>(items: &'a [Bookmark], query: &str) -> Vec<&'a Bookmark> {
    if query.trim().is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    items.iter().filter(|b| b.matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn bookmark(id: &str, title: &str, age_secs: i64) -> Bookmark {
        Bookmark::new(
            id.to_string(),
            title.to_string(),
            format!("https://example.com/{id}"),
            None,
            Utc::now() - Duration::seconds(age_secs),
        )
    }

    fn ids(view: &AggregateView) -> Vec<&str> {
        view.items().iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_ingest_sorts_newest_first() {
        let mut view = AggregateView::new();
        view.ingest_page(&[bookmark("old", "Old", 30), bookmark("new", "New", 1)]);
        assert_eq!(ids(&view), vec!["new", "old"]);
    }

    #[test]
    fn test_ingest_same_page_twice_is_idempotent() {
        let page = vec![bookmark("a", "A", 3), bookmark("b", "B", 2)];
        let mut view = AggregateView::new();

        assert_eq!(view.ingest_page(&page), 2);
        let once: Vec<Bookmark> = view.items().to_vec();

        assert_eq!(view.ingest_page(&page), 0);
        assert_eq!(view.items(), once.as_slice());
    }

    #[test]
    fn test_ingest_refreshes_existing_fields() {
        let mut view = AggregateView::new();
        let original = bookmark("a", "Before", 5);
        view.ingest_page(std::slice::from_ref(&original));

        let mut refreshed = original.clone();
        refreshed.title = "After".to_string();
        view.ingest_page(&[refreshed]);

        assert_eq!(view.len(), 1);
        assert_eq!(view.items()[0].title, "After");
    }

    #[test]
    fn test_ingest_keeps_server_order_for_equal_timestamps() {
        let at = Utc::now();
        let mut page = Vec::new();
        for id in ["c", "b", "a"] {
            page.push(Bookmark::new(
                id.to_string(),
                id.to_string(),
                format!("https://{id}.test"),
                None,
                at,
            ));
        }

        let mut view = AggregateView::new();
        view.ingest_page(&page);
        assert_eq!(ids(&view), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_remove_and_restore_round_trip() {
        let mut view = AggregateView::new();
        view.ingest_page(&[
            bookmark("a", "A", 1),
            bookmark("b", "B", 2),
            bookmark("c", "C", 3),
        ]);
        let before: Vec<Bookmark> = view.items().to_vec();

        let removed = view.remove_optimistically("b").unwrap();
        assert_eq!(removed.position, 1);
        assert!(!view.contains("b"));
        assert_eq!(ids(&view), vec!["a", "c"]);

        view.restore(removed);
        assert_eq!(view.items(), before.as_slice());
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut view = AggregateView::new();
        view.ingest_page(&[bookmark("a", "A", 1)]);
        assert!(view.remove_optimistically("nonexistent").is_none());
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_restore_skips_when_id_reappeared() {
        let mut view = AggregateView::new();
        view.ingest_page(&[bookmark("a", "A", 1)]);
        let removed = view.remove_optimistically("a").unwrap();

        let mut fresher = removed.record.clone();
        fresher.title = "Fresher".to_string();
        view.ingest_page(&[fresher]);

        view.restore(removed);
        assert_eq!(view.len(), 1);
        assert_eq!(view.items()[0].title, "Fresher");
    }

    #[test]
    fn test_restore_position_out_of_range_is_clamped() {
        let mut view = AggregateView::new();
        view.ingest_page(&[bookmark("a", "A", 1), bookmark("b", "B", 10)]);
        let mut removed = view.remove_optimistically("b").unwrap();
        removed.position = 99;

        view.restore(removed);
        assert_eq!(ids(&view), vec!["a", "b"]);
    }

    #[test]
    fn test_upsert_new_record_goes_to_head() {
        let mut view = AggregateView::new();
        view.ingest_page(&[bookmark("a", "A", 10)]);
        view.upsert(bookmark("fresh", "Fresh", 0));

        assert_eq!(ids(&view), vec!["fresh", "a"]);
    }

    #[test]
    fn test_upsert_existing_record_moves_on_update() {
        let mut view = AggregateView::new();
        view.ingest_page(&[bookmark("a", "A", 1), bookmark("b", "B", 20)]);

        let mut edited = view.get("b").cloned().unwrap();
        edited.updated_at = Utc::now();
        view.upsert(edited);

        assert_eq!(ids(&view), vec!["b", "a"]);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_filter_matches_any_field_case_insensitively() {
        let mut react = bookmark("r", "React Tutorial", 1);
        react.description = Some("Hooks and STATE".to_string());
        let items = vec![react, bookmark("v", "Vue Guide", 2)];

        assert_eq!(filter_bookmarks(&items, "react").len(), 1);
        assert_eq!(filter_bookmarks(&items, "STATE").len(), 1);
        assert_eq!(filter_bookmarks(&items, "example.com/v").len(), 1);
        assert!(filter_bookmarks(&items, "angular").is_empty());
    }

    #[test]
    fn test_blank_query_returns_everything() {
        let items = vec![bookmark("a", "A", 1), bookmark("b", "B", 2)];
        assert_eq!(filter_bookmarks(&items, "").len(), 2);
        assert_eq!(filter_bookmarks(&items, "   ").len(), 2);
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let items = vec![bookmark("a", "Guide", 1)];
        assert!(filter_bookmarks(&items, " guide").is_empty());
    }

    #[test]
    fn test_filter_is_pure_and_ordered() {
        let mut view = AggregateView::new();
        view.ingest_page(&[
            bookmark("1", "Rust one", 1),
            bookmark("2", "Go", 2),
            bookmark("3", "Rust two", 3),
        ]);
        let before: Vec<Bookmark> = view.items().to_vec();

        let filtered: Vec<&str> = view.filter("rust").iter().map(|b| b.id.as_str()).collect();
        assert_eq!(filtered, vec!["1", "3"]);
        assert_eq!(view.items(), before.as_slice());
    }
}
