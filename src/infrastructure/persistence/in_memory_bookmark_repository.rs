//! In-memory implementation of the bookmark repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Bookmark, BookmarkPatch};
use crate::domain::pagination::{Page, PageMeta, PageRequest};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;

struct Entry {
    bookmark: Bookmark,
    /// Monotonic insertion counter, used as the ordering tie-break.
    seq: u64,
}

#[derive(Default)]
struct Collection {
    entries: HashMap<String, Entry>,
    next_seq: u64,
}

impl Collection {
    /// Slices the canonical ordering (newest `updated_at` first, then newest
    /// insertion). Only the records on the requested page are cloned.
    fn page(&self, request: PageRequest) -> Page<Bookmark> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_unstable_by(|a, b| {
            b.bookmark
                .updated_at
                .cmp(&a.bookmark.updated_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        let meta = PageMeta::compute(request, entries.len() as u64);
        let data = entries
            .into_iter()
            .skip(meta.offset())
            .take(meta.items_per_page as usize)
            .map(|e| e.bookmark.clone())
            .collect();

        Page { data, meta }
    }
}

/// Process-local bookmark store.
///
/// One instance is created at startup and shared by handle with every request.
/// Writers take the lock exclusively, so each mutation is observed completely
/// or not at all by concurrent listings.
#[derive(Default)]
pub struct InMemoryBookmarkRepository {
    collection: RwLock<Collection>,
}

impl InMemoryBookmarkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `bookmarks`, inserted in order.
    ///
    /// Duplicate ids keep the first occurrence.
    pub fn with_bookmarks(bookmarks: impl IntoIterator<Item = Bookmark>) -> Self {
        let mut collection = Collection::default();
        for bookmark in bookmarks {
            if collection.entries.contains_key(&bookmark.id) {
                continue;
            }
            let seq = collection.next_seq;
            collection.next_seq += 1;
            collection
                .entries
                .insert(bookmark.id.clone(), Entry { bookmark, seq });
        }

        Self {
            collection: RwLock::new(collection),
        }
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryBookmarkRepository {
    async fn save(&self, bookmark: Bookmark) -> Result<Bookmark, AppError> {
        let mut collection = self.collection.write().await;

        if collection.entries.contains_key(&bookmark.id) {
            return Err(AppError::conflict(
                "Bookmark id already exists",
                json!({ "id": bookmark.id }),
            ));
        }

        let seq = collection.next_seq;
        collection.next_seq += 1;
        collection.entries.insert(
            bookmark.id.clone(),
            Entry {
                bookmark: bookmark.clone(),
                seq,
            },
        );

        tracing::debug!(id = %bookmark.id, "Bookmark saved");
        Ok(bookmark)
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Bookmark>, AppError> {
        let collection = self.collection.read().await;
        Ok(collection.page(request))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Bookmark>, AppError> {
        let collection = self.collection.read().await;
        Ok(collection.entries.get(id).map(|e| e.bookmark.clone()))
    }

    async fn update(&self, id: &str, patch: BookmarkPatch) -> Result<Option<Bookmark>, AppError> {
        let mut collection = self.collection.write().await;

        let Some(entry) = collection.entries.get_mut(id) else {
            return Ok(None);
        };

        let bookmark = &mut entry.bookmark;
        if let Some(title) = patch.title {
            bookmark.title = title;
        }
        if let Some(url) = patch.url {
            bookmark.url = url;
        }
        if let Some(description) = patch.description {
            bookmark.description = if description.is_empty() {
                None
            } else {
                Some(description)
            };
        }
        bookmark.updated_at = Utc::now().max(bookmark.created_at);

        tracing::debug!(id, "Bookmark updated");
        Ok(Some(bookmark.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let mut collection = self.collection.write().await;
        let removed = collection.entries.remove(id).is_some();
        if removed {
            tracing::debug!(id, "Bookmark deleted");
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.collection.read().await.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};

    fn bookmark_at(id: &str, at: DateTime<Utc>) -> Bookmark {
        Bookmark::new(
            id.to_string(),
            format!("Title {id}"),
            format!("https://{id}.example.com"),
            None,
            at,
        )
    }

    #[tokio::test]
    async fn test_ties_break_by_latest_insertion() {
        let at = Utc::now();
        let repo = InMemoryBookmarkRepository::new();
        repo.save(bookmark_at("first", at)).await.unwrap();
        repo.save(bookmark_at("second", at)).await.unwrap();
        repo.save(bookmark_at("third", at)).await.unwrap();

        let page = repo.find_page(PageRequest::default()).await.unwrap();
        let ids: Vec<&str> = page.data.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_ordering_is_stable_across_queries() {
        let at = Utc::now();
        let repo = InMemoryBookmarkRepository::with_bookmarks(
            (0..30).map(|i| bookmark_at(&format!("b{i}"), at - Duration::seconds(i % 3))),
        );

        let a = repo.find_page(PageRequest::new(1, 100)).await.unwrap();
        let b = repo.find_page(PageRequest::new(1, 100)).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_find_page_slices_the_full_ordering() {
        let now = Utc::now();
        let repo = InMemoryBookmarkRepository::with_bookmarks(
            (0..45).map(|i| bookmark_at(&format!("b{i}"), now - Duration::minutes(i))),
        );

        let middle = repo.find_page(PageRequest::new(2, 20)).await.unwrap();
        let ids: Vec<String> = middle.data.iter().map(|b| b.id.clone()).collect();
        let expected: Vec<String> = (20..40).map(|i| format!("b{i}")).collect();
        assert_eq!(ids, expected);
        assert_eq!(middle.meta.total_items, 45);

        let past_end = repo.find_page(PageRequest::new(99, 20)).await.unwrap();
        assert_eq!(past_end.meta.current_page, 3);
        assert_eq!(past_end.data.len(), 5);
        assert_eq!(past_end.data[0].id, "b40");
    }

    #[tokio::test]
    async fn test_save_duplicate_id_conflicts() {
        let repo = InMemoryBookmarkRepository::new();
        repo.save(bookmark_at("dup", Utc::now())).await.unwrap();

        let err = repo.save(bookmark_at("dup", Utc::now())).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_with_bookmarks_skips_duplicate_ids() {
        let at = Utc::now();
        let repo = InMemoryBookmarkRepository::with_bookmarks(vec![
            bookmark_at("a", at),
            bookmark_at("a", at),
            bookmark_at("b", at),
        ]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_preserves_created_at_and_moves_to_head() {
        let now = Utc::now();
        let repo = InMemoryBookmarkRepository::with_bookmarks(vec![
            bookmark_at("old", now - Duration::days(2)),
            bookmark_at("new", now - Duration::days(1)),
        ]);

        let patch = BookmarkPatch {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let updated = repo.update("old", patch).await.unwrap().unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.created_at, now - Duration::days(2));
        assert!(updated.updated_at > updated.created_at);

        let page = repo.find_page(PageRequest::default()).await.unwrap();
        assert_eq!(page.data[0].id, "old");
    }

    #[tokio::test]
    async fn test_update_empty_description_clears_it() {
        let mut b = bookmark_at("d", Utc::now());
        b.description = Some("something".to_string());
        let repo = InMemoryBookmarkRepository::with_bookmarks(vec![b]);

        let patch = BookmarkPatch {
            description: Some(String::new()),
            ..Default::default()
        };
        let updated = repo.update("d", patch).await.unwrap().unwrap();
        assert!(updated.description.is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_returns_none() {
        let repo = InMemoryBookmarkRepository::new();
        let result = repo.update("ghost", BookmarkPatch::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = InMemoryBookmarkRepository::with_bookmarks(vec![bookmark_at("x", Utc::now())]);

        assert!(repo.delete_by_id("x").await.unwrap());
        assert!(!repo.delete_by_id("x").await.unwrap());
        assert!(repo.find_by_id("x").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
