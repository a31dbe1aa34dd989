mod common;

use bookmark_manager::api::dto::bookmark::{CreateBookmarkRequest, UpdateBookmarkRequest};
use bookmark_manager::client::{BookmarkApi, ClientError, HttpBookmarkApi, ListSynchronizer};
use bookmark_manager::domain::pagination::PageRequest;
use std::sync::Arc;

async fn client_for(n: usize) -> (bookmark_manager::AppState, HttpBookmarkApi) {
    let (state, _repo) = common::create_test_state(common::create_test_bookmarks(n));
    let base_url = common::spawn_server(state.clone()).await;
    (state, HttpBookmarkApi::new(base_url).unwrap())
}

#[tokio::test]
async fn test_fetch_page_over_http() {
    let (_state, api) = client_for(45).await;

    let page = api.fetch_page(PageRequest::new(3, 20)).await.unwrap();

    assert_eq!(page.data.len(), 5);
    assert_eq!(page.data[0].id, "id-40");
    assert_eq!(page.meta.current_page, 3);
    assert_eq!(page.meta.total_items, 45);
    assert!(!page.meta.has_next_page);
    assert!(page.meta.has_previous_page);
}

#[tokio::test]
async fn test_create_get_update_delete_over_http() {
    let (_state, api) = client_for(0).await;

    let created = api
        .create(CreateBookmarkRequest {
            title: "  Rust Book  ".to_string(),
            url: "https://doc.rust-lang.org/book/".to_string(),
            description: Some("The book".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(created.title, "Rust Book");

    let fetched = api.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = api
        .update(
            &created.id,
            UpdateBookmarkRequest {
                title: Some("The Rust Book".to_string()),
                url: None,
                description: Some(String::new()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "The Rust Book");
    assert_eq!(updated.description, None);

    api.delete(&created.id).await.unwrap();
    assert!(api.get(&created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_not_found_maps_to_client_error() {
    let (_state, api) = client_for(1).await;

    let err = api.delete("nonexistent").await.unwrap_err();

    assert_eq!(
        err,
        ClientError::NotFound {
            message: "Bookmark with ID nonexistent not found".to_string()
        }
    );
}

#[tokio::test]
async fn test_validation_error_lists_fields() {
    let (_state, api) = client_for(0).await;

    let err = api
        .create(CreateBookmarkRequest {
            title: "Test".to_string(),
            url: "not-a-valid-url".to_string(),
            description: None,
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Validation { fields, .. } => assert_eq!(fields, vec!["url".to_string()]),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ids_with_reserved_characters_are_encoded() {
    let (_state, api) = client_for(1).await;

    let err = api.get("a/b?c").await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_stats_over_http() {
    let (_state, api) = client_for(12).await;

    let stats = api.stats().await.unwrap();

    assert_eq!(stats.total_bookmarks, 12);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let api = HttpBookmarkApi::new("http://127.0.0.1:1/api/v1").unwrap();

    let err = api.stats().await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
}

#[tokio::test]
async fn test_synchronizer_end_to_end() {
    let (state, api) = client_for(30).await;
    let mut sync = ListSynchronizer::new(Arc::new(api));

    sync.load_more().await.unwrap();
    sync.load_more().await.unwrap();
    assert_eq!(sync.items().len(), 30);
    assert!(!sync.has_more());

    sync.delete("id-7").await.unwrap();
    assert_eq!(sync.total_items(), Some(29));
    assert_eq!(state.bookmark_service.count().await.unwrap(), 29);

    let err = sync.delete("id-7").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(sync.items().len(), 29);
}
