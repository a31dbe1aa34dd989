//! # Bookmark Manager
//!
//! A bookmark service built with Axum, plus the list client that pages,
//! searches and edits it.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Bookmark entity, pagination contract and repository trait
//! - **Application Layer** ([`application`]) - Validation and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store and seed data
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//! - **Client** ([`client`]) - Paginated list synchronizer with optimistic deletes
//!
//! ## Features
//!
//! - Newest-first pagination with clamped page requests
//! - Local debounced search over every loaded page
//! - Windowed rendering of large lists
//! - Optimistic delete with rollback on failure
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the service with 5000 synthetic bookmarks
//! cargo run
//!
//! # Browse them from the terminal
//! cargo run --bin bookmarks -- list --search rust
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod client;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::BookmarkService;
    pub use crate::client::{BookmarkApi, ClientError, HttpBookmarkApi, ListSynchronizer};
    pub use crate::domain::entities::{Bookmark, BookmarkPatch, NewBookmark};
    pub use crate::domain::pagination::{Page, PageMeta, PageRequest};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::InMemoryBookmarkRepository;
    pub use crate::state::AppState;
}
