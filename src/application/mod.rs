//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers a small API that
//! already enforces validation, trimming and identity assignment.
//!
//! # Available Services
//!
//! - [`services::bookmark_service::BookmarkService`] - Bookmark CRUD and stats

pub mod services;
