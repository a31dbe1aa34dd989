//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`BookmarkRepository`] - Bookmark CRUD and paginated listing

pub mod bookmark_repository;

pub use bookmark_repository::BookmarkRepository;

#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
