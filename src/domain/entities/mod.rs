//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! and partial updates:
//!
//! - [`Bookmark`] - A stored bookmark
//! - [`NewBookmark`] - Raw input for creating a bookmark
//! - [`BookmarkPatch`] - Partial update

pub mod bookmark;

pub use bookmark::{Bookmark, BookmarkPatch, NewBookmark};
