//! Repository implementations.
//!
//! # Repositories
//!
//! - [`InMemoryBookmarkRepository`] - Process-local bookmark collection

pub mod in_memory_bookmark_repository;

pub use in_memory_bookmark_repository::InMemoryBookmarkRepository;
