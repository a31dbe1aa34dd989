//! List client for the bookmark service.
//!
//! [`ListSynchronizer`] keeps a paginated, searchable list in sync with the
//! server. It merges pages into an [`AggregateView`], filters it locally,
//! renders only the visible rows and deletes optimistically with rollback.
//!
//! # Modules
//!
//! - [`api`] - Transport trait and its HTTP implementation
//! - [`aggregate`] - Merged, deduplicated, sorted view over fetched pages
//! - [`search`] - Debounced search input
//! - [`loader`] - Page request scheduling and in-order ingestion
//! - [`window`] - Visible row computation
//! - [`mutation`] - Optimistic delete coordinator
//! - [`notice`] - User-facing notifications
//! - [`synchronizer`] - Ties the above together

pub mod aggregate;
pub mod api;
pub mod error;
pub mod loader;
pub mod mutation;
pub mod notice;
pub mod search;
pub mod synchronizer;
pub mod window;

pub use aggregate::{AggregateView, RemovedEntry, filter_bookmarks};
pub use api::{BookmarkApi, HttpBookmarkApi};
pub use error::ClientError;
pub use loader::PageLoader;
pub use mutation::{DeleteCoordinator, DeleteOutcome, DeleteState, DeleteTicket};
pub use notice::{Notice, NoticeLevel};
pub use search::SearchInput;
pub use synchronizer::ListSynchronizer;
pub use window::{Row, Viewport, WindowedList};
