//! User-visible, non-fatal notifications.

use std::fmt;

pub const DELETE_SUCCEEDED: &str = "Bookmark deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete bookmark";
pub const LOAD_FAILED: &str = "Failed to load more data";
pub const CREATE_SUCCEEDED: &str = "Bookmark added successfully!";
pub const CREATE_FAILED: &str = "Failed to add bookmark. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
