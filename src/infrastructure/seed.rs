//! Synthetic bookmark data used to populate the store at startup.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::domain::entities::Bookmark;

const CATEGORIES: &[&str] = &[
    "Technology",
    "News",
    "Social Media",
    "Entertainment",
    "Education",
    "Shopping",
    "Sports",
    "Health",
    "Finance",
    "Travel",
];

const DOMAINS: &[&str] = &[
    "example.com",
    "demo.org",
    "sample.net",
    "test.io",
    "site.co",
    "web.app",
    "platform.dev",
    "service.com",
    "portal.net",
    "hub.org",
];

const TITLE_PREFIXES: &[&str] = &[
    "Ultimate Guide to",
    "Best Practices for",
    "Introduction to",
    "Advanced",
    "Complete Tutorial on",
    "Tips and Tricks for",
    "Comprehensive Guide to",
    "Getting Started with",
    "Mastering",
    "Essential",
];

/// Generates `count` bookmarks dated within the year before `now`.
///
/// Titles and urls are numbered from 1 so generated records are unique and
/// easy to search for.
pub fn generate_bookmarks<R: Rng>(count: usize, now: DateTime<Utc>, rng: &mut R) -> Vec<Bookmark> {
    (1..=count)
        .map(|n| {
            let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
            let domain = DOMAINS[rng.random_range(0..DOMAINS.len())];
            let prefix = TITLE_PREFIXES[rng.random_range(0..TITLE_PREFIXES.len())];
            let created_at = now - Duration::days(rng.random_range(0..365));
            let slug = category.to_lowercase().replace(' ', "-");

            Bookmark::new(
                Uuid::new_v4().to_string(),
                format!("{prefix} {category} {n}"),
                format!("https://{domain}/{slug}/item-{n}"),
                Some(format!(
                    "This is a detailed description for {category} bookmark #{n}. \
                     It contains valuable information and resources about {}.",
                    category.to_lowercase()
                )),
                created_at,
            )
        })
        .collect()
}
