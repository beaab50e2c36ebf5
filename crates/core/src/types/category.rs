//! Catalog category entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CategoryId;

/// Maximum length for a category name or slug.
pub const MAX_NAME_LEN: usize = 100;

/// A catalog category as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL slug, `^[a-z0-9-]+$`, max 100 chars.
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Whether a string is a well-formed category slug.
///
/// Slugs are non-empty, at most [`MAX_NAME_LEN`] characters, and contain only
/// lowercase ASCII alphanumerics and hyphens.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_NAME_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
