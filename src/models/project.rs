// src/models/project.rs

//! Project and team member data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A team member on a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Display name
    pub name: String,

    /// Profile page URL
    pub url: String,

    /// Avatar image URL
    pub avatar_url: String,
}

/// One submission within an event.
///
/// The structural fields (title, tagline, team, likes, ...) come from the
/// gallery listing; `description`, `description_md` and `tags` are only
/// populated by a detail page fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Project {
    /// Site-assigned stable identifier; the merge key
    pub id: String,

    /// URL slug, the last path segment of `url`
    pub short_name: String,

    /// Project title
    pub title: String,

    /// Full URL of the project detail page
    pub url: String,

    /// One-line pitch shown on the gallery card
    pub tagline: String,

    /// Thumbnail image URL
    pub image: String,

    /// Whether the project carries a winner badge
    pub winner: bool,

    /// Team members in page order
    pub team: Vec<Person>,

    /// Like count from the gallery card
    pub likes: i64,

    /// Plain-text rendering of the detail page description
    pub description: String,

    /// Markdown rendering of the detail page description
    pub description_md: String,

    /// "Built with" tags from the detail page
    pub tags: Vec<String>,

    /// When this project's detail page was last fetched
    #[serde(default)]
    pub last_refresh: Option<DateTime<Utc>>,
}

impl Project {
    /// Hash over all fields except `last_refresh`, so collaborators can
    /// detect when a project's substance changed rather than just its
    /// refresh time.
    pub fn content_hash(&self) -> String {
        let mut stripped = self.clone();
        stripped.last_refresh = None;
        let bytes = serde_json::to_vec(&stripped).unwrap_or_default();
        let digest = Sha256::digest(&bytes);
        hex::encode(&digest[..16])
    }
}
