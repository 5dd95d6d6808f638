// src/models/event.rs

//! Event data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Project;

/// One hackathon instance being tracked, identified by its site slug.
///
/// An event owns its projects; no project belongs to two events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Event {
    /// Site slug, e.g. "vibe-coding-hackathon"
    pub id: String,

    /// Projects in listing order
    pub projects: Vec<Project>,

    /// When the full listing was last fetched
    #[serde(default)]
    pub last_refresh: Option<DateTime<Utc>>,

    /// When a caller last asked for this event; `None` until first access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_requested: Option<DateTime<Utc>>,
}
