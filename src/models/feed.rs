//! RSS feed entry.

use serde::{Deserialize, Serialize};

/// One `<item>` of the incident history feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,

    /// HTML description, entity-encoded as published
    pub description: String,

    pub link: String,

    /// RFC-822 publication date
    pub published: String,
}
