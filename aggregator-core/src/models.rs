use serde::{Deserialize, Serialize};

use crate::ident::Id;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Feed {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Id,
    pub feed_id: Id,
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Read-only view of the registry handed to frontends. Entries are ordered
/// most recently discovered first, across all feeds.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Snapshot {
    pub feeds: Vec<Feed>,
    pub entries: Vec<Entry>,
}
