use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::ident::{Id, IdGen};
use crate::merge;
use crate::models::{Entry, Feed, Snapshot};
use crate::parser::ParsedEntry;

#[derive(Debug, Default)]
struct RegistryInner {
    feeds: Vec<Feed>,
    // Global collection, most recently discovered first.
    entries: Vec<Entry>,
    viewed: HashSet<Id>,
}

/// In-memory store of all tracked feeds and their entries. Cheap to clone;
/// clones share state. One instance per running session, empty at startup.
///
/// Every commit runs its read-merge-write sequence under a single write
/// lock, so concurrently completing cycles serialize instead of
/// interleaving.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn feeds(&self) -> Vec<Feed> {
        self.inner.read().await.feeds.clone()
    }

    pub async fn entries(&self) -> Vec<Entry> {
        self.inner.read().await.entries.clone()
    }

    /// Source URLs of every tracked feed, for registration validation.
    pub async fn feed_urls(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        inner.feeds.iter().map(|feed| feed.url.clone()).collect()
    }

    pub async fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().await;
        Snapshot {
            feeds: inner.feeds.clone(),
            entries: inner.entries.clone(),
        }
    }

    /// Registration commit: stores the feed and merges its initial entries
    /// in one critical section. Returns the entries that were added.
    pub async fn commit_feed(&self, feed: Feed, parsed: &[ParsedEntry], ids: &IdGen) -> Vec<Entry> {
        let mut inner = self.inner.write().await;
        let feed_id = feed.id;
        inner.feeds.push(feed);
        let outcome = merge::merge(&inner.entries, feed_id, parsed, ids);
        let fresh = outcome.updated[..outcome.added].to_vec();
        inner.entries = outcome.updated;
        fresh
    }

    /// Recurring-cycle commit for an already tracked feed. Returns the
    /// entries that were added.
    pub async fn merge_entries(
        &self,
        feed_id: Id,
        parsed: &[ParsedEntry],
        ids: &IdGen,
    ) -> Vec<Entry> {
        let mut inner = self.inner.write().await;
        let outcome = merge::merge(&inner.entries, feed_id, parsed, ids);
        let fresh = outcome.updated[..outcome.added].to_vec();
        inner.entries = outcome.updated;
        fresh
    }

    /// Marks an entry as opened by the user. Append-only; returns whether
    /// the entry was newly marked.
    pub async fn mark_viewed(&self, id: Id) -> bool {
        self.inner.write().await.viewed.insert(id)
    }

    pub async fn is_viewed(&self, id: Id) -> bool {
        self.inner.read().await.viewed.contains(&id)
    }
}
