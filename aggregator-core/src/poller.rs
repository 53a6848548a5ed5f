use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::PollError;
use crate::fetch::ProxyFetcher;
use crate::ident::{Id, IdGen};
use crate::models::{Entry, Feed};
use crate::parser::parse_feed;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub request_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Registry-changed notifications, delivered once per committed change.
#[derive(Debug, Clone)]
pub enum Event {
    FeedAdded(Id),
    NewEntries(Id, Vec<Entry>),
}

/// Drives one recurring fetch-parse-merge task per tracked feed.
///
/// Feeds fail independently: a cycle that hits a network or parse error is
/// logged and the feed simply waits for its next tick.
pub struct Poller {
    registry: Registry,
    fetcher: ProxyFetcher,
    ids: Arc<IdGen>,
    config: PollConfig,
    updates: mpsc::Sender<Event>,
    cancel_tx: broadcast::Sender<()>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Poller {
    pub fn new(
        registry: Registry,
        fetcher: ProxyFetcher,
        config: PollConfig,
        updates: mpsc::Sender<Event>,
    ) -> Self {
        let (cancel_tx, _) = broadcast::channel(1);
        Self {
            registry,
            fetcher,
            ids: Arc::new(IdGen::new()),
            config,
            updates,
            cancel_tx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Registers a feed URL: one immediate fetch-parse-merge cycle, then a
    /// recurring schedule.
    ///
    /// On failure the error kind is returned to the caller and the registry
    /// is left untouched; nothing is scheduled.
    pub async fn track(&self, url: &str) -> Result<Id, PollError> {
        let raw = self.fetcher.fetch(url).await?;
        let parsed = parse_feed(&raw)?;

        let feed_id = self.ids.next_id();
        let feed = Feed {
            id: feed_id,
            title: parsed.title,
            description: parsed.description,
            url: url.to_owned(),
        };
        let fresh = self
            .registry
            .commit_feed(feed, &parsed.entries, &self.ids)
            .await;
        info!(feed = %url, entries = fresh.len(), "feed registered");

        self.notify(Event::FeedAdded(feed_id)).await;
        if !fresh.is_empty() {
            self.notify(Event::NewEntries(feed_id, fresh)).await;
        }

        self.spawn_feed_task(feed_id, url.to_owned()).await;
        Ok(feed_id)
    }

    /// Runs one cycle for a tracked feed right now, outside its schedule.
    /// Returns how many entries the merge added.
    pub async fn poll_now(&self, feed_id: Id) -> Result<usize, PollError> {
        let feeds = self.registry.feeds().await;
        let feed = feeds
            .iter()
            .find(|feed| feed.id == feed_id)
            .ok_or(PollError::UnknownFeed(feed_id))?;
        run_cycle(
            &self.fetcher,
            &self.registry,
            &self.ids,
            feed_id,
            &feed.url,
            &self.updates,
        )
        .await
    }

    /// Stops all recurring polling and waits for every feed task to wind
    /// down. No re-scheduling happens afterwards.
    pub async fn stop(self) -> Result<(), PollError> {
        let _ = self.cancel_tx.send(());
        for task in self.tasks.into_inner() {
            task.await?;
        }
        Ok(())
    }

    async fn notify(&self, event: Event) {
        if self.updates.send(event).await.is_err() {
            warn!("update receiver dropped");
        }
    }

    async fn spawn_feed_task(&self, feed_id: Id, url: String) {
        let fetcher = self.fetcher.clone();
        let registry = self.registry.clone();
        let ids = self.ids.clone();
        let updates = self.updates.clone();
        let interval = self.config.interval;
        let mut cancel_rx = self.cancel_tx.subscribe();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // An interval's first tick completes immediately, and
            // registration has already ingested the feed once.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = cancel_rx.recv() => {
                        debug!(feed = %url, "polling stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        match run_cycle(&fetcher, &registry, &ids, feed_id, &url, &updates).await {
                            Ok(added) if added > 0 => {
                                info!(feed = %url, added, "merged new entries");
                            }
                            Ok(_) => {}
                            Err(err) => {
                                warn!(feed = %url, error = %err, "poll cycle failed");
                            }
                        }
                    }
                }
            }
        });

        self.tasks.lock().await.push(task);
    }
}

async fn run_cycle(
    fetcher: &ProxyFetcher,
    registry: &Registry,
    ids: &IdGen,
    feed_id: Id,
    url: &str,
    updates: &mpsc::Sender<Event>,
) -> Result<usize, PollError> {
    let raw = fetcher.fetch(url).await?;
    // Only entries are reconciled; feed title and description are fixed at
    // registration.
    let parsed = parse_feed(&raw)?;
    let fresh = registry.merge_entries(feed_id, &parsed.entries, ids).await;
    let added = fresh.len();
    if added > 0 && updates.send(Event::NewEntries(feed_id, fresh)).await.is_err() {
        warn!("update receiver dropped");
    }
    Ok(added)
}
