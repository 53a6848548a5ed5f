use std::time::Duration;

use aggregator_core::{
    validate_candidate, Event, PollConfig, Poller, ProxyFetcher, Registry, DEFAULT_PROXY,
};
use reqwest::{redirect, ClientBuilder};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() {
    init_tracing();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        eprintln!("usage: aggregator-cli <feed-url>...");
        std::process::exit(2);
    }

    let client = ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .user_agent("aggregator-cli/0.1")
        .build()
        .expect("failed to build HTTP client");
    let proxy = Url::parse(DEFAULT_PROXY).expect("default proxy URL is well-formed");
    let config = PollConfig {
        interval: Duration::from_secs(5),
        request_timeout: Duration::from_secs(10),
    };
    let fetcher = ProxyFetcher::new(client, proxy, config.request_timeout);

    let registry = Registry::new();
    let (update_tx, mut update_rx) = mpsc::channel(64);
    let poller = Poller::new(registry.clone(), fetcher, config, update_tx);

    for url in &urls {
        let registered = registry.feed_urls().await;
        match validate_candidate(url, &registered) {
            Ok(_) => match poller.track(url).await {
                Ok(id) => info!(%url, feed = %id, "tracking feed"),
                Err(err) => warn!(%url, error = %err, "could not load feed"),
            },
            Err(err) => warn!(%url, error = %err, "rejected feed URL"),
        }
    }

    if registry.feeds().await.is_empty() {
        eprintln!("no feeds could be registered");
        std::process::exit(1);
    }

    // Registration events are already queued on the channel, so the event
    // loop renders the initial entries as well as everything merged later.
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            event = update_rx.recv() => match event {
                Some(Event::FeedAdded(feed_id)) => {
                    let snapshot = registry.snapshot().await;
                    if let Some(feed) = snapshot.feeds.iter().find(|feed| feed.id == feed_id) {
                        println!("{}: {}", feed.title, feed.description);
                    }
                }
                Some(Event::NewEntries(_, entries)) => {
                    for entry in entries {
                        println!("* {} <{}>", entry.title, entry.link);
                    }
                }
                None => break,
            }
        }
    }

    if let Err(err) = poller.stop().await {
        warn!(error = %err, "poller shutdown failed");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
