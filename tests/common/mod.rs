//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_feed;

use photofeed::config::{Config, FeedConfig};
use photofeed::feed::{FeedEvent, FeedItem};
use photofeed::store::selectors::visible_images;
use photofeed::store::{add_image, AppState, Store};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Feed settings pointed at a mock server with fast retries.
pub fn fast_feed_config(url: &str) -> FeedConfig {
    FeedConfig {
        url: url.to_string(),
        poll_interval_seconds: 3600,
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
        max_retries: 2,
        retry_backoff_base_ms: 10,
        retry_backoff_max_ms: 40,
    }
}

pub fn item(url: &str, author: &str) -> FeedItem {
    FeedItem {
        image_url: url.to_string(),
        author: author.to_string(),
    }
}

pub fn batch(items: Vec<FeedItem>) -> FeedEvent {
    FeedEvent::Batch {
        items,
        skipped: 0,
        fetched_at: Instant::now(),
    }
}

/// A store holding `urls`, all by the same author.
pub fn store_with(urls: &[&str]) -> Store {
    let mut store = Store::new();
    for url in urls {
        store.dispatch(add_image(*url, "x"));
    }
    store
}

/// Receive from a tokio channel or panic after `timeout`.
pub async fn recv_within<T>(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<T>,
    timeout: Duration,
) -> T {
    tokio::time::timeout(timeout, rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("channel closed")
}

/// Urls the image list would render right now.
pub fn visible_urls(store: &Store) -> Vec<String> {
    visible_images(&store.state())
        .into_iter()
        .map(|image| image.image_url.clone())
        .collect()
}
