//! Periodic feed polling with retry and cancellation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Notify;
use tokio::time::{interval, sleep, MissedTickBehavior};

use crate::config::FeedConfig;
use crate::feed::client::FeedClient;
use crate::feed::parse::FeedItem;
use crate::feed::EventSink;
use crate::shutdown::ShutdownHandle;

/// Progress reported by the poller.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A poll started.
    Fetching,
    /// A poll succeeded; items are in response order.
    Batch {
        items: Vec<FeedItem>,
        skipped: usize,
        fetched_at: Instant,
    },
    /// An attempt failed and another one follows after `delay`.
    RetryScheduled {
        attempt: u32,
        delay: Duration,
        error: String,
    },
    /// Every attempt of this poll failed; the next poll runs on schedule.
    Failed { error: String },
}

/// Capped exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base: Duration,
    pub max: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.max)
    }
}

impl From<&FeedConfig> for RetryPolicy {
    fn from(config: &FeedConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base: Duration::from_millis(config.retry_backoff_base_ms),
            max: Duration::from_millis(config.retry_backoff_max_ms),
        }
    }
}

/// Asks the poller to fetch now instead of waiting for the next tick.
#[derive(Clone)]
pub struct RefreshHandle {
    notify: Arc<Notify>,
}

impl RefreshHandle {
    pub fn request(&self) {
        self.notify.notify_one();
    }
}

pub struct FeedPoller {
    client: FeedClient,
    interval: Duration,
    retry: RetryPolicy,
    refresh: Arc<Notify>,
    shutdown: ShutdownHandle,
}

impl FeedPoller {
    pub fn new(client: FeedClient, config: &FeedConfig, shutdown: ShutdownHandle) -> Self {
        Self {
            client,
            interval: Duration::from_secs(config.poll_interval_seconds),
            retry: RetryPolicy::from(config),
            refresh: Arc::new(Notify::new()),
            shutdown,
        }
    }

    pub fn refresh_handle(&self) -> RefreshHandle {
        RefreshHandle {
            notify: Arc::clone(&self.refresh),
        }
    }

    /// Polls at startup and then every interval until shutdown or until the
    /// sink is closed.
    pub async fn run<S: EventSink<FeedEvent>>(self, sink: S) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(url = %self.client.url(), interval = ?self.interval, "feed poller started");

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.wait() => break,
                _ = ticker.tick() => {}
                _ = self.refresh.notified() => {
                    tracing::debug!("manual refresh");
                    ticker.reset();
                }
            }

            if !self.poll_once(&sink).await {
                break;
            }
        }

        tracing::info!("feed poller stopped");
    }

    /// One poll including retries. Returns false when the poller should stop.
    async fn poll_once<S: EventSink<FeedEvent>>(&self, sink: &S) -> bool {
        if !sink.deliver(FeedEvent::Fetching) {
            return false;
        }

        let mut attempt = 0;
        loop {
            let result = tokio::select! {
                biased;
                _ = self.shutdown.wait() => return false,
                result = self.client.fetch() => result,
            };

            let error = match result {
                Ok(page) => {
                    tracing::info!(
                        items = page.items.len(),
                        skipped = page.skipped,
                        "feed fetched"
                    );
                    return sink.deliver(FeedEvent::Batch {
                        items: page.items,
                        skipped: page.skipped,
                        fetched_at: Instant::now(),
                    });
                }
                Err(error) => error,
            };

            if !error.is_retryable() || attempt >= self.retry.max_retries {
                tracing::warn!(error = %error, attempts = attempt + 1, "feed fetch failed");
                return sink.deliver(FeedEvent::Failed {
                    error: error.short(),
                });
            }

            let delay = self.retry.delay(attempt);
            attempt += 1;
            tracing::warn!(error = %error, attempt, ?delay, "feed fetch failed, retrying");
            if !sink.deliver(FeedEvent::RetryScheduled {
                attempt,
                delay,
                error: error.short(),
            }) {
                return false;
            }

            tokio::select! {
                biased;
                _ = self.shutdown.wait() => return false,
                _ = sleep(delay) => {}
            }
        }
    }
}
