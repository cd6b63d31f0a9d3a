//! Photo feed access: HTTP client, decoding, polling and thumbnails.

pub mod client;
pub mod error;
pub mod parse;
pub mod poller;
pub mod thumbnail;

pub use client::FeedClient;
pub use error::FeedError;
pub use parse::{decode_feed, extract_author, FeedItem, FeedPage};
pub use poller::{FeedEvent, FeedPoller, RefreshHandle, RetryPolicy};
pub use thumbnail::{Thumbnail, ThumbnailEvent, ThumbnailLoader, ThumbnailRequester};

/// Where background tasks send their results.
pub trait EventSink<E>: Send + 'static {
    /// Returns false once the receiving side is gone.
    fn deliver(&self, event: E) -> bool;
}

impl<E: Send + 'static> EventSink<E> for tokio::sync::mpsc::UnboundedSender<E> {
    fn deliver(&self, event: E) -> bool {
        self.send(event).is_ok()
    }
}
