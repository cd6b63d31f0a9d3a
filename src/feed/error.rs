//! Errors from fetching and decoding the photo feed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Failed to construct the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Feed URL could not be parsed
    #[error("Invalid feed url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Transport failure (DNS, connect, timeout, body read)
    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("'{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body is not the expected feed JSON
    #[error("Failed to decode feed: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// Author string without the `("...")` wrapping
    #[error("Malformed author '{raw}'")]
    MalformedAuthor { raw: String },

    /// Downloaded bytes are not a decodable image
    #[error("Failed to decode image '{url}': {source}")]
    Image {
        url: String,
        #[source]
        source: image::ImageError,
    },

    /// A background decode task panicked or was cancelled
    #[error("Decode task for '{url}' failed: {source}")]
    Worker {
        url: String,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl FeedError {
    /// Whether the poller should try again before the next interval.
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedError::Request { .. } | FeedError::Decode { .. } => true,
            FeedError::Status { status, .. } => *status == 429 || *status >= 500,
            FeedError::Client(_)
            | FeedError::InvalidUrl { .. }
            | FeedError::MalformedAuthor { .. }
            | FeedError::Image { .. }
            | FeedError::Worker { .. } => false,
        }
    }

    /// Short label for the header status line.
    pub fn short(&self) -> String {
        match self {
            FeedError::Client(_) => "client error".to_string(),
            FeedError::InvalidUrl { .. } => "invalid url".to_string(),
            FeedError::Request { source, .. } if source.is_timeout() => "timed out".to_string(),
            FeedError::Request { .. } => "unreachable".to_string(),
            FeedError::Status { status, .. } => format!("HTTP {}", status),
            FeedError::Decode { .. } => "bad response".to_string(),
            FeedError::MalformedAuthor { .. } => "bad author".to_string(),
            FeedError::Image { .. } => "bad image".to_string(),
            FeedError::Worker { .. } => "decode failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        let err = FeedError::Status {
            url: "http://x".into(),
            status: 503,
        };
        assert!(err.is_retryable());
        assert_eq!(err.short(), "HTTP 503");
    }

    #[test]
    fn client_errors_are_not_retryable() {
        let err = FeedError::Status {
            url: "http://x".into(),
            status: 404,
        };
        assert!(!err.is_retryable());
        assert!(!FeedError::MalformedAuthor { raw: "x".into() }.is_retryable());
    }

    #[test]
    fn rate_limit_is_retryable() {
        let err = FeedError::Status {
            url: "http://x".into(),
            status: 429,
        };
        assert!(err.is_retryable());
    }
}
