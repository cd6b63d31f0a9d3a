use std::time::Duration;

use reqwest::{Client, Url};

use crate::config::FeedConfig;
use crate::feed::error::FeedError;
use crate::feed::parse::{decode_feed, FeedPage};

const USER_AGENT: &str = concat!("photofeed/", env!("CARGO_PKG_VERSION"));

/// HTTP access to the photo feed and to the images it links.
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    url: String,
    endpoint: Url,
}

impl FeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(FeedError::Client)?;

        let mut endpoint = Url::parse(&config.url).map_err(|e| FeedError::InvalidUrl {
            url: config.url.clone(),
            message: e.to_string(),
        })?;
        endpoint
            .query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("nojsoncallback", "1");

        Ok(Self {
            client,
            url: config.url.clone(),
            endpoint,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The feed URL including the JSON format query.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One GET of the feed, decoded.
    pub async fn fetch(&self) -> Result<FeedPage, FeedError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|source| FeedError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FeedError::Request {
            url: self.url.clone(),
            source,
        })?;

        decode_feed(&body)
    }

    /// Raw bytes of an image linked from the feed.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FeedError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| FeedError::Request {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }
}
