//! Image download and downsampling for half-block rendering.
//!
//! A terminal cell shows two vertical pixels with `▀`: the foreground color is
//! the top pixel and the background color the bottom one. A thumbnail of
//! `cols x rows` cells therefore holds `cols x rows * 2` pixels.

use std::sync::Arc;

use image::imageops::FilterType;
use tokio::sync::{mpsc, Semaphore};

use crate::feed::client::FeedClient;
use crate::feed::error::FeedError;
use crate::feed::EventSink;
use crate::shutdown::ShutdownHandle;

/// Downsampled RGB pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    width: u16,
    height: u16,
    pixels: Vec<[u8; 3]>,
}

impl Thumbnail {
    /// Decodes `bytes` and fits the result into `cols x rows` cells,
    /// keeping the aspect ratio.
    pub fn decode(url: &str, bytes: &[u8], cols: u16, rows: u16) -> Result<Self, FeedError> {
        let decoded = image::load_from_memory(bytes).map_err(|source| FeedError::Image {
            url: url.to_string(),
            source,
        })?;
        let fitted = decoded
            .resize(
                u32::from(cols.max(1)),
                u32::from(rows.max(1)) * 2,
                FilterType::Triangle,
            )
            .to_rgb8();

        let width = fitted.width() as u16;
        let height = fitted.height() as u16;
        let pixels = fitted.pixels().map(|pixel| pixel.0).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels (= cells).
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels (= 2 per cell row).
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Height in cell rows.
    pub fn rows(&self) -> u16 {
        self.height.div_ceil(2)
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }
}

/// Result of one thumbnail download.
#[derive(Debug, Clone)]
pub struct ThumbnailEvent {
    pub image_url: String,
    pub result: Result<Arc<Thumbnail>, String>,
}

/// Queues image URLs for the loader task.
#[derive(Clone)]
pub struct ThumbnailRequester {
    tx: mpsc::UnboundedSender<String>,
}

impl ThumbnailRequester {
    /// Returns false once the loader has stopped.
    pub fn request(&self, image_url: &str) -> bool {
        self.tx.send(image_url.to_string()).is_ok()
    }
}

/// Downloads thumbnails with bounded concurrency.
pub struct ThumbnailLoader {
    client: FeedClient,
    permits: Arc<Semaphore>,
    cols: u16,
    rows: u16,
    rx: mpsc::UnboundedReceiver<String>,
    shutdown: ShutdownHandle,
}

impl ThumbnailLoader {
    pub fn new(
        client: FeedClient,
        max_concurrent: usize,
        cols: u16,
        rows: u16,
        shutdown: ShutdownHandle,
    ) -> (Self, ThumbnailRequester) {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = Self {
            client,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            cols,
            rows,
            rx,
            shutdown,
        };
        (loader, ThumbnailRequester { tx })
    }

    pub async fn run<S: EventSink<ThumbnailEvent> + Clone>(mut self, sink: S) {
        loop {
            let image_url = tokio::select! {
                biased;
                _ = self.shutdown.wait() => break,
                next = self.rx.recv() => match next {
                    Some(url) => url,
                    None => break,
                },
            };

            let permit = tokio::select! {
                biased;
                _ = self.shutdown.wait() => break,
                permit = Arc::clone(&self.permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let client = self.client.clone();
            let sink = sink.clone();
            let shutdown = self.shutdown.clone();
            let (cols, rows) = (self.cols, self.rows);
            tokio::spawn(async move {
                let _permit = permit;
                let result = tokio::select! {
                    biased;
                    _ = shutdown.wait() => return,
                    result = load(&client, &image_url, cols, rows) => result,
                };
                let result = result.map(Arc::new).map_err(|err| {
                    tracing::warn!(image_url = %image_url, error = %err, "thumbnail failed");
                    err.short()
                });
                sink.deliver(ThumbnailEvent { image_url, result });
            });
        }
        tracing::debug!("thumbnail loader stopped");
    }
}

async fn load(
    client: &FeedClient,
    url: &str,
    cols: u16,
    rows: u16,
) -> Result<Thumbnail, FeedError> {
    let bytes = client.fetch_bytes(url).await?;
    decode_blocking(url.to_string(), bytes, cols, rows).await
}

/// Runs [`Thumbnail::decode`] on the blocking pool.
async fn decode_blocking(
    url: String,
    bytes: Vec<u8>,
    cols: u16,
    rows: u16,
) -> Result<Thumbnail, FeedError> {
    let task_url = url.clone();
    tokio::task::spawn_blocking(move || Thumbnail::decode(&task_url, &bytes, cols, rows))
        .await
        .map_err(|source| FeedError::Worker { url, source })?
}
