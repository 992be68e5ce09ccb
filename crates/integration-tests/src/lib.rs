//! Integration test support for store media.
//!
//! Provides in-memory media sources and record builders so the service can
//! be exercised end to end without a Shopify store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p store-media-integration-tests
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use store_media_admin::services::{
    FileSource, MediaOptions, ProductImageSource, SourceError, StoreMediaService,
};
use store_media_admin::shopify::{AdminShopifyError, GraphQLError};
use store_media_core::{
    FilePayload, FileRecord, FileStatus, ImagePayload, MediaId, ProductId, ProductImage,
    ProductRecord, VideoSource,
};

/// How a fake source answers.
#[derive(Debug, Clone)]
pub enum Behavior<T> {
    /// Return the records.
    Records(Vec<T>),
    /// Fail with a plan-gated access denied error.
    AccessDenied,
    /// Fail with a rate limit error.
    RateLimited,
    /// Answer after the given delay.
    Delayed(Duration, Vec<T>),
}

impl<T: Clone> Behavior<T> {
    async fn run(&self) -> Result<Vec<T>, SourceError> {
        match self {
            Self::Records(records) => Ok(records.clone()),
            Self::AccessDenied => Err(SourceError::Shopify(AdminShopifyError::GraphQL(vec![
                GraphQLError {
                    message: "Access denied for files field.".to_string(),
                    locations: vec![],
                    path: vec![],
                },
            ]))),
            Self::RateLimited => Err(SourceError::Shopify(AdminShopifyError::RateLimited(2))),
            Self::Delayed(delay, records) => {
                tokio::time::sleep(*delay).await;
                Ok(records.clone())
            }
        }
    }
}

/// In-memory media source that records how often and with which page size it was called.
#[derive(Debug)]
pub struct FakeSource<T> {
    behavior: Behavior<T>,
    calls: AtomicUsize,
    last_page_size: AtomicUsize,
}

impl<T> FakeSource<T> {
    #[must_use]
    pub fn new(behavior: Behavior<T>) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_page_size: AtomicUsize::new(0),
        })
    }

    /// Number of fetches served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Page size of the most recent fetch.
    pub fn last_page_size(&self) -> usize {
        self.last_page_size.load(Ordering::SeqCst)
    }

    fn record_call(&self, page_size: i64) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_page_size
            .store(usize::try_from(page_size).unwrap_or_default(), Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductImageSource for FakeSource<ProductRecord> {
    async fn fetch_products(&self, page_size: i64) -> Result<Vec<ProductRecord>, SourceError> {
        self.record_call(page_size);
        self.behavior.run().await
    }
}

#[async_trait]
impl FileSource for FakeSource<FileRecord> {
    async fn fetch_files(&self, page_size: i64) -> Result<Vec<FileRecord>, SourceError> {
        self.record_call(page_size);
        self.behavior.run().await
    }
}

/// Build a service over fake sources with a short timeout.
#[must_use]
pub fn service(
    products: Arc<FakeSource<ProductRecord>>,
    files: Option<Arc<FakeSource<FileRecord>>>,
) -> StoreMediaService {
    StoreMediaService::new(
        products,
        files.map(|f| f as Arc<dyn FileSource>),
        MediaOptions {
            page_size: 50,
            source_timeout: Duration::from_millis(200),
        },
    )
}

/// Parse an RFC 3339 timestamp.
///
/// # Panics
///
/// Panics on malformed input; fixtures only.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc)
}

/// A product with one image per URL, all sharing the product's creation time.
#[must_use]
pub fn product(id: u64, title: &str, created_at: &str, urls: &[&str]) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(format!("gid://shopify/Product/{id}")),
        title: title.to_string(),
        created_at: at(created_at),
        images: urls
            .iter()
            .enumerate()
            .map(|(i, url)| ProductImage {
                id: MediaId::new(format!("gid://shopify/ProductImage/{id}{i}")),
                url: (*url).to_string(),
                alt_text: None,
                width: Some(800),
                height: Some(600),
            })
            .collect(),
    }
}

/// A ready image file.
#[must_use]
pub fn image_file(id: u64, url: &str, created_at: &str) -> FileRecord {
    FileRecord {
        id: MediaId::new(format!("gid://shopify/MediaImage/{id}")),
        alt_text: None,
        created_at: at(created_at),
        status: FileStatus::Ready,
        payload: FilePayload::Image(ImagePayload {
            url: url.to_string(),
            width: Some(1200),
            height: Some(400),
        }),
    }
}

/// A video file with one source per `(url, width, height)`.
#[must_use]
pub fn video_file(id: u64, sources: &[(&str, i64, i64)], created_at: &str) -> FileRecord {
    FileRecord {
        id: MediaId::new(format!("gid://shopify/Video/{id}")),
        alt_text: None,
        created_at: at(created_at),
        status: FileStatus::Ready,
        payload: FilePayload::Video {
            sources: sources
                .iter()
                .map(|(url, width, height)| VideoSource {
                    url: (*url).to_string(),
                    mime_type: "video/mp4".to_string(),
                    width: Some(*width),
                    height: Some(*height),
                })
                .collect(),
        },
    }
}

/// A file with neither image nor video data.
#[must_use]
pub fn generic_file(id: u64, created_at: &str) -> FileRecord {
    FileRecord {
        id: MediaId::new(format!("gid://shopify/GenericFile/{id}")),
        alt_text: Some("Size chart".to_string()),
        created_at: at(created_at),
        status: FileStatus::Ready,
        payload: FilePayload::Unsupported,
    }
}
