//! Store media service.
//!
//! Fetches product images and library files from their sources and merges
//! them into one deduplicated, newest-first [`MediaList`].
//!
//! The product source is required: its failure is an error (or an empty list
//! with [`StoreMediaService::get_store_media_or_empty`]). The file source is
//! optional: stores on some plans cannot read the file library, so its
//! failure only drops library files from the result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use store_media_core::{FileRecord, MediaList, ProductRecord, aggregate_media};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::config::MediaSettings;
use crate::shopify::AdminShopifyError;

/// Default number of records requested from each source.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Errors a media source can report.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Shopify API call failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// The source did not answer before the deadline.
    #[error("Timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The source cannot serve this store.
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Whether the store is not allowed to read this source (plan or scope gate).
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        match self {
            Self::Shopify(e) => e.is_access_denied(),
            Self::Unavailable(_) => true,
            Self::Timeout(_) => false,
        }
    }
}

/// Errors returned by [`StoreMediaService::get_store_media`].
#[derive(Debug, Error)]
pub enum MediaError {
    /// The required product image source failed.
    #[error("Product image source failed: {0}")]
    ProductSource(#[source] SourceError),
}

/// Provider of products with their images.
#[async_trait]
pub trait ProductImageSource: Send + Sync {
    /// Fetch products, requesting at most `page_size` per page.
    async fn fetch_products(&self, page_size: i64) -> Result<Vec<ProductRecord>, SourceError>;
}

/// Provider of file library records.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Fetch files, requesting at most `page_size` per page.
    async fn fetch_files(&self, page_size: i64) -> Result<Vec<FileRecord>, SourceError>;
}

/// Options for a [`StoreMediaService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaOptions {
    /// Records requested per page from each source.
    pub page_size: i64,
    /// Deadline for each source fetch.
    pub source_timeout: Duration,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            source_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&MediaSettings> for MediaOptions {
    fn from(settings: &MediaSettings) -> Self {
        Self {
            page_size: settings.page_size,
            source_timeout: settings.source_timeout,
        }
    }
}

/// Aggregates store media from a product image source and an optional file source.
#[derive(Clone)]
pub struct StoreMediaService {
    products: Arc<dyn ProductImageSource>,
    files: Option<Arc<dyn FileSource>>,
    options: MediaOptions,
}

impl StoreMediaService {
    /// Create a new service. Pass `None` for `files` to skip the file library.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductImageSource>,
        files: Option<Arc<dyn FileSource>>,
        options: MediaOptions,
    ) -> Self {
        Self {
            products,
            files,
            options,
        }
    }

    /// Options this service was built with.
    #[must_use]
    pub const fn options(&self) -> &MediaOptions {
        &self.options
    }

    /// Whether a file library source is configured.
    #[must_use]
    pub const fn includes_files(&self) -> bool {
        self.files.is_some()
    }

    /// Fetch and merge store media.
    ///
    /// Both sources are queried concurrently. The result is the same regardless
    /// of which answers first: product images always take precedence over
    /// library files with the same URL.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::ProductSource` if the product image source fails or
    /// times out. File source failures never produce an error.
    #[instrument(skip(self), fields(page_size = self.options.page_size))]
    pub async fn get_store_media(&self) -> Result<MediaList, MediaError> {
        let (products, files) = tokio::join!(self.fetch_products(), self.fetch_files());
        let products = products.map_err(MediaError::ProductSource)?;

        let items = aggregate_media(&products, files.as_deref());
        let files_included = files.is_some();

        info!(
            products = products.len(),
            files = files.as_ref().map_or(0, Vec::len),
            items = items.len(),
            files_included,
            "Aggregated store media"
        );

        Ok(MediaList {
            items,
            files_included,
        })
    }

    /// Fetch and merge store media, returning an empty list if the product
    /// source fails.
    ///
    /// Callers that need to tell "no media" from "fetch failed" should use
    /// [`StoreMediaService::get_store_media`] instead.
    pub async fn get_store_media_or_empty(&self) -> MediaList {
        match self.get_store_media().await {
            Ok(list) => list,
            Err(e) => {
                error!(error = %e, "Failed to load store media, returning empty list");
                MediaList::default()
            }
        }
    }

    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, SourceError> {
        with_timeout(
            self.options.source_timeout,
            self.products.fetch_products(self.options.page_size),
        )
        .await
    }

    /// Fetch library files, or `None` if disabled or unavailable.
    async fn fetch_files(&self) -> Option<Vec<FileRecord>> {
        let source = self.files.as_ref()?;

        match with_timeout(
            self.options.source_timeout,
            source.fetch_files(self.options.page_size),
        )
        .await
        {
            Ok(files) => Some(files),
            Err(e) if e.is_access_denied() => {
                info!(error = %e, "File library not available for this store, using product images only");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch file library, using product images only");
                None
            }
        }
    }
}

/// Run a source fetch with a deadline.
async fn with_timeout<T>(
    limit: Duration,
    fetch: impl Future<Output = Result<T, SourceError>>,
) -> Result<T, SourceError> {
    tokio::time::timeout(limit, fetch)
        .await
        .map_err(|_| SourceError::Timeout(limit))?
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{TimeZone, Utc};
    use store_media_core::{
        FilePayload, FileStatus, ImagePayload, MediaId, ProductId, ProductImage,
    };

    use super::*;

    struct StaticProducts(Vec<ProductRecord>);

    #[async_trait]
    impl ProductImageSource for StaticProducts {
        async fn fetch_products(&self, _page_size: i64) -> Result<Vec<ProductRecord>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProducts;

    #[async_trait]
    impl ProductImageSource for FailingProducts {
        async fn fetch_products(&self, _page_size: i64) -> Result<Vec<ProductRecord>, SourceError> {
            Err(SourceError::Shopify(AdminShopifyError::RateLimited(30)))
        }
    }

    struct SlowFiles;

    #[async_trait]
    impl FileSource for SlowFiles {
        async fn fetch_files(&self, _page_size: i64) -> Result<Vec<FileRecord>, SourceError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }
    }

    struct StaticFiles(Vec<FileRecord>);

    #[async_trait]
    impl FileSource for StaticFiles {
        async fn fetch_files(&self, _page_size: i64) -> Result<Vec<FileRecord>, SourceError> {
            Ok(self.0.clone())
        }
    }

    fn shirt() -> ProductRecord {
        ProductRecord {
            id: ProductId::new("gid://shopify/Product/1"),
            title: "Shirt".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            images: vec![ProductImage {
                id: MediaId::new("gid://shopify/ProductImage/1"),
                url: "https://x/a.jpg".to_string(),
                alt_text: None,
                width: None,
                height: None,
            }],
        }
    }

    fn banner() -> FileRecord {
        FileRecord {
            id: MediaId::new("gid://shopify/MediaImage/2"),
            alt_text: None,
            created_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            status: FileStatus::Ready,
            payload: FilePayload::Image(ImagePayload {
                url: "https://x/banner.jpg".to_string(),
                width: None,
                height: None,
            }),
        }
    }

    fn options() -> MediaOptions {
        MediaOptions {
            page_size: 50,
            source_timeout: Duration::from_millis(50),
        }
    }

    #[tokio::test]
    async fn test_merges_both_sources() {
        let service = StoreMediaService::new(
            Arc::new(StaticProducts(vec![shirt()])),
            Some(Arc::new(StaticFiles(vec![banner()]))),
            options(),
        );

        let list = service.get_store_media().await.unwrap();

        assert!(list.files_included);
        assert_eq!(list.len(), 2);
        assert_eq!(list.items[0].url, "https://x/banner.jpg");
    }

    #[tokio::test]
    async fn test_slow_file_source_times_out_to_products_only() {
        let service = StoreMediaService::new(
            Arc::new(StaticProducts(vec![shirt()])),
            Some(Arc::new(SlowFiles)),
            options(),
        );

        let list = service.get_store_media().await.unwrap();

        assert!(!list.files_included);
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_product_failure_is_typed() {
        let service = StoreMediaService::new(Arc::new(FailingProducts), None, options());

        let err = service.get_store_media().await.unwrap_err();

        assert!(matches!(
            err,
            MediaError::ProductSource(SourceError::Shopify(AdminShopifyError::RateLimited(30)))
        ));
    }

    #[tokio::test]
    async fn test_product_failure_lenient_is_empty() {
        let service = StoreMediaService::new(
            Arc::new(FailingProducts),
            Some(Arc::new(StaticFiles(vec![banner()]))),
            options(),
        );

        assert!(service.get_store_media_or_empty().await.is_empty());
    }

    #[tokio::test]
    async fn test_with_timeout_maps_elapsed() {
        let result: Result<(), _> = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(SourceError::Timeout(d)) if d == Duration::from_millis(10)));
    }

    #[test]
    fn test_source_error_access_denied() {
        assert!(SourceError::Unavailable("plan".to_string()).is_access_denied());
        assert!(!SourceError::Timeout(Duration::from_secs(1)).is_access_denied());
        assert_eq!(
            SourceError::Timeout(Duration::from_secs(30)).to_string(),
            "Timed out after 30s"
        );
    }

    #[test]
    fn test_options_from_settings() {
        let settings = MediaSettings {
            page_size: 25,
            source_timeout: Duration::from_secs(9),
            ..MediaSettings::default()
        };
        let options = MediaOptions::from(&settings);
        assert_eq!(options.page_size, 25);
        assert_eq!(options.source_timeout, Duration::from_secs(9));
        assert_eq!(MediaOptions::default().page_size, DEFAULT_PAGE_SIZE);
    }
}
