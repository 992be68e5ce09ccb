//! Shopify-backed media sources.

use std::sync::Arc;

use async_trait::async_trait;
use store_media_core::{FileRecord, ProductRecord};
use tracing::instrument;

use crate::config::StoreMediaConfig;
use crate::shopify::{AdminClient, AdminShopifyError};

use super::media::{
    FileSource, MediaOptions, ProductImageSource, SourceError, StoreMediaService,
};

/// Reads product images and library files through the Admin API.
#[derive(Clone)]
pub struct ShopifyMediaSource {
    client: AdminClient,
    max_pages: u32,
    images_per_product: i64,
}

impl ShopifyMediaSource {
    /// Create a source that reads at most `max_pages` pages per fetch.
    #[must_use]
    pub const fn new(client: AdminClient, max_pages: u32, images_per_product: i64) -> Self {
        Self {
            client,
            max_pages,
            images_per_product,
        }
    }

    /// The underlying Admin API client.
    #[must_use]
    pub const fn client(&self) -> &AdminClient {
        &self.client
    }
}

#[async_trait]
impl ProductImageSource for ShopifyMediaSource {
    #[instrument(skip(self), fields(store = %self.client.store()))]
    async fn fetch_products(&self, page_size: i64) -> Result<Vec<ProductRecord>, SourceError> {
        Ok(self
            .client
            .fetch_product_records(page_size, self.max_pages, self.images_per_product)
            .await?)
    }
}

#[async_trait]
impl FileSource for ShopifyMediaSource {
    #[instrument(skip(self), fields(store = %self.client.store()))]
    async fn fetch_files(&self, page_size: i64) -> Result<Vec<FileRecord>, SourceError> {
        Ok(self
            .client
            .fetch_file_records(page_size, self.max_pages)
            .await?)
    }
}

/// Build a [`StoreMediaService`] backed by the Admin API.
///
/// The file library is left out when `media.include_files` is off.
///
/// # Errors
///
/// Returns an error if the Admin API client cannot be built.
pub fn build_service(config: &StoreMediaConfig) -> Result<StoreMediaService, AdminShopifyError> {
    let client = AdminClient::new(&config.shopify)?;
    let source = Arc::new(ShopifyMediaSource::new(
        client,
        config.media.max_pages,
        config.media.images_per_product,
    ));

    let files: Option<Arc<dyn FileSource>> = if config.media.include_files {
        Some(source.clone())
    } else {
        None
    };

    Ok(StoreMediaService::new(
        source,
        files,
        MediaOptions::from(&config.media),
    ))
}
