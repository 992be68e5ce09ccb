//! Store media commands.
//!
//! # Usage
//!
//! ```bash
//! # Print the first page of media as JSON
//! store-media list --pretty
//!
//! # Follow up to 5 pages of 100 records from each source
//! store-media list --page-size 100 --max-pages 5
//!
//! # Product images only, never fail on Shopify errors
//! store-media list --skip-files --lenient
//!
//! # Counts by kind and source
//! store-media summary
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Store domain (e.g. `my-store.myshopify.com`)
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token
//! - `MEDIA_*` - Aggregation defaults, overridden by the flags below

use std::io::Write;

use serde::Serialize;
use store_media_admin::config::StoreMediaConfig;
use store_media_admin::error::AppError;
use store_media_admin::services::{StoreMediaService, build_service};
use store_media_core::{MediaKind, MediaList};

/// Flags that override the configured media settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOverrides {
    pub page_size: Option<i64>,
    pub max_pages: Option<u32>,
    pub skip_files: bool,
}

impl FetchOverrides {
    /// Apply the overrides to a loaded configuration.
    pub fn apply(self, config: &mut StoreMediaConfig) {
        if let Some(page_size) = self.page_size {
            config.media.page_size = page_size;
        }
        if let Some(max_pages) = self.max_pages {
            config.media.max_pages = max_pages;
        }
        if self.skip_files {
            config.media.include_files = false;
        }
    }
}

/// Media counts printed by `summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSummary {
    pub total: usize,
    pub images: usize,
    pub videos: usize,
    pub product_media: usize,
    pub library_media: usize,
    pub files_included: bool,
}

impl From<&MediaList> for MediaSummary {
    fn from(list: &MediaList) -> Self {
        let product_media = list.iter().filter(|m| m.is_product_media()).count();
        Self {
            total: list.len(),
            images: list.count_kind(MediaKind::Image),
            videos: list.count_kind(MediaKind::Video),
            product_media,
            library_media: list.len() - product_media,
            files_included: list.files_included,
        }
    }
}

/// Fetch store media with the typed or lenient policy.
async fn load(service: &StoreMediaService, lenient: bool) -> Result<MediaList, AppError> {
    if lenient {
        Ok(service.get_store_media_or_empty().await)
    } else {
        Ok(service.get_store_media().await?)
    }
}

/// Print the store's media as a JSON array.
///
/// # Errors
///
/// Returns an error if the service cannot be built, the product source fails
/// (unless `lenient`), or the output cannot be written.
pub async fn list(
    config: &StoreMediaConfig,
    lenient: bool,
    pretty: bool,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let service = build_service(config)?;
    let media = load(&service, lenient).await?;

    tracing::info!(
        items = media.len(),
        files_included = media.files_included,
        "Listing store media"
    );
    write_json(out, &media.items, pretty)
}

/// Print media counts by kind and source.
///
/// # Errors
///
/// Same as [`list`].
pub async fn summary(
    config: &StoreMediaConfig,
    lenient: bool,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let service = build_service(config)?;
    let media = load(&service, lenient).await?;

    write_summary(out, &MediaSummary::from(&media))
}

fn write_json<T: Serialize + ?Sized>(
    out: &mut impl Write,
    value: &T,
    pretty: bool,
) -> Result<(), AppError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &MediaSummary) -> Result<(), AppError> {
    writeln!(out, "Total:          {}", summary.total)?;
    writeln!(out, "Images:         {}", summary.images)?;
    writeln!(out, "Videos:         {}", summary.videos)?;
    writeln!(out, "Product media:  {}", summary.product_media)?;
    writeln!(out, "Library media:  {}", summary.library_media)?;
    writeln!(
        out,
        "File library:   {}",
        if summary.files_included {
            "included"
        } else {
            "not included"
        }
    )?;
    Ok(())
}
