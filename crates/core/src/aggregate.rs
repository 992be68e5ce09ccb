//! Merging product images and library files into one media list.
//!
//! Product images are visited first, then files. The first item seen for a
//! URL wins, so a product image always shadows a library file with the same
//! URL. The merged list is then stably sorted newest first, which keeps the
//! traversal order for items created at the same instant.

use std::collections::HashSet;

use tracing::debug;

use crate::types::{FilePayload, FileRecord, MediaItem, MediaKind, ProductRecord, VideoSource};

/// Alt text for library images without their own.
pub const DEFAULT_IMAGE_ALT: &str = "Store image";

/// Alt text for library videos without their own.
pub const DEFAULT_VIDEO_ALT: &str = "Store video";

/// Merge product images and, when available, library files into one list.
///
/// Pass `None` for `files` when the file library is disabled or could not be
/// fetched; the result then holds product images only.
#[must_use]
pub fn aggregate_media(
    products: &[ProductRecord],
    files: Option<&[FileRecord]>,
) -> Vec<MediaItem> {
    let candidates = products
        .iter()
        .flat_map(product_media)
        .chain(files.unwrap_or_default().iter().filter_map(file_media));

    let mut seen = HashSet::new();
    let mut items: Vec<MediaItem> = Vec::new();
    for item in candidates {
        if item.url.is_empty() {
            debug!(media_id = %item.id, "Dropping media without URL");
            continue;
        }
        if seen.insert(item.url.clone()) {
            items.push(item);
        } else {
            debug!(media_id = %item.id, url = %item.url, "Dropping duplicate media URL");
        }
    }

    // sort_by is stable: equal timestamps keep traversal order
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

fn product_media(product: &ProductRecord) -> impl Iterator<Item = MediaItem> + '_ {
    product.images.iter().map(move |image| MediaItem {
        id: image.id.clone(),
        kind: MediaKind::Image,
        url: image.url.clone(),
        alt_text: alt_or(image.alt_text.as_deref(), &product.title),
        width: image.width,
        height: image.height,
        product_id: Some(product.id.clone()),
        product_title: Some(product.title.clone()),
        created_at: product.created_at,
    })
}

fn file_media(file: &FileRecord) -> Option<MediaItem> {
    match &file.payload {
        FilePayload::Image(image) => Some(library_item(
            file,
            MediaKind::Image,
            &image.url,
            image.width,
            image.height,
            DEFAULT_IMAGE_ALT,
        )),
        FilePayload::Video { sources } => {
            let VideoSource {
                url, width, height, ..
            } = sources.first()?;
            Some(library_item(
                file,
                MediaKind::Video,
                url,
                *width,
                *height,
                DEFAULT_VIDEO_ALT,
            ))
        }
        FilePayload::Unsupported => None,
    }
}

fn library_item(
    file: &FileRecord,
    kind: MediaKind,
    url: &str,
    width: Option<i64>,
    height: Option<i64>,
    fallback_alt: &str,
) -> MediaItem {
    MediaItem {
        id: file.id.clone(),
        kind,
        url: url.to_string(),
        alt_text: alt_or(file.alt_text.as_deref(), fallback_alt),
        width,
        height,
        product_id: None,
        product_title: None,
        created_at: file.created_at,
    }
}

/// Use the source alt text unless it is missing or empty.
fn alt_or(alt: Option<&str>, fallback: &str) -> String {
    alt.filter(|a| !a.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
