//! Normalized media items returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MediaId, ProductId};
use super::status::MediaKind;

/// A single image or video from the store, regardless of which source it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Source-provided ID. Unique within its source only.
    pub id: MediaId,
    /// Image or video.
    pub kind: MediaKind,
    /// Media URL. Never empty; unique within a list.
    pub url: String,
    /// Alt text, with a fallback applied when the source had none.
    pub alt_text: String,
    /// Width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    /// Height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    /// Owning product, for product images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Owning product title, for product images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    /// Creation time; the list is ordered newest first on this field.
    pub created_at: DateTime<Utc>,
}

impl MediaItem {
    /// Whether this item came from a product rather than the file library.
    #[must_use]
    pub const fn is_product_media(&self) -> bool {
        self.product_id.is_some()
    }
}

/// Result of one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaList {
    /// Deduplicated items, newest first.
    pub items: Vec<MediaItem>,
    /// Whether the file library contributed. `false` when it was disabled or failed.
    pub files_included: bool,
}

impl MediaList {
    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, MediaItem> {
        self.items.iter()
    }

    /// Count items of the given kind.
    #[must_use]
    pub fn count_kind(&self, kind: MediaKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    /// Consume the list, returning the items.
    #[must_use]
    pub fn into_items(self) -> Vec<MediaItem> {
        self.items
    }
}

impl IntoIterator for MediaList {
    type Item = MediaItem;
    type IntoIter = std::vec::IntoIter<MediaItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a MediaList {
    type Item = &'a MediaItem;
    type IntoIter = std::slice::Iter<'a, MediaItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
