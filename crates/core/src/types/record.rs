//! Input records produced by the two media sources.
//!
//! These are already-fetched, already-normalized shapes: the Shopify client
//! converts its GraphQL responses into them before aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MediaId, ProductId};
use super::status::FileStatus;

// =============================================================================
// Product Image Source
// =============================================================================

/// A product together with its ordered images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product global ID.
    pub id: ProductId,
    /// Product title, used as alt text fallback for its images.
    pub title: String,
    /// Product creation time. Images carry no timestamp of their own.
    pub created_at: DateTime<Utc>,
    /// Product images in display order.
    pub images: Vec<ProductImage>,
}

/// A single product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image global ID.
    pub id: MediaId,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

// =============================================================================
// Generic File Source
// =============================================================================

/// A file from the store's file library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File global ID.
    pub id: MediaId,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// File creation time.
    pub created_at: DateTime<Utc>,
    /// Processing status.
    pub status: FileStatus,
    /// Image or video content, if the file is one of those.
    pub payload: FilePayload,
}

/// Content shape of a file record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilePayload {
    /// Single still image.
    Image(ImagePayload),
    /// Video with its encoded renditions, in source order.
    Video {
        /// Encoded sources; only the first is used for display.
        sources: Vec<VideoSource>,
    },
    /// Any other file kind (documents, 3D models, ...).
    Unsupported,
}

/// Image content of a file record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Image URL.
    pub url: String,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

/// One encoded rendition of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    /// Rendition URL.
    pub url: String,
    /// MIME type (e.g., `video/mp4`).
    pub mime_type: String,
    /// Frame width in pixels.
    pub width: Option<i64>,
    /// Frame height in pixels.
    pub height: Option<i64>,
}

impl FilePayload {
    /// Build a payload from the optional image and video fields Shopify returns.
    ///
    /// An image wins over video sources; a video with no sources is unsupported.
    #[must_use]
    pub fn from_parts(image: Option<ImagePayload>, sources: Option<Vec<VideoSource>>) -> Self {
        match (image, sources) {
            (Some(image), _) => Self::Image(image),
            (None, Some(sources)) if !sources.is_empty() => Self::Video { sources },
            _ => Self::Unsupported,
        }
    }
}
