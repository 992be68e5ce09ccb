//! Business logic services for store media.
//!
//! # Services
//!
//! - `media` - Aggregation of product images and file library media
//! - `sources` - Admin API implementations of the media sources

pub mod media;
pub mod sources;

pub use media::{
    DEFAULT_PAGE_SIZE, FileSource, MediaError, MediaOptions, ProductImageSource, SourceError,
    StoreMediaService,
};
pub use sources::{ShopifyMediaSource, build_service};
