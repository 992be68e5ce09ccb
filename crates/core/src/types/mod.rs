//! Core types for store media.
//!
//! This module provides type-safe wrappers and records for the media
//! aggregation pipeline.

pub mod id;
pub mod media;
pub mod record;
pub mod status;

pub use id::*;
pub use media::{MediaItem, MediaList};
pub use record::{FilePayload, FileRecord, ImagePayload, ProductImage, ProductRecord, VideoSource};
pub use status::*;
