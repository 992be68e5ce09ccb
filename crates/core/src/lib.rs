//! Store Media Core - Shared types and the media aggregation algorithm.
//!
//! This crate provides the types exchanged between the Shopify sources and
//! their callers:
//! - `admin` - Shopify Admin API client and the store media service
//! - `cli` - Command-line tool for listing store media
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Fetching is the job of the sources in the `admin` crate; this
//! crate turns already-fetched records into one normalized media list.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, statuses, input records and media items
//! - [`aggregate`] - Merging, deduplication and ordering of media

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod aggregate;
pub mod types;

pub use aggregate::{DEFAULT_IMAGE_ALT, DEFAULT_VIDEO_ALT, aggregate_media};
pub use types::*;
