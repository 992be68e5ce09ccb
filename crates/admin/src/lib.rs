//! Store media library.
//!
//! Reads product images and the file library from the Shopify Admin API and
//! merges them into a single deduplicated media list.
//!
//! # Security
//!
//! This crate holds a Shopify Admin API access token. It only needs the
//! `read_products` and `read_files` scopes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod services;
pub mod shopify;
