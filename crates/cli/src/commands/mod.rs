//! CLI command implementations.

pub mod media;
