//! Type conversions from GraphQL response types to domain types.
//!
//! These functions convert the query response types into
//! `store_media_core` records.

mod media;

pub use media::{convert_file_connection, convert_product_image_connection};

use crate::shopify::types::PageInfo;

use super::queries;

/// Convert GraphQL page info into the domain type.
fn convert_page_info(page_info: queries::PageInfo) -> PageInfo {
    PageInfo {
        has_next_page: page_info.has_next_page,
        end_cursor: page_info.end_cursor,
    }
}
