//! GraphQL query definitions for Shopify Admin API.
//!
//! Each operation gets a module shaped like `graphql_client` codegen output
//! (`Variables`, `ResponseData`, `QUERY`, `OPERATION_NAME`) and a marker type
//! implementing [`GraphQLQuery`], so the client can run it through `execute`.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::Deserialize;

/// Full query document; Shopify selects the operation by name.
const MEDIA_QUERIES: &str = include_str!("../../../graphql/admin/queries/media.graphql");

/// Relay-style pagination info.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page follows this one.
    pub has_next_page: bool,
    /// Cursor of the last edge, for the next `after`.
    pub end_cursor: Option<String>,
}

// =============================================================================
// Product image queries
// =============================================================================

pub struct GetProductImages;

pub mod get_product_images {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    pub use super::PageInfo;

    pub const OPERATION_NAME: &str = "GetProductImages";
    pub const QUERY: &str = super::MEDIA_QUERIES;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub first: i64,
        pub after: Option<String>,
        pub images_first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: GetProductImagesProducts,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetProductImagesProducts {
        pub edges: Vec<GetProductImagesProductsEdges>,
        pub page_info: PageInfo,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetProductImagesProductsEdges {
        pub node: GetProductImagesProductsEdgesNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetProductImagesProductsEdgesNode {
        pub id: String,
        pub title: String,
        pub created_at: DateTime<Utc>,
        pub images: GetProductImagesProductsEdgesNodeImages,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetProductImagesProductsEdgesNodeImages {
        pub edges: Vec<GetProductImagesProductsEdgesNodeImagesEdges>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetProductImagesProductsEdgesNodeImagesEdges {
        pub node: GetProductImagesProductsEdgesNodeImagesEdgesNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetProductImagesProductsEdgesNodeImagesEdgesNode {
        pub id: Option<String>,
        pub url: String,
        pub alt_text: Option<String>,
        pub width: Option<i64>,
        pub height: Option<i64>,
    }
}

impl GraphQLQuery for GetProductImages {
    type Variables = get_product_images::Variables;
    type ResponseData = get_product_images::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_product_images::QUERY,
            operation_name: get_product_images::OPERATION_NAME,
        }
    }
}

// =============================================================================
// File library queries
// =============================================================================

pub struct GetFiles;

pub mod get_files {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use store_media_core::FileStatus;

    pub use super::PageInfo;

    pub const OPERATION_NAME: &str = "GetFiles";
    pub const QUERY: &str = super::MEDIA_QUERIES;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub after: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub files: GetFilesFiles,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetFilesFiles {
        pub edges: Vec<GetFilesFilesEdges>,
        pub page_info: PageInfo,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetFilesFilesEdges {
        pub node: GetFilesFilesEdgesNode,
    }

    /// A file of any type; `image` and `sources` are only set for
    /// `MediaImage` and `Video` respectively.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetFilesFilesEdgesNode {
        #[serde(rename = "__typename")]
        pub typename: String,
        pub id: String,
        pub alt: Option<String>,
        pub created_at: DateTime<Utc>,
        pub file_status: FileStatus,
        #[serde(default)]
        pub image: Option<GetFilesFilesEdgesNodeImage>,
        #[serde(default)]
        pub sources: Option<Vec<GetFilesFilesEdgesNodeSources>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetFilesFilesEdgesNodeImage {
        pub url: String,
        pub width: Option<i64>,
        pub height: Option<i64>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetFilesFilesEdgesNodeSources {
        pub url: String,
        pub mime_type: String,
        pub width: Option<i64>,
        pub height: Option<i64>,
    }
}

impl GraphQLQuery for GetFiles {
    type Variables = get_files::Variables;
    type ResponseData = get_files::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_files::QUERY,
            operation_name: get_files::OPERATION_NAME,
        }
    }
}
