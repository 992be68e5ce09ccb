//! Shopify Admin API client for store media.
//!
//! # Architecture
//!
//! - Uses `graphql_client` query bodies for type-safe GraphQL operations
//! - Direct API calls to Shopify (no local database sync)
//! - Responses are converted into `store_media_core` records before they
//!   leave this module
//!
//! # Example
//!
//! ```rust,ignore
//! use store_media_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! // First page of products with up to 10 images each
//! let page = client.get_product_images(50, None, 10).await?;
//!
//! // First page of the file library
//! let files = client.get_files(50, None).await?;
//! ```

mod admin;
pub mod types;

pub use admin::{AdminClient, OAuthToken};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No access token has been loaded into the client.
    #[error("No access token available")]
    NoAccessToken,
}

impl AdminShopifyError {
    /// Whether Shopify refused access to the requested data.
    ///
    /// Shopify reports missing scopes and plan-gated resources (such as the
    /// file library on some plans) as `Access denied` GraphQL errors.
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        match self {
            Self::Unauthorized(_) => true,
            Self::GraphQL(errors) => errors
                .iter()
                .any(|e| e.message.to_lowercase().contains("access denied")),
            _ => false,
        }
    }
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
