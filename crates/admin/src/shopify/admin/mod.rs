//! Shopify Admin API GraphQL client.
//!
//! This module provides a type-safe client for reading store media from the
//! Shopify Admin API using GraphQL. Requires an Admin API access token.

use std::sync::Arc;

use graphql_client::GraphQLQuery;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::config::ShopifyAdminConfig;

use super::{AdminShopifyError, GraphQLError, GraphQLErrorLocation};

/// Wait used when a 429 response has no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

mod conversions;
mod media;
pub mod queries;

/// Access token for Admin API calls.
///
/// Tokens are obtained and persisted by the embedding application's OAuth
/// flow; the client only holds the current one.
#[derive(Clone)]
pub struct OAuthToken {
    /// The access token for API calls
    pub access_token: SecretString,
    /// Associated shop domain
    pub shop: String,
}

impl std::fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthToken")
            .field("access_token", &"[REDACTED]")
            .field("shop", &self.shop)
            .finish()
    }
}

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; clones share the HTTP connection pool and token.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    store: String,
    api_version: String,
    /// Current token (loaded from config or set by the embedding app)
    token: RwLock<Option<OAuthToken>>,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// If the configuration carries an access token it is loaded right away.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, AdminShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let token = config.access_token.as_ref().map(|access_token| OAuthToken {
            access_token: access_token.clone(),
            shop: config.store.clone(),
        });

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                store: config.store.clone(),
                api_version: config.api_version.clone(),
                token: RwLock::new(token),
            }),
        })
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    /// Get the API version.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    /// GraphQL endpoint for the configured store and API version.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.inner.store, self.inner.api_version
        )
    }

    // =========================================================================
    // Token management
    // =========================================================================

    /// Set the access token directly (for loading from storage).
    pub async fn set_token(&self, token: OAuthToken) {
        *self.inner.token.write().await = Some(token);
    }

    /// Get the current token (if set).
    pub async fn get_token(&self) -> Option<OAuthToken> {
        self.inner.token.read().await.clone()
    }

    /// Check if we have a token.
    pub async fn has_token(&self) -> bool {
        self.inner.token.read().await.is_some()
    }

    /// Clear the cached token.
    pub async fn clear_token(&self) {
        *self.inner.token.write().await = None;
    }

    /// Get the current access token.
    async fn get_access_token(&self) -> Result<SecretString, AdminShopifyError> {
        let token = self.inner.token.read().await;
        token
            .as_ref()
            .map(|t| t.access_token.clone())
            .ok_or(AdminShopifyError::NoAccessToken)
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL query.
    #[instrument(skip(self, variables), fields(store = %self.inner.store))]
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let access_token = self.get_access_token().await?;
        let body = Q::build_query(variables);
        debug!(operation = body.operation_name, "Executing Admin API query");

        let response = self
            .inner
            .client
            .post(self.endpoint())
            .header("X-Shopify-Access-Token", access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        check_status(response.status(), response.headers(), &self.inner.store)?;

        let graphql_response: GraphQLResponse<Q::ResponseData> = response.json().await?;
        into_data(graphql_response)
    }
}

/// Map HTTP status codes Shopify uses for throttling and auth to errors.
fn check_status(
    status: reqwest::StatusCode,
    headers: &reqwest::header::HeaderMap,
    store: &str,
) -> Result<(), AdminShopifyError> {
    match status {
        reqwest::StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            Err(AdminShopifyError::RateLimited(retry_after))
        }
        reqwest::StatusCode::UNAUTHORIZED => Err(AdminShopifyError::Unauthorized(
            "Invalid or expired access token".to_string(),
        )),
        reqwest::StatusCode::NOT_FOUND => Err(AdminShopifyError::NotFound(format!(
            "Admin API endpoint for {store}"
        ))),
        _ => Ok(()),
    }
}

/// Unwrap a GraphQL response into its data, converting reported errors.
fn into_data<T>(response: GraphQLResponse<T>) -> Result<T, AdminShopifyError> {
    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        let converted_errors: Vec<GraphQLError> = errors
            .into_iter()
            .map(|e| GraphQLError {
                message: e.message,
                locations: e
                    .locations
                    .into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: l.line,
                        column: l.column,
                    })
                    .collect(),
                path: e.path,
            })
            .collect();
        return Err(AdminShopifyError::GraphQL(converted_errors));
    }

    response.data.ok_or_else(|| {
        AdminShopifyError::GraphQL(vec![GraphQLError {
            message: "No data in response".to_string(),
            locations: vec![],
            path: vec![],
        }])
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn config(access_token: Option<&str>) -> ShopifyAdminConfig {
        ShopifyAdminConfig {
            store: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            access_token: access_token.map(SecretString::from),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_endpoint() {
        let client = AdminClient::new(&config(None)).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://test.myshopify.com/admin/api/2026-01/graphql.json"
        );
    }

    #[tokio::test]
    async fn test_token_lifecycle() {
        let client = AdminClient::new(&config(Some("shpat_a1b2c3"))).unwrap();
        assert!(client.has_token().await);

        client.clear_token().await;
        assert!(!client.has_token().await);
        assert!(matches!(
            client.get_access_token().await,
            Err(AdminShopifyError::NoAccessToken)
        ));

        client
            .set_token(OAuthToken {
                access_token: SecretString::from("shpat_d4e5f6"),
                shop: "test.myshopify.com".to_string(),
            })
            .await;
        let token = client.get_token().await.unwrap();
        assert_eq!(token.shop, "test.myshopify.com");
        assert!(client.get_access_token().await.is_ok());
    }

    #[test]
    fn test_oauth_token_debug_redacts_secret() {
        let token = OAuthToken {
            access_token: SecretString::from("shpat_super_private"),
            shop: "test.myshopify.com".to_string(),
        };
        let debug_output = format!("{token:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shpat_super_private"));
    }

    fn retry_after(value: &str) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::RETRY_AFTER,
            reqwest::header::HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_check_status_rate_limited_reads_retry_after() {
        let err = check_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            &retry_after("2"),
            "test.myshopify.com",
        )
        .unwrap_err();
        assert!(matches!(err, AdminShopifyError::RateLimited(2)));
    }

    #[test]
    fn test_check_status_rate_limited_defaults_without_usable_header() {
        let empty = reqwest::header::HeaderMap::new();
        for headers in [empty, retry_after("soon"), retry_after("-5")] {
            let err = check_status(
                reqwest::StatusCode::TOO_MANY_REQUESTS,
                &headers,
                "test.myshopify.com",
            )
            .unwrap_err();
            assert!(matches!(
                err,
                AdminShopifyError::RateLimited(DEFAULT_RETRY_AFTER_SECS)
            ));
        }
    }

    #[test]
    fn test_check_status_unauthorized_and_not_found() {
        let headers = reqwest::header::HeaderMap::new();

        let err = check_status(reqwest::StatusCode::UNAUTHORIZED, &headers, "test.myshopify.com")
            .unwrap_err();
        assert!(matches!(err, AdminShopifyError::Unauthorized(_)));
        assert!(err.is_access_denied());

        let err = check_status(reqwest::StatusCode::NOT_FOUND, &headers, "test.myshopify.com")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not found: Admin API endpoint for test.myshopify.com"
        );
    }

    #[test]
    fn test_check_status_passes_success() {
        let headers = reqwest::header::HeaderMap::new();
        assert!(check_status(reqwest::StatusCode::OK, &headers, "test.myshopify.com").is_ok());
    }

    #[test]
    fn test_into_data_converts_errors() {
        let response: GraphQLResponse<serde_json::Value> = serde_json::from_value(json!({
            "data": null,
            "errors": [{
                "message": "Access denied for files field.",
                "locations": [{ "line": 2, "column": 3 }],
                "path": ["files"]
            }]
        }))
        .unwrap();

        let err = into_data(response).unwrap_err();
        assert!(err.is_access_denied());
        assert!(matches!(err, AdminShopifyError::GraphQL(ref e) if e[0].locations[0].line == 2));
    }

    #[test]
    fn test_into_data_requires_data() {
        let response: GraphQLResponse<serde_json::Value> =
            serde_json::from_value(json!({ "errors": [] })).unwrap();
        assert!(matches!(
            into_data(response),
            Err(AdminShopifyError::GraphQL(_))
        ));
    }
}
