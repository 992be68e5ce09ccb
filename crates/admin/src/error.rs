//! Unified error handling for store media.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::MediaError;
use crate::shopify::AdminShopifyError;

/// Application-level error type for store media entry points.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shopify API client could not be set up.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// Store media could not be loaded.
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,
            Self::Shopify(_) | Self::Media(_) => 69,
            Self::Serialize(_) | Self::Io(_) => 74,
        }
    }

    /// Log the error and send it to Sentry.
    ///
    /// Configuration errors are user mistakes and are only logged.
    pub fn report(&self) {
        if matches!(self, Self::Config(_)) {
            tracing::error!(error = %self, "Invalid configuration");
            return;
        }

        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Store media command failed"
        );
    }
}

/// Tag Sentry events with the store being read.
pub fn set_sentry_store(store: &str) {
    sentry::configure_scope(|scope| {
        scope.set_tag("shop", store);
    });
}
