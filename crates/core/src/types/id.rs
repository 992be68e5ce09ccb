//! Newtype IDs for type-safe Shopify entity references.
//!
//! Shopify identifies every resource with a global ID string of the form
//! `gid://shopify/<Type>/<id>`. Use the `define_gid!` macro to create wrappers
//! that prevent accidentally mixing IDs from different resource types.

/// Prefix shared by all Shopify global IDs.
pub const GID_PREFIX: &str = "gid://shopify/";

/// Macro to define a type-safe Shopify global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Accessors: `new()`, `as_str()`, `resource_type()`, `numeric_id()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use store_media_core::define_gid;
/// define_gid!(CollectionId);
///
/// let id = CollectionId::new("gid://shopify/Collection/42");
/// assert_eq!(id.resource_type(), Some("Collection"));
/// assert_eq!(id.numeric_id(), Some(42));
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Resource type segment of a global ID (e.g., `Product`).
            ///
            /// Returns `None` for IDs that are not Shopify global IDs.
            #[must_use]
            pub fn resource_type(&self) -> Option<&str> {
                self.0
                    .strip_prefix($crate::types::id::GID_PREFIX)
                    .and_then(|rest| rest.split('/').next())
                    .filter(|kind| !kind.is_empty())
            }

            /// Trailing numeric segment of a global ID, ignoring query parameters.
            #[must_use]
            pub fn numeric_id(&self) -> Option<u64> {
                self.0
                    .strip_prefix($crate::types::id::GID_PREFIX)?
                    .rsplit('/')
                    .next()
                    .and_then(|tail| tail.split('?').next())
                    .and_then(|digits| digits.parse().ok())
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Product image and file IDs come from different Shopify resources
define_gid!(ProductId);
define_gid!(MediaId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_and_numeric_id() {
        let id = ProductId::new("gid://shopify/Product/8123456789");
        assert_eq!(id.resource_type(), Some("Product"));
        assert_eq!(id.numeric_id(), Some(8_123_456_789));
    }

    #[test]
    fn test_numeric_id_ignores_query() {
        let id = MediaId::new("gid://shopify/ProductImage/77?v=2");
        assert_eq!(id.numeric_id(), Some(77));
    }

    #[test]
    fn test_non_gid_has_no_parts() {
        let id = MediaId::new("local-file-1");
        assert_eq!(id.resource_type(), None);
        assert_eq!(id.numeric_id(), None);
        assert_eq!(id.to_string(), "local-file-1");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::new("gid://shopify/Product/1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gid://shopify/Product/1\"");
    }
}
