//! Domain types for Shopify Admin API responses.
//!
//! Media records themselves live in `store_media_core`; these types add the
//! pagination wrapper the client returns around them.

use serde::{Deserialize, Serialize};

/// Pagination information for a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Cursor for fetching the next page.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor to request the next page with, if there is one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.end_cursor
            .as_deref()
            .filter(|_| self.has_next_page)
    }
}

/// One page of converted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page, in API order.
    pub items: Vec<T>,
    /// Pagination information.
    pub page_info: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cursor_requires_next_page() {
        let last = PageInfo {
            has_next_page: false,
            end_cursor: Some("abc".to_string()),
        };
        assert_eq!(last.next_cursor(), None);

        let more = PageInfo {
            has_next_page: true,
            end_cursor: Some("abc".to_string()),
        };
        assert_eq!(more.next_cursor(), Some("abc"));

        assert_eq!(PageInfo::default().next_cursor(), None);
    }
}
