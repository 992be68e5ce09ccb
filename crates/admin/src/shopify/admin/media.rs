//! Product image and file library reads for the Admin API.

use std::future::Future;

use store_media_core::{FileRecord, ProductRecord};
use tracing::{debug, instrument};

use super::{
    AdminClient, AdminShopifyError,
    conversions::{convert_file_connection, convert_product_image_connection},
    queries::{GetFiles, GetProductImages},
};
use crate::shopify::types::Page;

impl AdminClient {
    /// Get one page of products with their images.
    ///
    /// # Arguments
    ///
    /// * `first` - Number of products to return
    /// * `after` - Cursor for pagination
    /// * `images_first` - Maximum number of images per product
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_product_images(
        &self,
        first: i64,
        after: Option<String>,
        images_first: i64,
    ) -> Result<Page<ProductRecord>, AdminShopifyError> {
        use super::queries::get_product_images::Variables;

        let variables = Variables {
            first,
            after,
            images_first,
        };

        let response = self.execute::<GetProductImages>(variables).await?;

        Ok(convert_product_image_connection(response.products))
    }

    /// Get one page of files from the store's file library, newest first.
    ///
    /// # Arguments
    ///
    /// * `first` - Number of files to return
    /// * `after` - Cursor for pagination
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails. Stores whose plan or app
    /// scopes exclude the file library get an access-denied GraphQL error.
    #[instrument(skip(self))]
    pub async fn get_files(
        &self,
        first: i64,
        after: Option<String>,
    ) -> Result<Page<FileRecord>, AdminShopifyError> {
        use super::queries::get_files::Variables;

        let variables = Variables { first, after };

        let response = self.execute::<GetFiles>(variables).await?;

        Ok(convert_file_connection(response.files))
    }

    /// Fetch up to `max_pages` pages of products with their images.
    ///
    /// # Errors
    ///
    /// Returns the first page error encountered; no partial result is kept.
    pub async fn fetch_product_records(
        &self,
        page_size: i64,
        max_pages: u32,
        images_per_product: i64,
    ) -> Result<Vec<ProductRecord>, AdminShopifyError> {
        collect_pages(max_pages, |after| {
            self.get_product_images(page_size, after, images_per_product)
        })
        .await
    }

    /// Fetch up to `max_pages` pages of the file library.
    ///
    /// # Errors
    ///
    /// Returns the first page error encountered; no partial result is kept.
    pub async fn fetch_file_records(
        &self,
        page_size: i64,
        max_pages: u32,
    ) -> Result<Vec<FileRecord>, AdminShopifyError> {
        collect_pages(max_pages, |after| self.get_files(page_size, after)).await
    }
}

/// Follow page cursors until the last page or `max_pages`, whichever is first.
///
/// At least one page is always fetched.
async fn collect_pages<T, F, Fut>(
    max_pages: u32,
    mut fetch: F,
) -> Result<Vec<T>, AdminShopifyError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, AdminShopifyError>>,
{
    let mut items = Vec::new();
    let mut after = None;

    for page in 1..=max_pages.max(1) {
        let Page {
            items: batch,
            page_info,
        } = fetch(after.take()).await?;
        debug!(page, count = batch.len(), "Fetched page");
        items.extend(batch);

        match page_info.next_cursor() {
            Some(cursor) => after = Some(cursor.to_string()),
            None => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::shopify::types::PageInfo;

    fn page(items: Vec<u32>, next: Option<&str>) -> Page<u32> {
        Page {
            items,
            page_info: PageInfo {
                has_next_page: next.is_some(),
                end_cursor: next.map(String::from),
            },
        }
    }

    #[tokio::test]
    async fn test_collect_pages_follows_cursor_until_last_page() {
        let seen = Mutex::new(Vec::new());
        let items = collect_pages(5, |after| {
            seen.lock().unwrap().push(after.clone());
            async move {
                Ok(match after.as_deref() {
                    None => page(vec![1, 2], Some("c1")),
                    Some("c1") => page(vec![3], Some("c2")),
                    _ => page(vec![4], None),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_collect_pages_respects_max_pages() {
        let items = collect_pages(1, |_| async { Ok(page(vec![7, 8], Some("more"))) })
            .await
            .unwrap();
        assert_eq!(items, vec![7, 8]);
    }

    #[tokio::test]
    async fn test_collect_pages_zero_means_one() {
        let items = collect_pages(0, |_| async { Ok(page(vec![1], Some("more"))) })
            .await
            .unwrap();
        assert_eq!(items, vec![1]);
    }

    #[tokio::test]
    async fn test_collect_pages_propagates_errors() {
        let result: Result<Vec<u32>, _> = collect_pages(3, |after| async move {
            match after {
                None => Ok(page(vec![1], Some("c1"))),
                Some(_) => Err(AdminShopifyError::RateLimited(2)),
            }
        })
        .await;
        assert!(matches!(result, Err(AdminShopifyError::RateLimited(2))));
    }
}
