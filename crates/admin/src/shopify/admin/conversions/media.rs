//! Product image and file library conversion functions.

use store_media_core::{
    FilePayload, FileRecord, ImagePayload, MediaId, ProductId, ProductImage, ProductRecord,
    VideoSource,
};
use tracing::debug;

use crate::shopify::types::Page;

use super::super::queries::{get_files, get_product_images};
use super::convert_page_info;

// =============================================================================
// GetProductImages conversions
// =============================================================================

pub fn convert_product_image_connection(
    conn: get_product_images::GetProductImagesProducts,
) -> Page<ProductRecord> {
    Page {
        items: conn
            .edges
            .into_iter()
            .map(|e| convert_product(e.node))
            .collect(),
        page_info: convert_page_info(conn.page_info),
    }
}

fn convert_product(product: get_product_images::GetProductImagesProductsEdgesNode) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(product.id),
        title: product.title,
        created_at: product.created_at,
        images: product
            .images
            .edges
            .into_iter()
            .map(|e| {
                let i = e.node;
                ProductImage {
                    // Older images can lack an ID; the URL still identifies them
                    id: MediaId::new(i.id.unwrap_or_else(|| i.url.clone())),
                    url: i.url,
                    alt_text: i.alt_text,
                    width: i.width,
                    height: i.height,
                }
            })
            .collect(),
    }
}

// =============================================================================
// GetFiles conversions
// =============================================================================

pub fn convert_file_connection(conn: get_files::GetFilesFiles) -> Page<FileRecord> {
    Page {
        items: conn
            .edges
            .into_iter()
            .map(|e| convert_file(e.node))
            .collect(),
        page_info: convert_page_info(conn.page_info),
    }
}

fn convert_file(file: get_files::GetFilesFilesEdgesNode) -> FileRecord {
    let image = file.image.map(|i| ImagePayload {
        url: i.url,
        width: i.width,
        height: i.height,
    });
    let sources = file.sources.map(|sources| {
        sources
            .into_iter()
            .map(|s| VideoSource {
                url: s.url,
                mime_type: s.mime_type,
                width: s.width,
                height: s.height,
            })
            .collect()
    });

    let payload = FilePayload::from_parts(image, sources);
    if payload == FilePayload::Unsupported {
        debug!(file_id = %file.id, typename = %file.typename, "File has no displayable media");
    }

    FileRecord {
        id: MediaId::new(file.id),
        alt_text: file.alt,
        created_at: file.created_at,
        status: file.file_status,
        payload,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;
    use store_media_core::FileStatus;

    use super::*;

    #[test]
    fn test_convert_product_image_connection() {
        let response: get_product_images::ResponseData = serde_json::from_value(json!({
            "products": {
                "edges": [{
                    "node": {
                        "id": "gid://shopify/Product/1",
                        "title": "Shirt",
                        "createdAt": "2024-01-01T00:00:00Z",
                        "images": { "edges": [
                            { "node": {
                                "id": "gid://shopify/ProductImage/10",
                                "url": "https://cdn.shopify.com/a.jpg",
                                "altText": null,
                                "width": 800,
                                "height": 600
                            }},
                            { "node": {
                                "id": null,
                                "url": "https://cdn.shopify.com/b.jpg",
                                "altText": "Back",
                                "width": null,
                                "height": null
                            }}
                        ]}
                    }
                }],
                "pageInfo": { "hasNextPage": true, "endCursor": "cursor-1" }
            }
        }))
        .unwrap();

        let page = convert_product_image_connection(response.products);

        assert_eq!(page.page_info.next_cursor(), Some("cursor-1"));
        assert_eq!(page.items.len(), 1);
        let product = &page.items[0];
        assert_eq!(product.title, "Shirt");
        assert_eq!(product.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.images[0].width, Some(800));
        assert_eq!(product.images[1].id.as_str(), "https://cdn.shopify.com/b.jpg");
        assert_eq!(product.images[1].alt_text.as_deref(), Some("Back"));
    }

    #[test]
    fn test_convert_file_connection_shapes() {
        let response: get_files::ResponseData = serde_json::from_value(json!({
            "files": {
                "edges": [
                    { "node": {
                        "__typename": "MediaImage",
                        "id": "gid://shopify/MediaImage/1",
                        "alt": "Banner",
                        "createdAt": "2024-02-01T00:00:00Z",
                        "fileStatus": "READY",
                        "image": { "url": "https://cdn.shopify.com/banner.jpg", "width": 1200, "height": 400 }
                    }},
                    { "node": {
                        "__typename": "Video",
                        "id": "gid://shopify/Video/2",
                        "alt": null,
                        "createdAt": "2024-03-01T00:00:00Z",
                        "fileStatus": "PROCESSING",
                        "sources": [
                            { "url": "https://cdn.shopify.com/v-1080.mp4", "mimeType": "video/mp4", "width": 1920, "height": 1080 },
                            { "url": "https://cdn.shopify.com/v-480.mp4", "mimeType": "video/mp4", "width": 854, "height": 480 }
                        ]
                    }},
                    { "node": {
                        "__typename": "GenericFile",
                        "id": "gid://shopify/GenericFile/3",
                        "alt": "Size chart",
                        "createdAt": "2024-04-01T00:00:00Z",
                        "fileStatus": "READY"
                    }}
                ],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            }
        }))
        .unwrap();

        let page = convert_file_connection(response.files);

        assert_eq!(page.page_info.next_cursor(), None);
        assert_eq!(page.items.len(), 3);
        assert!(matches!(page.items[0].payload, FilePayload::Image(_)));
        assert!(
            matches!(page.items[1].payload, FilePayload::Video { ref sources } if sources.len() == 2)
        );
        assert_eq!(page.items[1].status, FileStatus::Processing);
        assert_eq!(page.items[2].payload, FilePayload::Unsupported);
    }
}
