//! Variant image upload endpoint.

use loomwear_core::VariantId;
use reqwest::multipart::{Form, Part};
use tracing::instrument;

use super::types::UploadedImage;
use super::{CatalogClient, CatalogError};

/// One pending image upload.
///
/// `is_primary` is true iff the image sits at index 0 of its variant's image
/// list; `sort_order` is that index. Both are sent as strings, matching the
/// backend's multipart contract.
#[derive(Debug, Clone)]
pub struct ImageUpload<'a> {
    pub variant_id: VariantId,
    pub bytes: &'a [u8],
    pub filename: &'a str,
    pub is_primary: bool,
    pub sort_order: usize,
}

impl CatalogClient {
    /// Upload one image for a variant.
    ///
    /// # Returns
    ///
    /// The persisted image URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// upload.
    #[instrument(
        skip(self, upload),
        fields(variant_id = %upload.variant_id, filename = %upload.filename)
    )]
    pub async fn upload_variant_image(
        &self,
        upload: ImageUpload<'_>,
    ) -> Result<String, CatalogError> {
        let file = Part::bytes(upload.bytes.to_vec()).file_name(upload.filename.to_string());
        let form = Form::new()
            .part("file", file)
            .text("productVariantId", upload.variant_id.to_string())
            .text("isPrimary", if upload.is_primary { "true" } else { "false" })
            .text("sortOrder", upload.sort_order.to_string());

        let uploaded: UploadedImage = self
            .post_multipart("product-variant-image/create", form)
            .await?;
        Ok(uploaded.url)
    }
}
