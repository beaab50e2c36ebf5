//! Product variant endpoints.

use loomwear_core::VariantId;
use tracing::instrument;

use super::types::{CreateVariantPayload, CreatedVariant, VariantPayload};
use super::{CatalogClient, CatalogError};

impl CatalogClient {
    /// Create a variant under an existing product.
    ///
    /// # Returns
    ///
    /// The backend-assigned variant id, needed before any of the variant's
    /// images can be attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// attributes.
    #[instrument(skip(self, payload), fields(product_id = %payload.product_id))]
    pub async fn create_variant(
        &self,
        payload: &CreateVariantPayload,
    ) -> Result<VariantId, CatalogError> {
        let created: CreatedVariant = self.post("product-variant/create", payload).await?;
        Ok(created.id)
    }

    /// Update an existing variant's size/color/price.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// attributes.
    #[instrument(skip(self, payload), fields(variant_id = %id))]
    pub async fn update_variant(
        &self,
        id: VariantId,
        payload: &VariantPayload,
    ) -> Result<(), CatalogError> {
        let _: serde_json::Value = self
            .put(&format!("product-variant/update/{id}"), payload)
            .await?;
        Ok(())
    }
}
