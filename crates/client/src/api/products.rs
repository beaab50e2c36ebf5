//! Product endpoints.

use loomwear_core::ProductId;
use tracing::instrument;

use super::types::{CreatedProduct, ProductPayload, ProductRecord};
use super::{CatalogClient, CatalogError};

impl CatalogClient {
    /// Fetch a product with its variants and image URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<ProductRecord, CatalogError> {
        self.get(&format!("products/details/{id}")).await
    }

    /// List all products with their variants.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        self.get("products/get-all-withDetails").await
    }

    /// Create a product from its header fields.
    ///
    /// # Returns
    ///
    /// The backend-assigned product id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// fields.
    #[instrument(skip(self, payload), fields(title = %payload.title))]
    pub async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ProductId, CatalogError> {
        let created: CreatedProduct = self.post("products/create", payload).await?;
        Ok(created.id)
    }

    /// Update an existing product's header fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// fields.
    #[instrument(skip(self, payload), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), CatalogError> {
        let _: serde_json::Value = self
            .put(&format!("products/update-product-with-variant/{id}"), payload)
            .await?;
        Ok(())
    }
}
