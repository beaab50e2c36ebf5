//! Category CRUD endpoints.

use loomwear_core::{Category, CategoryId};
use tracing::instrument;

use super::types::CategoryPayload;
use super::{CatalogClient, CatalogError};

impl CatalogClient {
    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.get("categories").await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// fields (e.g. duplicate slug).
    #[instrument(skip(self, payload), fields(slug = %payload.slug))]
    pub async fn create_category(
        &self,
        payload: &CategoryPayload,
    ) -> Result<Category, CatalogError> {
        self.post("categories", payload).await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the category does not exist.
    #[instrument(skip(self, payload), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        payload: &CategoryPayload,
    ) -> Result<Category, CatalogError> {
        self.patch(&format!("categories/{id}"), payload).await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the category does not exist.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), CatalogError> {
        self.delete(&format!("categories/{id}")).await
    }
}
