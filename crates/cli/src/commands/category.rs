//! Category management commands.
//!
//! # Usage
//!
//! ```bash
//! loom-cli category list
//! loom-cli category create -n "Winter Jackets" -d "Cold weather outerwear"
//! loom-cli category update 4 -n "Jackets" -s outerwear
//! loom-cli category delete 4
//! ```

use loomwear_client::{CatalogClient, CatalogError, CategoryForm, FieldError};
use loomwear_core::CategoryId;
use thiserror::Error;

/// Errors that can occur during category operations.
#[derive(Debug, Error)]
pub enum CategoryCmdError {
    /// Remote call failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The form fields were rejected locally, before any network call.
    #[error("Invalid fields: {}", format_field_errors(.0))]
    Invalid(Vec<FieldError>),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// List all categories.
#[allow(clippy::print_stdout)]
pub async fn list(client: &CatalogClient) -> Result<(), CategoryCmdError> {
    let categories = client.list_categories().await?;

    println!("{:<6} {:<30} {:<30} CREATED", "ID", "NAME", "SLUG");
    for category in categories {
        println!(
            "{:<6} {:<30} {:<30} {}",
            category.id,
            category.name,
            category.slug,
            category.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

/// Create a category. The slug is derived from the name unless given.
#[allow(clippy::print_stdout)]
pub async fn create(
    client: &CatalogClient,
    name: &str,
    slug: Option<&str>,
    description: Option<String>,
) -> Result<(), CategoryCmdError> {
    let payload = build_payload(name, slug, description)?;

    tracing::info!("Creating category: {} ({})", payload.name, payload.slug);
    let category = client.create_category(&payload).await?;

    println!("Created category {} ({})", category.id, category.slug);
    Ok(())
}

/// Update a category.
#[allow(clippy::print_stdout)]
pub async fn update(
    client: &CatalogClient,
    id: CategoryId,
    name: &str,
    slug: Option<&str>,
    description: Option<String>,
) -> Result<(), CategoryCmdError> {
    let payload = build_payload(name, slug, description)?;

    tracing::info!("Updating category {id}");
    let category = client.update_category(id, &payload).await?;

    println!("Updated category {} ({})", category.id, category.slug);
    Ok(())
}

/// Delete a category.
#[allow(clippy::print_stdout)]
pub async fn delete(client: &CatalogClient, id: CategoryId) -> Result<(), CategoryCmdError> {
    client.delete_category(id).await?;
    println!("Deleted category {id}");
    Ok(())
}

/// Run the name/slug through the same form validation the UI uses.
fn build_payload(
    name: &str,
    slug: Option<&str>,
    description: Option<String>,
) -> Result<loomwear_client::api::types::CategoryPayload, CategoryCmdError> {
    let mut form = CategoryForm::default();
    form.set_name(name);
    if let Some(slug) = slug {
        form.set_slug(slug);
    }
    form.set_description(description);
    form.validate().map_err(CategoryCmdError::Invalid)
}
