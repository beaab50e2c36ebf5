//! Product commands: listing, inspection, and the draft save workflow.
//!
//! # Draft files
//!
//! `loom-cli product save` reads a JSON draft:
//!
//! ```json
//! {
//!   "title": "Denim Jacket",
//!   "description": "Classic fit",
//!   "type": "jackets",
//!   "gender": "unisex",
//!   "brand": "Loomwear",
//!   "variants": [
//!     {
//!       "size": "M",
//!       "color": "indigo",
//!       "price": "89.00",
//!       "images": [{ "file": "photos/front.jpg" }, { "url": "https://cdn.example.com/back.jpg" }]
//!     }
//!   ]
//! }
//! ```
//!
//! New images reference local files (read at save time); existing images
//! reference their persisted URL and are never re-uploaded. Variants being
//! edited carry their backend `id`.

use std::path::{Path, PathBuf};

use loomwear_client::{
    AttributeValue, CatalogClient, CatalogError, CategoryRef, FieldError, ImageRef, ProductForm,
    SaveError, SaveMode, SaveWorkflow, TracingSink, VariantForm,
};
use loomwear_core::{Gender, Price, ProductId, VariantId};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during product operations.
#[derive(Debug, Error)]
pub enum ProductCmdError {
    /// Remote call failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The draft file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The draft file is not valid JSON.
    #[error("Invalid draft file: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The draft file has an unusable field value.
    #[error("Invalid draft field: {0}")]
    BadField(String),

    /// The draft failed validation, before any network call.
    #[error("Invalid draft: {}", format_field_errors(.0))]
    Invalid(Vec<FieldError>),

    /// The save workflow failed partway; see the message for which steps.
    #[error(transparent)]
    Save(#[from] SaveError),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// List all products.
#[allow(clippy::print_stdout)]
pub async fn list(client: &CatalogClient) -> Result<(), ProductCmdError> {
    let products = client.list_products().await?;

    println!("{:<6} {:<40} {:<8} VARIANTS", "ID", "TITLE", "GENDER");
    for product in products {
        println!(
            "{:<6} {:<40} {:<8} {}",
            product.id,
            product.title,
            product.gender,
            product.variants.len()
        );
    }
    Ok(())
}

/// Show one product with its variants and images.
#[allow(clippy::print_stdout)]
pub async fn show(client: &CatalogClient, id: i64) -> Result<(), ProductCmdError> {
    let product = client.get_product(ProductId::new(id)).await?;

    println!("{} - {}", product.id, product.title);
    println!("  {}", product.description);
    for variant in &product.variants {
        let size = variant.size.clone().unwrap_or_else(|| "?".to_string());
        let color = variant.color.clone().unwrap_or_else(|| "?".to_string());
        println!("  variant {} {size}/{color} @ {}", variant.id, variant.price);
        for image in &variant.images {
            let marker = if image.is_primary { "*" } else { " " };
            println!("   {marker} {}", image.url);
        }
    }
    Ok(())
}

/// Validate a draft file and run the save workflow against the backend.
#[allow(clippy::print_stdout)]
pub async fn save(
    client: &CatalogClient,
    path: &Path,
    product_id: Option<i64>,
) -> Result<(), ProductCmdError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|source| {
        ProductCmdError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let file: DraftFile = serde_json::from_str(&raw)?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let form = file.into_form(base_dir).await?;
    let mut draft = form.validate().map_err(ProductCmdError::Invalid)?;

    let mode = product_id.map_or(SaveMode::Create, |id| SaveMode::Update(ProductId::new(id)));
    tracing::info!(
        "Saving draft with {} variant(s) ({mode:?})",
        draft.variants.len()
    );

    let workflow = SaveWorkflow::new(client.clone(), TracingSink);
    let saved_id = workflow.execute(&mut draft, mode).await?;

    println!("Saved product {saved_id}");
    Ok(())
}

/// On-disk draft format. Mirrors the wire field names so a fetched product
/// can be edited into a draft by hand.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftFile {
    title: String,
    description: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    sub_category_id: Option<i64>,
    gender: String,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    variants: Vec<DraftVariantFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftVariantFile {
    /// Backend id, present when editing an existing variant.
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    size_id: Option<i64>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    color_id: Option<i64>,
    price: Decimal,
    #[serde(default)]
    images: Vec<DraftImageFile>,
}

/// An image is either a local file to upload or an existing persisted URL.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DraftImageFile {
    Local { file: PathBuf },
    Existing { url: String },
}

impl DraftFile {
    async fn into_form(self, base_dir: &Path) -> Result<ProductForm, ProductCmdError> {
        let gender = self
            .gender
            .parse::<Gender>()
            .map_err(ProductCmdError::BadField)?;

        let category = match (self.kind, self.sub_category_id) {
            (_, Some(id)) => Some(CategoryRef::Subcategory(id.into())),
            (Some(kind), None) => Some(CategoryRef::Kind(kind)),
            (None, None) => None,
        };

        let mut variants = Vec::with_capacity(self.variants.len());
        for variant in self.variants {
            variants.push(variant.into_form(base_dir).await?);
        }

        Ok(ProductForm {
            title: self.title,
            description: self.description,
            category,
            gender: Some(gender),
            brand: self.brand,
            variants,
        })
    }
}

impl DraftVariantFile {
    async fn into_form(self, base_dir: &Path) -> Result<VariantForm, ProductCmdError> {
        let mut images = Vec::with_capacity(self.images.len());
        for image in self.images {
            images.push(image.into_ref(base_dir).await?);
        }

        Ok(VariantForm {
            local_id: Uuid::new_v4(),
            persisted_id: self.id.map(VariantId::new),
            size: attribute(self.size, self.size_id),
            color: attribute(self.color, self.color_id),
            price: Some(Price::new(self.price)),
            images,
        })
    }
}

impl DraftImageFile {
    async fn into_ref(self, base_dir: &Path) -> Result<ImageRef, ProductCmdError> {
        match self {
            Self::Existing { url } => Ok(ImageRef::Existing { url }),
            Self::Local { file } => {
                let resolved = if file.is_absolute() {
                    file
                } else {
                    base_dir.join(file)
                };
                let bytes = tokio::fs::read(&resolved).await.map_err(|source| {
                    ProductCmdError::Io {
                        path: resolved.clone(),
                        source,
                    }
                })?;
                let filename = resolved
                    .file_name()
                    .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().to_string());
                Ok(ImageRef::New { bytes, filename })
            }
        }
    }
}

fn attribute(literal: Option<String>, reference: Option<i64>) -> Option<AttributeValue> {
    reference.map(AttributeValue::Ref).or_else(|| {
        literal
            .filter(|s| !s.trim().is_empty())
            .map(AttributeValue::Literal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_draft_file_parses_mixed_images() {
        let json = r#"{
            "title": "Denim Jacket",
            "description": "Classic fit",
            "type": "jackets",
            "gender": "unisex",
            "variants": [
                {
                    "id": 7,
                    "size": "M",
                    "color": "indigo",
                    "price": "89.00",
                    "images": [{ "url": "https://cdn.example.com/a.jpg" }]
                }
            ]
        }"#;
        let file: DraftFile = serde_json::from_str(json).expect("valid draft");
        let form = file.into_form(Path::new(".")).await.expect("form");
        assert_eq!(form.title, "Denim Jacket");

        let variant = form.variants.first().expect("one variant");
        assert_eq!(variant.persisted_id, Some(VariantId::new(7)));
        assert_eq!(variant.images.len(), 1);
        assert!(matches!(
            variant.images.first(),
            Some(ImageRef::Existing { .. })
        ));
    }

    #[tokio::test]
    async fn test_draft_file_rejects_unknown_gender() {
        let json = r#"{
            "title": "Tee",
            "description": "Plain",
            "type": "tshirts",
            "gender": "boys",
            "variants": []
        }"#;
        let file: DraftFile = serde_json::from_str(json).expect("valid json");
        let err = file.into_form(Path::new(".")).await.expect_err("bad gender");
        assert!(matches!(err, ProductCmdError::BadField(_)));
    }

    #[test]
    fn test_attribute_prefers_reference_mode() {
        assert_eq!(
            attribute(Some("M".to_string()), Some(3)),
            Some(AttributeValue::Ref(3))
        );
        assert_eq!(
            attribute(Some("M".to_string()), None),
            Some(AttributeValue::Literal("M".to_string()))
        );
        assert_eq!(attribute(None, None), None);
    }
}
