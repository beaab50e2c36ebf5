//! Wire types for the catalog REST API.
//!
//! Records mirror backend responses; payload structs are request bodies.
//! Field names are camelCase on the wire.

use loomwear_core::{CategoryId, Gender, Price, ProductId, VariantId};
use serde::{Deserialize, Serialize};

use crate::draft::{AttributeValue, CategoryRef, ProductDraft, VariantDraft};

/// A product as returned by `products/details/{id}` and the list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    /// Literal product type, when the catalog runs in literal mode.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Subcategory foreign key, when the catalog runs in reference mode.
    #[serde(default)]
    pub sub_category_id: Option<CategoryId>,
    pub gender: Gender,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
}

/// A persisted variant with its images.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub id: VariantId,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub size_id: Option<i64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub color_id: Option<i64>,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

/// A persisted variant image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub url: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub sort_order: i32,
}

/// Product header fields for create and update calls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub title: String,
    pub description: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<CategoryId>,
}

impl ProductPayload {
    /// Header fields of a draft, without its variants.
    #[must_use]
    pub fn from_draft(draft: &ProductDraft) -> Self {
        let (kind, sub_category_id) = match &draft.category {
            CategoryRef::Kind(kind) => (Some(kind.clone()), None),
            CategoryRef::Subcategory(id) => (None, Some(*id)),
        };
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            gender: draft.gender,
            brand: draft.brand.clone(),
            kind,
            sub_category_id,
        }
    }
}

/// Variant attributes for create and update calls.
///
/// Exactly one of `size`/`size_id` (and `color`/`color_id`) is present,
/// matching the catalog mode the selector was captured in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<i64>,
    pub price: Price,
}

impl VariantPayload {
    #[must_use]
    pub fn from_draft(variant: &VariantDraft) -> Self {
        let (size, size_id) = split_attribute(&variant.size);
        let (color, color_id) = split_attribute(&variant.color);
        Self {
            size,
            size_id,
            color,
            color_id,
            price: variant.price,
        }
    }
}

fn split_attribute(value: &AttributeValue) -> (Option<String>, Option<i64>) {
    match value {
        AttributeValue::Literal(s) => (Some(s.clone()), None),
        AttributeValue::Ref(id) => (None, Some(*id)),
    }
}

/// Body of `product-variant/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVariantPayload {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub variant: VariantPayload,
}

/// Body of category create/update calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Response envelope for calls that return the created entity's id.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreatedProduct {
    pub id: ProductId,
}

/// Response envelope for `product-variant/create`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreatedVariant {
    pub id: VariantId,
}

/// Response envelope for `product-variant-image/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_variant_payload_literal_mode() {
        let variant = VariantDraft {
            local_id: Uuid::new_v4(),
            persisted_id: None,
            size: AttributeValue::Literal("M".to_string()),
            color: AttributeValue::Literal("navy".to_string()),
            price: Price::new(Decimal::new(4999, 2)),
            images: vec![],
        };
        let value = serde_json::to_value(VariantPayload::from_draft(&variant)).expect("serialize");
        assert_eq!(value["size"], json!("M"));
        assert_eq!(value["color"], json!("navy"));
        assert!(value.get("sizeId").is_none());
        assert!(value.get("colorId").is_none());
    }

    #[test]
    fn test_variant_payload_reference_mode() {
        let variant = VariantDraft {
            local_id: Uuid::new_v4(),
            persisted_id: None,
            size: AttributeValue::Ref(3),
            color: AttributeValue::Ref(7),
            price: Price::new(Decimal::new(4999, 2)),
            images: vec![],
        };
        let value = serde_json::to_value(VariantPayload::from_draft(&variant)).expect("serialize");
        assert_eq!(value["sizeId"], json!(3));
        assert_eq!(value["colorId"], json!(7));
        assert!(value.get("size").is_none());
    }

    #[test]
    fn test_product_payload_category_modes() {
        let draft = ProductDraft {
            title: "Tee".to_string(),
            description: "Plain tee".to_string(),
            category: CategoryRef::Kind("tshirts".to_string()),
            gender: Gender::Men,
            brand: None,
            variants: vec![],
        };
        let value = serde_json::to_value(ProductPayload::from_draft(&draft)).expect("serialize");
        assert_eq!(value["type"], json!("tshirts"));
        assert!(value.get("subCategoryId").is_none());
        assert!(value.get("brand").is_none());
    }
}
