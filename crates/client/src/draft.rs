//! In-memory draft of a product being edited.
//!
//! A draft is built by form validation, handed to one save workflow
//! instance, and discarded after the workflow settles. Backend-assigned ids
//! captured by the workflow flow back into the draft, so a resubmission
//! after partial failure never re-creates entities that already persisted.

use loomwear_core::{CategoryId, Gender, Price, VariantId};
use uuid::Uuid;

use crate::api::types::{ProductRecord, VariantRecord};

/// Category reference on a product, in one of the backend's two catalog
/// modes: a literal product type or a subcategory foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Kind(String),
    Subcategory(CategoryId),
}

/// A size or color selector: a literal enum value ("M", "navy") or a
/// foreign-key id, depending on catalog mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Literal(String),
    Ref(i64),
}

impl AttributeValue {
    /// Whether the selector carries a usable value.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Literal(s) => !s.trim().is_empty(),
            Self::Ref(_) => true,
        }
    }
}

/// One image in a variant's ordered image list.
///
/// Index 0 is the primary image. `Existing` refs are backend-owned and are
/// never re-uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Freshly selected binary payload, not yet uploaded.
    New { bytes: Vec<u8>, filename: String },
    /// Already persisted on the backend.
    Existing { url: String },
}

impl ImageRef {
    /// Whether this image still needs an upload call.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self, Self::New { .. })
    }
}

/// A size/color/price combination of the product, with its own images.
#[derive(Debug, Clone)]
pub struct VariantDraft {
    /// Stable identity for UI list operations; never sent to the backend.
    pub local_id: Uuid,
    /// Backend id, present when editing an existing variant or after this
    /// draft's create step succeeded.
    pub persisted_id: Option<VariantId>,
    pub size: AttributeValue,
    pub color: AttributeValue,
    pub price: Price,
    pub images: Vec<ImageRef>,
}

/// The product being edited, owning its variants exclusively.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub category: CategoryRef,
    pub gender: Gender,
    pub brand: Option<String>,
    pub variants: Vec<VariantDraft>,
}

impl ProductDraft {
    /// Hydrate an edit-mode draft from a fetched product.
    ///
    /// Persisted variants keep their ids and their images become `Existing`
    /// refs, so a subsequent save updates rather than duplicates them.
    #[must_use]
    pub fn from_record(record: ProductRecord) -> Self {
        let category = record.sub_category_id.map_or_else(
            || CategoryRef::Kind(record.kind.clone().unwrap_or_default()),
            CategoryRef::Subcategory,
        );

        Self {
            title: record.title,
            description: record.description,
            category,
            gender: record.gender,
            brand: record.brand,
            variants: record.variants.into_iter().map(VariantDraft::from_record).collect(),
        }
    }
}

impl VariantDraft {
    fn from_record(record: VariantRecord) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            persisted_id: Some(record.id),
            size: record
                .size_id
                .map_or_else(|| AttributeValue::Literal(record.size.unwrap_or_default()), AttributeValue::Ref),
            color: record
                .color_id
                .map_or_else(|| AttributeValue::Literal(record.color.unwrap_or_default()), AttributeValue::Ref),
            price: record.price,
            images: record
                .images
                .into_iter()
                .map(|img| ImageRef::Existing { url: img.url })
                .collect(),
        }
    }
}
