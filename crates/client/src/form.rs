//! Raw form state and validation into drafts.
//!
//! Validation never fails fast: every violated field is reported in one
//! pass, so a UI can render the complete checklist at once.

use loomwear_core::{Gender, MAX_NAME_LEN, Price, SlugField, VariantId, is_valid_slug};
use uuid::Uuid;

use crate::api::types::CategoryPayload;
use crate::draft::{AttributeValue, CategoryRef, ImageRef, ProductDraft, VariantDraft};

/// One violated field, named the way the UI addresses it
/// (e.g. `variants[1].price`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raw state of one variant row in the product form.
#[derive(Debug, Clone, Default)]
pub struct VariantForm {
    pub local_id: Uuid,
    /// Present when this row edits an already-persisted variant.
    pub persisted_id: Option<VariantId>,
    pub size: Option<AttributeValue>,
    pub color: Option<AttributeValue>,
    pub price: Option<Price>,
    pub images: Vec<ImageRef>,
}

/// Raw state of the product form as typed by the operator.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub category: Option<CategoryRef>,
    pub gender: Option<Gender>,
    pub brand: Option<String>,
    pub variants: Vec<VariantForm>,
}

impl ProductForm {
    /// Validate the form into a draft, or report every violated field.
    ///
    /// # Errors
    ///
    /// Returns the complete set of violations; the set is never empty on the
    /// error path.
    pub fn validate(self) -> Result<ProductDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if self.description.trim().is_empty() {
            errors.push(FieldError::new("description", "Description is required"));
        }
        if self.gender.is_none() {
            errors.push(FieldError::new("gender", "Gender is required"));
        }
        match &self.category {
            None => errors.push(FieldError::new("category", "Category is required")),
            Some(CategoryRef::Kind(kind)) if kind.trim().is_empty() => {
                errors.push(FieldError::new("category", "Category is required"));
            }
            Some(_) => {}
        }
        if self.variants.is_empty() {
            errors.push(FieldError::new("variants", "At least one variant is required"));
        }

        for (index, variant) in self.variants.iter().enumerate() {
            variant.check(index, &mut errors);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // All options were checked above; unwrap via defaults is unreachable.
        let variants = self
            .variants
            .into_iter()
            .map(|v| VariantDraft {
                local_id: v.local_id,
                persisted_id: v.persisted_id,
                size: v.size.unwrap_or_else(|| AttributeValue::Literal(String::new())),
                color: v.color.unwrap_or_else(|| AttributeValue::Literal(String::new())),
                price: v.price.unwrap_or_else(|| Price::new(rust_decimal::Decimal::ZERO)),
                images: v.images,
            })
            .collect();

        Ok(ProductDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.unwrap_or_else(|| CategoryRef::Kind(String::new())),
            gender: self.gender.unwrap_or(Gender::Unisex),
            brand: self
                .brand
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
            variants,
        })
    }
}

impl VariantForm {
    fn check(&self, index: usize, errors: &mut Vec<FieldError>) {
        if !self.size.as_ref().is_some_and(AttributeValue::is_set) {
            errors.push(FieldError::new(
                format!("variants[{index}].size"),
                "Size is required",
            ));
        }
        if !self.color.as_ref().is_some_and(AttributeValue::is_set) {
            errors.push(FieldError::new(
                format!("variants[{index}].color"),
                "Color is required",
            ));
        }
        if !self.price.is_some_and(|p| p.is_valid()) {
            errors.push(FieldError::new(
                format!("variants[{index}].price"),
                "Price must be greater than zero",
            ));
        }
        if self.images.is_empty() {
            errors.push(FieldError::new(
                format!("variants[{index}].images"),
                "At least one image is required",
            ));
        }
    }
}

/// Raw state of the category form.
///
/// The slug auto-follows the name until hand-edited; see
/// [`loomwear_core::SlugField`].
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    name: String,
    slug: SlugField,
    description: Option<String>,
}

impl CategoryForm {
    /// Start a form pre-populated from an existing category.
    #[must_use]
    pub fn from_existing(name: &str, slug: &str, description: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            slug: SlugField::from_existing(name, slug),
            description,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.value()
    }

    /// Edit the name; the slug follows unless hand-edited.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.slug.on_name_change(name);
    }

    /// Hand-edit the slug.
    pub fn set_slug(&mut self, slug: &str) {
        self.slug.on_slug_edit(slug, &self.name);
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Validate into a request payload, or report every violated field.
    ///
    /// # Errors
    ///
    /// Returns the complete set of violations.
    pub fn validate(&self) -> Result<CategoryPayload, Vec<FieldError>> {
        let mut errors = Vec::new();
        let name = self.name.trim();
        let slug = self.slug.value().trim();

        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        } else if name.len() > MAX_NAME_LEN {
            errors.push(FieldError::new("name", "Max 100 characters"));
        }

        if slug.is_empty() {
            errors.push(FieldError::new("slug", "Slug is required"));
        } else if slug.len() > MAX_NAME_LEN {
            errors.push(FieldError::new("slug", "Max 100 characters"));
        } else if !is_valid_slug(slug) {
            errors.push(FieldError::new("slug", "Alphanumeric and hyphens only"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CategoryPayload {
            name: name.to_string(),
            slug: slug.to_string(),
            description: self
                .description
                .as_ref()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }
}
