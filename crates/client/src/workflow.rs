//! The product save workflow.
//!
//! Saving a product is an ordered sequence of dependent remote calls:
//! product header first, then each variant, then each variant's new images.
//! Steps run strictly in index order, never concurrently, so at most one
//! mutation is in flight and every failure is attributable to exactly one
//! entity. Nothing is rolled back: partial success stays persisted on the
//! backend, captured ids stay in the caller's draft, and a resubmission
//! updates instead of re-creating.
//!
//! Cancellation (dropping the returned future) abandons queued steps, but
//! calls already issued may still land server-side. Treat an abandoned
//! submission as unknown final state, not rolled back.

use loomwear_core::{ProductId, VariantId};
use thiserror::Error;
use tracing::instrument;

use crate::api::types::{CreateVariantPayload, ProductPayload, VariantPayload};
use crate::api::{CatalogClient, CatalogError, ImageUpload};
use crate::draft::{ImageRef, ProductDraft};
use crate::notify::NotificationSink;

/// The remote calls the workflow depends on.
///
/// A trait seam so the workflow can be exercised against an in-memory fake;
/// [`CatalogClient`] is the production implementation.
pub trait CatalogApi {
    fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<ProductId, CatalogError>> + Send;

    fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;

    fn create_variant(
        &self,
        payload: &CreateVariantPayload,
    ) -> impl Future<Output = Result<VariantId, CatalogError>> + Send;

    fn update_variant(
        &self,
        id: VariantId,
        payload: &VariantPayload,
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;

    fn upload_variant_image(
        &self,
        upload: ImageUpload<'_>,
    ) -> impl Future<Output = Result<String, CatalogError>> + Send;
}

impl CatalogApi for CatalogClient {
    async fn create_product(&self, payload: &ProductPayload) -> Result<ProductId, CatalogError> {
        Self::create_product(self, payload).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), CatalogError> {
        Self::update_product(self, id, payload).await
    }

    async fn create_variant(
        &self,
        payload: &CreateVariantPayload,
    ) -> Result<VariantId, CatalogError> {
        Self::create_variant(self, payload).await
    }

    async fn update_variant(
        &self,
        id: VariantId,
        payload: &VariantPayload,
    ) -> Result<(), CatalogError> {
        Self::update_variant(self, id, payload).await
    }

    async fn upload_variant_image(&self, upload: ImageUpload<'_>) -> Result<String, CatalogError> {
        Self::upload_variant_image(self, upload).await
    }
}

/// Whether the submission creates a new product or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update(ProductId),
}

/// One phase of the workflow, for failure attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Product,
    /// Variant create/update, by index within the draft.
    Variant(usize),
    /// Image upload, by variant index and image index.
    Image { variant: usize, image: usize },
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Variant(i) => write!(f, "variant {}", i + 1),
            Self::Image { variant, image } => {
                write!(f, "image {} of variant {}", image + 1, variant + 1)
            }
        }
    }
}

/// A remote call that failed, attributed to its step.
#[derive(Debug, Error)]
#[error("{step} failed: {cause}")]
pub struct StepError {
    pub step: Step,
    #[source]
    pub cause: CatalogError,
}

/// Terminal failure of one submission attempt.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The product step failed; nothing downstream was attempted.
    #[error("{0}")]
    Step(StepError),

    /// One or more variant/image steps failed after the product persisted.
    ///
    /// `product_id` is the persisted product, so a retry can run in update
    /// mode instead of creating a duplicate.
    #[error("saved with {} failed step(s): {}", errors.len(), format_steps(errors))]
    Partial {
        product_id: ProductId,
        errors: Vec<StepError>,
    },
}

impl SaveError {
    /// The failed steps, in execution order.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        match self {
            Self::Step(e) => vec![e.step],
            Self::Partial { errors, .. } => errors.iter().map(|e| e.step).collect(),
        }
    }

    /// The product id, when the product step persisted before the failure.
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::Step(_) => None,
            Self::Partial { product_id, .. } => Some(*product_id),
        }
    }
}

fn format_steps(errors: &[StepError]) -> String {
    errors
        .iter()
        .map(StepError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// What to do with remaining variants after one variant's call fails.
///
/// A failed variant's own images are always skipped - its id is a dependency
/// of those uploads. The policy only governs the *other* variants, which are
/// independent branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantFailurePolicy {
    /// Keep processing independent variants (the default).
    ContinueIndependent,
    /// Abort all remaining variants on the first failure.
    AbortRemaining,
}

/// Orchestrates one submission of one draft.
///
/// A workflow instance is created at submit time and discarded after it
/// settles. There is no automatic retry; the operator corrects and
/// resubmits, and the id-enriched draft guarantees the retry won't duplicate
/// what already persisted.
pub struct SaveWorkflow<C, N> {
    api: C,
    notifier: N,
    policy: VariantFailurePolicy,
}

impl<C: CatalogApi, N: NotificationSink> SaveWorkflow<C, N> {
    pub const fn new(api: C, notifier: N) -> Self {
        Self {
            api,
            notifier,
            policy: VariantFailurePolicy::ContinueIndependent,
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: VariantFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Execute the save sequence over `draft`.
    ///
    /// Backend-assigned ids are written into `draft` as they are captured,
    /// on the failure path too, so the caller can resubmit the same draft
    /// without duplicating persisted entities.
    ///
    /// # Returns
    ///
    /// The product id on full success.
    ///
    /// # Errors
    ///
    /// [`SaveError::Step`] if the product step failed (nothing downstream
    /// attempted); [`SaveError::Partial`] if any variant or image step
    /// failed after the product persisted.
    #[instrument(skip(self, draft), fields(mode = ?mode, variants = draft.variants.len()))]
    pub async fn execute(
        &self,
        draft: &mut ProductDraft,
        mode: SaveMode,
    ) -> Result<ProductId, SaveError> {
        let header = ProductPayload::from_draft(draft);

        let product_id = match mode {
            SaveMode::Create => self.api.create_product(&header).await,
            SaveMode::Update(id) => self.api.update_product(id, &header).await.map(|()| id),
        }
        .map_err(|cause| {
            let error = StepError {
                step: Step::Product,
                cause,
            };
            self.notifier.error(&format!("Failed to save product: {error}"));
            SaveError::Step(error)
        })?;

        let mut errors = Vec::new();
        // Variants whose step failed this run; their image uploads are
        // skipped because the images depend on the variant being current.
        let mut failed_variants = vec![false; draft.variants.len()];
        let mut aborted_at = None;

        for (index, variant) in draft.variants.iter_mut().enumerate() {
            let result = match variant.persisted_id {
                Some(id) => {
                    let payload = VariantPayload::from_draft(variant);
                    self.api.update_variant(id, &payload).await
                }
                None => {
                    let payload = CreateVariantPayload {
                        product_id,
                        variant: VariantPayload::from_draft(variant),
                    };
                    match self.api.create_variant(&payload).await {
                        Ok(id) => {
                            variant.persisted_id = Some(id);
                            Ok(())
                        }
                        Err(e) => Err(e),
                    }
                }
            };

            if let Err(cause) = result {
                if let Some(flag) = failed_variants.get_mut(index) {
                    *flag = true;
                }
                errors.push(StepError {
                    step: Step::Variant(index),
                    cause,
                });
                if self.policy == VariantFailurePolicy::AbortRemaining {
                    aborted_at = Some(index);
                    break;
                }
            }
        }

        for (index, variant) in draft.variants.iter().enumerate() {
            if aborted_at.is_some_and(|at| index >= at) {
                break;
            }
            if failed_variants.get(index).copied().unwrap_or(false) {
                continue;
            }
            let Some(variant_id) = variant.persisted_id else {
                continue;
            };

            for (image_index, image) in variant.images.iter().enumerate() {
                // Existing refs are backend-owned; skipping them is a
                // deliberate no-op, not an error path.
                let ImageRef::New { bytes, filename } = image else {
                    continue;
                };
                let upload = ImageUpload {
                    variant_id,
                    bytes,
                    filename,
                    is_primary: image_index == 0,
                    sort_order: image_index,
                };
                if let Err(cause) = self.api.upload_variant_image(upload).await {
                    errors.push(StepError {
                        step: Step::Image {
                            variant: index,
                            image: image_index,
                        },
                        cause,
                    });
                }
            }
        }

        if errors.is_empty() {
            let verb = match mode {
                SaveMode::Create => "created",
                SaveMode::Update(_) => "updated",
            };
            self.notifier.success(&format!("Product {verb} successfully"));
            Ok(product_id)
        } else {
            let error = SaveError::Partial { product_id, errors };
            self.notifier.error(&format!("Product partially saved: {error}"));
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{AttributeValue, CategoryRef, VariantDraft};
    use loomwear_core::{Gender, Price};
    use rust_decimal::Decimal;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        CreateProduct,
        UpdateProduct(ProductId),
        CreateVariant,
        UpdateVariant(VariantId),
        UploadImage {
            variant: VariantId,
            is_primary: bool,
            sort_order: usize,
        },
    }

    /// In-memory catalog backend that records calls and scripts failures.
    #[derive(Default)]
    struct FakeCatalog {
        calls: Mutex<Vec<Call>>,
        fail_product: bool,
        /// Fail the nth variant-create call (0-based count across the run).
        fail_nth_variant_create: Option<usize>,
        /// Fail the nth upload call (0-based count across the run).
        fail_nth_upload: Option<usize>,
        variant_creates_seen: Mutex<usize>,
        uploads_seen: Mutex<usize>,
        next_variant_id: Mutex<i64>,
    }

    impl FakeCatalog {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().expect("lock").clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().expect("lock").push(call);
        }

        fn backend_error(what: &str) -> CatalogError {
            CatalogError::Api {
                status: 500,
                message: format!("{what} exploded"),
            }
        }
    }

    impl CatalogApi for &FakeCatalog {
        async fn create_product(
            &self,
            _payload: &ProductPayload,
        ) -> Result<ProductId, CatalogError> {
            self.record(Call::CreateProduct);
            if self.fail_product {
                return Err(FakeCatalog::backend_error("product create"));
            }
            Ok(ProductId::new(100))
        }

        async fn update_product(
            &self,
            id: ProductId,
            _payload: &ProductPayload,
        ) -> Result<(), CatalogError> {
            self.record(Call::UpdateProduct(id));
            if self.fail_product {
                return Err(FakeCatalog::backend_error("product update"));
            }
            Ok(())
        }

        async fn create_variant(
            &self,
            _payload: &CreateVariantPayload,
        ) -> Result<VariantId, CatalogError> {
            self.record(Call::CreateVariant);
            let mut seen = self.variant_creates_seen.lock().expect("lock");
            let nth = *seen;
            *seen += 1;
            drop(seen);

            if self.fail_nth_variant_create == Some(nth) {
                return Err(FakeCatalog::backend_error("variant create"));
            }
            let mut next = self.next_variant_id.lock().expect("lock");
            *next += 1;
            Ok(VariantId::new(*next))
        }

        async fn update_variant(
            &self,
            id: VariantId,
            _payload: &VariantPayload,
        ) -> Result<(), CatalogError> {
            self.record(Call::UpdateVariant(id));
            Ok(())
        }

        async fn upload_variant_image(
            &self,
            upload: ImageUpload<'_>,
        ) -> Result<String, CatalogError> {
            self.record(Call::UploadImage {
                variant: upload.variant_id,
                is_primary: upload.is_primary,
                sort_order: upload.sort_order,
            });
            let mut seen = self.uploads_seen.lock().expect("lock");
            let nth = *seen;
            *seen += 1;
            drop(seen);

            if self.fail_nth_upload == Some(nth) {
                return Err(FakeCatalog::backend_error("upload"));
            }
            Ok(format!("https://cdn.example.com/{}", upload.filename))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        successes: Mutex<Vec<String>>,
        errors: Mutex<Vec<String>>,
    }

    impl NotificationSink for &RecordingSink {
        fn success(&self, message: &str) {
            self.successes.lock().expect("lock").push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.lock().expect("lock").push(message.to_string());
        }
    }

    fn new_image(name: &str) -> ImageRef {
        ImageRef::New {
            bytes: vec![0xFF, 0xD8, 0xFF],
            filename: name.to_string(),
        }
    }

    fn new_variant(images: Vec<ImageRef>) -> VariantDraft {
        VariantDraft {
            local_id: Uuid::new_v4(),
            persisted_id: None,
            size: AttributeValue::Literal("M".to_string()),
            color: AttributeValue::Literal("navy".to_string()),
            price: Price::new(Decimal::new(4999, 2)),
            images,
        }
    }

    fn draft(variants: Vec<VariantDraft>) -> ProductDraft {
        ProductDraft {
            title: "Denim Jacket".to_string(),
            description: "Classic fit".to_string(),
            category: CategoryRef::Kind("jackets".to_string()),
            gender: Gender::Unisex,
            brand: None,
            variants,
        }
    }

    fn uploads(calls: &[Call]) -> Vec<(bool, usize)> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::UploadImage {
                    is_primary,
                    sort_order,
                    ..
                } => Some((*is_primary, *sort_order)),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_create_issues_expected_call_sequence() {
        let api = FakeCatalog::default();
        let sink = RecordingSink::default();
        let mut draft = draft(vec![
            new_variant(vec![new_image("a0.jpg"), new_image("a1.jpg")]),
            new_variant(vec![new_image("b0.jpg"), new_image("b1.jpg")]),
        ]);

        let workflow = SaveWorkflow::new(&api, &sink);
        let product_id = workflow
            .execute(&mut draft, SaveMode::Create)
            .await
            .expect("clean run");

        assert_eq!(product_id, ProductId::new(100));
        let calls = api.calls();
        assert_eq!(
            calls.iter().filter(|c| **c == Call::CreateProduct).count(),
            1
        );
        assert_eq!(
            calls.iter().filter(|c| **c == Call::CreateVariant).count(),
            2
        );
        // isPrimary only at index 0 of each variant; sortOrder == index.
        assert_eq!(
            uploads(&calls),
            vec![(true, 0), (false, 1), (true, 0), (false, 1)]
        );
        // Captured ids flow back into the draft.
        assert!(draft.variants.iter().all(|v| v.persisted_id.is_some()));
        assert_eq!(sink.successes.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn test_product_step_failure_is_fatal() {
        let api = FakeCatalog {
            fail_product: true,
            ..FakeCatalog::default()
        };
        let sink = RecordingSink::default();
        let mut draft = draft(vec![new_variant(vec![new_image("a.jpg")])]);

        let workflow = SaveWorkflow::new(&api, &sink);
        let error = workflow
            .execute(&mut draft, SaveMode::Create)
            .await
            .expect_err("product step fails");

        assert_eq!(error.steps(), vec![Step::Product]);
        // Nothing downstream was attempted.
        assert_eq!(api.calls(), vec![Call::CreateProduct]);
        assert_eq!(sink.errors.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn test_failed_variant_skips_own_images_but_not_others() {
        let api = FakeCatalog {
            fail_nth_variant_create: Some(0),
            ..FakeCatalog::default()
        };
        let sink = RecordingSink::default();
        let mut draft = draft(vec![
            new_variant(vec![new_image("a0.jpg"), new_image("a1.jpg")]),
            new_variant(vec![new_image("b0.jpg"), new_image("b1.jpg")]),
        ]);

        let workflow = SaveWorkflow::new(&api, &sink);
        let error = workflow
            .execute(&mut draft, SaveMode::Create)
            .await
            .expect_err("variant 0 fails");

        // ContinueIndependent: variant 1 is still attempted.
        assert_eq!(error.steps(), vec![Step::Variant(0)]);
        let calls = api.calls();
        assert_eq!(
            calls.iter().filter(|c| **c == Call::CreateVariant).count(),
            2
        );
        // Only variant 1's images upload.
        assert_eq!(uploads(&calls), vec![(true, 0), (false, 1)]);
        assert!(draft.variants.first().expect("v0").persisted_id.is_none());
        assert!(draft.variants.get(1).expect("v1").persisted_id.is_some());
    }

    #[tokio::test]
    async fn test_abort_remaining_policy_stops_at_first_variant_failure() {
        let api = FakeCatalog {
            fail_nth_variant_create: Some(0),
            ..FakeCatalog::default()
        };
        let sink = RecordingSink::default();
        let mut draft = draft(vec![
            new_variant(vec![new_image("a.jpg")]),
            new_variant(vec![new_image("b.jpg")]),
        ]);

        let workflow = SaveWorkflow::new(&api, &sink)
            .with_policy(VariantFailurePolicy::AbortRemaining);
        let error = workflow
            .execute(&mut draft, SaveMode::Create)
            .await
            .expect_err("variant 0 fails");

        assert_eq!(error.steps(), vec![Step::Variant(0)]);
        let calls = api.calls();
        assert_eq!(
            calls.iter().filter(|c| **c == Call::CreateVariant).count(),
            1
        );
        assert!(uploads(&calls).is_empty());
    }

    #[tokio::test]
    async fn test_update_mode_skips_existing_images() {
        let api = FakeCatalog::default();
        let sink = RecordingSink::default();
        let mut variant = new_variant(vec![
            ImageRef::Existing {
                url: "https://cdn.example.com/old.jpg".to_string(),
            },
            new_image("new.jpg"),
        ]);
        variant.persisted_id = Some(VariantId::new(7));
        let mut draft = draft(vec![variant]);

        let workflow = SaveWorkflow::new(&api, &sink);
        let product_id = workflow
            .execute(&mut draft, SaveMode::Update(ProductId::new(42)))
            .await
            .expect("clean run");

        assert_eq!(product_id, ProductId::new(42));
        let calls = api.calls();
        assert!(calls.contains(&Call::UpdateProduct(ProductId::new(42))));
        assert!(calls.contains(&Call::UpdateVariant(VariantId::new(7))));
        // Exactly one upload, for the new image only; it keeps its index.
        assert_eq!(uploads(&calls), vec![(false, 1)]);
    }

    #[tokio::test]
    async fn test_resubmission_does_not_recreate_captured_variants() {
        let sink = RecordingSink::default();
        let mut draft = draft(vec![
            new_variant(vec![new_image("a.jpg")]),
            new_variant(vec![new_image("b.jpg")]),
        ]);

        // First attempt: variant 1 (second create) fails.
        let api = FakeCatalog {
            fail_nth_variant_create: Some(1),
            ..FakeCatalog::default()
        };
        let workflow = SaveWorkflow::new(&api, &sink);
        let error = workflow
            .execute(&mut draft, SaveMode::Create)
            .await
            .expect_err("variant 1 fails");
        assert_eq!(error.steps(), vec![Step::Variant(1)]);
        let product_id = error.product_id().expect("product persisted");
        let captured = draft.variants.first().expect("v0").persisted_id;
        assert!(captured.is_some());

        // Retry over the same (id-enriched) draft: variant 0 is updated,
        // never re-created, and the product is updated rather than duplicated.
        let retry_api = FakeCatalog::default();
        let retry = SaveWorkflow::new(&retry_api, &sink);
        retry
            .execute(&mut draft, SaveMode::Update(product_id))
            .await
            .expect("clean retry");

        let calls = retry_api.calls();
        assert_eq!(
            calls.iter().filter(|c| **c == Call::CreateVariant).count(),
            1
        );
        assert!(calls.contains(&Call::UpdateVariant(captured.expect("captured id"))));
    }

    #[tokio::test]
    async fn test_image_failures_are_collected_not_fatal() {
        let api = FakeCatalog {
            fail_nth_upload: Some(0),
            ..FakeCatalog::default()
        };
        let sink = RecordingSink::default();
        let mut draft = draft(vec![new_variant(vec![
            new_image("a0.jpg"),
            new_image("a1.jpg"),
        ])]);

        let workflow = SaveWorkflow::new(&api, &sink);
        let error = workflow
            .execute(&mut draft, SaveMode::Create)
            .await
            .expect_err("first upload fails");

        assert_eq!(
            error.steps(),
            vec![Step::Image {
                variant: 0,
                image: 0
            }]
        );
        // The second upload was still attempted.
        assert_eq!(uploads(&api.calls()).len(), 2);
    }

    #[tokio::test]
    async fn test_partial_error_message_names_the_entity() {
        let api = FakeCatalog {
            fail_nth_variant_create: Some(0),
            ..FakeCatalog::default()
        };
        let sink = RecordingSink::default();
        let mut draft = draft(vec![new_variant(vec![new_image("a.jpg")])]);

        let workflow = SaveWorkflow::new(&api, &sink);
        let error = workflow
            .execute(&mut draft, SaveMode::Create)
            .await
            .expect_err("variant fails");

        let message = error.to_string();
        assert!(message.contains("variant 1"));
        // The backend's message field is surfaced verbatim.
        assert!(message.contains("variant create exploded"));
    }
}
