//! Loomwear Client - typed access to the remote catalog API.
//!
//! This crate is the headless counterpart of the catalog admin UI: it owns
//! the draft model for a product being edited, form validation, the
//! multi-step save workflow, and the REST client the workflow drives.
//!
//! # Architecture
//!
//! - [`api`] - `CatalogClient`, a reqwest-based client for the backend's
//!   product/variant/image/category endpoints
//! - [`draft`] - `ProductDraft` and friends: the in-memory representation of
//!   a product being edited, with backend-assigned ids captured as steps
//!   succeed
//! - [`form`] - raw field state and collect-all validation into drafts
//! - [`workflow`] - `SaveWorkflow`, the ordered create/update/upload sequence
//!   with per-step failure attribution
//! - [`notify`] - the notification sink the workflow reports through
//! - [`config`] / [`credentials`] - environment configuration and injected
//!   bearer-token credentials
//!
//! # Example
//!
//! ```rust,ignore
//! use loomwear_client::{CatalogClient, CatalogConfig, SaveMode, SaveWorkflow, TracingSink};
//!
//! let config = CatalogConfig::from_env()?;
//! let client = CatalogClient::from_config(&config)?;
//!
//! let mut draft = form.validate()?;
//! let workflow = SaveWorkflow::new(client, TracingSink);
//! workflow.execute(&mut draft, SaveMode::Create).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod credentials;
pub mod draft;
pub mod form;
pub mod notify;
pub mod workflow;

pub use api::{CatalogClient, CatalogError};
pub use config::{CatalogConfig, ConfigError};
pub use credentials::{CredentialProvider, NoToken, StaticToken};
pub use draft::{AttributeValue, CategoryRef, ImageRef, ProductDraft, VariantDraft};
pub use form::{CategoryForm, FieldError, ProductForm, VariantForm};
pub use notify::{NotificationSink, TracingSink};
pub use workflow::{
    CatalogApi, SaveError, SaveMode, SaveWorkflow, Step, StepError, VariantFailurePolicy,
};
