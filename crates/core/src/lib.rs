//! Loomwear Core - Shared types library.
//!
//! This crate provides common types used across all Loomwear components:
//! - `client` - Typed client for the remote catalog API
//! - `cli` - Command-line admin tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and enums
//! - [`slug`] - URL slug derivation and editable-slug tracking

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod slug;
pub mod types;

pub use slug::{SlugField, slugify};
pub use types::*;
