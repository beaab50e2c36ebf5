//! Core types for Loomwear.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod gender;
pub mod id;
pub mod price;

pub use category::{Category, MAX_NAME_LEN, is_valid_slug};
pub use gender::Gender;
pub use id::*;
pub use price::Price;
