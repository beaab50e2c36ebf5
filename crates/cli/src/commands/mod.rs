//! CLI command implementations.

pub mod category;
pub mod product;
