//! Products domain module.
//!
//! This crate contains the product data model and its validation rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod product;

pub use product::{NAME_MAX_CHARS, Product, ProductDraft, validate};
