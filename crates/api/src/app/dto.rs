use serde::Deserialize;

use catalog_products::ProductDraft;

// -------------------------
// Request DTOs
// -------------------------

/// Request body for create/update.
///
/// The caller never supplies an id. Every field defaults so that a missing
/// field decodes to its zero value and surfaces as a validation error
/// rather than a body-rejection.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
}

impl ProductRequest {
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}
