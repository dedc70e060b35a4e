use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, ProductId};

/// Maximum accepted product name length, in characters (untrimmed).
pub const NAME_MAX_CHARS: usize = 128;

/// A stored product.
///
/// Every stored product satisfied [`validate`] at the time it was last
/// written; the service layer enforces this before any repository call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

/// Caller-supplied product fields.
///
/// Identity is deliberately absent: ids are assigned by the service on
/// create and fixed by the path parameter on update, so a caller-supplied
/// id has nowhere to leak in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

impl ProductDraft {
    /// Attach an identity, producing a storable product.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

/// Validate caller-supplied product fields.
///
/// Rule order is observable: when several rules fail, the first one in this
/// list is the error surfaced.
///
/// 1. `name`, after trimming whitespace, must be non-empty.
/// 2. `name` (untrimmed) must not exceed [`NAME_MAX_CHARS`] characters.
/// 3. `price` must be strictly greater than zero (NaN fails).
pub fn validate(draft: &ProductDraft) -> DomainResult<()> {
    if draft.name.trim().is_empty() {
        return Err(DomainError::validation(
            "Name is required and cannot be empty",
        ));
    }
    if draft.name.chars().count() > NAME_MAX_CHARS {
        return Err(DomainError::validation("Name cannot exceed 128 characters"));
    }
    if !(draft.price > 0.0) {
        return Err(DomainError::validation("Price must be greater than 0"));
    }
    Ok(())
}
