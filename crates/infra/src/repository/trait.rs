use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductId;
use catalog_products::{Product, ProductDraft};

/// Repository operation error.
///
/// These are **storage-level** failures, as opposed to domain errors
/// (validation). `AlreadyExists` and `NotFound` are part of the contract;
/// `Backend` carries anything the backing store itself reports (connection
/// failures, poisoned locks) and propagates unwrapped to the transport layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A product with the same id is already stored.
    #[error("product already exists")]
    AlreadyExists,

    /// No product is stored under the referenced id.
    #[error("product not found")]
    NotFound,

    /// The backing store failed.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Storage-agnostic CRUD contract over stored products.
///
/// Two interchangeable backends implement this: an in-memory map for
/// tests/dev and a Postgres table for persistent deployments. The backend is
/// selected once at startup; callers only ever see `Arc<dyn Repository>`.
///
/// Callers hand over already-validated products — the repository enforces
/// identity uniqueness and nothing else. Every operation either fully
/// succeeds or leaves the store unchanged.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Persist a new product under `product.id`.
    ///
    /// The caller guarantees the id is set; uniqueness is checked here (the
    /// in-memory backend consults the map, Postgres relies on its primary
    /// key constraint).
    async fn create(&self, product: Product) -> Result<(), RepositoryError>;

    /// Replace the stored product at `id` wholesale with the draft's fields.
    ///
    /// This is a replace, not a merge: a field left at its default in the
    /// draft overwrites whatever the stored product had.
    async fn update(&self, id: ProductId, draft: ProductDraft)
    -> Result<Product, RepositoryError>;

    /// Remove the product at `id`.
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Fetch a single product.
    async fn get(&self, id: ProductId) -> Result<Product, RepositoryError>;

    /// Fetch every stored product.
    ///
    /// Order is unspecified (backing-store iteration order); callers must
    /// not rely on it.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;
}

#[async_trait]
impl<R> Repository for Arc<R>
where
    R: Repository + ?Sized,
{
    async fn create(&self, product: Product) -> Result<(), RepositoryError> {
        (**self).create(product).await
    }

    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, RepositoryError> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        (**self).delete(id).await
    }

    async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        (**self).get(id).await
    }

    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        (**self).list().await
    }
}
