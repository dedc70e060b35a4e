//! Product application service (validation + identity assignment).
//!
//! Sits between the HTTP layer and the repository and owns the two
//! responsibilities the repository does not: validating caller input and
//! minting identities. The repository never sees unvalidated input — every
//! create/update runs the rule set first, and a validation failure
//! short-circuits before any persistence call.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use catalog_core::{DomainError, ProductId};
use catalog_products::{Product, ProductDraft, validate};

use crate::repository::{Repository, RepositoryError};

/// Service-level error: a domain failure or a repository failure, never
/// swallowed, never reclassified.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Application service for products.
///
/// Holds the repository behind `Arc<dyn Repository>`; the concrete backend
/// is chosen once at startup by configuration.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn Repository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Validate the draft, mint a time-ordered id and persist.
    #[instrument(skip(self, draft), err)]
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        validate(&draft)?;
        let product = draft.into_product(ProductId::new());
        self.repo.create(product.clone()).await?;
        Ok(product)
    }

    /// Validate the draft and replace the stored product at `id` wholesale.
    #[instrument(skip(self, draft), fields(id = %id), err)]
    pub async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, ServiceError> {
        validate(&draft)?;
        let product = self.repo.update(id, draft).await?;
        Ok(product)
    }

    #[instrument(skip(self), fields(id = %id), err)]
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        Ok(self.repo.delete(id).await?)
    }

    pub async fn get(&self, id: ProductId) -> Result<Product, ServiceError> {
        Ok(self.repo.get(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.repo.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    fn service() -> ProductService {
        ProductService::new(Arc::new(InMemoryRepository::new()))
    }

    fn draft(name: &str, description: &str, price: f64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: description.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let svc = service();
        let a = svc.create(draft("A", "", 1.0)).await.unwrap();
        let b = svc.create(draft("B", "", 2.0)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(!a.id.to_string().is_empty());
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let svc = service();
        let created = svc.create(draft("Test", "Desc", 10.0)).await.unwrap();

        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn invalid_create_leaves_repository_untouched() {
        let svc = service();

        let err = svc.create(draft("", "", 0.0)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::Validation(_))
        ));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_update_short_circuits_before_persistence() {
        let svc = service();
        let created = svc.create(draft("Keep", "Desc", 10.0)).await.unwrap();

        let err = svc
            .update(created.id, draft("Keep", "", -5.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::Validation(_))
        ));
        // The stored product is unchanged.
        assert_eq!(svc.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_preserves_id_and_replaces_fields() {
        let svc = service();
        let created = svc.create(draft("Test", "Old description", 10.0)).await.unwrap();

        let updated = svc
            .update(created.id, draft("Updated", "", 20.0))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Updated");
        assert_eq!(updated.description, "");
        assert_eq!(updated.price, 20.0);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let svc = service();
        let err = svc
            .update(ProductId::new(), draft("X", "", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let svc = service();
        let created = svc.create(draft("Test", "", 10.0)).await.unwrap();

        svc.delete(created.id).await.unwrap();
        let err = svc.get(created.id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn list_returns_all_created_products() {
        let svc = service();
        svc.create(draft("A", "", 1.0)).await.unwrap();
        svc.create(draft("B", "", 2.0)).await.unwrap();

        assert_eq!(svc.list().await.unwrap().len(), 2);
    }
}
