use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::ProductId;
use catalog_products::{Product, ProductDraft};

use super::r#trait::{Repository, RepositoryError};

/// In-memory product repository.
///
/// A single `RwLock`-guarded map shared across all operations: reads take
/// the lock shared, writes take it exclusively. Every call observes a
/// consistent snapshot and writes are serialized, which is all the
/// linearizability this store needs. Intended for tests/dev; not optimized
/// for performance.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create(&self, product: Product) -> Result<(), RepositoryError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;

        if products.contains_key(&product.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        products.insert(product.id, product);
        Ok(())
    }

    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;

        let slot = products.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        *slot = draft.into_product(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;

        products
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let products = self
            .products
            .read()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;

        products.get(&id).cloned().ok_or(RepositoryError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self
            .products
            .read()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;

        Ok(products.values().cloned().collect())
    }
}
