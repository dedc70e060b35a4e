//! Postgres-backed product repository.
//!
//! Maps the repository contract onto a single `products` table. Id
//! uniqueness is enforced by the primary key: the in-memory backend checks
//! its map explicitly, this one lets the constraint decide and translates
//! SQLSTATE 23505 into [`RepositoryError::AlreadyExists`].
//!
//! `price` is stored as `NUMERIC(10,2)` while the model carries `f64`; the
//! conversion happens in SQL (`CAST(.. AS numeric)` on writes, `::float8`
//! on reads).

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use catalog_core::ProductId;
use catalog_products::{Product, ProductDraft};

use super::r#trait::{Repository, RepositoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          UUID PRIMARY KEY,
    name        VARCHAR(128) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    price       NUMERIC(10, 2) NOT NULL
)
"#;

/// Postgres-backed product repository.
///
/// Uses the sqlx connection pool, so the repository is `Send + Sync` and a
/// long-running statement blocks only the calling task.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: Arc<PgPool>,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `products` table if it is not present yet.
    ///
    /// Called once at startup; there is no further migration machinery.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    #[instrument(skip(self, product), fields(id = %product.id), err)]
    async fn create(&self, product: Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price)
            VALUES ($1, $2, $3, CAST($4 AS numeric))
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        Ok(())
    }

    #[instrument(skip(self, draft), fields(id = %id), err)]
    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, RepositoryError> {
        // All three columns are always written: update is a replace, not a
        // merge, on this backend too.
        let row = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = CAST($4 AS numeric)
            WHERE id = $1
            RETURNING id, name, description, price::float8 AS price
            "#,
        )
        .bind(id.as_uuid())
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        match row {
            Some(row) => product_from_row(&row),
            None => Err(RepositoryError::NotFound),
        }
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price::float8 AS price
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get", e))?;

        match row {
            Some(row) => product_from_row(&row),
            None => Err(RepositoryError::NotFound),
        }
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price::float8 AS price
            FROM products
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(product_from_row).collect()
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, RepositoryError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| map_sqlx_error("decode id", e))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| map_sqlx_error("decode name", e))?;
    let description: String = row
        .try_get("description")
        .map_err(|e| map_sqlx_error("decode description", e))?;
    let price: f64 = row
        .try_get("price")
        .map_err(|e| map_sqlx_error("decode price", e))?;

    Ok(Product {
        id: ProductId::from_uuid(id),
        name,
        description,
        price,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            // 23505: unique violation on the primary key.
            if db_err.code().as_deref() == Some("23505") {
                return RepositoryError::AlreadyExists;
            }
            RepositoryError::Backend(format!(
                "database error in {}: {}",
                operation,
                db_err.message()
            ))
        }
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::PoolClosed => {
            RepositoryError::Backend(format!("connection pool closed in {operation}"))
        }
        other => RepositoryError::Backend(format!("sqlx error in {operation}: {other}")),
    }
}
