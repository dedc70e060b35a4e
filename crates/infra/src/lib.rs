//! `catalog-infra` — storage backends and application services.
//!
//! Contains the storage-agnostic [`repository::Repository`] contract with
//! its two interchangeable backends (in-memory map, Postgres table) and the
//! [`service::ProductService`] that sits above it.

pub mod repository;
pub mod service;

pub use repository::{InMemoryRepository, PostgresRepository, Repository, RepositoryError};
pub use service::{ProductService, ServiceError};
