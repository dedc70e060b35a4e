//! Product repository contract and backends.

mod in_memory;
mod postgres;
mod r#trait;

pub use in_memory::InMemoryRepository;
pub use postgres::PostgresRepository;
pub use r#trait::{Repository, RepositoryError};
