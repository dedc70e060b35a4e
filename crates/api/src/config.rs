//! Environment-driven runtime configuration.

use anyhow::{Context, bail};

/// Which repository backend to run against, selected once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Postgres { url: String },
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: Backend,
    pub bind_addr: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// - `CATALOG_REPOSITORY`: `memory` (default) or `postgres`.
    /// - `DATABASE_URL`: required when the backend is `postgres`.
    /// - `CATALOG_ADDR`: bind address, default `0.0.0.0:8080`.
    pub fn from_env() -> anyhow::Result<Self> {
        let backend = match std::env::var("CATALOG_REPOSITORY").as_deref() {
            Err(_) | Ok("memory") => Backend::Memory,
            Ok("postgres") => {
                let url = std::env::var("DATABASE_URL")
                    .context("DATABASE_URL must be set for the postgres backend")?;
                Backend::Postgres { url }
            }
            Ok(other) => {
                bail!("CATALOG_REPOSITORY value '{other}' is not supported (use 'memory' or 'postgres')")
            }
        };

        let bind_addr =
            std::env::var("CATALOG_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Self { backend, bind_addr })
    }
}
