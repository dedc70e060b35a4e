//! HTTP application wiring (Axum router + handler modules).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and their mapping to domain types
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use catalog_infra::repository::Repository;
use catalog_infra::service::ProductService;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(repo: Arc<dyn Repository>) -> Router {
    let service = ProductService::new(repo);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/products", routes::products::router())
        .layer(Extension(service))
}
