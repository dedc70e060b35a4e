use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;
use catalog_infra::repository::RepositoryError;
use catalog_infra::service::ServiceError;

/// Map a service failure onto a JSON error response.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        ServiceError::Domain(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
        }
        ServiceError::Repository(RepositoryError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
        ServiceError::Repository(RepositoryError::AlreadyExists) => {
            json_error(StatusCode::CONFLICT, "already_exists", "product already exists")
        }
        ServiceError::Repository(RepositoryError::Backend(msg)) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
