use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::CoreError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: error.into(), detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.detail {
            Some(detail) => serde_json::json!({"error": self.error, "detail": detail}),
            None => serde_json::json!({"error": self.error}),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidArgument(_) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::Storage(_) => {
                error!(err = %e, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
            }
        }
    }
}

impl From<CoreError> for JsonApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Upstream(code) => {
                let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
                Self::new(status, "External API returned an error", Some(e.to_string()))
            }
            CoreError::Network(_) => Self::new(StatusCode::BAD_GATEWAY, "Failed to call external API", Some(e.to_string())),
            CoreError::Parse(_) => Self::new(StatusCode::BAD_GATEWAY, "Failed to decode external API response", Some(e.to_string())),
        }
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(e: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid path parameter", Some(e.body_text()))
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self {
        Self::new(e.status(), "Invalid request body", Some(e.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        assert_eq!(JsonApiError::from(ServiceError::invalid_argument("page")).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(ServiceError::not_found("song")).status, StatusCode::NOT_FOUND);
        assert_eq!(JsonApiError::from(ServiceError::storage("list songs", "boom")).status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_status_is_passed_through() {
        assert_eq!(JsonApiError::from(CoreError::Upstream(404)).status, StatusCode::NOT_FOUND);
        assert_eq!(JsonApiError::from(CoreError::Upstream(1000)).status, StatusCode::BAD_GATEWAY);
        assert_eq!(JsonApiError::from(CoreError::Network("refused".into())).status, StatusCode::BAD_GATEWAY);
    }
}
