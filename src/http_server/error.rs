use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid request body: {0}")]
    Json(#[from] JsonRejection),
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Json(_) | ApiError::Query(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::InvariantViolation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Client errors carry their message, server errors only reach the log.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if status.is_server_error() {
            log::error!("Request failed: {:?}", self);
            json!({
                "status": "error",
                "message": "Something went wrong on our side",
            })
        } else {
            log::debug!("Request rejected ({}): {}", status, self);
            json!({
                "status": "fail",
                "message": self.to_string(),
            })
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
