use crate::errors::{
    error::ErrorResponse,
    service::{ErrorKind, ServiceError},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ErrorKind::Unauthenticated, message)
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        let kind = err.kind();

        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AccessDenied => StatusCode::FORBIDDEN,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::InsufficientInventory
            | ErrorKind::EventNotPublished
            | ErrorKind::QuantityOutOfRange
            | ErrorKind::InvalidCapacity
            | ErrorKind::AlreadyInTerminalState
            | ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::UpstreamFailure => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &err {
            ServiceError::Upstream(_) | ServiceError::Internal(_) | ServiceError::Bcrypt(_) => {
                error!("❌ Request failed: {err}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpError::new(status, kind, message)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            status: "error".into(),
            kind: self.kind.as_str().to_string(),
            message: self.message,
        });

        (self.status, body).into_response()
    }
}
