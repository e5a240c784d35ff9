use crate::errors::repository::RepositoryError;
use bcrypt::BcryptError;
use jsonwebtoken::errors::Error as JwtError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Not enough tickets available: requested={requested}, available={available}")]
    InsufficientInventory { requested: i32, available: i32 },

    #[error("Cannot book tickets for an unpublished event")]
    EventNotPublished,

    #[error("Quantity {quantity} is out of range, must be between 1 and {max}")]
    QuantityOutOfRange { quantity: i32, max: i32 },

    #[error("Capacity {requested} is below the {issued} tickets already issued")]
    InvalidCapacity { requested: i32, issued: i32 },

    #[error("{0}")]
    AlreadyInTerminalState(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] BcryptError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid Token")]
    InvalidTokenType,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    InsufficientInventory,
    EventNotPublished,
    QuantityOutOfRange,
    InvalidCapacity,
    AlreadyInTerminalState,
    ValidationFailed,
    Conflict,
    UpstreamFailure,
    Unauthenticated,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AccessDenied => "access_denied",
            ErrorKind::InsufficientInventory => "insufficient_inventory",
            ErrorKind::EventNotPublished => "event_not_published",
            ErrorKind::QuantityOutOfRange => "quantity_out_of_range",
            ErrorKind::InvalidCapacity => "invalid_capacity",
            ErrorKind::AlreadyInTerminalState => "already_in_terminal_state",
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::Conflict => "conflict",
            ErrorKind::UpstreamFailure => "upstream_failure",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::Internal => "internal",
        }
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::AccessDenied(_) => ErrorKind::AccessDenied,
            ServiceError::InsufficientInventory { .. } => ErrorKind::InsufficientInventory,
            ServiceError::EventNotPublished => ErrorKind::EventNotPublished,
            ServiceError::QuantityOutOfRange { .. } => ErrorKind::QuantityOutOfRange,
            ServiceError::InvalidCapacity { .. } => ErrorKind::InvalidCapacity,
            ServiceError::AlreadyInTerminalState(_) => ErrorKind::AlreadyInTerminalState,
            ServiceError::Validation(_) => ErrorKind::ValidationFailed,
            ServiceError::Conflict(_) => ErrorKind::Conflict,
            ServiceError::Upstream(_) => ErrorKind::UpstreamFailure,
            ServiceError::InvalidCredentials
            | ServiceError::Jwt(_)
            | ServiceError::TokenExpired
            | ServiceError::InvalidTokenType => ErrorKind::Unauthenticated,
            ServiceError::Bcrypt(_) | ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        ServiceError::NotFound(what.into())
    }

    pub fn access_denied(reason: impl Into<String>) -> Self {
        ServiceError::AccessDenied(reason.into())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("Record".into()),
            RepositoryError::Conflict(msg) | RepositoryError::AlreadyExists(msg) => {
                ServiceError::Conflict(msg)
            }
            RepositoryError::ForeignKey(msg) => {
                ServiceError::Validation(vec![format!("Foreign key violation: {msg}")])
            }
            RepositoryError::Sqlx(err) => ServiceError::Upstream(format!("Database error: {err}")),
            RepositoryError::Custom(msg) => ServiceError::Upstream(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_failures_are_upstream_not_business_errors() {
        let err = ServiceError::from(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(err.kind(), ErrorKind::UpstreamFailure);
    }

    #[test]
    fn duplicate_keys_surface_as_conflict() {
        let err = ServiceError::from(RepositoryError::AlreadyExists("vendors_user_name".into()));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn kinds_have_stable_names() {
        let err = ServiceError::InsufficientInventory {
            requested: 4,
            available: 3,
        };
        assert_eq!(err.kind().as_str(), "insufficient_inventory");
        assert_eq!(
            ServiceError::QuantityOutOfRange { quantity: 11, max: 10 }
                .kind()
                .as_str(),
            "quantity_out_of_range"
        );
    }
}
