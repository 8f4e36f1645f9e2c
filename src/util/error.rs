use axum::{response::{IntoResponse, Response}, http::StatusCode};
use serde::Serialize;

use crate::util::validation::FieldViolation;

#[derive(Debug, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    Internal,
    BadRequest,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::BadRequest => "BadRequest",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

// Catalog endpoints surface service failures with the generic envelope
impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => HandlerError {
                error: HandlerErrorKind::NotFound,
                message: msg,
                details: None,
            },
            ServiceError::Validation(violations) => HandlerError {
                error: HandlerErrorKind::Validation,
                message: "Invalid request".to_string(),
                details: Some(
                    violations
                        .iter()
                        .map(|v| format!("{}: {}", v.field, v.message))
                        .collect::<Vec<_>>()
                        .join("; "),
                ),
            },
            ServiceError::InternalError(msg) => HandlerError {
                error: HandlerErrorKind::Internal,
                message: msg,
                details: None,
            },
        }
    }
}


#[derive(Debug, Clone)]
pub enum ServiceError {
    NotFound(String),
    /// Field-tagged rule violations, in wire order
    Validation(Vec<FieldViolation>),
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::Validation(violations) => {
                write!(f, "Invalid Input: {} violation(s)", violations.len())
            }
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}
impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found: HandlerError = ServiceError::NotFound("Machine not found".to_string()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let invalid: HandlerError =
            ServiceError::Validation(vec![FieldViolation::new("hoursPerDay", "out of range")]).into();
        assert_eq!(invalid.details.as_deref(), Some("hoursPerDay: out of range"));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let internal: HandlerError = ServiceError::InternalError("boom".to_string()).into();
        assert_eq!(internal.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
