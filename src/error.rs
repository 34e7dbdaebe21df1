use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

/// Request-level failures, translated to a status + `{message}` body at the
/// handler boundary. Nothing here escapes to crash a request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error")]
    Validation { details: Vec<String> },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        details.sort();
        Self::Validation { details }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return Self::Conflict("Email already registered".into());
            }
        }
        Self::Unexpected(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::Validation { details } => {
                warn!(?details, "request rejected by validation");
                (
                    StatusCode::BAD_REQUEST,
                    "Validation error".to_string(),
                    Some(details),
                )
            }
            ApiError::Unauthorized(message) => {
                warn!(%message, "unauthorized request");
                (StatusCode::UNAUTHORIZED, message, None)
            }
            ApiError::NotFound(message) => {
                warn!(%message, "resource not found");
                (StatusCode::NOT_FOUND, message, None)
            }
            ApiError::Conflict(message) => {
                warn!(%message, "domain conflict");
                (StatusCode::BAD_REQUEST, message, None)
            }
            ApiError::Unexpected(e) => {
                error!(error = %e, "unexpected failure");
                (StatusCode::BAD_REQUEST, e.to_string(), None)
            }
        };

        (status, Json(ErrorBody { message, details })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400_with_details() {
        let err = ApiError::Validation {
            details: vec!["email: Must be a valid email address".into()],
        };
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let res = ApiError::unauthorized("Not authorized, token failed").into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = ApiError::not_found("DSR not found").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_400() {
        let res = ApiError::conflict("Email already registered").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unexpected_maps_to_400() {
        let res = ApiError::Unexpected(anyhow::anyhow!("storage unavailable")).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validator_errors_collect_every_field() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 3, message = "too short"))]
            name: String,
            #[validate(email(message = "not an email"))]
            email: String,
        }

        let probe = Probe {
            name: "ab".into(),
            email: "nope".into(),
        };
        let err: ApiError = probe.validate().unwrap_err().into();
        match err {
            ApiError::Validation { details } => {
                assert_eq!(details.len(), 2);
                assert!(details.iter().any(|d| d.starts_with("name:")));
                assert!(details.iter().any(|d| d.starts_with("email:")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
