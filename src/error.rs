use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy shared by the stores, the computation core and the API
/// layer. Business-rule failures map to 4xx responses with readable
/// messages; storage failures map to a generic 500 and are logged with
/// full context at the point they surface.
#[derive(Debug, Error)]
pub enum HrmError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Insufficient leave balance. Available: {available} days, Requested: {requested} days")]
    InsufficientBalance { available: i64, requested: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Internal(#[from] sqlx::Error),
}

pub type HrmResult<T> = Result<T, HrmError>;

impl actix_web::ResponseError for HrmError {
    fn status_code(&self) -> StatusCode {
        match self {
            HrmError::NotFound(_) => StatusCode::NOT_FOUND,
            HrmError::InsufficientBalance { .. } | HrmError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            HrmError::Conflict(_) => StatusCode::CONFLICT,
            HrmError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            HrmError::Internal(e) => {
                tracing::error!(error = %e, "storage failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn not_found_maps_to_404() {
        let err = HrmError::NotFound("Staff member");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Staff member not found");
    }

    #[test]
    fn insufficient_balance_is_a_bad_request_with_both_figures() {
        let err = HrmError::InsufficientBalance {
            available: 2,
            requested: 5,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let msg = err.to_string();
        assert!(msg.contains("Available: 2"));
        assert!(msg.contains("Requested: 5"));
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = HrmError::Conflict("Username already exists".into());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn storage_errors_respond_with_generic_message() {
        let err = HrmError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
