use crate::domain::error::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::NotUpdatable | DomainError::NotDeletable => {
                    (StatusCode::FORBIDDEN, err.to_string())
                }
                DomainError::Persistence(_) => {
                    error!(error = %err, "request failed in storage layer");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::AppError;
    use crate::domain::error::DomainError;

    fn status_of(err: DomainError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn domain_errors_map_to_distinct_statuses() {
        assert_eq!(
            status_of(DomainError::post_not_found(1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(DomainError::NotUpdatable), StatusCode::FORBIDDEN);
        assert_eq!(status_of(DomainError::NotDeletable), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(DomainError::Validation {
                field: "size",
                message: "must be > 0"
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::Persistence("connection reset".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
