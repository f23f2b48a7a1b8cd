//! Typed errors and HTTP mapping.
//!
//! Bodies are plain text carrying the underlying message, so store errors reach
//! the caller verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Fixed body for update/delete calls that matched no row.
pub const NO_ROWS_AFFECTED: &str = "No rows affected";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", NO_ROWS_AFFECTED)]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// The request body could not be read; keeps the status axum chose (413 on the size limit).
    #[error("{1}")]
    Body(StatusCode, String),
    #[error("{0}")]
    Db(#[from] sqlx::Error),
    /// A stored row did not have the shape its table descriptor promises.
    #[error("{0}")]
    Decode(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Body(status, _) => *status,
            AppError::Db(_) | AppError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "request rejected");
        }
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            AppError::Body(StatusCode::PAYLOAD_TOO_LARGE, "too big".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Db(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Decode("bad row".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_error_text_is_exposed_verbatim() {
        let err = AppError::Db(sqlx::Error::Protocol("relation \"wells\" does not exist".into()));
        assert_eq!(
            err.to_string(),
            sqlx::Error::Protocol("relation \"wells\" does not exist".into()).to_string()
        );
        assert_eq!(AppError::NotFound.to_string(), "No rows affected");
    }
}
