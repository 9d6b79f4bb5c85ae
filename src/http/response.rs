//! Response shaping.
//!
//! | Decision | Status | Body / Location |
//! |---|---|---|
//! | `Redirect` | rule status | `Location: <destination>` |
//! | `NotFound` | 404 | `404 Not Found` |
//! | `Unavailable` | 500 | `Redirect rules not available` |
//!
//! Anything unexpected (load failures, panics, unrepresentable headers)
//! becomes a 500 with `Internal Server Error`.

use std::any::Any;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::Decision;
use crate::rules::LoadError;

pub const NOT_FOUND_BODY: &str = "404 Not Found";
pub const UNAVAILABLE_BODY: &str = "Redirect rules not available";
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Failures that escape resolution.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid redirect location {0:?}")]
    InvalidLocation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error handling request");
        internal_error()
    }
}

impl IntoResponse for Decision {
    fn into_response(self) -> Response {
        match self {
            Decision::Redirect { status, location } => match HeaderValue::from_str(&location) {
                Ok(value) => (status, [(header::LOCATION, value)]).into_response(),
                Err(_) => AppError::InvalidLocation(location).into_response(),
            },
            Decision::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response(),
            Decision::Unavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, UNAVAILABLE_BODY).into_response()
            }
        }
    }
}

/// Generic 500.
pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Error handling request");
    internal_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_redirect_sets_location() {
        let response = Decision::Redirect {
            status: StatusCode::MOVED_PERMANENTLY,
            location: "https://target.com/new".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "https://target.com/new");
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = Decision::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_unavailable_body() {
        let response = Decision::Unavailable.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Redirect rules not available");
    }

    #[tokio::test]
    async fn test_load_error_is_generic_500() {
        let response = AppError::from(LoadError::NoSheets).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_unrepresentable_location_is_generic_500() {
        let response = Decision::Redirect {
            status: StatusCode::FOUND,
            location: "https://h/\nx".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_panic_handler() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal Server Error");
    }
}
