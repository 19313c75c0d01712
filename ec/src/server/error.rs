//! API error type and its JSON rendering

use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failures a request handler can report to the client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or semantically invalid input
    #[error("{error}")]
    BadRequest { error: String, hint: Option<String> },

    #[error("Endpoint not found: {method} {path}")]
    NotFound { path: String, method: String },

    #[error("{error}: {details}")]
    Internal { error: String, details: String },
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::BadRequest {
            error: error.into(),
            hint: None,
        }
    }

    pub fn bad_request_with_hint(error: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::BadRequest {
            error: error.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorBody {
            success: false,
            error: "",
            hint: None,
            path: None,
            method: None,
            details: None,
        };

        match &self {
            Self::BadRequest { error, hint } => {
                warn!(%error, "Rejected request");
                body.error = error.as_str();
                body.hint = hint.as_deref();
            }
            Self::NotFound { path, method } => {
                warn!(%method, %path, "No route");
                body.error = "Endpoint not found";
                body.path = Some(path.as_str());
                body.method = Some(method.as_str());
            }
            Self::Internal { error, details } => {
                error!(%error, %details, "Internal server error");
                body.error = error.as_str();
                body.details = Some(details.as_str());
            }
        }

        (status, Json(body)).into_response()
    }
}

/// Turn a handler panic into a 500 JSON response
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    ApiError::Internal {
        error: "Internal server error".to_string(),
        details,
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotFound {
                path: "/x".to_string(),
                method: "GET".to_string()
            }
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal {
                error: "e".to_string(),
                details: "d".to_string()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display() {
        let err = ApiError::bad_request_with_hint("Sequence must be an array", "use [1, 2]");
        assert_eq!(err.to_string(), "Sequence must be an array");

        let err = ApiError::NotFound {
            path: "/api/nope".to_string(),
            method: "POST".to_string(),
        };
        assert_eq!(err.to_string(), "Endpoint not found: POST /api/nope");
    }

    #[test]
    fn test_panic_response_status() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("kaboom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
