//! HTTP response builders for the webhook endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::core::models::RouterOutcome;
use crate::errors::AskError;
use crate::slack::response_builder::{modal_clear_body, modal_errors_body, status_ok_body};

/// A status code and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Returns a 200 OK response with `{"status":"ok"}`.
#[must_use]
pub fn ok_status() -> ApiResponse {
    ApiResponse {
        status: StatusCode::OK,
        body: status_ok_body(),
    }
}

/// Returns a 200 OK response telling Slack to close the modal.
#[must_use]
pub fn ok_modal_clear() -> ApiResponse {
    ApiResponse {
        status: StatusCode::OK,
        body: modal_clear_body(),
    }
}

/// Returns a 200 OK response with modal validation errors.
#[must_use]
pub fn ok_modal_errors(errors: &serde_json::Map<String, Value>) -> ApiResponse {
    ApiResponse {
        status: StatusCode::OK,
        body: modal_errors_body(errors),
    }
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status: StatusCode, message: &str) -> ApiResponse {
    ApiResponse {
        status,
        body: json!({ "error": message }),
    }
}

impl From<RouterOutcome> for ApiResponse {
    fn from(outcome: RouterOutcome) -> Self {
        match outcome {
            RouterOutcome::Acknowledged => ok_status(),
            RouterOutcome::ClearModal => ok_modal_clear(),
            RouterOutcome::FormErrors(errors) => ok_modal_errors(&errors),
        }
    }
}

impl From<AskError> for ApiResponse {
    fn from(err: AskError) -> Self {
        match err {
            AskError::AuthenticationFailure => err_response(StatusCode::FORBIDDEN, "Unauthorized"),
            _ => err_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }
}
