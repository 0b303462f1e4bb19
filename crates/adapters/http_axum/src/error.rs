//! HTTP error response mapping.

use std::error::Error as _;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use relayhub_domain::error::RelayHubError;

/// JSON error body returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`RelayHubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(RelayHubError);

impl From<RelayHubError> for ApiError {
    fn from(err: RelayHubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.0.is_client_error() {
            // Output-line failures are already logged by the relay bank
            // with the relay and line attached.
            if let RelayHubError::Serialize(err) = &self.0 {
                tracing::error!(error = %err, "serialization error");
            }
            let body = ErrorBody {
                error: "internal server error".to_string(),
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }

        let status = if matches!(self.0, RelayHubError::NotFound(_)) {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };
        let message = self
            .0
            .source()
            .map_or_else(|| self.0.to_string(), ToString::to_string);

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
