//! Request handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use relayhub_app::ports::{EventPublisher, RelayOutput};
use relayhub_app::request_router::{RouteRequest, RouteResponse};
use relayhub_domain::error::{BadRequestError, RelayHubError};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the dispatch handler.
pub enum DispatchResponse {
    Routed(RouteResponse),
    MethodNotAllowed,
}

impl IntoResponse for DispatchResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Routed(RouteResponse::Acknowledged) => StatusCode::OK.into_response(),
            Self::Routed(RouteResponse::Body { content_type, body }) => {
                ([(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED.into_response(),
        }
    }
}

/// Body of the health endpoint.
#[derive(Serialize)]
pub struct HealthBody {
    status: &'static str,
    relays: usize,
}

/// Any path — hand the request to the [`RequestRouter`](relayhub_app::request_router::RequestRouter).
///
/// # Errors
///
/// Returns an [`ApiError`] for malformed query strings and for every
/// error raised by the router.
pub async fn dispatch<O, P>(
    State(state): State<AppState<O, P>>,
    method: Method,
    uri: Uri,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<DispatchResponse, ApiError>
where
    O: RelayOutput + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    if method != Method::GET {
        return Ok(DispatchResponse::MethodNotAllowed);
    }
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected query string");
        ApiError::from(RelayHubError::from(BadRequestError::MalformedQuery))
    })?;

    let request = RouteRequest::new(uri.path(), params);
    let response = state.router.handle(&request)?;
    Ok(DispatchResponse::Routed(response))
}

/// `GET /health`
pub async fn health<O, P>(State(state): State<AppState<O, P>>) -> Json<HealthBody>
where
    O: RelayOutput + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Json(HealthBody {
        status: "ok",
        relays: state.router.bank().len(),
    })
}
