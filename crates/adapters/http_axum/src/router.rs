//! Axum router assembly.

use std::path::Path;

use axum::Router;
use axum::handler::Handler;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use relayhub_app::ports::{EventPublisher, RelayOutput};

use crate::handlers::{dispatch, health};
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// `/health` is answered directly. When `assets` is set, files under it
/// are served as-is; every other request falls through to the request
/// router, which owns `/relay`, `/status` and the not-found answer.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<O, P>(state: AppState<O, P>, assets: Option<&Path>) -> Router
where
    O: RelayOutput + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let routed = dispatch::<O, P>.with_state(state.clone());
    let router = Router::new().route("/health", get(health::<O, P>));

    let router = match assets {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .fallback(routed),
        ),
        None => router.fallback_service(routed),
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use relayhub_adapter_virtual::SimulatedOutput;
    use relayhub_app::event_bus::InProcessEventBus;
    use relayhub_app::request_router::RequestRouter;
    use relayhub_app::services::relay_bank::RelayBank;
    use tower::ServiceExt;

    fn test_state() -> (AppState<Arc<SimulatedOutput>, InProcessEventBus>, Arc<SimulatedOutput>) {
        let output = Arc::new(SimulatedOutput::new());
        let bank = RelayBank::new(
            vec![1, 2, 3, 4, 5, 6, 7],
            Arc::clone(&output),
            InProcessEventBus::new(16),
        );
        let state = AppState::new(RequestRouter::new(Arc::new(bank)));
        (state, output)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (state, _) = test_state();
        let (status, body) = get(build(state, None), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok","relays":7}"#);
    }

    #[tokio::test]
    async fn should_serve_status_as_json() {
        let (state, _) = test_state();
        let response = build(state, None)
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn should_drive_output_line_when_relay_switched() {
        let (state, output) = test_state();
        let (status, body) = get(build(state, None), "/relay?relay=2&state=on").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert!(output.level(3));
    }

    #[tokio::test]
    async fn should_return_bad_request_for_invalid_parameters() {
        let (state, output) = test_state();
        let app = build(state, None);

        let (status, body) = get(app.clone(), "/relay?relay=9&state=on").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("relay 9 does not exist"));

        let (status, _) = get(app, "/relay?relay=3&state=maybe").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(output.journal().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_path() {
        let (state, _) = test_state();
        let (status, body) = get(build(state, None), "/relays").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"no route for `/relays`"}"#);
    }

    #[tokio::test]
    async fn should_reject_non_get_methods() {
        let (state, output) = test_state();
        let response = build(state, None)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/relay?relay=1&state=on")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(output.journal().is_empty());
    }

    #[tokio::test]
    async fn should_reject_head_on_relay_without_switching() {
        let (state, output) = test_state();
        let response = build(state, None)
            .oneshot(
                Request::builder()
                    .method("HEAD")
                    .uri("/relay?relay=2&state=on")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(output.journal().is_empty());
    }

    #[tokio::test]
    async fn should_serve_static_assets_and_fall_through_to_router() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("script.js"), "// poll").unwrap();
        let (state, _) = test_state();
        let app = build(state, Some(dir.path()));

        let (status, body) = get(app.clone(), "/script.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "// poll");

        let (status, body) = get(app.clone(), "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with(r#"{"relay0":false"#));

        let (status, _) = get(app, "/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
