use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware, security_headers_middleware};
use super::state::AppState;
use super::v1;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Routes with application state, before any middleware
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
}

/// Full HTTP application: routes, request ids, logging, metrics and security headers.
/// The Prometheus endpoint is mounted only when metrics are enabled.
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let mut router = create_router_with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware));

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{User, UserCandidate, UserId};
    use crate::infrastructure::notification::RecordingNotificationGateway;
    use crate::infrastructure::user::{InMemoryUserRepository, UserService};

    fn state() -> AppState {
        let system = User::new(UserId::RESERVED, UserCandidate::new("System", "system@localhost"));
        let service = UserService::new(
            Arc::new(InMemoryUserRepository::with_users(vec![system])),
            Arc::new(RecordingNotificationGateway::new()),
        );
        AppState::new(Arc::new(service))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints_respond() {
        let app = create_router(state(), None);

        for uri in ["/health", "/live", "/ready"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_responses_carry_request_id_and_security_headers() {
        let app = create_router(state(), None);

        let response = app.oneshot(get_request("/v1/users/1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[tokio::test]
    async fn test_incoming_request_id_is_echoed() {
        let app = create_router(state(), None);
        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "req-7")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-7");
    }

    #[tokio::test]
    async fn test_metrics_route_absent_when_disabled() {
        let app = create_router(state(), None);

        let response = app.oneshot(get_request("/metrics")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
