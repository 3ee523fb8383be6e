//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the function route and a health probe
//! - Wire up middleware (request ID, trace, timeout)
//! - Decode invocation bodies and dispatch to the function
//! - Serve until the shutdown signal fires

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::FunctionConfig;
use crate::function::{FaunaKeyFunction, FunctionResponse, InvocationEvent};
use crate::http::request::{request_id_of, MakeRequestUuid};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics::{self, Outcome};

/// Largest invocation body accepted: the 6 MiB synchronous payload limit
/// of the functions platform. Larger bodies get 413, not a 401.
pub const MAX_INVOCATION_BYTES: usize = 6 * 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub function: FaunaKeyFunction,
}

/// HTTP server hosting the function.
pub struct FunctionServer {
    router: Router,
    config: FunctionConfig,
}

impl FunctionServer {
    /// Create a server whose function reads the configured environment variable.
    pub fn new(config: FunctionConfig) -> Self {
        let function = FaunaKeyFunction::from_config(&config);
        Self::with_function(config, function)
    }

    /// Create a server around an already-built function.
    pub fn with_function(config: FunctionConfig, function: FaunaKeyFunction) -> Self {
        let state = AppState { function };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FunctionConfig, state: AppState) -> Router {
        Router::new()
            .route(
                &config.function.path,
                any(invoke_handler).layer(DefaultBodyLimit::max(MAX_INVOCATION_BYTES)),
            )
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FunctionConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.function.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Function handler. A body that reads but does not decode is an anonymous
/// invocation; a body that cannot be read at all (e.g. too large) is rejected.
async fn invoke_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id_of(&headers);

    let body = match body {
        Ok(bytes) => bytes,
        Err(rejection) => {
            tracing::warn!(
                request_id = %request_id,
                status = %rejection.status(),
                error = %rejection.body_text(),
                "Invocation body rejected"
            );
            return rejection.into_response();
        }
    };

    let event = match InvocationEvent::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Malformed invocation event");
            InvocationEvent::default()
        }
    };

    let response: FunctionResponse = state.function.invoke(&event);
    tracing::debug!(
        request_id = %request_id,
        status = response.status_code,
        "Invocation complete"
    );
    metrics::record_invocation(Outcome::from_status(response.status_code), start_time);
    response.into_response()
}

async fn health_handler() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{FixedClock, StaticSecret};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const NOW: f64 = 1_700_000_000.0;

    fn test_router() -> Router {
        let function = FaunaKeyFunction::new(
            Arc::new(StaticSecret::new("fnAEsecret")),
            Arc::new(FixedClock(NOW)),
        );
        FunctionServer::with_function(FunctionConfig::default(), function).router()
    }

    async fn post(body: impl Into<Body>) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/.netlify/functions/faunakey")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_user_gets_key() {
        let event = json!({ "clientContext": { "user": { "exp": NOW + 1.0, "sub": "u-1" } } });
        let (status, body) = post(event.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "faunaKey": "fnAEsecret" }));
    }

    #[tokio::test]
    async fn test_expired_user_is_unauthorized() {
        let event = json!({ "clientContext": { "user": { "exp": NOW - 1.0 } } });
        let (status, body) = post(event.to_string()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "User token invalid or not present" }));
    }

    #[tokio::test]
    async fn test_empty_and_malformed_bodies_are_unauthorized() {
        let (status, _) = post(Body::empty()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = post("{not json").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "User token invalid or not present");
    }

    #[tokio::test]
    async fn test_large_claim_under_limit_gets_key() {
        let event = json!({
            "clientContext": {
                "user": {
                    "exp": NOW + 60.0,
                    "user_metadata": { "bio": "x".repeat(1024 * 1024) }
                }
            }
        });
        let (status, body) = post(event.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "faunaKey": "fnAEsecret" }));
    }

    #[tokio::test]
    async fn test_oversized_body_is_413_not_401() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/.netlify/functions/faunakey")
                    .body(Body::from(vec![b' '; MAX_INVOCATION_BYTES + 1]))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_health_and_request_id() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_caller_request_id_is_echoed() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "trace-me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-me");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let response = test_router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
