//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Bind server to listener
//! - Stop on the shutdown signal, aborting in-flight delays

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::demo::{AbortPolicy, DemoOperation, DemoService};
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::outbound::{OutboundCallError, OutboundClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Direct delay + busy-loop path.
    pub operation: DemoOperation,
    /// Delay-only service path.
    pub service: DemoService,
    /// Relay client for `/httpclient`.
    pub outbound: OutboundClient,
}

impl AppState {
    /// Build handler state from configuration.
    pub fn from_config(config: &ServiceConfig, shutdown: Arc<Shutdown>) -> Result<Self, OutboundCallError> {
        let operation = DemoOperation::new(&config.service, shutdown);
        let service = DemoService::new(operation.clone(), AbortPolicy::LogAndDefault);
        let outbound = OutboundClient::new(&config.outbound)?;

        Ok(Self {
            operation,
            service,
            outbound,
        })
    }
}

/// HTTP server for the demo service.
pub struct HttpServer {
    router: Router,
    shutdown: Arc<Shutdown>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, shutdown: Arc<Shutdown>) -> Result<Self, OutboundCallError> {
        let state = AppState::from_config(&config, shutdown.clone())?;
        let request_timeout = config.timeouts.request_secs.map(Duration::from_secs);
        let router = build_router(state, request_timeout);

        tracing::info!(
            env = %config.service.env,
            outbound_url = %config.outbound.url,
            "HTTP server initialized"
        );

        Ok(Self { router, shutdown })
    }

    /// Run the server until the shutdown coordinator fires.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let shutdown = self.shutdown.clone();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
///
/// Layers run outermost first: request ID assignment, request ID
/// propagation onto the response, trace span, optional timeout, per-route
/// metrics. Without `request_timeout` requests are unbounded.
pub fn build_router(state: AppState, request_timeout: Option<Duration>) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %request_id
        )
    });

    let router = Router::new()
        .route("/demo", post(handlers::demo))
        .route("/demo/service", post(handlers::demo_service))
        .route("/camel", post(handlers::camel))
        .route("/httpclient", post(handlers::httpclient))
        .route("/health", get(handlers::health))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state);

    let router = match request_timeout {
        Some(timeout) => router.layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)),
        None => router,
    };

    router.layer(
        ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(propagate_request_id_layer())
            .layer(trace),
    )
}

/// Record count and latency per matched route.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    metrics::record_request(&endpoint, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router(outbound_url: &str) -> Router {
        let mut config = ServiceConfig::default();
        config.service.env = "unit".into();
        config.service.burn_iterations = 1_000;
        config.outbound.url = outbound_url.into();
        config.outbound.timeout_secs = Some(2);

        let state = AppState::from_config(&config, Arc::new(Shutdown::new())).unwrap();
        build_router(state, None)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn header() -> Value {
        json!({"MSGID": "MSG0001", "SOURCECHANNEL": "APP", "TXNSEQ": "20240101000001", "O360SEQ": "S1"})
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router("http://127.0.0.1:1/")
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_REQUEST_ID));
        assert_eq!(json_body(response).await, json!({"TRANRS": {"data": "health is good"}}));
    }

    #[tokio::test]
    async fn test_demo_echoes_header_and_reports_time() {
        let response = test_router("http://127.0.0.1:1/")
            .oneshot(post_json("/demo", json!({"MWHEADER": header(), "TRANRQ": {"delay": 0, "forCount": 1}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["MWHEADER"], header());
        assert_eq!(body["TRANRS"]["env"], "unit");
        assert_eq!(body["TRANRS"]["data"], "Total time spent: 0 seconds");
    }

    #[tokio::test]
    async fn test_blank_msgid_rejected_before_delay() {
        let started = Instant::now();
        let response = test_router("http://127.0.0.1:1/")
            .oneshot(post_json("/demo", json!({
                "MWHEADER": {"MSGID": "", "SOURCECHANNEL": "APP", "TXNSEQ": "1"},
                "TRANRQ": {"delay": 5, "forCount": 0}
            })))
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["details"], json!(["MSGID is blank"]));
    }

    #[tokio::test]
    async fn test_negative_delay_rejected() {
        let response = test_router("http://127.0.0.1:1/")
            .oneshot(post_json("/demo", json!({"MWHEADER": header(), "TRANRQ": {"delay": -1}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["details"], json!(["delay must not be negative"]));
    }

    #[tokio::test]
    async fn test_null_delay_reads_as_zero() {
        let response = test_router("http://127.0.0.1:1/")
            .oneshot(post_json("/demo", json!({"MWHEADER": header(), "TRANRQ": {"delay": null, "forCount": null}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["TRANRS"]["data"], "Total time spent: 0 seconds");
    }

    #[tokio::test]
    async fn test_missing_tranrq_rejected() {
        let response = test_router("http://127.0.0.1:1/")
            .oneshot(post_json("/camel", json!({"MWHEADER": header()})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["details"], json!(["TRANRQ is null"]));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/demo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = test_router("http://127.0.0.1:1/").oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "malformed_body");
    }

    #[tokio::test]
    async fn test_camel_echoes_header_only() {
        let response = test_router("http://127.0.0.1:1/")
            .oneshot(post_json("/camel", json!({"MWHEADER": header(), "TRANRQ": {}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"MWHEADER": header()}));
    }

    #[tokio::test]
    async fn test_demo_service_returns_empty_envelope() {
        let response = test_router("http://127.0.0.1:1/")
            .oneshot(post_json("/demo/service", json!({"MWHEADER": header(), "TRANRQ": {"delay": 0}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({}));
    }

    #[tokio::test]
    async fn test_httpclient_network_failure_is_bad_gateway() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let response = test_router(&format!("http://{}/god", addr))
            .oneshot(post_json("/httpclient", json!({"MWHEADER": header(), "TRANRQ": {}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"], "outbound_call_failed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_config_does_not_cut_long_delay() {
        let router = HttpServer::new(ServiceConfig::default(), Arc::new(Shutdown::new()))
            .unwrap()
            .router();
        let response = router
            .oneshot(post_json("/demo", json!({"MWHEADER": header(), "TRANRQ": {"delay": 301, "forCount": 0}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["TRANRS"]["data"], "Total time spent: 301 seconds");
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_timeout_yields_408() {
        let mut config = ServiceConfig::default();
        config.timeouts.request_secs = Some(1);
        let router = HttpServer::new(config, Arc::new(Shutdown::new())).unwrap().router();

        let response = router
            .oneshot(post_json("/demo", json!({"MWHEADER": header(), "TRANRQ": {"delay": 5}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_supplied_request_id_propagated() {
        let request = Request::builder()
            .uri("/health")
            .header(X_REQUEST_ID, "req-42")
            .body(Body::empty())
            .unwrap();
        let response = test_router("http://127.0.0.1:1/").oneshot(request).await.unwrap();

        assert_eq!(response.headers()[X_REQUEST_ID], "req-42");
    }
}
