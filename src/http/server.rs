//! CORS proxy server.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (tracing, CORS)
//! - Forward `/proxy/` POSTs to the upstream origin
//! - Serve static files for GET/HEAD

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{
        header::{self, HeaderMap, HeaderValue},
        Method, Request, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::error::{ProxyError, SetupError};
use crate::http::middleware::cors_middleware;
use crate::lifecycle::shutdown;
use crate::routing::ProxyRoute;

/// Request headers copied onto the upstream request. Nothing else is forwarded.
const FORWARDED_HEADERS: [header::HeaderName; 2] = [header::AUTHORIZATION, header::CONTENT_TYPE];

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub route: Arc<ProxyRoute>,
    pub client: reqwest::Client,
    pub user_agent: HeaderValue,
    pub max_body_bytes: usize,
    pub static_files: ServeDir,
}

/// HTTP server for the CORS proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, SetupError> {
        // One connection per forwarded request: idle connections are never kept.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .pool_max_idle_per_host(0)
            .build()?;

        let state = AppState {
            route: Arc::new(ProxyRoute::from_config(&config.upstream)),
            client,
            user_agent: HeaderValue::from_str(&config.upstream.user_agent)?,
            max_body_bytes: config.upstream.max_body_bytes,
            static_files: ServeDir::new(&config.static_files.root),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(middleware::from_fn(cors_middleware))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.origin,
            static_root = %self.config.static_files.root.display(),
            "CORS proxy starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::recv(shutdown_rx))
            .await?;

        tracing::info!("CORS proxy stopped");
        Ok(())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Single entry point; OPTIONS never gets here (answered by the CORS layer).
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    match *request.method() {
        Method::POST => proxy_post(&state, request).await,
        Method::GET | Method::HEAD => serve_static(&state, request).await,
        _ => (StatusCode::NOT_IMPLEMENTED, "Unsupported method").into_response(),
    }
}

async fn proxy_post(state: &AppState, request: Request<Body>) -> Response {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let Some(target) = state.route.rewrite(path_and_query) else {
        tracing::debug!(path = %request.uri().path(), "POST outside proxy prefix");
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    tracing::info!(url = %target, "Forwarding request");

    let (parts, body) = request.into_parts();
    match forward(state, &target, &parts.headers, body).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(url = %target, error = %e, "Proxy error");
            e.into_response()
        }
    }
}

async fn forward(
    state: &AppState,
    target: &str,
    headers: &HeaderMap,
    body: Body,
) -> Result<Response, ProxyError> {
    let body = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(ProxyError::Body)?;

    let mut outbound = state
        .client
        .post(target)
        .header(header::USER_AGENT, state.user_agent.clone());

    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            outbound = outbound.header(name, value.clone());
        }
    }
    if !body.is_empty() {
        outbound = outbound.body(body);
    }

    let upstream = outbound.send().await?;
    let status = upstream.status();
    let bytes = upstream.bytes().await?;

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(url = %target, status = status.as_u16(), "Upstream HTTP error");
    } else {
        tracing::info!(url = %target, status = status.as_u16(), "Upstream success");
    }

    Ok(json_response(status, bytes))
}

/// Upstream bodies are relayed byte-for-byte, always labelled as JSON.
fn json_response(status: StatusCode, body: Bytes) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

async fn serve_static(state: &AppState, request: Request<Body>) -> Response {
    match state.static_files.clone().oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
