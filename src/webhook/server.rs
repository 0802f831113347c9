//! Webhook test server.
//!
//! # Responsibilities
//! - Accept `POST <webhook_path>` call events and acknowledge them
//! - Log the caller, callee, id and status of each event
//! - Hand a copy of the raw body to the [`Forwarder`]
//! - 404 everything else (or serve files when a static root is configured)

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use chrono::Local;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::WebhookServerConfig;
use crate::http::SetupError;
use crate::lifecycle::shutdown;
use crate::observability::access_log::{access_log_middleware, AccessLog};
use crate::webhook::forward::Forwarder;
use crate::webhook::payload::{display_field, CallEvent, WebhookAck};

/// Why a webhook body was rejected. Always a client error.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("{0}")]
    Body(#[source] axum::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, format!("Bad Request: {self}")).into_response()
    }
}

#[derive(Clone)]
pub struct WebhookState {
    pub webhook_path: Arc<str>,
    pub forwarder: Forwarder,
    pub max_body_bytes: usize,
    pub static_files: Option<ServeDir>,
}

pub struct WebhookServer {
    router: Router,
    config: WebhookServerConfig,
}

impl WebhookServer {
    pub fn new(config: WebhookServerConfig) -> Result<Self, SetupError> {
        let state = WebhookState {
            webhook_path: Arc::from(config.webhook_path.as_str()),
            forwarder: Forwarder::from_config(&config.forward)?,
            max_body_bytes: config.max_body_bytes,
            static_files: config.static_root.as_ref().map(ServeDir::new),
        };

        let access_log = AccessLog::new(&config.webhook_path);
        let router = Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(middleware::from_fn_with_state(access_log, access_log_middleware))
            .layer(TraceLayer::new_for_http());

        Ok(Self { router, config })
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
            webhook_path = %self.config.webhook_path,
            forward_url = ?self.config.forward.enabled.then_some(self.config.forward.url.as_str()),
            "Webhook test server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::recv(shutdown_rx))
            .await?;

        tracing::info!("Webhook test server stopped");
        Ok(())
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

async fn dispatch(State(state): State<WebhookState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    // Query strings are part of the match: `/webhook/inbound-call?x=1` is another route.
    let on_webhook_path = request
        .uri()
        .path_and_query()
        .is_some_and(|pq| pq.as_str() == &*state.webhook_path);

    if method == Method::POST && on_webhook_path {
        return match receive(&state, request).await {
            Ok(ack) => Json(ack).into_response(),
            Err(e) => {
                tracing::warn!(error = %e, "Error processing webhook");
                e.into_response()
            }
        };
    }

    if method == Method::GET || method == Method::HEAD {
        if let Some(static_files) = state.static_files.clone() {
            return match static_files.oneshot(request).await {
                Ok(response) => response.into_response(),
                Err(never) => match never {},
            };
        }
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

async fn receive(state: &WebhookState, request: Request<Body>) -> Result<WebhookAck, WebhookError> {
    let body = axum::body::to_bytes(request.into_body(), state.max_body_bytes)
        .await
        .map_err(WebhookError::Body)?;

    let event = CallEvent::parse(&body)?;

    tracing::info!(
        call_id = %display_field(event.id()),
        from = %display_field(event.caller()),
        to = %display_field(event.called()),
        status = %display_field(event.status()),
        "Webhook received"
    );

    // Outcome is logged by the forwarder and otherwise ignored.
    state.forwarder.forward(body).await;

    Ok(WebhookAck::received(event.id().cloned(), Local::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForwardConfig;
    use serde_json::{json, Value};

    fn server() -> WebhookServer {
        let config = WebhookServerConfig {
            forward: ForwardConfig {
                enabled: false,
                ..ForwardConfig::default()
            },
            ..WebhookServerConfig::default()
        };
        WebhookServer::new(config).unwrap()
    }

    async fn send(method: Method, uri: &str, body: &'static str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        server().router().oneshot(request).await.unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn acknowledges_valid_event() {
        let response = send(
            Method::POST,
            "/webhook/inbound-call",
            r#"{"id":"X","number":{"caller":"A","called":"B"},"status":"trying"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let ack: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(ack["success"], json!(true));
        assert_eq!(ack["callId"], json!("X"));
        assert_eq!(ack["message"], json!("Webhook received and processed"));
        assert!(ack["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let response = send(Method::POST, "/webhook/inbound-call", "{oops").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.starts_with("Bad Request: "));
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let response = send(Method::POST, "/webhook/outbound-call", "{}").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn query_string_is_a_different_route() {
        let response = send(Method::POST, "/webhook/inbound-call?x=1", r#"{"id":"X"}"#).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_on_webhook_path_is_not_found() {
        let response = send(Method::GET, "/webhook/inbound-call", "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
