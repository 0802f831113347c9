//! Error types crossing the HTTP boundary.

use axum::{
    http::{header::InvalidHeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure while building a server from its configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid User-Agent: {0}")]
    UserAgent(#[from] InvalidHeaderValue),
}

/// Failure while forwarding one request upstream.
///
/// Upstream 4xx/5xx answers are not errors; they are relayed as-is.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("{0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Proxy error: {self}")).into_response()
    }
}
