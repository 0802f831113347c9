//! Per-request access logging.
//!
//! GET requests outside the webhook path (favicons, static pages) are not
//! logged; everything else gets one line with method, path, status and latency.

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

/// Path whose GET requests are still worth logging.
#[derive(Debug, Clone)]
pub struct AccessLog {
    watched_path: Arc<str>,
}

impl AccessLog {
    pub fn new(watched_path: &str) -> Self {
        Self {
            watched_path: Arc::from(watched_path),
        }
    }

    pub fn should_log(&self, method: &Method, path: &str) -> bool {
        *method != Method::GET || path == &*self.watched_path
    }
}

pub async fn access_log_middleware(
    State(log): State<AccessLog>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    if log.should_log(&method, &path) {
        tracing::info!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "{} {} {}",
            method,
            path,
            response.status().as_u16()
        );
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_outside_webhook_path_is_quiet() {
        let log = AccessLog::new("/webhook/inbound-call");
        assert!(!log.should_log(&Method::GET, "/favicon.ico"));
        assert!(!log.should_log(&Method::GET, "/test.html"));
    }

    #[test]
    fn get_on_webhook_path_is_logged() {
        let log = AccessLog::new("/webhook/inbound-call");
        assert!(log.should_log(&Method::GET, "/webhook/inbound-call"));
    }

    #[test]
    fn non_get_is_always_logged() {
        let log = AccessLog::new("/webhook/inbound-call");
        assert!(log.should_log(&Method::POST, "/webhook/inbound-call"));
        assert!(log.should_log(&Method::POST, "/elsewhere"));
        assert!(log.should_log(&Method::OPTIONS, "/"));
    }
}
