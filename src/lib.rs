//! Local development utilities for the Salesys front-end.
//!
//! - [`http::HttpServer`]: CORS-enabling reverse proxy onto the Salesys API
//! - [`webhook::WebhookServer`]: inbound-call webhook receiver
//! - [`webhook::Simulator`]: sample call-event sender

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod routing;
pub mod webhook;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{ProxyConfig, WebhookConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use webhook::{Simulator, WebhookServer};
