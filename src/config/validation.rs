//! Configuration validation.
//!
//! Serde covers syntax; this module covers semantics. Validation is a pure
//! function over the loaded config and reports every problem, not just the
//! first one.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::{
    ListenerConfig, ProxyConfig, SimulatorConfig, UpstreamConfig, WebhookConfig,
    WebhookServerConfig,
};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid bind address {value:?}")]
    BindAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL {value:?}")]
    Url { field: &'static str, value: String },

    #[error("{field}: upstream origin must be http(s) with no path, got {value:?}")]
    Origin { field: &'static str, value: String },

    #[error("{field}: path {value:?} must start with '/'")]
    Path { field: &'static str, value: String },

    #[error("{field}: prefix {value:?} must start and end with '/'")]
    Prefix { field: &'static str, value: String },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },
}

/// Configurations that can check themselves after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        self.collect_errors(&mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn collect_errors(&self, errors: &mut Vec<ValidationError>);
}

impl Validate for ProxyConfig {
    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        check_listener("listener.bind_address", &self.listener, errors);
        check_upstream(&self.upstream, errors);
    }
}

impl Validate for WebhookConfig {
    fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        check_webhook_server(&self.server, errors);
        check_simulator(&self.simulator, errors);
    }
}

fn check_listener(field: &'static str, listener: &ListenerConfig, errors: &mut Vec<ValidationError>) {
    if listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress {
            field,
            value: listener.bind_address.clone(),
        });
    }
}

fn check_upstream(upstream: &UpstreamConfig, errors: &mut Vec<ValidationError>) {
    match Url::parse(&upstream.origin) {
        Ok(url) => {
            let http = matches!(url.scheme(), "http" | "https");
            let bare = url.path() == "/" && url.query().is_none() && url.fragment().is_none();
            if !http || !bare || url.host().is_none() {
                errors.push(ValidationError::Origin {
                    field: "upstream.origin",
                    value: upstream.origin.clone(),
                });
            }
        }
        Err(_) => errors.push(ValidationError::Url {
            field: "upstream.origin",
            value: upstream.origin.clone(),
        }),
    }

    let prefix = &upstream.path_prefix;
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        errors.push(ValidationError::Prefix {
            field: "upstream.path_prefix",
            value: prefix.clone(),
        });
    }
    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "upstream.timeout_secs",
        });
    }
    if upstream.max_body_bytes == 0 {
        errors.push(ValidationError::Zero {
            field: "upstream.max_body_bytes",
        });
    }
}

fn check_webhook_server(server: &WebhookServerConfig, errors: &mut Vec<ValidationError>) {
    check_listener("server.listener.bind_address", &server.listener, errors);

    if !server.webhook_path.starts_with('/') {
        errors.push(ValidationError::Path {
            field: "server.webhook_path",
            value: server.webhook_path.clone(),
        });
    }
    if server.forward.enabled {
        check_url("server.forward.url", &server.forward.url, errors);
        if server.forward.timeout_secs == 0 {
            errors.push(ValidationError::Zero {
                field: "server.forward.timeout_secs",
            });
        }
    }
    if server.max_body_bytes == 0 {
        errors.push(ValidationError::Zero {
            field: "server.max_body_bytes",
        });
    }
}

fn check_simulator(simulator: &SimulatorConfig, errors: &mut Vec<ValidationError>) {
    for target in &simulator.targets {
        check_url("simulator.targets.url", &target.url, errors);
    }
    if simulator.timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "simulator.timeout_secs",
        });
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if Url::parse(value).is_err() {
        errors.push(ValidationError::Url {
            field,
            value: value.to_string(),
        });
    }
}
