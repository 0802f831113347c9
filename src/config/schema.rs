//! Configuration schema definitions.
//!
//! Every struct derives Serde traits so it can be read from a TOML file, and
//! every field has a default so an empty file (or no file at all) yields the
//! stock development setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the CORS proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Upstream API the `/proxy/` prefix forwards to.
    pub upstream: UpstreamConfig,

    /// Static file serving for GET requests.
    pub static_files: StaticFilesConfig,
}

impl ProxyConfig {
    pub const DEFAULT_BIND_ADDRESS: &'static str = "0.0.0.0:3000";
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl ListenerConfig {
    pub fn new(bind_address: impl Into<String>) -> Self {
        Self {
            bind_address: bind_address.into(),
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self::new(ProxyConfig::DEFAULT_BIND_ADDRESS)
    }
}

/// Upstream forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin requests are rewritten onto (scheme + host, no path).
    pub origin: String,

    /// Path prefix stripped from inbound POST requests.
    pub path_prefix: String,

    /// User-Agent sent on every forwarded request.
    pub user_agent: String,

    /// Total timeout for one upstream exchange.
    pub timeout_secs: u64,

    /// Largest inbound body that will be forwarded.
    pub max_body_bytes: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "https://app.salesys.se".to_string(),
            path_prefix: "/proxy/".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
                .to_string(),
            timeout_secs: 10,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served for GET/HEAD requests.
    pub root: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// Root configuration for the webhook test binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WebhookConfig {
    /// Receiver settings.
    pub server: WebhookServerConfig,

    /// Simulator settings (`webhook-test simulate`).
    pub simulator: SimulatorConfig,
}

/// Webhook receiver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookServerConfig {
    pub listener: ListenerConfig,

    /// The only functional endpoint.
    pub webhook_path: String,

    /// Secondary server that receives a copy of every webhook body.
    pub forward: ForwardConfig,

    /// When set, GET/HEAD requests serve files from this directory
    /// (e.g. a `test.html` page). Unset means every GET is a 404.
    pub static_root: Option<PathBuf>,

    pub max_body_bytes: usize,
}

impl WebhookServerConfig {
    pub const DEFAULT_BIND_ADDRESS: &'static str = "0.0.0.0:8080";
    pub const DEFAULT_WEBHOOK_PATH: &'static str = "/webhook/inbound-call";
}

impl Default for WebhookServerConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::new(Self::DEFAULT_BIND_ADDRESS),
            webhook_path: Self::DEFAULT_WEBHOOK_PATH.to_string(),
            forward: ForwardConfig::default(),
            static_root: None,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Best-effort forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardConfig {
    pub enabled: bool,

    /// Target URL for the raw body copy.
    pub url: String,

    pub timeout_secs: u64,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://localhost:3000/webhook/inbound-call".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Simulator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Targets called in order.
    pub targets: Vec<SimulationTarget>,

    /// Pause between consecutive calls.
    pub delay_secs: u64,

    pub timeout_secs: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                SimulationTarget::required("http://localhost:8080/webhook/inbound-call", "test-1"),
                SimulationTarget::required("http://localhost:8080/webhook/inbound-call", "test-2"),
                SimulationTarget::optional("http://localhost:3000/webhook/inbound-call", "prod-1"),
            ],
            delay_secs: 2,
            timeout_secs: 5,
        }
    }
}

/// One simulated webhook delivery.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SimulationTarget {
    pub url: String,

    /// Suffix embedded in the generated call id.
    pub call_suffix: String,

    /// Optional targets may be down; their failure is reported as a skip.
    #[serde(default)]
    pub optional: bool,
}

impl SimulationTarget {
    pub fn required(url: impl Into<String>, call_suffix: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            call_suffix: call_suffix.into(),
            optional: false,
        }
    }

    pub fn optional(url: impl Into<String>, call_suffix: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::required(url, call_suffix)
        }
    }
}
