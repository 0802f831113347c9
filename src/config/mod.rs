//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI overrides (binaries)
//!     → ProxyConfig / WebhookConfig (immutable, moved into the server)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; running without a file gives the stock dev ports
//! - Config is immutable once a server is constructed
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    ForwardConfig, ListenerConfig, ProxyConfig, SimulationTarget, SimulatorConfig,
    StaticFilesConfig, UpstreamConfig, WebhookConfig, WebhookServerConfig,
};
pub use validation::{Validate, ValidationError};
