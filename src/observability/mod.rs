//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (subscriber setup, env filter)
//!     → access_log.rs (one event per request, noise filtered)
//!
//! Consumer:
//!     → stdout via tracing-subscriber's fmt layer (timestamps included)
//! ```

pub mod access_log;
pub mod logging;
