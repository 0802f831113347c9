//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound POST (path + query)
//!     → matcher.rs (prefix check, prefix strip)
//!     → rewrite.rs (join remainder onto upstream origin)
//!     → Return: target URL or NoMatch (404)
//! ```
//!
//! # Design Decisions
//! - Route compiled at startup, immutable at runtime
//! - Prefix matching only, case-sensitive
//! - Query string travels with the path untouched

pub mod matcher;
pub mod rewrite;

pub use matcher::PathPrefixMatcher;
pub use rewrite::ProxyRoute;
