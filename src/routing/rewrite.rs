//! Upstream target construction.

use crate::config::UpstreamConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// The single proxy route: `<prefix><rest>` → `<origin>/<rest>`.
#[derive(Debug, Clone)]
pub struct ProxyRoute {
    matcher: PathPrefixMatcher,
    /// Origin without a trailing slash.
    origin: String,
}

impl ProxyRoute {
    pub fn new(origin: &str, prefix: impl Into<String>) -> Self {
        Self {
            matcher: PathPrefixMatcher::new(prefix),
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(&config.origin, config.path_prefix.clone())
    }

    /// Build the upstream target for an inbound path (query included).
    ///
    /// Returns `None` if the path is outside the proxy prefix.
    pub fn rewrite(&self, path_and_query: &str) -> Option<String> {
        let rest = self.matcher.strip(path_and_query)?;
        Some(format!("{}/{}", self.origin, rest))
    }
}
