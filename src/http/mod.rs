//! HTTP protocol handling for the CORS proxy.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → middleware/cors.rs (preflight short-circuit, CORS headers on the way out)
//!     → dispatch by method:
//!         POST     → routing::ProxyRoute → upstream via reqwest → relay
//!         GET/HEAD → ServeDir
//!         other    → 501
//! ```

pub mod error;
pub mod middleware;
pub mod server;

pub use error::{ProxyError, SetupError};
pub use server::HttpServer;
