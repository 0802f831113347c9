//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig.bind_address
//!     → listener.rs (parse, bind)
//!     → tokio TcpListener handed to a server's run()
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
