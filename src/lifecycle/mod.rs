//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     Ctrl-C / SIGTERM → wait_for_interrupt() returns
//!
//! Shutdown (shutdown.rs):
//!     trigger() → every server's receiver fires → graceful stop
//! ```
//!
//! # Design Decisions
//! - Servers accept a shutdown receiver instead of installing signal handlers
//!   themselves, so tests can stop them without signals
//! - The main task owns the signal wait; the accept loop runs on a spawned task

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_interrupt;
