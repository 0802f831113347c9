//! Webhook receiver and simulator.
//!
//! # Data Flow
//! ```text
//! POST /webhook/inbound-call
//!     → server.rs (read body, CallEvent::parse, log)
//!     → forward.rs (raw body copy to the second server, result logged only)
//!     → WebhookAck (200)
//!
//! webhook-test simulate
//!     → simulate.rs (sample_call_event → POST per target → print outcome)
//! ```

pub mod forward;
pub mod payload;
pub mod server;
pub mod simulate;

pub use forward::{ForwardOutcome, Forwarder};
pub use payload::{CallEvent, WebhookAck};
pub use server::{WebhookError, WebhookServer};
pub use simulate::{simulate_webhook_call, SimulationReport, Simulator};
