//! Call-event payloads and the acknowledgement returned for them.
//!
//! The payload is not schema-checked. It is decoded into a loose JSON map and
//! the handful of fields worth logging are looked up with explicit presence
//! checks.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// An inbound call-state event. Any JSON object is accepted.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct CallEvent(Map<String, Value>);

impl CallEvent {
    /// Decode a raw body. Fails on invalid JSON and on JSON that is not an object.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn id(&self) -> Option<&Value> {
        present(self.0.get("id"))
    }

    pub fn caller(&self) -> Option<&Value> {
        present(self.0.get("number").and_then(|n| n.get("caller")))
    }

    pub fn called(&self) -> Option<&Value> {
        present(self.0.get("number").and_then(|n| n.get("called")))
    }

    pub fn status(&self) -> Option<&Value> {
        present(self.0.get("status"))
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Render a field for a log line: strings bare, anything else as JSON.
pub fn display_field(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        Some(Value::String(s)) => Cow::Borrowed(s),
        Some(other) => Cow::Owned(other.to_string()),
        None => Cow::Borrowed("null"),
    }
}

/// Body of every successful webhook response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
    pub success: bool,
    pub message: String,
    pub call_id: Option<Value>,
    pub timestamp: String,
}

impl WebhookAck {
    pub const MESSAGE: &'static str = "Webhook received and processed";

    pub fn received(call_id: Option<Value>, now: DateTime<Local>) -> Self {
        Self {
            success: true,
            message: Self::MESSAGE.to_string(),
            call_id,
            timestamp: iso_timestamp(now),
        }
    }
}

/// Local time, ISO-8601 with microseconds and no offset (`2025-03-01T14:05:09.123456`).
pub fn iso_timestamp(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
